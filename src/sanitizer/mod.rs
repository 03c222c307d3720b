//! PHI sanitization
//!
//! [`PhiSanitizer`] walks JSON values and replaces detected PHI in every
//! string leaf, keeping object keys, array lengths and non-string scalars as
//! they were.
//!
//! ```
//! use phiguard::detection::RegexDetector;
//! use phiguard::sanitizer::{PhiSanitizer, SanitizationMode};
//! use std::sync::Arc;
//!
//! let sanitizer = PhiSanitizer::new(Arc::new(RegexDetector::new()), SanitizationMode::Redact);
//! assert_eq!(sanitizer.redact_phi("SSN: 123-45-6789")?, "SSN: [REDACTED:SSN]");
//! # Ok::<(), phiguard::domain::PhiGuardError>(())
//! ```

pub mod engine;
pub mod report;
pub mod strategy;

pub use engine::PhiSanitizer;
pub use report::SanitizationReport;
pub use strategy::{RedactionStrategy, ReplacementStrategy, SyntheticStrategy};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How detected spans are replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizationMode {
    /// Category-tagged placeholder such as `[REDACTED:SSN]`
    #[default]
    Redact,
    /// Fixed fictitious value of the same category
    Anonymize,
}

impl fmt::Display for SanitizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redact => f.write_str("redact"),
            Self::Anonymize => f.write_str("anonymize"),
        }
    }
}

impl FromStr for SanitizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redact" => Ok(Self::Redact),
            "anonymize" => Ok(Self::Anonymize),
            _ => Err(format!(
                "Invalid sanitizer mode '{s}'. Must be one of: redact, anonymize"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("Redact".parse::<SanitizationMode>().unwrap(), SanitizationMode::Redact);
        assert_eq!(
            "anonymize".parse::<SanitizationMode>().unwrap(),
            SanitizationMode::Anonymize
        );
        assert!("mask".parse::<SanitizationMode>().is_err());
        assert_eq!(SanitizationMode::Anonymize.to_string(), "anonymize");
    }

    #[test]
    fn test_mode_serde() {
        let mode: SanitizationMode = serde_json::from_str("\"anonymize\"").unwrap();
        assert_eq!(mode, SanitizationMode::Anonymize);
        assert_eq!(SanitizationMode::default(), SanitizationMode::Redact);
    }
}
