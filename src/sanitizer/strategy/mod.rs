//! Replacement strategies
//!
//! A strategy decides what replaces a detected PHI span. The sanitizer
//! verifies the result never reintroduces the detected value.

pub mod redaction;
pub mod synthetic;

pub use redaction::RedactionStrategy;
pub use synthetic::SyntheticStrategy;

use super::SanitizationMode;
use crate::detection::DetectionMatch;

/// Trait for replacement strategy implementations
pub trait ReplacementStrategy: Send + Sync {
    /// Text substituted for a detected span
    fn replacement(&self, detection: &DetectionMatch) -> String;
}

/// Strategy implementing `mode`
pub fn strategy_for(mode: SanitizationMode) -> &'static dyn ReplacementStrategy {
    match mode {
        SanitizationMode::Redact => &RedactionStrategy,
        SanitizationMode::Anonymize => &SyntheticStrategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{PhiCategory, RiskLevel};

    #[test]
    fn test_strategy_for_mode() {
        let detection = DetectionMatch {
            category: PhiCategory::Phone,
            value: "555-123-4567".to_string(),
            start: 0,
            end: 12,
            risk_level: RiskLevel::Medium,
            pattern_name: "us_phone".to_string(),
        };
        assert_eq!(
            strategy_for(SanitizationMode::Redact).replacement(&detection),
            "[REDACTED:PHONE]"
        );
        assert_eq!(
            strategy_for(SanitizationMode::Anonymize).replacement(&detection),
            "CONTACT-INFO"
        );
    }
}
