//! Redaction strategy

use super::ReplacementStrategy;
use crate::detection::{DetectionMatch, PhiCategory};

/// Redaction strategy - replaces PHI with `[REDACTED:<LABEL>]` tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionStrategy;

impl RedactionStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder for a category
    pub fn placeholder(category: PhiCategory) -> String {
        format!("[REDACTED:{}]", category.label())
    }
}

impl ReplacementStrategy for RedactionStrategy {
    fn replacement(&self, detection: &DetectionMatch) -> String {
        Self::placeholder(detection.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RiskLevel;

    #[test]
    fn test_redaction() {
        let detection = DetectionMatch {
            category: PhiCategory::Email,
            value: "test@example.com".to_string(),
            start: 0,
            end: 16,
            risk_level: RiskLevel::Medium,
            pattern_name: "email_address".to_string(),
        };
        assert_eq!(RedactionStrategy::new().replacement(&detection), "[REDACTED:EMAIL]");
    }

    #[test]
    fn test_placeholder_labels() {
        assert_eq!(RedactionStrategy::placeholder(PhiCategory::Ssn), "[REDACTED:SSN]");
        assert_eq!(
            RedactionStrategy::placeholder(PhiCategory::InsuranceId),
            "[REDACTED:INSURANCE_ID]"
        );
    }
}
