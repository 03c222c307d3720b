//! Synthetic substitution strategy
//!
//! Replaces each span with a fixed, obviously fictitious value of the same
//! category so downstream code still receives a plausible string.

use super::ReplacementStrategy;
use crate::detection::{DetectionMatch, PhiCategory};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticStrategy;

impl SyntheticStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Synthetic token for a category
    pub fn token(category: PhiCategory) -> &'static str {
        match category {
            PhiCategory::Name => "Jane Roe",
            PhiCategory::Email | PhiCategory::Phone => "CONTACT-INFO",
            PhiCategory::Ssn => "XXX-XX-XXXX",
            PhiCategory::Date => "01/01/1900",
            PhiCategory::Address => "123 Main Street",
            PhiCategory::Zip => "00000",
            PhiCategory::Mrn => "MRN-000000",
            PhiCategory::InsuranceId => "INS-000000",
            PhiCategory::AccountNumber => "ACCT-000000",
            PhiCategory::LicenseNumber => "LIC-000000",
            PhiCategory::VehicleId => "VIN-00000000000000",
            PhiCategory::DeviceId => "DEVICE-000000",
            PhiCategory::BiometricId => "BIO-000000",
            PhiCategory::Url => "https://example.org",
            PhiCategory::IpAddress => "0.0.0.0",
        }
    }
}

impl ReplacementStrategy for SyntheticStrategy {
    fn replacement(&self, detection: &DetectionMatch) -> String {
        Self::token(detection.category).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PhiCategory::Name, "Jane Roe")]
    #[test_case(PhiCategory::Email, "CONTACT-INFO")]
    #[test_case(PhiCategory::Phone, "CONTACT-INFO")]
    #[test_case(PhiCategory::Ssn, "XXX-XX-XXXX")]
    #[test_case(PhiCategory::IpAddress, "0.0.0.0")]
    fn test_token(category: PhiCategory, expected: &str) {
        assert_eq!(SyntheticStrategy::token(category), expected);
    }

    #[test]
    fn test_every_category_has_token() {
        for category in PhiCategory::ALL {
            assert!(!SyntheticStrategy::token(category).is_empty());
        }
    }
}
