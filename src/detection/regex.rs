//! Regex-based PHI detector

use super::models::{DetectionMatch, PhiCategory, SensitivityLevel};
use super::patterns::PatternRegistry;
use super::PhiDetector;
use crate::config::DetectionConfig;
use crate::domain::{PhiGuardError, Result};
use std::sync::Arc;

/// Regex-based PHI detector
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
    sensitivity: SensitivityLevel,
}

impl RegexDetector {
    /// Create a detector over the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(PatternRegistry::global())
    }

    /// Create a detector with a custom pattern registry
    pub fn with_registry(registry: Arc<PatternRegistry>) -> Self {
        Self {
            pattern_registry: registry,
            sensitivity: SensitivityLevel::default(),
        }
    }

    /// Create a detector from the `[detection]` configuration section
    ///
    /// A configured pattern file that cannot be loaded falls back to the
    /// built-in patterns.
    pub fn from_config(config: &DetectionConfig) -> Self {
        let registry = match config.pattern_file.as_deref() {
            Some(path) => Arc::new(PatternRegistry::load(Some(path))),
            None => PatternRegistry::global(),
        };
        Self::with_registry(registry).with_sensitivity(config.sensitivity)
    }

    /// Set the sensitivity level
    pub fn with_sensitivity(mut self, sensitivity: SensitivityLevel) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn sensitivity(&self) -> SensitivityLevel {
        self.sensitivity
    }

    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.pattern_registry
    }
}

impl PhiDetector for RegexDetector {
    fn detect_phi(&self, text: &str) -> Result<Vec<DetectionMatch>> {
        let mut matches = Vec::new();
        if text.is_empty() {
            return Ok(matches);
        }

        for pattern in self.pattern_registry.patterns() {
            for found in pattern.matcher.find_iter(text) {
                let found = found.map_err(|_| PhiGuardError::Detection("pattern matcher failed"))?;
                if found.start() == found.end() {
                    continue;
                }

                matches.push(DetectionMatch {
                    category: pattern.category,
                    value: found.as_str().to_string(),
                    start: found.start(),
                    end: found.end(),
                    risk_level: pattern.risk_level,
                    pattern_name: pattern.name.clone(),
                });
            }
        }

        crate::log_detection!(matches.len(), text.len());

        Ok(matches)
    }

    fn contains_phi(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        for pattern in self.pattern_registry.patterns() {
            for found in pattern.matcher.find_iter(text) {
                match found {
                    Ok(m) if m.start() < m.end() => return true,
                    Ok(_) => continue,
                    Err(_) => {
                        tracing::warn!(
                            pattern = %pattern.name,
                            "Pattern matcher failed, treating text as PHI"
                        );
                        return true;
                    }
                }
            }
        }

        false
    }

    fn phi_types(&self) -> Vec<PhiCategory> {
        self.pattern_registry.categories().into_iter().collect()
    }
}

impl Default for RegexDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RiskLevel;
    use test_case::test_case;

    fn detector() -> RegexDetector {
        RegexDetector::with_registry(Arc::new(PatternRegistry::builtin()))
    }

    fn categories(text: &str) -> Vec<PhiCategory> {
        detector()
            .detect_phi(text)
            .unwrap()
            .into_iter()
            .map(|m| m.category)
            .collect()
    }

    #[test]
    fn test_detect_ssn_span() {
        let matches = detector().detect_phi("SSN: 123-45-6789").unwrap();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.category, PhiCategory::Ssn);
        assert_eq!(m.value, "123-45-6789");
        assert_eq!((m.start, m.end), (5, 16));
        assert_eq!(m.risk_level, RiskLevel::High);
        assert_eq!(m.pattern_name, "ssn_dashed");
    }

    #[test_case("Contact: john.doe@example.com", PhiCategory::Email)]
    #[test_case("Call (555) 123-4567 today", PhiCategory::Phone)]
    #[test_case("Call 555-123-4567 today", PhiCategory::Phone)]
    #[test_case("MRN: 12345678", PhiCategory::Mrn)]
    #[test_case("Member ID: ABC123456789", PhiCategory::InsuranceId)]
    #[test_case("Account number: 12345678901", PhiCategory::AccountNumber)]
    #[test_case("License #: D1234567", PhiCategory::LicenseNumber)]
    #[test_case("VIN 1HGCM82633A004352 on file", PhiCategory::VehicleId)]
    #[test_case("Serial number: SN-88231-X", PhiCategory::DeviceId)]
    #[test_case("Fingerprint hash: 9F2A44C1B07E", PhiCategory::BiometricId)]
    #[test_case("See https://portal.example.org/p/42", PhiCategory::Url)]
    #[test_case("Login from 192.168.10.25", PhiCategory::IpAddress)]
    #[test_case("DOB 01/15/1980", PhiCategory::Date)]
    #[test_case("Admitted January 15, 2024", PhiCategory::Date)]
    #[test_case("Lives at 42 Oak Street", PhiCategory::Address)]
    #[test_case("zip 90210", PhiCategory::Zip)]
    #[test_case("Seen by Dr. Watson", PhiCategory::Name)]
    fn test_detects_category(text: &str, expected: PhiCategory) {
        assert!(
            categories(text).contains(&expected),
            "expected {expected} in {:?}",
            categories(text)
        );
    }

    #[test]
    fn test_results_follow_pattern_order() {
        // Email appears after the name in the text but is reported first
        let matches = detector()
            .detect_phi("Jane Roe can be reached at jane@example.com")
            .unwrap();
        let email_idx = matches
            .iter()
            .position(|m| m.category == PhiCategory::Email)
            .unwrap();
        let name_idx = matches
            .iter()
            .position(|m| m.category == PhiCategory::Name)
            .unwrap();
        assert!(email_idx < name_idx);
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let text = "Café visit: 123-45-6789";
        let matches = detector().detect_phi(text).unwrap();
        let ssn = matches.iter().find(|m| m.category == PhiCategory::Ssn).unwrap();
        assert_eq!(&text[ssn.start..ssn.end], "123-45-6789");
        assert_eq!(ssn.start, "Café visit: ".len());
    }

    #[test]
    fn test_no_phi() {
        let detector = detector();
        assert!(detector.detect_phi("blood pressure stable").unwrap().is_empty());
        assert!(!detector.contains_phi("blood pressure stable"));
    }

    #[test]
    fn test_empty_text() {
        let detector = detector();
        assert!(detector.detect_phi("").unwrap().is_empty());
        assert!(!detector.contains_phi(""));
    }

    #[test]
    fn test_contains_phi() {
        assert!(detector().contains_phi("email me at a@b.org"));
    }

    #[test]
    fn test_short_text_has_no_ssn() {
        assert!(!categories("123-45").contains(&PhiCategory::Ssn));
    }

    #[test]
    fn test_phi_types() {
        let types = detector().phi_types();
        assert_eq!(types.len(), 16);
        assert!(types.contains(&PhiCategory::Ssn));
    }

    #[test]
    fn test_sensitivity_does_not_filter() {
        let low = detector().with_sensitivity(SensitivityLevel::Low);
        let high = detector().with_sensitivity(SensitivityLevel::High);
        let text = "zip 90210, SSN 123-45-6789";
        assert_eq!(
            low.detect_phi(text).unwrap().len(),
            high.detect_phi(text).unwrap().len()
        );
        assert_eq!(low.sensitivity(), SensitivityLevel::Low);
    }

    #[test]
    fn test_from_config_falls_back_on_missing_file() {
        let config = DetectionConfig {
            pattern_file: Some("/nonexistent/patterns.toml".into()),
            sensitivity: SensitivityLevel::High,
        };
        let detector = RegexDetector::from_config(&config);
        assert!(detector.contains_phi("123-45-6789"));
        assert_eq!(detector.sensitivity(), SensitivityLevel::High);
    }
}
