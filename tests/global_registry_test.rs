//! The process-wide pattern registry can be installed exactly once
//!
//! Kept in its own test binary so no other test touches the global first.

use phiguard::detection::{PatternRegistry, PatternSource, PhiCategory, PhiDetector, RegexDetector};
use phiguard::domain::PhiGuardError;
use std::sync::Arc;

#[test]
fn test_init_global_once() {
    let custom = PatternRegistry::from_toml(
        r#"
[[patterns.mrn]]
name = "mrn_hash"
pattern = '\bMRN#\d{6}\b'
"#,
    )
    .unwrap();

    let installed = PatternRegistry::init_global(custom).unwrap();
    assert_eq!(installed.source(), &PatternSource::Inline);
    assert!(Arc::ptr_eq(&installed, &PatternRegistry::global()));

    // Detectors built afterwards share the installed registry
    let detector = RegexDetector::new();
    assert_eq!(detector.phi_types(), vec![PhiCategory::Mrn]);
    assert!(detector.detect_phi("SSN 123-45-6789").unwrap().is_empty());

    let second = PatternRegistry::init_global(PatternRegistry::builtin());
    assert!(matches!(second, Err(PhiGuardError::Configuration(_))));
    assert!(Arc::ptr_eq(&installed, &PatternRegistry::global()));
}
