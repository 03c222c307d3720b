//! Integration tests for PHI sanitization of text and JSON documents

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use phiguard::detection::{PatternRegistry, PhiCategory, PhiDetector, RegexDetector};
use phiguard::domain::PhiGuardError;
use phiguard::sanitizer::{PhiSanitizer, SanitizationMode};
use serde_json::{json, Value};
use std::sync::Arc;

fn detector() -> Arc<RegexDetector> {
    Arc::new(RegexDetector::with_registry(Arc::new(PatternRegistry::builtin())))
}

fn sanitizer(mode: SanitizationMode) -> PhiSanitizer {
    PhiSanitizer::new(detector(), mode)
}

fn is_simple_word(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase())
        && word.len() > 1
}

/// Every string leaf of `value`
fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(strings).collect(),
        Value::Object(map) => map.values().flat_map(strings).collect(),
        _ => Vec::new(),
    }
}

#[test]
fn test_redact_ssn() {
    let output = sanitizer(SanitizationMode::Redact)
        .redact_phi("SSN: 123-45-6789")
        .unwrap();
    assert_eq!(output, "SSN: [REDACTED:SSN]");
    assert!(!output.contains("123-45-6789"));
}

#[test]
fn test_anonymize_keeps_surrounding_text() {
    let output = sanitizer(SanitizationMode::Anonymize)
        .anonymize_phi("Call 555-123-4567 before noon")
        .unwrap();
    assert_eq!(output, "Call CONTACT-INFO before noon");
}

#[test]
fn test_generated_identifiers_never_survive() {
    let detector = detector();
    let redactor = PhiSanitizer::new(detector.clone(), SanitizationMode::Redact);
    let anonymizer = PhiSanitizer::new(detector.clone(), SanitizationMode::Anonymize);

    let mut checked = 0;
    while checked < 50 {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        if !is_simple_word(&first) || !is_simple_word(&last) || first == "Jane" {
            continue;
        }
        let email: String = SafeEmail().fake();
        if !email
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-@".contains(c))
        {
            continue;
        }
        let text = format!("Patient {first} {last} wrote from {email} about results");

        let detected = detector.detect_phi(&text).unwrap();
        assert!(detected.iter().any(|m| m.category == PhiCategory::Email));
        assert!(detected.iter().any(|m| m.category == PhiCategory::Name));

        for output in [
            redactor.redact_phi(&text).unwrap(),
            anonymizer.anonymize_phi(&text).unwrap(),
        ] {
            assert!(!output.contains(&email), "email survived in {output}");
            assert!(!output.contains(&format!("{first} {last}")));
            for m in &detected {
                assert!(!output.contains(&m.value));
            }
        }
        checked += 1;
    }
}

#[test]
fn test_structure_is_preserved() {
    let record = json!({
        "patient": {
            "name": "Dr. Alice Carter",
            "contacts": ["555-123-4567", "alice@example.org", ""],
            "age": 54,
            "active": true,
            "notes": null
        },
        "visits": [
            {"date": "01/15/2024", "summary": "Stable"},
            {"date": "2024-02-20", "summary": "Follow-up with 555.987.6543"}
        ]
    });

    let (sanitized, report) = sanitizer(SanitizationMode::Redact)
        .sanitize_with_report(&record)
        .unwrap();

    assert_eq!(sanitized["patient"]["age"], 54);
    assert_eq!(sanitized["patient"]["active"], true);
    assert!(sanitized["patient"]["notes"].is_null());
    assert_eq!(sanitized["patient"]["contacts"].as_array().unwrap().len(), 3);
    assert_eq!(sanitized["patient"]["contacts"][2], "");
    assert_eq!(sanitized["visits"].as_array().unwrap().len(), 2);
    assert_eq!(sanitized["visits"][0]["summary"], "Stable");
    assert_eq!(sanitized["visits"][1]["summary"], "Follow-up with [REDACTED:PHONE]");
    assert_eq!(sanitized["patient"]["contacts"][1], "[REDACTED:EMAIL]");

    let keys: Vec<&String> = sanitized["patient"].as_object().unwrap().keys().collect();
    let original_keys: Vec<&String> = record["patient"].as_object().unwrap().keys().collect();
    assert_eq!(keys, original_keys);

    for leaf in strings(&sanitized) {
        for secret in ["Alice Carter", "555-123-4567", "alice@example.org", "01/15/2024"] {
            assert!(!leaf.contains(secret));
        }
    }

    assert!(report.has_phi());
    assert_eq!(report.strings_scanned, strings(&record).len());
}

#[test]
fn test_sanitize_is_stable_on_clean_input() {
    let record = json!({"status": "ok", "items": [1, 2, 3], "flag": false});
    let sanitized = sanitizer(SanitizationMode::Anonymize).sanitize(&record).unwrap();
    assert_eq!(sanitized, record);
}

#[test]
fn test_depth_limit_fails_closed() {
    let mut deep = json!("555-123-4567");
    for _ in 0..10 {
        deep = json!({ "next": deep });
    }

    let shallow = sanitizer(SanitizationMode::Redact).with_max_depth(5);
    let err = shallow.sanitize(&deep).unwrap_err();
    assert!(matches!(err, PhiGuardError::Sanitization(_)));
    assert!(err.is_data_error());
    assert!(!err.to_string().contains("555"));

    let roomy = sanitizer(SanitizationMode::Redact).with_max_depth(64);
    assert!(roomy.sanitize(&deep).is_ok());
}

#[test]
fn test_sanitize_message_for_logs() {
    let error = std::io::Error::other("lookup failed for jane.doe@example.com");
    let message = sanitizer(SanitizationMode::Anonymize).sanitize_message(&error);
    assert_eq!(message, "lookup failed for [REDACTED:EMAIL]");
}
