//! Built-in PHI pattern set
//!
//! Used when no pattern file is configured or the configured file cannot be
//! loaded. Entries are listed in matching order.

use crate::detection::models::PhiCategory;

pub(crate) struct BuiltinPattern {
    pub name: &'static str,
    pub category: PhiCategory,
    pub pattern: &'static str,
    pub description: &'static str,
}

pub(crate) const BUILTIN_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        name: "ssn_dashed",
        category: PhiCategory::Ssn,
        pattern: r"\b\d{3}-\d{2}-\d{4}\b",
        description: "US Social Security Number (123-45-6789)",
    },
    BuiltinPattern {
        name: "ssn_spaced",
        category: PhiCategory::Ssn,
        pattern: r"\b\d{3} \d{2} \d{4}\b",
        description: "US Social Security Number (123 45 6789)",
    },
    BuiltinPattern {
        name: "mrn_labeled",
        category: PhiCategory::Mrn,
        pattern: r"(?i)\bMRN[:#\s]*\d{6,10}\b",
        description: "Medical record number with MRN label",
    },
    BuiltinPattern {
        name: "mrn_medical_record",
        category: PhiCategory::Mrn,
        pattern: r"(?i)\bmedical\s+record\s*(?:number|no\.?|#)?[:#\s]*\d{6,10}\b",
        description: "Medical record number with descriptive label",
    },
    BuiltinPattern {
        name: "insurance_member_id",
        category: PhiCategory::InsuranceId,
        pattern: r"(?i)\b(?:insurance|policy|member)\s*(?:id|no|number)?[:#\s]*[A-Z]{0,4}\d{6,12}\b",
        description: "Health plan, policy or member identifier",
    },
    BuiltinPattern {
        name: "account_number",
        category: PhiCategory::AccountNumber,
        pattern: r"(?i)\b(?:account|acct)\.?\s*(?:number|no|#)?[:#\s]*\d{6,17}\b",
        description: "Labeled financial account number",
    },
    BuiltinPattern {
        name: "license_number",
        category: PhiCategory::LicenseNumber,
        pattern: r"(?i)\b(?:license|licence|certificate|DEA|NPI)\s*(?:number|no|#)?[:#\s]*[A-Z]{0,2}\d{5,12}\b",
        description: "Certificate, license, DEA or NPI number",
    },
    BuiltinPattern {
        name: "biometric_id",
        category: PhiCategory::BiometricId,
        pattern: r"(?i)\b(?:biometric|fingerprint|retina|voiceprint)\s*(?:id|template|hash)?[:#\s]*[A-F0-9]{8,64}\b",
        description: "Labeled biometric template identifier",
    },
    BuiltinPattern {
        name: "device_serial",
        category: PhiCategory::DeviceId,
        pattern: r"(?i)\b(?:device|serial|implant)\s*(?:id|no|number|#)?[:#\s]*(?=[A-Z0-9-]*\d)[A-Z0-9][A-Z0-9-]{4,}\b",
        description: "Device identifier or serial number",
    },
    BuiltinPattern {
        name: "vehicle_vin",
        category: PhiCategory::VehicleId,
        pattern: r"\b(?=[A-HJ-NPR-Z0-9]*[A-HJ-NPR-Z])(?=[A-HJ-NPR-Z0-9]*\d)[A-HJ-NPR-Z0-9]{17}\b",
        description: "Vehicle identification number",
    },
    BuiltinPattern {
        name: "email_address",
        category: PhiCategory::Email,
        pattern: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        description: "Email address",
    },
    BuiltinPattern {
        name: "web_url",
        category: PhiCategory::Url,
        pattern: r#"\bhttps?://[^\s<>"']+"#,
        description: "HTTP or HTTPS URL",
    },
    BuiltinPattern {
        name: "ipv4_address",
        category: PhiCategory::IpAddress,
        pattern: r"\b(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\b",
        description: "IPv4 address",
    },
    BuiltinPattern {
        name: "us_phone",
        category: PhiCategory::Phone,
        pattern: r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b",
        description: "North American phone or fax number",
    },
    BuiltinPattern {
        name: "street_address",
        category: PhiCategory::Address,
        pattern: r"\b\d{1,5}\s+(?:[A-Z][a-z]+\s+){1,3}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way|Place|Pl)\b\.?",
        description: "Street address with number and suffix",
    },
    BuiltinPattern {
        name: "date_numeric",
        category: PhiCategory::Date,
        pattern: r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2})\b",
        description: "Numeric date (01/15/1980, 1980-01-15)",
    },
    BuiltinPattern {
        name: "date_written",
        category: PhiCategory::Date,
        pattern: r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b",
        description: "Written date (January 15, 1980)",
    },
    BuiltinPattern {
        name: "zip_code",
        category: PhiCategory::Zip,
        pattern: r"\b\d{5}(?:-\d{4})?\b",
        description: "US ZIP or ZIP+4 code",
    },
    BuiltinPattern {
        name: "titled_name",
        category: PhiCategory::Name,
        pattern: r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?",
        description: "Name preceded by an honorific",
    },
    BuiltinPattern {
        name: "full_name",
        category: PhiCategory::Name,
        pattern: r"\b[A-Z][a-z]+(?:\s+[A-Z]\.?)?(?:\s+[A-Z][a-z]+)+\b",
        description: "Capitalized name-shaped word sequence (broad, applied last)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names = HashSet::new();
        for pattern in BUILTIN_PATTERNS {
            assert!(names.insert(pattern.name), "duplicate {}", pattern.name);
        }
    }

    #[test]
    fn test_builtin_patterns_compile() {
        for pattern in BUILTIN_PATTERNS {
            assert!(
                fancy_regex::Regex::new(pattern.pattern).is_ok(),
                "pattern {} does not compile",
                pattern.name
            );
        }
    }

    #[test]
    fn test_builtin_listed_in_precedence_order() {
        let precedences: Vec<usize> = BUILTIN_PATTERNS
            .iter()
            .map(|p| p.category.precedence())
            .collect();
        let mut sorted = precedences.clone();
        sorted.sort();
        assert_eq!(precedences, sorted);
    }
}
