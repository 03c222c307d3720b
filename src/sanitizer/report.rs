//! Sanitization reporting
//!
//! Counts only. A report never holds a detected value.

use crate::detection::{DetectionMatch, PhiCategory};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Summary of one sanitization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizationReport {
    /// String leaves scanned
    pub strings_scanned: usize,

    /// String leaves changed by replacement
    pub strings_altered: usize,

    /// Detections reported by the detector, overlaps included
    pub total_detections: usize,

    /// Detections by category
    pub detections_by_category: BTreeMap<PhiCategory, usize>,
}

impl SanitizationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of sanitizing one string
    pub(crate) fn record(&mut self, matches: &[DetectionMatch], altered: bool) {
        self.strings_scanned += 1;
        if altered {
            self.strings_altered += 1;
        }
        self.total_detections += matches.len();
        for m in matches {
            *self.detections_by_category.entry(m.category).or_insert(0) += 1;
        }
    }

    /// Whether any PHI was found
    pub fn has_phi(&self) -> bool {
        self.total_detections > 0
    }
}

impl fmt::Display for SanitizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} strings scanned, {} altered, {} detections",
            self.strings_scanned, self.strings_altered, self.total_detections
        )?;

        if !self.detections_by_category.is_empty() {
            let parts: Vec<String> = self
                .detections_by_category
                .iter()
                .map(|(category, count)| format!("{category}={count}"))
                .collect();
            write!(f, " ({})", parts.join(", "))?;
        }

        Ok(())
    }
}
