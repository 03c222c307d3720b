//! PHI detection module
//!
//! Detection is pattern based: a [`PatternRegistry`] holds compiled matchers
//! and a [`RegexDetector`] applies them in registry order. Consumers depend on
//! the [`PhiDetector`] trait so another detector can be substituted.
//!
//! ```
//! use phiguard::detection::{PhiCategory, PhiDetector, RegexDetector};
//!
//! let detector = RegexDetector::new();
//! let matches = detector.detect_phi("SSN: 123-45-6789")?;
//! assert_eq!(matches[0].category, PhiCategory::Ssn);
//! assert_eq!((matches[0].start, matches[0].end), (5, 16));
//! # Ok::<(), phiguard::domain::PhiGuardError>(())
//! ```

pub mod models;
pub mod patterns;
pub mod regex;

pub use models::{DetectionMatch, PhiCategory, RiskLevel, SensitivityLevel};
pub use patterns::{PatternRegistry, PatternSource, PatternStatistics, PhiPattern};
pub use regex::RegexDetector;

use crate::domain::Result;

/// Trait for PHI detection implementations
pub trait PhiDetector: Send + Sync {
    /// Find PHI spans in `text`
    ///
    /// Matches are grouped by the pattern that produced them, in pattern
    /// order, and are not sorted by position. Spans from different patterns
    /// may overlap.
    fn detect_phi(&self, text: &str) -> Result<Vec<DetectionMatch>>;

    /// Whether `text` contains any PHI
    ///
    /// Fails closed: a detection error reports `true`.
    fn contains_phi(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.detect_phi(text).map(|m| !m.is_empty()).unwrap_or(true)
    }

    /// Categories this detector can report
    fn phi_types(&self) -> Vec<PhiCategory>;
}
