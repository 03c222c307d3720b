//! Sanitization engine
//!
//! Replacement works on byte offsets reported by the detector and is applied
//! from the highest start offset to the lowest, so pending spans keep valid
//! offsets. Overlapping spans are clipped against the region already
//! replaced. A final pass re-checks that no detected value survived; if one
//! does and cannot be removed, sanitization fails rather than returning text
//! that may still contain PHI.

use super::report::SanitizationReport;
use super::strategy::{strategy_for, RedactionStrategy, ReplacementStrategy};
use super::SanitizationMode;
use crate::config::SanitizerConfig;
use crate::detection::{DetectionMatch, PhiDetector};
use crate::domain::{PhiGuardError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

const DEFAULT_MAX_DEPTH: usize = 64;
const MAX_ENFORCEMENT_PASSES: usize = 8;
const GENERIC_PLACEHOLDER: &str = "[REDACTED]";

/// PHI sanitizer over a pluggable detector
///
/// # Thread Safety
///
/// Holds no mutable state; share it across threads behind an `Arc`.
#[derive(Clone)]
pub struct PhiSanitizer {
    detector: Arc<dyn PhiDetector>,
    mode: SanitizationMode,
    max_depth: usize,
}

impl PhiSanitizer {
    /// Create a sanitizer with the default depth limit
    pub fn new(detector: Arc<dyn PhiDetector>, mode: SanitizationMode) -> Self {
        Self {
            detector,
            mode,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a sanitizer from the `[sanitizer]` configuration section
    pub fn from_config(config: &SanitizerConfig, detector: Arc<dyn PhiDetector>) -> Self {
        Self::new(detector, config.mode).with_max_depth(config.max_depth)
    }

    /// Set the maximum container nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn mode(&self) -> SanitizationMode {
        self.mode
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sanitize a value in the configured mode
    ///
    /// Objects keep their keys and arrays keep their length and order.
    /// Numbers, booleans and null are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PhiGuardError::Sanitization`] if detection fails, the
    /// value nests deeper than the configured limit, or a detected value
    /// cannot be removed. The error never carries input data.
    pub fn sanitize(&self, value: &Value) -> Result<Value> {
        let mut report = SanitizationReport::new();
        self.sanitize_value(value, strategy_for(self.mode), 0, &mut report)
    }

    /// Sanitize a value and report what was found
    pub fn sanitize_with_report(&self, value: &Value) -> Result<(Value, SanitizationReport)> {
        let mut report = SanitizationReport::new();
        let sanitized = self.sanitize_value(value, strategy_for(self.mode), 0, &mut report)?;

        tracing::debug!(
            strings_scanned = report.strings_scanned,
            strings_altered = report.strings_altered,
            detections = report.total_detections,
            "Sanitization completed"
        );

        Ok((sanitized, report))
    }

    /// Sanitize a single string in the configured mode
    pub fn sanitize_string(&self, text: &str) -> Result<String> {
        let mut report = SanitizationReport::new();
        self.sanitize_text(text, strategy_for(self.mode), &mut report)
    }

    /// Replace every detected span with a `[REDACTED:<LABEL>]` placeholder
    pub fn redact_phi(&self, text: &str) -> Result<String> {
        let mut report = SanitizationReport::new();
        self.sanitize_text(text, strategy_for(SanitizationMode::Redact), &mut report)
    }

    /// Replace every detected span with a synthetic value of its category
    pub fn anonymize_phi(&self, text: &str) -> Result<String> {
        let mut report = SanitizationReport::new();
        self.sanitize_text(text, strategy_for(SanitizationMode::Anonymize), &mut report)
    }

    /// Render a message (typically an error) safe for logs
    ///
    /// Never fails: if redaction fails the whole message becomes `[REDACTED]`.
    pub fn sanitize_message(&self, message: &dyn fmt::Display) -> String {
        let text = message.to_string();
        match self.redact_phi(&text) {
            Ok(redacted) => redacted,
            Err(e) => {
                tracing::warn!(error = %e, "Message redaction failed, suppressing message");
                GENERIC_PLACEHOLDER.to_string()
            }
        }
    }

    fn sanitize_value(
        &self,
        value: &Value,
        strategy: &dyn ReplacementStrategy,
        depth: usize,
        report: &mut SanitizationReport,
    ) -> Result<Value> {
        match value {
            Value::String(s) => Ok(Value::String(self.sanitize_text(s, strategy, report)?)),
            Value::Object(map) => {
                self.check_depth(depth)?;
                let mut sanitized = Map::with_capacity(map.len());
                for (key, val) in map {
                    sanitized.insert(
                        key.clone(),
                        self.sanitize_value(val, strategy, depth + 1, report)?,
                    );
                }
                Ok(Value::Object(sanitized))
            }
            Value::Array(items) => {
                self.check_depth(depth)?;
                items
                    .iter()
                    .map(|item| self.sanitize_value(item, strategy, depth + 1, report))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            Value::Number(_) | Value::Bool(_) | Value::Null => Ok(value.clone()),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(PhiGuardError::Sanitization("value nesting exceeds maximum depth"));
        }
        Ok(())
    }

    fn sanitize_text(
        &self,
        text: &str,
        strategy: &dyn ReplacementStrategy,
        report: &mut SanitizationReport,
    ) -> Result<String> {
        if text.is_empty() {
            report.record(&[], false);
            return Ok(String::new());
        }

        let matches = self
            .detector
            .detect_phi(text)
            .map_err(|_| PhiGuardError::Sanitization("PHI detection failed"))?;

        if matches.is_empty() {
            report.record(&matches, false);
            return Ok(text.to_string());
        }

        let replaced = replace_spans(text, &matches, strategy)?;
        let output = enforce_non_containment(replaced, &matches)?;

        report.record(&matches, output != text);
        Ok(output)
    }
}

impl fmt::Debug for PhiSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhiSanitizer")
            .field("mode", &self.mode)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// Replace detected spans right to left
fn replace_spans(
    text: &str,
    matches: &[DetectionMatch],
    strategy: &dyn ReplacementStrategy,
) -> Result<String> {
    for m in matches {
        validate_span(text, m)?;
    }

    let mut order: Vec<&DetectionMatch> = matches.iter().collect();
    order.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut output = text.to_string();
    // Left edge of everything replaced so far; text before it is untouched
    let mut replaced_from = text.len();

    for m in order {
        let end = m.end.min(replaced_from);
        if end <= m.start {
            continue;
        }

        // A clipped end always sits on the start of an earlier span, which
        // was validated as a char boundary. Clipped spans get the placeholder
        // so two synthetic tokens never run together.
        let candidate = if end < m.end {
            RedactionStrategy::placeholder(m.category)
        } else {
            strategy.replacement(m)
        };
        let replacement = safe_replacement(candidate, m);
        output.replace_range(m.start..end, &replacement);
        replaced_from = m.start;
    }

    Ok(output)
}

fn validate_span(text: &str, m: &DetectionMatch) -> Result<()> {
    let valid = m.start < m.end
        && m.end <= text.len()
        && text.is_char_boundary(m.start)
        && text.is_char_boundary(m.end)
        && text[m.start..m.end] == m.value;

    if valid {
        Ok(())
    } else {
        Err(PhiGuardError::Sanitization("detector returned an invalid span"))
    }
}

/// Replacement for `m` that cannot reintroduce the detected value
fn safe_replacement(candidate: String, m: &DetectionMatch) -> String {
    if !candidate.contains(&m.value) {
        return candidate;
    }

    let placeholder = RedactionStrategy::placeholder(m.category);
    if !placeholder.contains(&m.value) {
        return placeholder;
    }

    if !GENERIC_PLACEHOLDER.contains(&m.value) {
        return GENERIC_PLACEHOLDER.to_string();
    }

    String::new()
}

/// Remove any detected value still present after span replacement
///
/// Values can survive when the detector missed an occurrence or when a
/// replacement joins with neighbouring text to spell one out again.
fn enforce_non_containment(mut output: String, matches: &[DetectionMatch]) -> Result<String> {
    for _ in 0..MAX_ENFORCEMENT_PASSES {
        let mut changed = false;

        for m in matches {
            if output.contains(&m.value) {
                let replacement = safe_replacement(RedactionStrategy::placeholder(m.category), m);
                output = output.replace(&m.value, &replacement);
                changed = true;
            }
        }

        if !changed {
            return Ok(output);
        }
    }

    if matches.iter().any(|m| output.contains(&m.value)) {
        return Err(PhiGuardError::Sanitization(
            "detected PHI could not be removed from output",
        ));
    }

    Ok(output)
}
