//! Field-level encryption of JSON records
//!
//! Field paths are dot separated (`patient.contact.email`). When a segment
//! other than the last addresses an array, the rest of the path is applied to
//! every object in that array. Paths that do not match the record's shape
//! are skipped.

use super::canonical::{from_canonical_str, to_canonical_string};
use crate::crypto::{is_encrypted, FieldCipher};
use crate::domain::{PhiGuardError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Outcome of a field encryption or decryption pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// Leaf values encrypted or decrypted
    pub transformed: usize,

    /// Paths that addressed no field in the record
    pub unresolved_paths: Vec<String>,
}

impl FieldReport {
    /// Whether every path addressed at least one field
    pub fn all_resolved(&self) -> bool {
        self.unresolved_paths.is_empty()
    }
}

#[derive(Default)]
struct PathStats {
    resolved: usize,
    transformed: usize,
}

/// Encrypts and decrypts selected fields of a record
///
/// Stateless apart from the injected cipher. Every operation returns a new
/// record; the input is never modified.
#[derive(Clone)]
pub struct FieldEncryptor {
    cipher: Arc<dyn FieldCipher>,
}

impl FieldEncryptor {
    pub fn new(cipher: Arc<dyn FieldCipher>) -> Self {
        Self { cipher }
    }

    /// Encrypt the fields addressed by `field_paths`
    ///
    /// Objects and arrays are encrypted whole as canonical JSON. Nulls,
    /// empty strings and values that are already encrypted are left as is.
    pub fn encrypt_fields<S: AsRef<str>>(&self, record: &Value, field_paths: &[S]) -> Result<Value> {
        self.encrypt_fields_with_report(record, field_paths)
            .map(|(value, _)| value)
    }

    /// Decrypt the fields addressed by `field_paths`
    ///
    /// Values without a ciphertext prefix are returned unchanged, so
    /// decrypting twice is harmless.
    pub fn decrypt_fields<S: AsRef<str>>(&self, record: &Value, field_paths: &[S]) -> Result<Value> {
        self.decrypt_fields_with_report(record, field_paths)
            .map(|(value, _)| value)
    }

    /// [`encrypt_fields`](Self::encrypt_fields) plus a resolution report
    pub fn encrypt_fields_with_report<S: AsRef<str>>(
        &self,
        record: &Value,
        field_paths: &[S],
    ) -> Result<(Value, FieldReport)> {
        self.process(record, field_paths, Direction::Encrypt)
    }

    /// [`decrypt_fields`](Self::decrypt_fields) plus a resolution report
    pub fn decrypt_fields_with_report<S: AsRef<str>>(
        &self,
        record: &Value,
        field_paths: &[S],
    ) -> Result<(Value, FieldReport)> {
        self.process(record, field_paths, Direction::Decrypt)
    }

    fn process<S: AsRef<str>>(
        &self,
        record: &Value,
        field_paths: &[S],
        direction: Direction,
    ) -> Result<(Value, FieldReport)> {
        let mut output = record.clone();
        let mut report = FieldReport::default();

        for path in field_paths {
            let path = path.as_ref();
            let segments: Vec<&str> = path.split('.').collect();
            let mut stats = PathStats::default();

            self.process_field(&mut output, &segments, direction, &mut stats)?;

            report.transformed += stats.transformed;
            if stats.resolved == 0 {
                report.unresolved_paths.push(path.to_string());
            }
        }

        tracing::debug!(
            direction = ?direction,
            paths = field_paths.len(),
            transformed = report.transformed,
            unresolved = report.unresolved_paths.len(),
            "Processed record fields"
        );

        Ok((output, report))
    }

    fn process_field(
        &self,
        current: &mut Value,
        segments: &[&str],
        direction: Direction,
        stats: &mut PathStats,
    ) -> Result<()> {
        let Value::Object(map) = current else {
            return Ok(());
        };
        let Some((head, rest)) = segments.split_first() else {
            return Ok(());
        };

        if rest.is_empty() {
            if let Some(leaf) = map.get_mut(*head) {
                stats.resolved += 1;
                if self.transform_value(leaf, direction)? {
                    stats.transformed += 1;
                }
            }
            return Ok(());
        }

        match map.get_mut(*head) {
            Some(Value::Array(items)) => {
                for item in items.iter_mut().filter(|item| item.is_object()) {
                    self.process_field(item, rest, direction, stats)?;
                }
                Ok(())
            }
            Some(next @ Value::Object(_)) => self.process_field(next, rest, direction, stats),
            _ => Ok(()),
        }
    }

    /// Encrypt or decrypt one addressed value in place; true if it changed
    fn transform_value(&self, value: &mut Value, direction: Direction) -> Result<bool> {
        match direction {
            Direction::Encrypt => {
                let skip = match value {
                    Value::Null => true,
                    Value::String(s) => s.is_empty() || is_encrypted(s),
                    _ => false,
                };
                if skip {
                    return Ok(false);
                }

                let plaintext = to_canonical_string(value)?;
                *value = Value::String(self.cipher.encrypt(plaintext.as_bytes())?);
                Ok(true)
            }
            Direction::Decrypt => {
                let Value::String(ciphertext) = value else {
                    return Ok(false);
                };
                if !is_encrypted(ciphertext) {
                    return Ok(false);
                }

                let bytes = self.cipher.decrypt(ciphertext)?;
                let text = String::from_utf8(bytes).map_err(|_| PhiGuardError::Decryption)?;
                *value = from_canonical_str(&text)?;
                Ok(true)
            }
        }
    }
}

impl fmt::Debug for FieldEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEncryptor").finish_non_exhaustive()
    }
}
