//! Canonical JSON encoding of field values
//!
//! Values are serialized with object keys sorted recursively so the same
//! logical value always produces the same plaintext before encryption.

use crate::domain::{PhiGuardError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Deepest array/object nesting accepted for encryption
///
/// serde_json refuses to parse nesting at 128 levels, so anything deeper
/// would encrypt but never decrypt back to its typed value.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Serialize `value` as compact JSON with recursively sorted keys
///
/// # Errors
///
/// Returns [`PhiGuardError::Encryption`] when the value nests deeper than
/// [`MAX_NESTING_DEPTH`].
pub fn to_canonical_string(value: &Value) -> Result<String> {
    if nesting_depth(value) > MAX_NESTING_DEPTH {
        return Err(PhiGuardError::Encryption(format!(
            "field value nests deeper than {MAX_NESTING_DEPTH} levels"
        )));
    }

    let normalized = normalize_json(value);
    Ok(serde_json::to_string(&normalized)?)
}

/// Parse decrypted plaintext back into a value
///
/// Text that is not valid JSON was encrypted raw by another producer and is
/// returned as a string. Text that opens an array or object must parse.
///
/// # Errors
///
/// Returns [`PhiGuardError::Serialization`] for an array or object that does
/// not parse. The message never quotes the plaintext.
pub fn from_canonical_str(text: &str) -> Result<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if text.trim_start().starts_with(['[', '{']) => Err(PhiGuardError::Serialization(
            "decrypted field is not valid JSON".to_string(),
        )),
        Err(_) => Ok(Value::String(text.to_string())),
    }
}

/// Array/object nesting of `value`; scalars are depth 0
fn nesting_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0usize)];

    while let Some((current, depth)) = stack.pop() {
        match current {
            Value::Array(arr) => stack.extend(arr.iter().map(|child| (child, depth + 1))),
            Value::Object(map) => stack.extend(map.values().map(|child| (child, depth + 1))),
            _ => continue,
        }
        deepest = deepest.max(depth + 1);
    }

    deepest
}

/// Recursively sort object keys
pub fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, normalize_json(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}
