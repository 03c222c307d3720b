//! Hash and MAC helpers

use crate::domain::{PhiGuardError, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded SHA-256 of `salt || data`
pub fn salted_sha256_hex(salt: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Hex-encoded HMAC-SHA256 of `data` under `key`
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| PhiGuardError::Key(format!("Invalid HMAC key: {e}")))?;
    mac.update(data);
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}

/// Constant-time equality of two byte strings
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
