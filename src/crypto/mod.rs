//! Symmetric encryption and hashing primitives
//!
//! [`CipherCore`] derives its working keys from a configured secret and
//! produces versioned ciphertext strings:
//!
//! ```text
//! v1:<url-safe base64 of nonce || ciphertext || tag>
//! ```
//!
//! The version prefix is the only persisted marker separating encrypted values
//! from plaintext. Consumers that store ciphertext treat it as an opaque string.
//!
//! # Example
//!
//! ```
//! use phiguard::crypto::{CipherCore, is_encrypted};
//!
//! let cipher = CipherCore::with_options("correct horse battery staple", None, 1_000)?;
//! let token = cipher.encrypt(b"555-123-4567")?;
//! assert!(is_encrypted(&token));
//! assert_eq!(cipher.decrypt(&token)?, b"555-123-4567");
//! # Ok::<(), phiguard::domain::PhiGuardError>(())
//! ```

pub mod cipher;
pub mod digest;
pub mod keys;

pub use cipher::CipherCore;
pub use keys::{DEFAULT_KDF_ITERATIONS, MIN_KDF_ITERATIONS};

use crate::domain::Result;

/// Version token of the current ciphertext scheme
pub const CIPHERTEXT_VERSION: &str = "v1";

/// Prefix carried by every ciphertext of the current scheme
pub const CIPHERTEXT_PREFIX: &str = "v1:";

/// Check whether a value carries a recognized ciphertext prefix
pub fn is_encrypted(value: &str) -> bool {
    value.starts_with(CIPHERTEXT_PREFIX)
}

/// Byte-oriented cipher consumed by field-level encryption
///
/// [`CipherCore`] is the production implementation; tests substitute their
/// own to observe what the field encryptor hands to the cipher.
pub trait FieldCipher: Send + Sync {
    /// Encrypt bytes into a versioned ciphertext string
    fn encrypt(&self, plaintext: &[u8]) -> Result<String>;

    /// Decrypt a versioned ciphertext string back into bytes
    fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_encrypted() {
        assert!(is_encrypted("v1:abc"));
        assert!(!is_encrypted("v2:abc"));
        assert!(!is_encrypted("plain text"));
        assert!(!is_encrypted(""));
    }

    #[test]
    fn test_prefix_matches_version() {
        assert_eq!(CIPHERTEXT_PREFIX, format!("{CIPHERTEXT_VERSION}:"));
    }
}
