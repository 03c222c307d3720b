//! Secret material held in configuration
//!
//! The encryption secret and salt are wrapped in [`secrecy::Secret`] so they
//! are zeroized on drop, redacted in `Debug` output and only readable through
//! an explicit `expose_secret()` call. [`SecretValue`] deliberately has no
//! `Display` or `Serialize` impl, so a secret cannot end up in a log line or
//! a serialized configuration by accident.
//!
//! ```rust
//! use phiguard::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("field-encryption-key".to_string());
//! assert_eq!(key.expose_secret().as_str(), "field-encryption-key");
//! assert!(!format!("{key:?}").contains("field-encryption-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// Zeroizing string that can live inside a [`Secret`]
#[derive(Clone, Zeroize)]
#[cfg_attr(test, derive(Debug))]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string as stored in [`EncryptionConfig`](super::EncryptionConfig)
pub type SecretString = Secret<SecretValue>;

/// Wrap a plain string read from the environment or a file
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-key".to_string());
        assert_eq!(secret.expose_secret(), "test-key");
        assert_eq!(secret.expose_secret().as_bytes(), b"test-key");
        assert_eq!(secret.expose_secret().len(), 8);
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("phi-encryption-secret".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("phi-encryption-secret"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            secret: SecretString,
        }

        let section: Section = toml::from_str("secret = \"test123\"").unwrap();
        assert_eq!(section.secret.expose_secret(), "test123");
    }
}
