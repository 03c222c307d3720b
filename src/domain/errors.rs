//! Domain error types
//!
//! Every fallible operation in PhiGuard reports a [`PhiGuardError`]. Variants
//! that can be raised while handling PHI are shaped so they cannot carry any
//! fragment of the data being processed:
//!
//! - [`PhiGuardError::Decryption`] is a unit variant. Malformed input, a wrong
//!   key and a failed integrity check are indistinguishable to the caller.
//! - [`PhiGuardError::Detection`] and [`PhiGuardError::Sanitization`] only
//!   accept a `&'static str` reason.

use thiserror::Error;

/// Main PhiGuard error type
#[derive(Debug, Error)]
pub enum PhiGuardError {
    /// Configuration-related errors (missing secret, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Key material missing or unusable
    #[error("Key error: {0}")]
    Key(String),

    /// Encryption failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Ciphertext could not be decrypted or authenticated
    #[error("Decryption failed")]
    Decryption,

    /// A pattern matcher failed while scanning text
    #[error("Detection failed: {0}")]
    Detection(&'static str),

    /// Sanitization could not guarantee a PHI-free result
    #[error("Sanitization failed: {0}")]
    Sanitization(&'static str),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl PhiGuardError {
    /// Whether this error was raised while protecting data rather than while
    /// setting up the protection components
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Encryption(_) | Self::Decryption | Self::Detection(_) | Self::Sanitization(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PhiGuardError {
    fn from(err: std::io::Error) -> Self {
        PhiGuardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PhiGuardError {
    fn from(err: serde_json::Error) -> Self {
        PhiGuardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PhiGuardError {
    fn from(err: toml::de::Error) -> Self {
        PhiGuardError::Configuration(format!("TOML parse error: {err}"))
    }
}
