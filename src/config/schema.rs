//! Configuration schema types
//!
//! This module defines the configuration structure for PhiGuard.

use crate::config::SecretString;
use crate::crypto::{DEFAULT_KDF_ITERATIONS, MIN_KDF_ITERATIONS};
use crate::detection::SensitivityLevel;
use crate::sanitizer::SanitizationMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main PhiGuard configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PhiGuardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Field encryption key material
    #[serde(default)]
    pub encryption: EncryptionConfig,

    /// PHI pattern detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Sanitizer settings
    #[serde(default)]
    pub sanitizer: SanitizerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PhiGuardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.encryption.validate()?;
        self.detection.validate()?;
        self.sanitizer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Field encryption configuration
///
/// The secret is only required by the components that encrypt or decrypt;
/// detection and sanitization run without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Secret the encryption and MAC keys are derived from
    /// Zeroized on drop and never serialized
    #[serde(default, skip_serializing)]
    pub secret: Option<SecretString>,

    /// Optional explicit key derivation salt (derived from the secret when absent)
    #[serde(default, skip_serializing)]
    pub salt: Option<SecretString>,

    /// PBKDF2 iteration count
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

impl EncryptionConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if let Some(ref secret) = self.secret {
            if secret.expose_secret().is_empty() {
                return Err("encryption.secret cannot be empty".to_string());
            }
        }

        if let Some(ref salt) = self.salt {
            if salt.expose_secret().is_empty() {
                return Err("encryption.salt cannot be empty when set".to_string());
            }
        }

        if self.kdf_iterations < MIN_KDF_ITERATIONS {
            return Err(format!(
                "encryption.kdf_iterations must be >= {}, got {}",
                MIN_KDF_ITERATIONS, self.kdf_iterations
            ));
        }

        Ok(())
    }

    /// Whether a secret has been configured
    pub fn has_secret(&self) -> bool {
        use secrecy::ExposeSecret;

        self.secret
            .as_ref()
            .map(|s| !s.expose_secret().is_empty())
            .unwrap_or(false)
    }
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            salt: None,
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

/// PHI detection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetectionConfig {
    /// Path to a TOML pattern file (built-in patterns when absent)
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,

    /// Detection sensitivity exposed to surrounding configuration
    #[serde(default)]
    pub sensitivity: SensitivityLevel,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        // A missing or broken pattern file is not an error: the registry falls
        // back to the built-in patterns. Only reject values that can never load.
        if let Some(ref path) = self.pattern_file {
            if path.as_os_str().is_empty() {
                return Err("detection.pattern_file cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Sanitizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Replacement mode (redact or anonymize)
    #[serde(default)]
    pub mode: SanitizationMode,

    /// Maximum nesting depth walked before failing closed
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl SanitizerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 || self.max_depth > 1024 {
            return Err(format!(
                "sanitizer.max_depth must be between 1 and 1024, got {}",
                self.max_depth
            ));
        }
        Ok(())
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            mode: SanitizationMode::default(),
            max_depth: default_max_depth(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}

fn default_max_depth() -> usize {
    64
}

fn default_local_path() -> String {
    "/var/log/phiguard".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
