//! Configuration management for PhiGuard.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! PhiGuard uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PHIGUARD_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use phiguard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("phiguard.toml")?;
//!
//! println!("Sanitizer mode: {}", config.sanitizer.mode);
//! println!("Encryption configured: {}", config.encryption.has_secret());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`EncryptionConfig`] - Secret, salt and key derivation cost
//! - [`DetectionConfig`] - Pattern file and sensitivity
//! - [`SanitizerConfig`] - Replacement mode and depth limit
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [encryption]
//! secret = "${PHIGUARD_SECRET}"
//! kdf_iterations = 100000
//!
//! [detection]
//! pattern_file = "patterns/phi_patterns.toml"
//! sensitivity = "medium"
//!
//! [sanitizer]
//! mode = "redact"
//! max_depth = 64
//! ```
//!
//! Secrets never appear in `Debug` output; see [`secret`].

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, DetectionConfig, EncryptionConfig, LoggingConfig, PhiGuardConfig,
    SanitizerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
