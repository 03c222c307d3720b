//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod crypt;
pub mod init;
pub mod patterns;
pub mod sanitize;
pub mod scan;
pub mod validate;

use crate::config::{load_config, load_config_from_str, LoggingConfig, PhiGuardConfig};
use crate::domain::Result;
use std::path::Path;

/// Load the configuration file, or defaults plus environment overrides when it does not exist
///
/// Detection and sanitization work without a configuration file. A file that
/// exists but fails to load is still an error.
pub(crate) fn load_settings(config_path: &str) -> Result<PhiGuardConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "Configuration file not found, using defaults");
        load_config_from_str("")
    }
}

/// Log level used when no configuration file exists and no flag is given
const FALLBACK_LOG_LEVEL: &str = "warn";

/// Resolve the log level and logging section before logging is installed
///
/// `--log-level` wins over `[application] log_level`. Without a configuration
/// file, or when it fails to load, console logging at `warn` is used and the
/// command reports the configuration error itself.
pub fn logging_settings(config_path: &str, cli_level: Option<&str>) -> (String, LoggingConfig) {
    let loaded = if Path::new(config_path).exists() {
        load_config(config_path).ok()
    } else {
        None
    };

    match loaded {
        Some(config) => {
            let level = cli_level.unwrap_or(&config.application.log_level).to_string();
            (level, config.logging)
        }
        None => (
            cli_level.unwrap_or(FALLBACK_LOG_LEVEL).to_string(),
            LoggingConfig {
                local_enabled: false,
                ..LoggingConfig::default()
            },
        ),
    }
}
