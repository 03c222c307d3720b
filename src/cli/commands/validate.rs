//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the PhiGuard configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading runs validation, so a loaded config is a valid one
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Encryption Secret: {}",
            if config.encryption.has_secret() {
                "configured"
            } else {
                "not set (encrypt/decrypt unavailable)"
            }
        );
        println!(
            "  Encryption Salt: {}",
            if config.encryption.salt.is_some() {
                "explicit"
            } else {
                "derived from secret"
            }
        );
        println!("  KDF Iterations: {}", config.encryption.kdf_iterations);
        match config.detection.pattern_file {
            Some(ref path) => println!("  Pattern File: {}", path.display()),
            None => println!("  Pattern File: built-in"),
        }
        println!("  Sensitivity: {}", config.detection.sensitivity);
        println!("  Sanitizer Mode: {}", config.sanitizer.mode);
        println!("  Max Depth: {}", config.sanitizer.max_depth);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[sanitizer]\nmode = \"anonymize\"\nmax_depth = 32\n")
            .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[encryption]\nkdf_iterations = 10\n").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_config() {
        let code = ValidateArgs {}
            .execute("/nonexistent/phiguard.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
