//! Sanitize command implementation
//!
//! This module implements the `sanitize` command, which prints a text file
//! or JSON document with every detected PHI span replaced.

use super::load_settings;
use crate::detection::RegexDetector;
use crate::sanitizer::{PhiSanitizer, SanitizationMode};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Input file
    pub file: PathBuf,

    /// Replacement mode (redact or anonymize), overrides the configuration
    #[arg(long)]
    pub mode: Option<SanitizationMode>,

    /// Treat the input as a JSON document and sanitize every string leaf
    #[arg(long)]
    pub json_input: bool,
}

impl SanitizeArgs {
    /// Execute the sanitize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let contents = match fs::read_to_string(&self.file) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to read {}", self.file.display());
                eprintln!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let input = if self.json_input {
            match serde_json::from_str::<Value>(&contents) {
                Ok(v) => v,
                Err(e) => {
                    // serde_json errors carry positions only, never input text
                    eprintln!("❌ {} is not valid JSON", self.file.display());
                    eprintln!("   Error: {e}");
                    return Ok(5);
                }
            }
        } else {
            Value::String(contents)
        };

        let mode = self.mode.unwrap_or(config.sanitizer.mode);
        tracing::info!(file = %self.file.display(), mode = %mode, "Sanitizing file");

        let detector = Arc::new(RegexDetector::from_config(&config.detection));
        let mut sanitizer_config = config.sanitizer.clone();
        sanitizer_config.mode = mode;
        let sanitizer = PhiSanitizer::from_config(&sanitizer_config, detector);

        let (sanitized, report) = sanitizer.sanitize_with_report(&input)?;

        match sanitized {
            Value::String(text) => print!("{text}"),
            other => println!("{}", serde_json::to_string_pretty(&other)?),
        }

        eprintln!("✅ {report}");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn input_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_sanitize_text_file() {
        let file = input_file("Contact john@x.com for records");
        let args = SanitizeArgs {
            file: file.path().to_path_buf(),
            mode: None,
            json_input: false,
        };
        assert_eq!(args.execute("/nonexistent/phiguard.toml").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sanitize_json_file() {
        let file = input_file(r#"{"note": "SSN 123-45-6789", "count": 2}"#);
        let args = SanitizeArgs {
            file: file.path().to_path_buf(),
            mode: Some(SanitizationMode::Anonymize),
            json_input: true,
        };
        assert_eq!(args.execute("/nonexistent/phiguard.toml").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json_is_fatal() {
        let file = input_file("{not json");
        let args = SanitizeArgs {
            file: file.path().to_path_buf(),
            mode: None,
            json_input: true,
        };
        assert_eq!(args.execute("/nonexistent/phiguard.toml").await.unwrap(), 5);
    }
}
