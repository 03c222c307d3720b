//! Encrypt and decrypt command implementation
//!
//! This module implements the `encrypt` and `decrypt` commands, which
//! transform selected fields of a JSON record with the configured key.

use super::load_settings;
use crate::crypto::CipherCore;
use crate::encryption::{FieldEncryptor, FieldReport};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Direction of a field transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptMode {
    Encrypt,
    Decrypt,
}

/// Arguments shared by the encrypt and decrypt commands
#[derive(Args, Debug)]
pub struct CryptArgs {
    /// JSON record file
    pub file: PathBuf,

    /// Comma-separated dotted field paths (e.g. patient.email,contacts.phone)
    #[arg(long, required = true, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CryptArgs {
    /// Execute the encrypt or decrypt command
    pub async fn execute(&self, config_path: &str, mode: CryptMode) -> anyhow::Result<i32> {
        tracing::info!(
            file = %self.file.display(),
            fields = self.fields.len(),
            mode = ?mode,
            "Transforming record fields"
        );

        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if !config.encryption.has_secret() {
            eprintln!("❌ No encryption secret configured");
            eprintln!("   Set encryption.secret or PHIGUARD_ENCRYPTION_SECRET");
            return Ok(2);
        }

        let cipher = match CipherCore::from_config(&config.encryption) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to initialize cipher");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let record: Value = match fs::read_to_string(&self.file)
            .map_err(anyhow::Error::from)
            .and_then(|c| serde_json::from_str(&c).map_err(anyhow::Error::from))
        {
            Ok(r) => r,
            Err(e) => {
                eprintln!("❌ Failed to read JSON record {}", self.file.display());
                eprintln!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let encryptor = FieldEncryptor::new(Arc::new(cipher));
        let fields = self.fields.as_slice();
        let (result, report) = match mode {
            CryptMode::Encrypt => encryptor.encrypt_fields_with_report(&record, fields)?,
            CryptMode::Decrypt => encryptor.decrypt_fields_with_report(&record, fields)?,
        };

        let rendered = serde_json::to_string_pretty(&result)?;
        match &self.output {
            Some(path) => {
                fs::write(path, rendered)?;
                eprintln!("✅ Wrote {}", path.display());
            }
            None => println!("{rendered}"),
        }

        Self::print_report(&report);
        Ok(0)
    }

    fn print_report(report: &FieldReport) {
        eprintln!("   {} value(s) transformed", report.transformed);
        for path in &report.unresolved_paths {
            eprintln!("⚠️  Path not found in record: {path}");
        }
    }
}
