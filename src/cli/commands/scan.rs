//! Scan command implementation
//!
//! This module implements the `scan` command, which reports where PHI
//! occurs in a text file. Matched values are never printed.

use super::load_settings;
use crate::detection::{DetectionMatch, PhiCategory, PhiDetector, RegexDetector, RiskLevel};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Text file to scan
    pub file: PathBuf,

    /// Print findings as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 when PHI is found
    #[arg(long)]
    pub fail_on_phi: bool,
}

/// One finding, without the matched value
#[derive(Debug, Serialize)]
struct Finding<'a> {
    category: PhiCategory,
    risk_level: RiskLevel,
    start: usize,
    end: usize,
    pattern: &'a str,
}

impl<'a> From<&'a DetectionMatch> for Finding<'a> {
    fn from(m: &'a DetectionMatch) -> Self {
        Self {
            category: m.category,
            risk_level: m.risk_level,
            start: m.start,
            end: m.end,
            pattern: &m.pattern_name,
        }
    }
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Scanning file for PHI");

        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let text = match fs::read_to_string(&self.file) {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Failed to read {}", self.file.display());
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let detector = RegexDetector::from_config(&config.detection);
        let mut matches = detector.detect_phi(&text)?;
        matches.sort_by_key(|m| (m.start, m.end));

        if self.json {
            let findings: Vec<Finding<'_>> = matches.iter().map(Finding::from).collect();
            println!("{}", serde_json::to_string_pretty(&findings)?);
        } else if matches.is_empty() {
            println!("✅ No PHI detected in {}", self.file.display());
        } else {
            println!(
                "⚠️  {} PHI match(es) in {}",
                matches.len(),
                self.file.display()
            );
            println!();
            println!(
                "{:<16} {:<8} {:<18} {:<24}",
                "Category", "Risk", "Bytes", "Pattern"
            );
            println!("{}", "-".repeat(68));
            for m in &matches {
                println!(
                    "{:<16} {:<8} {:<18} {:<24}",
                    m.category.label(),
                    m.risk_level.as_str(),
                    format!("{}..{}", m.start, m.end),
                    m.pattern_name
                );
            }
            println!();
        }

        if self.fail_on_phi && !matches.is_empty() {
            return Ok(1);
        }
        Ok(0)
    }
}
