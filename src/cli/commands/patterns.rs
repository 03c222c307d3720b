//! Patterns command implementation
//!
//! This module implements the `patterns` command for inspecting the PHI
//! pattern library a detector would use.

use super::load_settings;
use crate::detection::{PatternRegistry, PatternSource};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the patterns command
#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Pattern file to check instead of the configured one
    #[arg(long)]
    pub pattern_file: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl PatternsArgs {
    /// Execute the patterns command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let registry = match &self.pattern_file {
            // An explicitly named file is checked strictly, without fallback
            Some(path) => match PatternRegistry::from_file(path) {
                Ok(r) => r,
                Err(e) => {
                    println!("❌ Invalid pattern library: {}", path.display());
                    println!("   Error: {e:#}");
                    return Ok(2); // Configuration error exit code
                }
            },
            None => match load_settings(config_path) {
                Ok(config) => PatternRegistry::load(config.detection.pattern_file.as_deref()),
                Err(e) => {
                    println!("❌ Failed to load configuration file");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            },
        };

        let stats = registry.statistics();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(0);
        }

        let source = match registry.source() {
            PatternSource::BuiltIn => "built-in".to_string(),
            PatternSource::File(path) => path.display().to_string(),
            PatternSource::Inline => "inline".to_string(),
        };

        println!("📚 PHI Pattern Library");
        println!();
        println!("  Source: {source}");
        println!("  Patterns: {}", stats.total_patterns);
        println!();
        println!("  By category:");
        for (category, count) in &stats.counts_by_category {
            println!("    {:<16} {count}", category.label());
        }
        println!("  By risk level:");
        for (risk, count) in &stats.counts_by_risk_level {
            println!("    {:<16} {count}", risk.as_str());
        }
        println!();
        for pattern in registry.patterns() {
            println!(
                "  {:<24} {:<16} {}",
                pattern.name,
                pattern.category.label(),
                pattern.description
            );
        }
        println!();

        Ok(0)
    }
}
