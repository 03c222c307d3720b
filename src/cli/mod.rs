//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for PhiGuard using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PhiGuard - PHI detection, redaction and field encryption
#[derive(Parser, Debug)]
#[command(name = "phiguard")]
#[command(version, about, long_about = None)]
#[command(author = "PhiGuard Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "phiguard.toml", env = "PHIGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PHIGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect PHI in a text file
    Scan(commands::scan::ScanArgs),

    /// Redact or anonymize PHI in a text or JSON file
    Sanitize(commands::sanitize::SanitizeArgs),

    /// Encrypt selected fields of a JSON record
    Encrypt(commands::crypt::CryptArgs),

    /// Decrypt selected fields of a JSON record
    Decrypt(commands::crypt::CryptArgs),

    /// Show the loaded PHI pattern library
    Patterns(commands::patterns::PatternsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
