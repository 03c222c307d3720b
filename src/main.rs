// PhiGuard - PHI detection, redaction and field-level encryption
// Copyright (c) 2025 PhiGuard Contributors
// Licensed under the MIT License

use clap::Parser;
use phiguard::cli::commands::crypt::CryptMode;
use phiguard::cli::commands::logging_settings;
use phiguard::cli::{Cli, Commands};
use phiguard::detection::RegexDetector;
use phiguard::logging::init_logging;
use phiguard::sanitizer::{PhiSanitizer, SanitizationMode};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console output goes to stderr so command output stays clean
    let (log_level, logging_config) = logging_settings(&cli.config, cli.log_level.as_deref());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "PhiGuard starting");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            // Error chains may quote input, so scrub them before they are emitted
            let sanitizer = PhiSanitizer::new(Arc::new(RegexDetector::new()), SanitizationMode::Redact);
            let message = sanitizer.sanitize_message(&format!("{e:#}"));
            tracing::error!(error = %message, "Command execution failed");
            eprintln!("Error: {message}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Scan(args) => args.execute(&cli.config).await,
        Commands::Sanitize(args) => args.execute(&cli.config).await,
        Commands::Encrypt(args) => args.execute(&cli.config, CryptMode::Encrypt).await,
        Commands::Decrypt(args) => args.execute(&cli.config, CryptMode::Decrypt).await,
        Commands::Patterns(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
