//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "phiguard.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PhiGuard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Create a .env file and set PHIGUARD_ENCRYPTION_SECRET");
                println!("  2. Optionally point detection.pattern_file at a custom library");
                println!("  3. Validate configuration: phiguard validate-config");
                println!("  4. Scan a file: phiguard scan notes.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# PhiGuard Configuration File

[application]
log_level = "info"

[encryption]
secret = "${PHIGUARD_SECRET}"
kdf_iterations = 100000

[detection]
sensitivity = "medium"

[sanitizer]
mode = "redact"
max_depth = 64

[logging]
local_enabled = false
local_path = "/var/log/phiguard"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# PhiGuard Configuration File
# PHI detection, redaction and field-level encryption
#
# Values of the form ${VAR} are replaced from the environment when the file
# is loaded. Every option can also be overridden with a PHIGUARD_<SECTION>_<KEY>
# environment variable, e.g. PHIGUARD_SANITIZER_MODE=anonymize.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Encryption
# ============================================================================
[encryption]
# Secret the encryption and MAC keys are derived from (use an environment variable)
secret = "${PHIGUARD_SECRET}"

# Optional explicit key derivation salt. When absent the salt is derived from
# the secret, so the same secret always yields the same keys.
# salt = "${PHIGUARD_SALT}"

# PBKDF2 iteration count (minimum 1000)
kdf_iterations = 100000

# ============================================================================
# Detection
# ============================================================================
[detection]
# Custom pattern library (built-in patterns when absent or unreadable)
# pattern_file = "patterns/phi_patterns.toml"

# Sensitivity level (low, medium, high)
sensitivity = "medium"

# ============================================================================
# Sanitizer
# ============================================================================
[sanitizer]
# Replacement mode
# - redact: replace with [REDACTED:<CATEGORY>]
# - anonymize: replace with a fixed fictitious value of the same category
mode = "redact"

# Maximum nesting depth of sanitized documents (1-1024)
max_depth = 64

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "/var/log/phiguard"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
