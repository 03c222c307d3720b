//! Logging and observability
//!
//! Structured logging built on `tracing`. Matched PHI values are never logged:
//! events carry categories, pattern names, counts and paths only.
//!
//! # Example
//!
//! ```no_run
//! use phiguard::logging::init_logging;
//! use phiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a detection pass
///
/// # Example
///
/// ```no_run
/// use phiguard::log_detection;
///
/// log_detection!(3, 120);
/// ```
#[macro_export]
macro_rules! log_detection {
    ($matches:expr, $text_len:expr) => {
        tracing::debug!(
            matches = $matches,
            text_len = $text_len,
            "PHI detection completed"
        );
    };
}

/// Log that the pattern library fell back to the built-in set
///
/// # Example
///
/// ```no_run
/// use phiguard::log_pattern_fallback;
///
/// log_pattern_fallback!("patterns.toml", "file not found");
/// ```
#[macro_export]
macro_rules! log_pattern_fallback {
    ($source:expr, $reason:expr) => {
        tracing::warn!(
            source = %$source,
            reason = %$reason,
            "Pattern library unavailable, using built-in patterns"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use phiguard::log_error_with_context;
/// use phiguard::domain::PhiGuardError;
///
/// let error = PhiGuardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::PhiGuardError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_detection!(2usize, 40usize);
        log_pattern_fallback!("missing.toml", "not found");
        let error = PhiGuardError::Configuration("bad".to_string());
        log_error_with_context!(&error, "loading");
    }
}
