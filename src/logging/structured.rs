//! Structured logging setup using tracing
//!
//! Console output goes to stderr so command output on stdout stays machine
//! readable. When local logging is enabled a JSON layer is added that writes
//! to a rolling file.
//!
//! # Example
//!
//! ```no_run
//! use phiguard::logging::init_logging;
//! use phiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{PhiGuardError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "phiguard.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; dropping it flushes pending file output
pub struct LoggingGuard {
    file_writer: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether a file writer is attached to this guard
    pub fn has_file_output(&self) -> bool {
        self.file_writer.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set. Events never carry
/// matched PHI, so the same filter applies to console and file output.
///
/// # Errors
///
/// Returns [`PhiGuardError::Configuration`] for an unknown level, an
/// unusable log directory, or when a global subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = level_filter(parse_log_level(level)?);

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed()];

    let file_writer = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| PhiGuardError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        log_level = level,
        file_output = config.local_enabled,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard { file_writer })
}

fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("phiguard={level}")))
}

/// JSON lines written to a rolling file under `local_path`
fn json_file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        PhiGuardError::Configuration(format!(
            "Failed to create log directory {}: {}",
            config.local_path, e
        ))
    })?;

    let appender = RollingFileAppender::new(
        parse_rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

/// Parse log level from string
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(PhiGuardError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

fn parse_rotation(value: &str) -> Rotation {
    match value {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
