//! Integration tests for logging functionality

use phiguard::config::{load_config, LoggingConfig};
use phiguard::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/phiguard");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_initializes_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config_path = temp_dir.path().join("phiguard.toml");
    std::fs::write(
        &config_path,
        format!(
            "[application]\nlog_level = \"debug\"\n\n[logging]\nlocal_enabled = true\nlocal_path = '{}'\nlocal_rotation = \"never\"\n",
            log_path.display()
        ),
    )
    .unwrap();
    let config = load_config(&config_path).unwrap();

    assert!(!log_path.exists());
    let guard = init_logging(&config.application.log_level, &config.logging).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.is_dir());

    // Flushes the "Logging initialized" event
    drop(guard);
    let written: Vec<_> = std::fs::read_dir(&log_path).unwrap().collect();
    assert_eq!(written.len(), 1);

    // A second global subscriber is refused
    let console_only = LoggingConfig::default();
    assert!(init_logging("info", &console_only).is_err());
}

#[test]
fn test_unknown_level_rejected() {
    assert!(init_logging("loud", &LoggingConfig::default()).is_err());
}
