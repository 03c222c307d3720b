//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PhiGuardConfig;
use super::secret::secret_string;
use crate::detection::SensitivityLevel;
use crate::domain::errors::PhiGuardError;
use crate::domain::result::Result;
use crate::sanitizer::SanitizationMode;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PhiGuardConfig
/// 4. Applies environment variable overrides (PHIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PhiGuardError::Configuration`] if the file cannot be read,
/// parsing or substitution fails, or validation rejects a value.
///
/// # Examples
///
/// ```no_run
/// use phiguard::config::loader::load_config;
///
/// let config = load_config("phiguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PhiGuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PhiGuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PhiGuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses configuration from TOML text, applying substitution, overrides and validation
pub fn load_config_from_str(contents: &str) -> Result<PhiGuardConfig> {
    let substituted = substitute_env_vars(contents)?;

    let mut config: PhiGuardConfig = toml::from_str(&substituted.text).map_err(|e| {
        PhiGuardError::Configuration(format!(
            "Failed to parse TOML: {}",
            substituted.scrub(&e.to_string())
        ))
    })?;

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;

    config.validate().map_err(|e| {
        PhiGuardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Configuration text after `${VAR}` substitution
#[cfg_attr(test, derive(Debug))]
struct Substituted {
    text: String,
    /// Escaped values as they appear in `text`
    values: Vec<String>,
}

impl Substituted {
    /// Mask every substituted value in a message quoting the configuration
    fn scrub(&self, message: &str) -> String {
        let mut values: Vec<&String> = self.values.iter().filter(|v| !v.is_empty()).collect();
        values.sort_by_key(|v| std::cmp::Reverse(v.len()));

        values
            .into_iter()
            .fold(message.to_string(), |acc, value| acc.replace(value.as_str(), "***"))
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Values are escaped as TOML basic-string content, so a secret containing
/// quotes or backslashes cannot break out of its string. Comment lines are
/// copied verbatim so documentation placeholders never require a variable
/// to be set.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<Substituted> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PhiGuardError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut values = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let escaped = escape_toml_basic(&value);
                    values.push(escaped.clone());
                    escaped
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(PhiGuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut text = lines.join("\n");
    if input.ends_with('\n') {
        text.push('\n');
    }
    Ok(Substituted { text, values })
}

/// Escape `value` for use inside a TOML basic (double quoted) string
fn escape_toml_basic(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Applies overrides of the form PHIGUARD_<SECTION>_<KEY>
///
/// For example: PHIGUARD_ENCRYPTION_SECRET, PHIGUARD_SANITIZER_MODE.
/// `lookup` abstracts the environment so overrides can be exercised in isolation.
fn apply_overrides<F>(config: &mut PhiGuardConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Application overrides
    if let Some(val) = lookup("PHIGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Encryption overrides
    if let Some(val) = lookup("PHIGUARD_ENCRYPTION_SECRET") {
        config.encryption.secret = Some(secret_string(val));
    }
    if let Some(val) = lookup("PHIGUARD_ENCRYPTION_SALT") {
        config.encryption.salt = Some(secret_string(val));
    }
    if let Some(val) = lookup("PHIGUARD_ENCRYPTION_KDF_ITERATIONS") {
        config.encryption.kdf_iterations = val.parse().map_err(|_| {
            PhiGuardError::Configuration(format!(
                "PHIGUARD_ENCRYPTION_KDF_ITERATIONS must be an integer, got '{}'",
                val
            ))
        })?;
    }

    // Detection overrides
    if let Some(val) = lookup("PHIGUARD_DETECTION_PATTERN_FILE") {
        config.detection.pattern_file = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("PHIGUARD_DETECTION_SENSITIVITY") {
        config.detection.sensitivity = val
            .parse::<SensitivityLevel>()
            .map_err(PhiGuardError::Configuration)?;
    }

    // Sanitizer overrides
    if let Some(val) = lookup("PHIGUARD_SANITIZER_MODE") {
        config.sanitizer.mode = val
            .parse::<SanitizationMode>()
            .map_err(PhiGuardError::Configuration)?;
    }
    if let Some(val) = lookup("PHIGUARD_SANITIZER_MAX_DEPTH") {
        config.sanitizer.max_depth = val.parse().map_err(|_| {
            PhiGuardError::Configuration(format!(
                "PHIGUARD_SANITIZER_MAX_DEPTH must be a positive integer, got '{}'",
                val
            ))
        })?;
    }

    // Logging overrides
    if let Some(val) = lookup("PHIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            PhiGuardError::Configuration(format!(
                "PHIGUARD_LOGGING_LOCAL_ENABLED must be 'true' or 'false', got '{}'",
                val
            ))
        })?;
    }
    if let Some(val) = lookup("PHIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = lookup("PHIGUARD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PHIGUARD_LOADER_TEST_VAR", "test_value");
        let input = "secret = \"${PHIGUARD_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.text, "secret = \"test_value\"");
        std::env::remove_var("PHIGUARD_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PHIGUARD_LOADER_MISSING_VAR");
        let input = "secret = \"${PHIGUARD_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("PHIGUARD_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("PHIGUARD_LOADER_COMMENTED_VAR");
        let input = "# secret = \"${PHIGUARD_LOADER_COMMENTED_VAR}\"\nmode = \"redact\"\n";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.text, input);
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_escape_toml_basic() {
        assert_eq!(escape_toml_basic("plain"), "plain");
        assert_eq!(escape_toml_basic(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_toml_basic("line\nbreak\u{7}"), r"line\nbreak\u0007");
    }

    #[test]
    fn test_substituted_secret_with_quotes_is_literal() {
        std::env::set_var("PHIGUARD_LOADER_QUOTED_SECRET", r#"hunter2"topsecret\x"#);
        let config =
            load_config_from_str("[encryption]\nsecret = \"${PHIGUARD_LOADER_QUOTED_SECRET}\"\n")
                .unwrap();
        std::env::remove_var("PHIGUARD_LOADER_QUOTED_SECRET");

        let secret = config.encryption.secret.as_ref().unwrap();
        assert_eq!(secret.expose_secret().as_str(), r#"hunter2"topsecret\x"#);
    }

    #[test]
    fn test_parse_error_hides_substituted_value() {
        // Unquoted, so the value itself is what fails to parse
        std::env::set_var("PHIGUARD_LOADER_BARE_SECRET", "hunter2 topsecret");
        let err = load_config_from_str("[encryption]\nsecret = ${PHIGUARD_LOADER_BARE_SECRET}\n")
            .unwrap_err();
        std::env::remove_var("PHIGUARD_LOADER_BARE_SECRET");

        let message = err.to_string();
        assert!(message.starts_with("Configuration error: Failed to parse TOML"));
        assert!(!message.contains("hunter2"));
        assert!(!message.contains("topsecret"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = PhiGuardConfig::default();
        let lookup = lookup_from(&[
            ("PHIGUARD_ENCRYPTION_SECRET", "from-env"),
            ("PHIGUARD_SANITIZER_MODE", "anonymize"),
            ("PHIGUARD_DETECTION_SENSITIVITY", "high"),
            ("PHIGUARD_SANITIZER_MAX_DEPTH", "16"),
        ]);

        apply_overrides(&mut config, lookup).unwrap();

        let secret = config.encryption.secret.as_ref().unwrap();
        assert_eq!(secret.expose_secret().as_str(), "from-env");
        assert_eq!(config.sanitizer.mode, SanitizationMode::Anonymize);
        assert_eq!(config.detection.sensitivity, SensitivityLevel::High);
        assert_eq!(config.sanitizer.max_depth, 16);
    }

    #[test]
    fn test_apply_overrides_rejects_bad_values() {
        let mut config = PhiGuardConfig::default();
        let lookup = lookup_from(&[("PHIGUARD_SANITIZER_MODE", "shred")]);
        assert!(apply_overrides(&mut config, lookup).is_err());

        let mut config = PhiGuardConfig::default();
        let lookup = lookup_from(&[("PHIGUARD_ENCRYPTION_KDF_ITERATIONS", "lots")]);
        assert!(apply_overrides(&mut config, lookup).is_err());
    }

    #[test_case("PHIGUARD_SANITIZER_MAX_DEPTH", "deep" ; "max depth not a number")]
    #[test_case("PHIGUARD_SANITIZER_MAX_DEPTH", "-4" ; "negative max depth")]
    #[test_case("PHIGUARD_LOGGING_LOCAL_ENABLED", "yes" ; "local enabled not a bool")]
    #[test_case("PHIGUARD_LOGGING_LOCAL_ENABLED", "" ; "local enabled empty")]
    fn test_invalid_override_is_an_error(key: &str, value: &str) {
        let mut config = PhiGuardConfig::default();
        let err = apply_overrides(&mut config, lookup_from(&[(key, value)])).unwrap_err();

        assert!(matches!(err, PhiGuardError::Configuration(_)));
        assert!(err.to_string().contains(key));
        assert_eq!(config.sanitizer.max_depth, 64);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_valid_logging_override() {
        let mut config = PhiGuardConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[("PHIGUARD_LOGGING_LOCAL_ENABLED", "true")]),
        )
        .unwrap();
        assert!(config.logging.local_enabled);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(PhiGuardError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[encryption]
secret = "file-secret"
kdf_iterations = 5000

[detection]
sensitivity = "low"

[sanitizer]
mode = "anonymize"
max_depth = 32
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.encryption.kdf_iterations, 5000);
        assert!(config.encryption.has_secret());
        assert_eq!(config.detection.sensitivity, SensitivityLevel::Low);
        assert_eq!(config.sanitizer.max_depth, 32);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let result = load_config_from_str("[sanitizer]\nmax_depth = 0\n");
        assert!(matches!(result, Err(PhiGuardError::Configuration(_))));

        let result = load_config_from_str("[sanitizer]\nmode = \"shred\"\n");
        assert!(matches!(result, Err(PhiGuardError::Configuration(_))));
    }
}
