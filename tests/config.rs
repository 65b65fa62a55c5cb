use retry_backoff::config::*;
use retry_backoff::error::{BackoffError, ConfigError};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let settings = Settings::default();
    assert_eq!(settings.backoff.initial_backoff(), Duration::from_secs(10));
    assert_eq!(settings.backoff.max_backoff(), Duration::from_secs(60));
    assert_eq!(settings.logging.level, "info");
    assert!(settings.logging.file.is_none());
    assert!(!settings.logging.json);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_config_from_toml() {
    let toml_content = r#"
[backoff]
initial_backoff_ms = 500
max_backoff_ms = 8000

[logging]
level = "debug"
file = "/tmp/retry-backoff.log"
json = true
rotation = true
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();
    file.flush().unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.backoff.initial_backoff(), Duration::from_millis(500));
    assert_eq!(settings.backoff.max_backoff(), Duration::from_secs(8));
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(
        settings.logging.file.as_deref(),
        Some("/tmp/retry-backoff.log")
    );
    assert!(settings.logging.json);
    assert!(settings.logging.rotation);
}

#[test]
fn test_config_partial_sections_use_defaults() {
    let settings = Settings::from_toml_str(
        r#"
[backoff]
max_backoff_ms = 120000
"#,
    )
    .unwrap();
    assert_eq!(settings.backoff.initial_backoff_ms, 10_000);
    assert_eq!(settings.backoff.max_backoff_ms, 120_000);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_config_empty_file_is_default() {
    let settings = Settings::from_toml_str("").unwrap();
    assert_eq!(settings.backoff, BackoffConfig::default());
}

#[test]
fn test_config_invalid_toml() {
    let result = Settings::from_toml_str("[backoff\ninitial_backoff_ms = ");
    assert!(result.is_err());
}

#[test]
fn test_config_wrong_type() {
    let result = Settings::from_toml_str("[backoff]\ninitial_backoff_ms = \"ten\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_missing_file() {
    let result = Settings::from_file("/nonexistent/retry-backoff.toml");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_or_default_missing_file() {
    let settings = Settings::load_or_default("/nonexistent/retry-backoff.toml");
    assert_eq!(settings.backoff, BackoffConfig::default());
}

#[test]
fn test_validate_zero_initial_backoff() {
    let config = BackoffConfig {
        initial_backoff_ms: 0,
        max_backoff_ms: 1000,
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroInitialBackoff));
}

#[test]
fn test_validate_initial_exceeds_max() {
    let config = BackoffConfig {
        initial_backoff_ms: 5000,
        max_backoff_ms: 1000,
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::InitialExceedsMax {
            initial: Duration::from_secs(5),
            max: Duration::from_secs(1),
        })
    );
}

#[test]
fn test_validate_equal_bounds() {
    let config = BackoffConfig {
        initial_backoff_ms: 1000,
        max_backoff_ms: 1000,
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_invalid_log_level() {
    let mut settings = Settings::default();
    settings.logging.level = "info,retry_backoff=loud".to_string();
    let err = settings.validate().unwrap_err();
    assert!(matches!(
        err,
        BackoffError::Config(ConfigError::InvalidLogLevel { .. })
    ));
}

#[test]
fn test_validate_filter_directive() {
    let mut settings = Settings::default();
    settings.logging.level = "warn,retry_backoff=debug".to_string();
    assert!(settings.validate().is_ok());
}
