//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert!(config.bridge.enabled);
    assert_eq!(config.bridge.unsupported_results, UnsupportedResultPolicy::Log);
    assert_eq!(config.framework.max_nesting_depth, 8);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [bridge]
        enabled = false
        unsupported_results = "fail"

        [framework]
        max_nesting_depth = 3

        [logging]
        level = "debug"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert!(!config.bridge.enabled);
    assert_eq!(config.bridge.unsupported_results, UnsupportedResultPolicy::Fail);
    assert_eq!(config.framework.max_nesting_depth, 3);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_from_toml_str_minimal() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert!(config.bridge.enabled);
    assert_eq!(config.bridge.unsupported_results, UnsupportedResultPolicy::Log);
}

#[test]
fn test_from_toml_str_unknown_policy() {
    let toml = r#"
        [bridge]
        unsupported_results = "panic"
    "#;
    let result = Config::from_toml_str(toml);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_validate_nesting_depth() {
    let mut config = Config::default();

    config.framework.max_nesting_depth = 1;
    assert!(config.validate().is_ok());

    config.framework.max_nesting_depth = 64;
    assert!(config.validate().is_ok());

    config.framework.max_nesting_depth = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid max_nesting_depth"));

    config.framework.max_nesting_depth = 65;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_log_level() {
    let mut config = Config::default();

    config.logging.level = "TRACE".to_string();
    assert!(config.validate().is_ok());

    config.logging.level = "verbose".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_from_file_reads_values() {
    let file = create_temp_config_file(
        r#"
        [bridge]
        unsupported_results = "skip"

        [framework]
        max_nesting_depth = 5
    "#,
    )
    .expect("Failed to create temp config");

    let config = Config::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.bridge.unsupported_results, UnsupportedResultPolicy::Skip);
    assert_eq!(config.framework.max_nesting_depth, 5);
    assert!(config.bridge.enabled);
}

#[test]
fn test_from_file_missing_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::from_file(&dir.path().join("absent.toml")).expect("Failed to load");
    assert_eq!(config.framework.max_nesting_depth, 8);
    assert_eq!(config.bridge.unsupported_results, UnsupportedResultPolicy::Log);
}

#[test]
fn test_from_file_env_override() {
    let file = create_temp_config_file(
        r#"
        [logging]
        level = "warn"
    "#,
    )
    .expect("Failed to create temp config");

    let config = with_env_var("REFSEARCH_LOGGING__LEVEL", "trace", || {
        Config::from_file(file.path())
    })
    .expect("Failed to load config");

    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let file = create_temp_config_file(
        r#"
        [framework]
        max_nesting_depth = 0
    "#,
    )
    .expect("Failed to create temp config");

    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_save_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.bridge.unsupported_results = UnsupportedResultPolicy::Fail;
    config.save(&path).expect("Failed to save config");

    let loaded = Config::from_file(&path).expect("Failed to reload config");
    assert_eq!(loaded.bridge.unsupported_results, UnsupportedResultPolicy::Fail);
}

#[test]
fn test_global_config_path() {
    if let Ok(path) = global_config_path() {
        assert!(path.ends_with(".refsearch/config.toml"));
    }
}
