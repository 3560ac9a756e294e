//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that `.env` values feed the environment override layer.
//! - Test that invalid `.env` files return errors without leaking their contents.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` to prevent cross-test contamination.
//! - Tests must serialize mutations to process-global state (cwd/env).

use serial_test::serial;
use std::fs;
use tempfile::TempDir;

use super::{CwdGuard, env_lock};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// Helper to clear the DOTENV_DISABLED variable.
fn enable_dotenv() {
    unsafe {
        std::env::remove_var("DOTENV_DISABLED");
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    enable_dotenv();

    let result = ConfigLoader::new().load_dotenv();

    assert!(
        result.is_ok(),
        "Missing .env file should be silently ignored"
    );
}

#[test]
#[serial]
fn test_dotenv_values_reach_env_layer() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    enable_dotenv();

    fs::write(
        temp_dir.path().join(".env"),
        "LIGHTWEIGHT_VERSION_NAME=4.5.6\nLIGHTWEIGHT_VERSION_CODE=456\n",
    )
    .unwrap();

    let result = ConfigLoader::new()
        .load_dotenv()
        .map(|loader| loader.from_env().resolve());

    unsafe {
        std::env::remove_var("LIGHTWEIGHT_VERSION_NAME");
        std::env::remove_var("LIGHTWEIGHT_VERSION_CODE");
    }

    let config = result
        .expect("Valid .env file should load successfully")
        .expect("Resolution should succeed");
    assert_eq!(config.version_name(), "4.5.6");
    assert_eq!(config.version_code(), 456);
}

#[test]
#[serial]
fn test_invalid_dotenv_returns_parse_error() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    enable_dotenv();

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result = ConfigLoader::new().load_dotenv();

    match result {
        Err(ConfigError::DotenvParse { .. }) => {}
        Err(other) => panic!(
            "Invalid .env should return DotenvParse error, got {}",
            other
        ),
        Ok(_) => panic!("Invalid .env should return DotenvParse error, got Ok"),
    }
}

#[test]
#[serial]
fn test_dotenv_parse_error_does_not_leak_contents() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    enable_dotenv();

    let secret_value = "keystore_password_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("KEYSTORE_PASSWORD={}\nINVALID_LINE_WITHOUT_EQUALS", secret_value),
    )
    .unwrap();

    let result = ConfigLoader::new().load_dotenv();

    unsafe {
        std::env::remove_var("KEYSTORE_PASSWORD");
    }

    match &result {
        Err(e) => {
            let error_string = e.to_string();
            assert!(
                !error_string.contains(secret_value),
                "Error message should NOT contain the secret value: {}",
                error_string
            );
            assert!(
                error_string.contains("DOTENV_DISABLED"),
                "Error should hint about DOTENV_DISABLED: {}",
                error_string
            );
        }
        Ok(_) => panic!("Expected error for invalid .env file, got Ok"),
    }
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            let result = ConfigLoader::new().load_dotenv();
            assert!(
                result.is_ok(),
                "DOTENV_DISABLED={} should skip .env loading even if file is invalid",
                value
            );
        });
    }
}

#[test]
#[serial]
fn test_dotenv_disabled_other_values_not_disabled() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    temp_env::with_var("DOTENV_DISABLED", Some("false"), || {
        let result = ConfigLoader::new().load_dotenv();
        assert!(
            matches!(result, Err(ConfigError::DotenvParse { .. })),
            "DOTENV_DISABLED=false should NOT disable dotenv loading"
        );
    });
}
