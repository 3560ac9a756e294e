//! Integration tests for configuration loading through the public API.
//!
//! These tests verify end-to-end behavior of `load` + `resolve` and of the
//! `ConfigLoader` builder chain as the platform build tool would drive it.

use lightweight_config::{
    ConfigError, ConfigLoader, ErrorKind, RawProperties, SigningMode, load, resolve,
};
use tempfile::TempDir;

fn example_defaults() -> RawProperties {
    [
        ("minSdk", "21"),
        ("targetSdk", "36"),
        ("versionCode", "1"),
        ("versionName", "0.0.0"),
    ]
    .into_iter()
    .collect()
}

/// defaults + override file with versionCode=3 / versionName=0.0.3
#[test]
fn test_load_then_resolve_example() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("local.properties");
    std::fs::write(&path, "versionCode=3\nversionName=0.0.3\n").unwrap();

    let raw = load(&path).expect("file should load");
    let config = resolve(&raw, &example_defaults()).expect("config should resolve");

    assert_eq!(config.version_code(), 3);
    assert_eq!(config.version_name(), "0.0.3");
    assert_eq!(config.min_sdk(), 21);
    assert_eq!(config.target_sdk(), 36);
}

#[test]
fn test_missing_file_resolves_to_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let raw = load(temp_dir.path().join("absent.properties")).unwrap();
    assert!(raw.is_empty());

    let config = resolve(&raw, &example_defaults()).unwrap();
    assert_eq!(config.version_code(), 1);
    assert_eq!(config.version_name(), "0.0.0");
}

#[test]
fn test_non_numeric_version_code() {
    let raw: RawProperties = [("versionCode", "abc")].into_iter().collect();
    let err = resolve(&raw, &example_defaults()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_target_sdk_below_min_sdk() {
    let raw: RawProperties = [("minSdk", "30"), ("targetSdk", "21")].into_iter().collect();
    let err = resolve(&raw, &example_defaults()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}

/// Builder chain: explicit path > file > defaults, with the env layer skipped.
#[test]
fn test_builder_chain_without_env() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("local.properties");
    std::fs::write(&path, "flutter.versionCode=8\nsigningMode=release\n").unwrap();

    let config = ConfigLoader::new()
        .with_properties_path(path)
        .load_properties()
        .unwrap()
        .with_property("versionName", "8.0.0")
        .resolve()
        .unwrap();

    assert_eq!(config.version_code(), 8);
    assert_eq!(config.version_name(), "8.0.0");
    assert_eq!(config.signing_mode(), SigningMode::Release);
}

#[test]
fn test_resolved_config_serializes_camel_case() {
    let config = ConfigLoader::new().resolve().unwrap();
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["applicationId"], "com.example.lightweight");
    assert_eq!(json["versionCode"], 1);
    assert_eq!(json["targetSdk"], 36);
    assert_eq!(json["signingMode"], "debug");
    assert_eq!(json["shrinkResources"], false);
}

#[test]
fn test_rendered_properties_load_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resolved.properties");

    let config = ConfigLoader::new()
        .with_property("versionName", "1.0.0 beta")
        .resolve()
        .unwrap();
    std::fs::write(&path, config.to_properties().render()).unwrap();

    let reloaded = resolve(&load(&path).unwrap(), &RawProperties::new()).unwrap();
    assert_eq!(reloaded, config);
}
