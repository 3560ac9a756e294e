//! Resolution of raw property layers into a validated `ResolvedConfig`.
//!
//! Responsibilities:
//! - Overlay raw properties on defaults (aliases canonicalized per layer).
//! - Parse typed fields, reporting non-numeric or unknown values as `ConfigError::Parse`
//!   and integers overflowing 64 bits as `ConfigError::Validation`.
//! - Validate cross-field invariants, reporting violations as `ConfigError::Validation`.
//!
//! Does NOT handle:
//! - Reading files or environment variables (see file.rs and env.rs).
//!
//! Invariants:
//! - All parsing happens before any validation; the first failure is returned.
//! - `versionName`, `versionCode`, `minSdk` and `targetSdk` must be present in
//!   either layer. Every other field falls back to its built-in default.
//! - Resolution is pure: identical inputs always produce equal outputs.

use std::num::IntErrorKind;

use super::error::ConfigError;
use crate::constants::{
    DEFAULT_APPLICATION_ID, DEFAULT_COMPILE_SDK, DEFAULT_JVM_TARGET, KEY_APPLICATION_ID,
    KEY_COMPILE_SDK, KEY_JVM_TARGET, KEY_MIN_SDK, KEY_MINIFY_ENABLED, KEY_NAMESPACE,
    KEY_SHRINK_RESOURCES, KEY_SIGNING_MODE, KEY_TARGET_SDK, KEY_VERSION_CODE, KEY_VERSION_NAME,
    KNOWN_KEYS, MAX_VERSION_CODE,
};
use crate::properties::RawProperties;
use crate::types::{ResolvedConfig, SigningMode};

/// Resolve `raw` on top of `defaults` into a validated configuration.
pub fn resolve(
    raw: &RawProperties,
    defaults: &RawProperties,
) -> Result<ResolvedConfig, ConfigError> {
    let merged = defaults.canonicalize().overlay(&raw.canonicalize());

    for (key, _) in merged.iter() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::debug!(key = %key, "Ignoring unknown property");
        }
    }

    // Parse phase
    let version_code = int_field(&merged, KEY_VERSION_CODE)?;
    let min_sdk = int_field(&merged, KEY_MIN_SDK)?;
    let target_sdk = int_field(&merged, KEY_TARGET_SDK)?;
    let compile_sdk = int_field(&merged, KEY_COMPILE_SDK)?;
    let signing_mode = signing_mode_field(&merged)?.unwrap_or_default();
    let minify_enabled = bool_field(&merged, KEY_MINIFY_ENABLED)?.unwrap_or(false);
    let shrink_resources = bool_field(&merged, KEY_SHRINK_RESOURCES)?.unwrap_or(false);

    // Validation phase
    let application_id = non_empty(
        KEY_APPLICATION_ID,
        string_field(&merged, KEY_APPLICATION_ID).unwrap_or_else(|| DEFAULT_APPLICATION_ID.into()),
    )?;
    validate_package_name(KEY_APPLICATION_ID, &application_id)?;

    let namespace = non_empty(
        KEY_NAMESPACE,
        string_field(&merged, KEY_NAMESPACE).unwrap_or_else(|| application_id.clone()),
    )?;
    validate_package_name(KEY_NAMESPACE, &namespace)?;

    let version_name = non_empty(
        KEY_VERSION_NAME,
        required(KEY_VERSION_NAME, string_field(&merged, KEY_VERSION_NAME))?,
    )?;
    let jvm_target = non_empty(
        KEY_JVM_TARGET,
        string_field(&merged, KEY_JVM_TARGET).unwrap_or_else(|| DEFAULT_JVM_TARGET.into()),
    )?;

    let version_code = bounded(
        KEY_VERSION_CODE,
        required(KEY_VERSION_CODE, version_code)?,
        1,
        MAX_VERSION_CODE,
    )?;
    let min_sdk = bounded(KEY_MIN_SDK, required(KEY_MIN_SDK, min_sdk)?, 1, u32::MAX)?;
    let target_sdk = bounded(KEY_TARGET_SDK, required(KEY_TARGET_SDK, target_sdk)?, 1, u32::MAX)?;
    if target_sdk < min_sdk {
        return Err(ConfigError::validation(
            KEY_TARGET_SDK,
            format!("targetSdk ({target_sdk}) must be greater than or equal to minSdk ({min_sdk})"),
        ));
    }

    let compile_sdk = match compile_sdk {
        Some(value) => bounded(KEY_COMPILE_SDK, value, 1, u32::MAX)?,
        None => DEFAULT_COMPILE_SDK,
    };
    if compile_sdk < target_sdk {
        return Err(ConfigError::validation(
            KEY_COMPILE_SDK,
            format!(
                "compileSdk ({compile_sdk}) must be greater than or equal to targetSdk ({target_sdk})"
            ),
        ));
    }

    if shrink_resources && !minify_enabled {
        return Err(ConfigError::validation(
            KEY_SHRINK_RESOURCES,
            "shrinkResources requires minifyEnabled=true",
        ));
    }

    tracing::info!(
        application_id = %application_id,
        version_name = %version_name,
        version_code,
        min_sdk,
        target_sdk,
        signing_mode = %signing_mode,
        "Resolved build configuration"
    );

    Ok(ResolvedConfig {
        application_id,
        namespace,
        version_name,
        version_code,
        min_sdk,
        target_sdk,
        compile_sdk,
        signing_mode,
        minify_enabled,
        shrink_resources,
        jvm_target,
    })
}

fn string_field(props: &RawProperties, key: &str) -> Option<String> {
    props.get(key).map(|value| value.trim().to_string())
}

fn int_field(props: &RawProperties, key: &str) -> Result<Option<i64>, ConfigError> {
    props
        .get(key)
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|e| match e.kind() {
                // Overflow is a range violation.
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    ConfigError::validation(key, format!("'{}' is out of range", raw.trim()))
                }
                _ => ConfigError::Parse {
                    key: key.to_string(),
                    value: raw.to_string(),
                    expected: "an integer",
                },
            })
        })
        .transpose()
}

fn bool_field(props: &RawProperties, key: &str) -> Result<Option<bool>, ConfigError> {
    props
        .get(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfigError::Parse {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "a boolean (true or false)",
            }),
        })
        .transpose()
}

fn signing_mode_field(props: &RawProperties) -> Result<Option<SigningMode>, ConfigError> {
    props
        .get(KEY_SIGNING_MODE)
        .map(|raw| {
            raw.parse::<SigningMode>().map_err(|_| ConfigError::Parse {
                key: KEY_SIGNING_MODE.to_string(),
                value: raw.to_string(),
                expected: "a signing mode (debug or release)",
            })
        })
        .transpose()
}

fn required<T>(key: &str, value: Option<T>) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::validation(key, "is required"))
}

fn non_empty(key: &str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::validation(key, "must not be empty"));
    }
    Ok(value)
}

fn bounded(key: &str, value: i64, min: u32, max: u32) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| {
            ConfigError::validation(key, format!("must be between {min} and {max} (got {value})"))
        })
}

/// Java-style package name: two or more dot-separated segments, each starting
/// with an ASCII letter followed by letters, digits or underscores.
fn validate_package_name(key: &str, value: &str) -> Result<(), ConfigError> {
    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() < 2 {
        return Err(ConfigError::validation(
            key,
            format!("'{value}' must contain at least two dot-separated segments"),
        ));
    }

    for segment in segments {
        let mut chars = segment.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ConfigError::validation(
                key,
                format!(
                    "segment '{segment}' of '{value}' must start with a letter and contain only letters, digits or underscores"
                ),
            ));
        }
    }

    Ok(())
}
