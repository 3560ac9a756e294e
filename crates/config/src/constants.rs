//! Centralized constants for the build configuration resolver.
//!
//! This module contains property keys, aliases, default values and bounds
//! used across the crate to avoid magic string and number duplication.

// =============================================================================
// Canonical Property Keys
// =============================================================================

pub const KEY_APPLICATION_ID: &str = "applicationId";
pub const KEY_NAMESPACE: &str = "namespace";
pub const KEY_VERSION_NAME: &str = "versionName";
pub const KEY_VERSION_CODE: &str = "versionCode";
pub const KEY_MIN_SDK: &str = "minSdk";
pub const KEY_TARGET_SDK: &str = "targetSdk";
pub const KEY_COMPILE_SDK: &str = "compileSdk";
pub const KEY_SIGNING_MODE: &str = "signingMode";
pub const KEY_MINIFY_ENABLED: &str = "minifyEnabled";
pub const KEY_SHRINK_RESOURCES: &str = "shrinkResources";
pub const KEY_JVM_TARGET: &str = "jvmTarget";

/// Keys written by the Flutter tool into `local.properties`, mapped to the
/// canonical key they stand for.
pub const KEY_ALIASES: &[(&str, &str)] = &[
    ("flutter.versionName", KEY_VERSION_NAME),
    ("flutter.versionCode", KEY_VERSION_CODE),
    ("flutter.minSdkVersion", KEY_MIN_SDK),
    ("flutter.targetSdkVersion", KEY_TARGET_SDK),
    ("flutter.compileSdkVersion", KEY_COMPILE_SDK),
];

/// Every key that takes part in resolution.
pub const KNOWN_KEYS: &[&str] = &[
    KEY_APPLICATION_ID,
    KEY_NAMESPACE,
    KEY_VERSION_NAME,
    KEY_VERSION_CODE,
    KEY_MIN_SDK,
    KEY_TARGET_SDK,
    KEY_COMPILE_SDK,
    KEY_SIGNING_MODE,
    KEY_MINIFY_ENABLED,
    KEY_SHRINK_RESOURCES,
    KEY_JVM_TARGET,
];

// =============================================================================
// Built-in Defaults
// =============================================================================

pub const DEFAULT_APPLICATION_ID: &str = "com.example.lightweight";
pub const DEFAULT_VERSION_NAME: &str = "0.0.0";
pub const DEFAULT_VERSION_CODE: u32 = 1;
pub const DEFAULT_MIN_SDK: u32 = 21;
pub const DEFAULT_TARGET_SDK: u32 = 36;
pub const DEFAULT_COMPILE_SDK: u32 = 36;
pub const DEFAULT_SIGNING_MODE: &str = "debug";
pub const DEFAULT_JVM_TARGET: &str = "1.8";

/// File read by `ConfigLoader::load_properties` when no path is configured.
pub const DEFAULT_PROPERTIES_FILE: &str = "local.properties";

// =============================================================================
// Validation Bounds
// =============================================================================

/// Largest version code accepted by the Play Store.
pub const MAX_VERSION_CODE: u32 = 2_100_000_000;

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable overriding the properties file path.
pub const ENV_PROPERTIES_PATH: &str = "LIGHTWEIGHT_PROPERTIES_PATH";

/// Environment variables mapped to the canonical key they override.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("LIGHTWEIGHT_APPLICATION_ID", KEY_APPLICATION_ID),
    ("LIGHTWEIGHT_NAMESPACE", KEY_NAMESPACE),
    ("LIGHTWEIGHT_VERSION_NAME", KEY_VERSION_NAME),
    ("LIGHTWEIGHT_VERSION_CODE", KEY_VERSION_CODE),
    ("LIGHTWEIGHT_MIN_SDK", KEY_MIN_SDK),
    ("LIGHTWEIGHT_TARGET_SDK", KEY_TARGET_SDK),
    ("LIGHTWEIGHT_COMPILE_SDK", KEY_COMPILE_SDK),
    ("LIGHTWEIGHT_SIGNING_MODE", KEY_SIGNING_MODE),
    ("LIGHTWEIGHT_MINIFY_ENABLED", KEY_MINIFY_ENABLED),
    ("LIGHTWEIGHT_SHRINK_RESOURCES", KEY_SHRINK_RESOURCES),
    ("LIGHTWEIGHT_JVM_TARGET", KEY_JVM_TARGET),
];
