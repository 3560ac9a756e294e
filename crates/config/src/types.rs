//! Resolved configuration types handed to the platform build tool.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    KEY_APPLICATION_ID, KEY_COMPILE_SDK, KEY_JVM_TARGET, KEY_MIN_SDK, KEY_MINIFY_ENABLED,
    KEY_NAMESPACE, KEY_SHRINK_RESOURCES, KEY_SIGNING_MODE, KEY_TARGET_SDK, KEY_VERSION_CODE,
    KEY_VERSION_NAME,
};
use crate::properties::RawProperties;

/// Which signing configuration the release build uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMode {
    /// Sign with the debug keystore.
    #[default]
    Debug,
    /// Sign with the release keystore.
    Release,
}

impl SigningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningMode::Debug => "debug",
            SigningMode::Release => "release",
        }
    }
}

impl fmt::Display for SigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a signing mode string is not `debug` or `release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSigningMode(pub String);

impl fmt::Display for UnknownSigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signing mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownSigningMode {}

impl FromStr for SigningMode {
    type Err = UnknownSigningMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(SigningMode::Debug),
            "release" => Ok(SigningMode::Release),
            _ => Err(UnknownSigningMode(s.to_string())),
        }
    }
}

/// Fully resolved and validated build configuration.
///
/// Only `loader::resolve` constructs this type, so every instance satisfies
/// `version_code >= 1`, `min_sdk <= target_sdk <= compile_sdk`, and
/// `shrink_resources` implies `minify_enabled`. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub(crate) application_id: String,
    pub(crate) namespace: String,
    pub(crate) version_name: String,
    pub(crate) version_code: u32,
    pub(crate) min_sdk: u32,
    pub(crate) target_sdk: u32,
    pub(crate) compile_sdk: u32,
    pub(crate) signing_mode: SigningMode,
    pub(crate) minify_enabled: bool,
    pub(crate) shrink_resources: bool,
    pub(crate) jvm_target: String,
}

impl ResolvedConfig {
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Package namespace for generated sources. Equals `application_id` unless overridden.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version_name(&self) -> &str {
        &self.version_name
    }

    pub fn version_code(&self) -> u32 {
        self.version_code
    }

    pub fn min_sdk(&self) -> u32 {
        self.min_sdk
    }

    pub fn target_sdk(&self) -> u32 {
        self.target_sdk
    }

    pub fn compile_sdk(&self) -> u32 {
        self.compile_sdk
    }

    pub fn signing_mode(&self) -> SigningMode {
        self.signing_mode
    }

    pub fn minify_enabled(&self) -> bool {
        self.minify_enabled
    }

    pub fn shrink_resources(&self) -> bool {
        self.shrink_resources
    }

    pub fn jvm_target(&self) -> &str {
        &self.jvm_target
    }

    /// Flatten into canonical properties, e.g. for writing a file the
    /// platform build tool reads.
    pub fn to_properties(&self) -> RawProperties {
        [
            (KEY_APPLICATION_ID, self.application_id.clone()),
            (KEY_NAMESPACE, self.namespace.clone()),
            (KEY_VERSION_NAME, self.version_name.clone()),
            (KEY_VERSION_CODE, self.version_code.to_string()),
            (KEY_MIN_SDK, self.min_sdk.to_string()),
            (KEY_TARGET_SDK, self.target_sdk.to_string()),
            (KEY_COMPILE_SDK, self.compile_sdk.to_string()),
            (KEY_SIGNING_MODE, self.signing_mode.to_string()),
            (KEY_MINIFY_ENABLED, self.minify_enabled.to_string()),
            (KEY_SHRINK_RESOURCES, self.shrink_resources.to_string()),
            (KEY_JVM_TARGET, self.jvm_target.clone()),
        ]
        .into_iter()
        .collect()
    }
}
