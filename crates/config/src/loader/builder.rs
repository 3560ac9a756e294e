//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Support loading from a properties file, environment variables, and direct builder methods.
//! - Resolve the final `ResolvedConfig` from the collected layers.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Typed parsing and validation (delegated to resolve.rs).
//!
//! Invariants / Assumptions:
//! - Precedence is fixed by layer, not by call order:
//!   builder methods > environment variables > properties file > defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;

use super::env::{apply_env, env_var_or_none};
use super::error::ConfigError;
use super::file::load;
use super::resolve::resolve;
use crate::constants::{DEFAULT_PROPERTIES_FILE, ENV_PROPERTIES_PATH};
use crate::properties::RawProperties;
use crate::types::ResolvedConfig;

/// Configuration loader that layers defaults, a properties file, the
/// environment and explicit overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    defaults: RawProperties,
    file_layer: RawProperties,
    env_layer: RawProperties,
    overrides: RawProperties,
    properties_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader backed by the built-in defaults.
    pub fn new() -> Self {
        Self {
            defaults: RawProperties::builtin_defaults(),
            file_layer: RawProperties::new(),
            env_layer: RawProperties::new(),
            overrides: RawProperties::new(),
            properties_path: None,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Replace the defaults layer.
    pub fn with_defaults(mut self, defaults: RawProperties) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the properties file read by `load_properties()`.
    pub fn with_properties_path(mut self, path: PathBuf) -> Self {
        self.properties_path = Some(path);
        self
    }

    /// Set a single property. Builder overrides take precedence over every other layer.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key, value);
        self
    }

    /// Read overrides from `LIGHTWEIGHT_*` environment variables.
    pub fn from_env(mut self) -> Self {
        apply_env(&mut self);
        self
    }

    /// Read the properties file layer.
    ///
    /// The path is chosen when this is called, independent of `from_env()`:
    /// the path set with `with_properties_path`, else `LIGHTWEIGHT_PROPERTIES_PATH`,
    /// else `local.properties` in the working directory. A missing file leaves
    /// the layer empty.
    pub fn load_properties(mut self) -> Result<Self, ConfigError> {
        let path = self
            .properties_path
            .clone()
            .or_else(|| env_var_or_none(ENV_PROPERTIES_PATH).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPERTIES_FILE));
        self.file_layer = load(&path)?;
        Ok(self)
    }

    /// The raw layers merged in precedence order, aliases canonicalized.
    pub fn merged_properties(&self) -> RawProperties {
        self.file_layer
            .canonicalize()
            .overlay(&self.env_layer.canonicalize())
            .overlay(&self.overrides.canonicalize())
    }

    /// Resolve the final configuration.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        tracing::debug!(
            defaults = self.defaults.len(),
            file = self.file_layer.len(),
            env = self.env_layer.len(),
            overrides = self.overrides.len(),
            "Resolving configuration layers"
        );
        resolve(&self.merged_properties(), &self.defaults)
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn set_env_layer(&mut self, layer: RawProperties) {
        self.env_layer = layer;
    }
}
