//! Properties file loading.
//!
//! Responsibilities:
//! - Read a properties file from disk into `RawProperties`.
//!
//! Invariants:
//! - A missing file yields an empty property set, not an error.
//! - Every other I/O failure (permissions, invalid UTF-8, path is a directory)
//!   is a `ConfigError::Read` carrying the path.

use std::io::ErrorKind;
use std::path::Path;

use super::error::ConfigError;
use crate::properties::RawProperties;

/// Load a properties file if present.
pub fn load(path: impl AsRef<Path>) -> Result<RawProperties, ConfigError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let props = RawProperties::parse(&text);
            tracing::debug!(path = %path.display(), entries = props.len(), "Loaded properties file");
            Ok(props)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Properties file not found; using defaults");
            Ok(RawProperties::new())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
