//! Environment variable overrides for configuration.
//!
//! Responsibilities:
//! - Read `LIGHTWEIGHT_*` environment variables into a property layer.
//! - Apply the environment layer to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Interpreting values (see resolve.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over properties file values.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use super::builder::ConfigLoader;
use crate::constants::ENV_OVERRIDES;
use crate::properties::RawProperties;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Collect every set override variable into canonical properties.
pub fn env_overrides() -> RawProperties {
    ENV_OVERRIDES
        .iter()
        .filter_map(|(var, key)| {
            env_var_or_none(var).map(|value| {
                tracing::debug!(var, key, "Applying environment override");
                (*key, value)
            })
        })
        .collect()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) {
    loader.set_env_layer(env_overrides());
}
