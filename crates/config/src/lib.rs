//! Build configuration resolver for the Lightweight Android app.
//!
//! This crate loads layered key/value configuration (built-in defaults, a
//! `local.properties` override file, environment variables and explicit
//! overrides), validates it, and produces an immutable `ResolvedConfig` for
//! the platform build tool.

pub mod constants;
mod loader;
pub mod properties;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, ErrorKind, env_overrides, env_var_or_none, load, resolve,
};
pub use properties::RawProperties;
pub use types::{ResolvedConfig, SigningMode, UnknownSigningMode};
