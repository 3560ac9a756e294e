//! Configuration loader for properties files and environment variables.
//!
//! Responsibilities:
//! - Load the override properties file (`load`).
//! - Resolve raw layers into a validated `ResolvedConfig` (`resolve`).
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//!
//! Does NOT handle:
//! - Writing configuration back to disk.
//! - Invoking the platform build tool.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over properties file values.
//! - A missing properties file is an empty layer, never an error.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;
mod resolve;

pub use builder::ConfigLoader;
pub use env::{env_overrides, env_var_or_none};
pub use error::{ConfigError, ErrorKind};
pub use file::load;
pub use resolve::resolve;

#[cfg(test)]
mod tests;
