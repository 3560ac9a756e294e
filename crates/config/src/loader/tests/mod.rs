//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test resolution of defaults and overrides into `ResolvedConfig`.
//! - Test properties file loading through the builder.
//! - Test environment variable handling and precedence.
//! - Test parse and validation failures.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::properties::RawProperties;

pub mod dotenv_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Build a property set from string pairs.
pub fn props<const N: usize>(pairs: [(&str, &str); N]) -> RawProperties {
    pairs.into_iter().collect()
}

/// RAII guard for temporarily changing the current working directory.
pub struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    pub fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
