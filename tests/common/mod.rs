//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::{Path, PathBuf};

/// Write a fixture file under `dir`, creating parent directories as needed.
/// Returns the full path of the written file.
#[allow(dead_code)]
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let full_path = dir.join(relative);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&full_path, content).unwrap();
    full_path
}
