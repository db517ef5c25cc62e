//! Shared utilities for the Ordo build-order scheduler.
//!
//! This crate provides cross-cutting concerns used by all other Ordo crates:
//! the unified error type, filesystem helpers, content hashing, and
//! Cargo-style terminal status lines.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;

use std::path::{Path, PathBuf};

/// Returns the path to the Ordo data directory (`~/.ordo/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".ordo")
}
