//! Core data types for the Ordo build-order scheduler.
//!
//! This crate defines the fundamental types that describe a project:
//! the `Ordo.toml` manifest, resolved compilation units with their source
//! roots, tracked source artifacts, and the global user configuration.
//!
//! This crate is intentionally free of graph logic and persisted state.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Ordo.toml";

pub mod artifact;
pub mod config;
pub mod manifest;
pub mod unit;
