use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Ordo operations.
#[derive(Debug, Error, Diagnostic)]
pub enum OrdoError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project manifest (e.g. Ordo.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Ordo.toml for syntax errors"))]
    Manifest { message: String },

    /// The file dependency graph contains a cycle.
    ///
    /// `first` is the file whose declaration closes the cycle and `second`
    /// the file it points back to.
    #[error("Cyclic module dependency detected. Check files {first} and {second}")]
    #[diagnostic(help(
        "Look at the include, parse_transform and behaviour declarations of these files or of their dependencies"
    ))]
    CyclicDependency { first: String, second: String },

    /// Compilation units depend on each other in a loop.
    #[error("Cyclic unit dependency detected: {}", units.join(" -> "))]
    #[diagnostic(help("Remove one of the `depends-on` entries in Ordo.toml"))]
    UnitCycle { units: Vec<String> },

    /// A persisted build-order document could not be read.
    #[error("Cannot read {}: {message}", path.display())]
    StoreRead { path: PathBuf, message: String },

    /// A build-order document could not be persisted.
    #[error("Cannot write {}: {message}", path.display())]
    StoreWrite { path: PathBuf, message: String },

    /// An artifact was not discovered under any known source root.
    #[error("{path} does not belong to any known source root")]
    #[diagnostic(help("This is a bug in ordo: every artifact must come from a discovered root"))]
    SourceRootMismatch { path: String },

    /// The language oracle failed to inspect a file.
    #[error("Cannot inspect {}: {message}", path.display())]
    Oracle { path: PathBuf, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type OrdoResult<T> = miette::Result<T>;
