//! Source artifacts tracked by the dependency graph.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Stable identity of an artifact: its absolute path rendered as a string.
pub type ArtifactId = String;

/// What an artifact is, as far as build ordering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A compilable module source (`.erl`).
    Module,
    /// An include file (`.hrl`). Contributes edges, never compile-order entries.
    Header,
    /// Anything else found under a root.
    Other,
}

/// Whether an artifact belongs to production or test sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Production,
    Test,
}

impl Role {
    pub fn is_test(self) -> bool {
        matches!(self, Role::Test)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Production => f.write_str("production"),
            Role::Test => f.write_str("test"),
        }
    }
}

/// A single source or header file discovered under a unit's roots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    pub path: ArtifactId,
    pub kind: ArtifactKind,
    /// Name of the owning compilation unit.
    pub unit: String,
    pub role: Role,
}

impl Artifact {
    pub fn new(
        path: impl Into<ArtifactId>,
        kind: ArtifactKind,
        unit: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            unit: unit.into(),
            role,
        }
    }

    /// Module name used by name-based references: the file stem.
    pub fn module_name(&self) -> Option<&str> {
        Path::new(&self.path).file_stem().and_then(|s| s.to_str())
    }

    /// File name including extension, used for include lookups.
    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.path).file_name().and_then(|s| s.to_str())
    }

    pub fn is_module(&self) -> bool {
        self.kind == ArtifactKind::Module
    }

    pub fn is_header(&self) -> bool {
        self.kind == ArtifactKind::Header
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// File extensions that classify artifacts by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExtensions {
    pub module: Vec<String>,
    pub header: Vec<String>,
}

impl Default for SourceExtensions {
    fn default() -> Self {
        Self {
            module: vec!["erl".to_string()],
            header: vec!["hrl".to_string()],
        }
    }
}

impl SourceExtensions {
    /// Classify a path by its extension.
    pub fn classify(&self, path: &Path) -> ArtifactKind {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return ArtifactKind::Other;
        };
        if self.module.iter().any(|m| m == ext) {
            ArtifactKind::Module
        } else if self.header.iter().any(|h| h == ext) {
            ArtifactKind::Header
        } else {
            ArtifactKind::Other
        }
    }
}
