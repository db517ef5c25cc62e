//! Compilation unit: the addressable build target that owns a set of roots.

use std::path::PathBuf;

use crate::artifact::Role;

/// A compilation unit resolved against the project root. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Unique name (e.g. "app", "core_lib").
    pub name: String,
    /// Content root of the unit.
    pub root: PathBuf,
    /// Production module source directories.
    pub source_roots: Vec<PathBuf>,
    /// Test module source directories.
    pub test_roots: Vec<PathBuf>,
    /// Header directories passed as include paths.
    pub include_roots: Vec<PathBuf>,
    /// Units whose artifacts are visible from this one.
    pub depends_on: Vec<String>,
    /// Project-level followed by unit-level global transforms, deduplicated.
    pub global_transforms: Vec<String>,
    /// Output directory for compiled production modules.
    pub output_dir: PathBuf,
    /// Output directory for compiled test modules.
    pub test_output_dir: PathBuf,
}

impl CompilationUnit {
    /// Module source roots for the given role.
    pub fn roots_for(&self, role: Role) -> &[PathBuf] {
        match role {
            Role::Production => &self.source_roots,
            Role::Test => &self.test_roots,
        }
    }

    /// Output directory for the given role.
    pub fn output_for(&self, role: Role) -> &PathBuf {
        match role {
            Role::Production => &self.output_dir,
            Role::Test => &self.test_output_dir,
        }
    }
}
