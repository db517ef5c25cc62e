//! High-level operations wiring CLI commands to the build-order pipeline:
//! prepare, order, build, plan, tree, clusters, cycles and clean.

pub mod ops_build;
pub mod ops_clean;
pub mod ops_clusters;
pub mod ops_order;
pub mod ops_plan;
pub mod ops_prepare;
pub mod ops_tree;

use std::path::{Path, PathBuf};

use ordo_compiler::discovery::{discover_all, FsEnumerator};
use ordo_compiler::edges::EdgeBuilder;
use ordo_compiler::index::ArtifactIndex;
use ordo_compiler::oracle::AttributeScanner;
use ordo_compiler::store::BuildOrderStore;
use ordo_core::artifact::ArtifactId;
use ordo_core::config::GlobalConfig;
use ordo_core::manifest::Manifest;
use ordo_core::unit::CompilationUnit;
use ordo_core::MANIFEST_FILE;
use ordo_graph::DependencyGraph;
use ordo_util::errors::{OrdoError, OrdoResult};

/// Everything an operation needs to know about the project.
pub struct ProjectContext {
    /// Directory containing `Ordo.toml`.
    pub root: PathBuf,
    pub manifest: Manifest,
    /// Units resolved against `root`, in name order.
    pub units: Vec<CompilationUnit>,
    /// Directory holding fingerprints and build-order documents.
    pub state_dir: PathBuf,
    pub store: BuildOrderStore,
}

impl ProjectContext {
    /// Load the project whose manifest is at `manifest_path`.
    ///
    /// `state_dir` overrides the global configuration; relative paths are
    /// resolved against the project root.
    pub fn load(manifest_path: &Path, state_dir: Option<&Path>) -> OrdoResult<Self> {
        let manifest = Manifest::from_path(manifest_path)?;
        let root = match manifest_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::env::current_dir().map_err(OrdoError::Io)?,
        };
        let root = ordo_util::fs::normalize_path(&std::env::current_dir().map_err(OrdoError::Io)?, &root);
        let state_dir = match state_dir {
            Some(dir) => ordo_util::fs::normalize_path(&root, dir),
            None => GlobalConfig::load()?.state_dir(&root),
        };
        let units = manifest.units(&root);
        tracing::debug!(
            "project {} at {} ({} units, state in {})",
            manifest.project.name,
            root.display(),
            units.len(),
            state_dir.display()
        );
        Ok(Self {
            store: BuildOrderStore::new(&state_dir),
            root,
            manifest,
            units,
            state_dir,
        })
    }

    /// Find `Ordo.toml` in `start` or one of its ancestors and load it.
    pub fn discover(start: &Path, state_dir: Option<&Path>) -> OrdoResult<Self> {
        let root = ordo_util::fs::find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| {
            OrdoError::Manifest {
                message: format!(
                    "could not find {MANIFEST_FILE} in {} or any parent directory",
                    start.display()
                ),
            }
        })?;
        Self::load(&root.join(MANIFEST_FILE), state_dir)
    }

    pub fn unit(&self, name: &str) -> OrdoResult<&CompilationUnit> {
        self.units.iter().find(|u| u.name == name).ok_or_else(|| {
            OrdoError::Generic {
                message: format!("no unit named '{name}' in {MANIFEST_FILE}"),
            }
            .into()
        })
    }

    pub fn enumerator(&self) -> OrdoResult<FsEnumerator> {
        FsEnumerator::new(
            self.root.clone(),
            self.manifest.extensions(),
            &self.manifest.project.exclude,
        )
    }

    /// Discover every artifact and resolve its declared dependencies.
    pub fn dependency_graph(&self) -> OrdoResult<DependencyGraph<ArtifactId>> {
        let enumerator = self.enumerator()?;
        let sources = discover_all(&enumerator, &self.units)?;
        let index = ArtifactIndex::new(&sources);
        Ok(EdgeBuilder::new(&AttributeScanner, &index).build(&index, &self.units))
    }

    /// `path` relative to the project root when it lies inside it.
    pub fn display_path(&self, path: &str) -> String {
        Path::new(path)
            .strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.to_string())
    }

    /// Turn a user-supplied path into an artifact identity.
    pub fn artifact_id(&self, path: &Path) -> ArtifactId {
        let cwd = std::env::current_dir().unwrap_or_else(|_| self.root.clone());
        ordo_util::fs::normalize_path(&cwd, path)
            .to_string_lossy()
            .into_owned()
    }
}
