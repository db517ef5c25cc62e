//! Content fingerprints used to find which files changed since the last pass.
//!
//! A snapshot maps every tracked artifact to the SHA-256 of its contents and
//! is stored as `<state-dir>/fingerprints.json`. Comparing the stored
//! snapshot with a fresh one yields the dirty seed for propagation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ordo_core::artifact::ArtifactId;
use ordo_util::errors::OrdoError;

use crate::store::{DependencyTree, FORMAT_VERSION};

/// Path of the fingerprint snapshot inside a state directory.
pub fn storage_path(state_dir: &Path) -> PathBuf {
    state_dir.join("fingerprints.json")
}

/// Content hash and direct dependencies of every artifact in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub files: BTreeMap<ArtifactId, String>,
    /// Dependency lists at capture time. Needed to find what depended on a
    /// file after that file is gone from the current tree.
    #[serde(default)]
    pub dependencies: BTreeMap<ArtifactId, Vec<ArtifactId>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            files: BTreeMap::new(),
            dependencies: BTreeMap::new(),
        }
    }
}

impl Snapshot {
    /// Hash every node of `tree`. Files that cannot be read are left out,
    /// so they show up as removed in the next comparison.
    pub fn capture(tree: &DependencyTree) -> Self {
        let mut snapshot = Self::default();
        for node in &tree.nodes {
            match ordo_util::hash::sha256_file(Path::new(&node.path)) {
                Ok(hash) => {
                    snapshot.files.insert(node.path.clone(), hash);
                }
                Err(e) => tracing::debug!("not fingerprinting {}: {e}", node.path),
            }
            if !node.dependencies.is_empty() {
                snapshot
                    .dependencies
                    .insert(node.path.clone(), node.dependencies.clone());
            }
        }
        snapshot
    }

    /// Load a previously stored snapshot, if it exists and parses.
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read(path).ok()?;
        match serde_json::from_slice::<Snapshot>(&content) {
            Ok(snapshot) if snapshot.version == FORMAT_VERSION => Some(snapshot),
            Ok(snapshot) => {
                tracing::warn!(
                    "ignoring {}: unsupported format version {}",
                    path.display(),
                    snapshot.version
                );
                None
            }
            Err(e) => {
                tracing::warn!("ignoring {}: {e}", path.display());
                None
            }
        }
    }

    /// Save the snapshot to disk.
    pub fn save(&self, path: &Path) -> Result<(), OrdoError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| OrdoError::StoreWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        ordo_util::fs::write_atomic(path, &bytes).map_err(|e| OrdoError::StoreWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// What changed between `self` (previous) and `current`.
    pub fn changes(&self, current: &Snapshot) -> Changes {
        let mut changes = Changes::default();
        for (path, hash) in &current.files {
            match self.files.get(path) {
                None => changes.added.push(path.clone()),
                Some(old) if old != hash => changes.modified.push(path.clone()),
                Some(_) => {}
            }
        }
        for path in self.files.keys() {
            if !current.files.contains_key(path) {
                changes.removed.push(path.clone());
            }
        }
        changes
    }

    /// Files that directly depended on `path` when this snapshot was taken.
    pub fn dependents_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ArtifactId> + 'a {
        self.dependencies
            .iter()
            .filter(move |(_, deps)| deps.iter().any(|d| d == path))
            .map(|(dependent, _)| dependent)
    }
}

/// Difference between two snapshots. Each list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    pub added: Vec<ArtifactId>,
    pub modified: Vec<ArtifactId>,
    pub removed: Vec<ArtifactId>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Seed for dirty propagation.
    ///
    /// Added and modified files are seeds themselves. A removed file is no
    /// longer in the graph, so the files that depended on it according to
    /// `previous` are seeded instead.
    pub fn seeds(&self, previous: &Snapshot) -> Vec<ArtifactId> {
        let mut seeds: BTreeSet<ArtifactId> = self
            .added
            .iter()
            .chain(&self.modified)
            .cloned()
            .collect();
        for removed in &self.removed {
            seeds.extend(previous.dependents_of(removed).cloned());
        }
        seeds.into_iter().collect()
    }
}
