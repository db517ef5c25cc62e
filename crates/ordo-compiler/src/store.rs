//! Build-order documents shared between the prepare, order and compile phases.
//!
//! Layout under the project state directory:
//!
//! ```text
//! build-order/
//!   deps-tree.json            every artifact with its direct dependencies
//!   dirty-files-<unit>.json   ordered production and test files to rebuild
//! ```
//!
//! Documents are replaced atomically. A document that cannot be read is
//! treated as absent, which makes every consumer fall back to a full build.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ordo_core::artifact::ArtifactId;
use ordo_graph::{DependencyGraph, EdgeKind};
use ordo_util::errors::OrdoError;

/// Format version written into every document.
pub const FORMAT_VERSION: u32 = 1;

const TREE_FILE: &str = "deps-tree.json";
const ORDER_PREFIX: &str = "dirty-files-";

/// One artifact and the artifacts it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: ArtifactId,
    pub dependencies: Vec<ArtifactId>,
}

/// The full project dependency tree, nodes in topological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    pub version: u32,
    pub nodes: Vec<TreeNode>,
}

impl DependencyTree {
    /// Snapshot `graph`, listing nodes in `order`.
    pub fn from_graph(graph: &DependencyGraph<ArtifactId>, order: &[ArtifactId]) -> Self {
        let nodes = order
            .iter()
            .map(|path| TreeNode {
                path: path.clone(),
                dependencies: graph.outgoing(path).into_iter().cloned().collect(),
            })
            .collect();
        Self {
            version: FORMAT_VERSION,
            nodes,
        }
    }

    /// Rebuild a graph from the stored nodes.
    ///
    /// Edge kinds are not persisted; restored edges are reported as includes.
    pub fn to_graph(&self) -> DependencyGraph<ArtifactId> {
        let mut graph = DependencyGraph::new();
        for node in &self.nodes {
            graph.add_node(node.path.clone());
        }
        for node in &self.nodes {
            for dep in &node.dependencies {
                graph.add_edge(&node.path, dep, EdgeKind::Include);
            }
        }
        graph
    }

    /// Paths in stored (topological) order.
    pub fn order(&self) -> Vec<ArtifactId> {
        self.nodes.iter().map(|n| n.path.clone()).collect()
    }
}

/// Files of one unit that must be recompiled, in build order.
///
/// An empty value means "nothing to do" and differs from a missing document,
/// which means "rebuild everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOrder {
    pub production: Vec<ArtifactId>,
    pub test: Vec<ArtifactId>,
}

impl BuildOrder {
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.test.is_empty()
    }

    /// Files for the test step: production followed by test sources.
    pub fn with_tests(&self) -> Vec<ArtifactId> {
        self.production.iter().chain(&self.test).cloned().collect()
    }
}

#[derive(Serialize, Deserialize)]
struct BuildOrderDocument {
    version: u32,
    #[serde(flatten)]
    order: BuildOrder,
}

/// Reads and writes build-order documents in one directory.
#[derive(Debug, Clone)]
pub struct BuildOrderStore {
    dir: PathBuf,
}

impl BuildOrderStore {
    /// Store rooted at `<state_dir>/build-order`.
    pub fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.join("build-order"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tree_path(&self) -> PathBuf {
        self.dir.join(TREE_FILE)
    }

    pub fn order_path(&self, unit: &str) -> PathBuf {
        self.dir.join(format!("{ORDER_PREFIX}{unit}.json"))
    }

    pub fn write_tree(&self, tree: &DependencyTree) -> Result<(), OrdoError> {
        write_document(&self.tree_path(), tree)
    }

    /// The stored tree, or `None` when it is missing or unreadable.
    pub fn read_tree(&self) -> Option<DependencyTree> {
        let tree: DependencyTree = read_document(&self.tree_path())?;
        if tree.version != FORMAT_VERSION {
            tracing::warn!(
                "ignoring {}: unsupported format version {}",
                self.tree_path().display(),
                tree.version
            );
            return None;
        }
        Some(tree)
    }

    pub fn write_order(&self, unit: &str, order: &BuildOrder) -> Result<(), OrdoError> {
        let doc = BuildOrderDocument {
            version: FORMAT_VERSION,
            order: order.clone(),
        };
        write_document(&self.order_path(unit), &doc)
    }

    /// The stored order for `unit`, or `None` when it is missing or unreadable.
    pub fn read_order(&self, unit: &str) -> Option<BuildOrder> {
        let path = self.order_path(unit);
        let doc: BuildOrderDocument = read_document(&path)?;
        if doc.version != FORMAT_VERSION {
            tracing::warn!(
                "ignoring {}: unsupported format version {}",
                path.display(),
                doc.version
            );
            return None;
        }
        Some(doc.order)
    }

    /// Delete every per-unit order document. Returns how many were removed.
    pub fn remove_orders(&self) -> usize {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return 0;
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !(name.starts_with(ORDER_PREFIX) && name.ends_with(".json")) {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove {}: {e}", entry.path().display()),
            }
        }
        removed
    }

    /// Remove the whole store directory.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), OrdoError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| OrdoError::StoreWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ordo_util::fs::write_atomic(path, &bytes).map_err(|e| OrdoError::StoreWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.is_file() {
        tracing::debug!("{} does not exist", path.display());
        return None;
    }
    let parsed = std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()));
    match parsed {
        Ok(value) => Some(value),
        Err(message) => {
            let err = OrdoError::StoreRead {
                path: path.to_path_buf(),
                message,
            };
            tracing::warn!("{err}");
            None
        }
    }
}
