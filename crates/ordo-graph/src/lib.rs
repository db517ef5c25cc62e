//! Dependency graph engine: a generic directed graph of build artifacts,
//! cycle-checked topological sorting, strongly connected components,
//! independent clusters, and dirty-set propagation.
//!
//! Nothing in this crate touches the file system. Node identities are
//! immutable; per-pass mutable state lives in [`state::NodeStateTable`].

pub mod graph;
pub mod propagate;
pub mod scc;
pub mod sort;
pub mod state;

pub use graph::{DependencyGraph, EdgeKind, NodeId};
pub use propagate::{propagate, DirtySet};
pub use sort::{sort, SortOutcome};
pub use state::{NodeState, NodeStateTable};
