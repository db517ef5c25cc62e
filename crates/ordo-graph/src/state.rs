//! Per-pass mutable node state, kept apart from the graph's node identities.

use petgraph::graph::NodeIndex;

use crate::graph::{DependencyGraph, NodeId};

/// Scratch state for one node during a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    pub dirty: bool,
    /// Strongly connected component id.
    pub scc: Option<usize>,
    /// Undirected connected component id.
    pub cluster: Option<usize>,
}

/// Arena of [`NodeState`] indexed by [`NodeIndex`].
///
/// Built for one graph and dropped with it; the graph itself is never
/// mutated by the algorithms that fill this table.
#[derive(Debug, Clone, Default)]
pub struct NodeStateTable {
    states: Vec<NodeState>,
}

impl NodeStateTable {
    pub fn for_graph<N: NodeId>(graph: &DependencyGraph<N>) -> Self {
        Self {
            states: vec![NodeState::default(); graph.node_count()],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&NodeState> {
        self.states.get(idx.index())
    }

    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut NodeState> {
        self.states.get_mut(idx.index())
    }

    /// Mark a node dirty. Returns `true` if it was clean before.
    pub fn mark_dirty(&mut self, idx: NodeIndex) -> bool {
        match self.states.get_mut(idx.index()) {
            Some(state) if !state.dirty => {
                state.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_dirty(&self, idx: NodeIndex) -> bool {
        self.get(idx).is_some_and(|s| s.dirty)
    }

    /// Indices of dirty nodes in ascending index order.
    pub fn dirty_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.dirty)
            .map(|(i, _)| NodeIndex::new(i))
    }

    pub fn scc_of(&self, idx: NodeIndex) -> Option<usize> {
        self.get(idx).and_then(|s| s.scc)
    }

    pub fn cluster_of(&self, idx: NodeIndex) -> Option<usize> {
        self.get(idx).and_then(|s| s.cluster)
    }
}
