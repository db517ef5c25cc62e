//! Dirty-set propagation: everything that transitively depends on a changed
//! node must be rebuilt.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::graph::{DependencyGraph, NodeId};
use crate::state::NodeStateTable;

/// Nodes that must be rebuilt in one pass. Closed under "is depended on by".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySet<N: NodeId> {
    members: HashSet<N>,
}

impl<N: NodeId> DirtySet<N> {
    pub fn empty() -> Self {
        Self {
            members: HashSet::new(),
        }
    }

    pub fn contains(&self, id: &N) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.members.iter()
    }

    /// Members in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<N> {
        let mut out: Vec<N> = self.members.iter().cloned().collect();
        out.sort_unstable();
        out
    }

    pub fn is_subset(&self, other: &DirtySet<N>) -> bool {
        self.members.is_subset(&other.members)
    }
}

/// Mark `seeds` and all of their transitive dependents dirty in `table`.
///
/// Nodes already dirty are not revisited, so the walk touches each node at
/// most once.
pub fn mark_dependents<N: NodeId>(
    graph: &DependencyGraph<N>,
    seeds: &[NodeIndex],
    table: &mut NodeStateTable,
) {
    let mut stack: Vec<NodeIndex> = Vec::new();
    for &seed in seeds {
        if table.mark_dirty(seed) {
            stack.push(seed);
        }
    }
    while let Some(idx) = stack.pop() {
        for (dependent, _) in graph.incoming_indices(idx) {
            if table.mark_dirty(dependent) {
                stack.push(dependent);
            }
        }
    }
}

/// Close `seed` under the dependents relation.
///
/// An empty seed yields an empty set without visiting the graph. Seed
/// identities that are not graph nodes are skipped.
pub fn propagate<'a, N, I>(graph: &DependencyGraph<N>, seed: I) -> DirtySet<N>
where
    N: NodeId + 'a,
    I: IntoIterator<Item = &'a N>,
{
    let mut seeds = Vec::new();
    for id in seed {
        match graph.find(id) {
            Some(idx) => seeds.push(idx),
            None => tracing::debug!("ignoring dirty file outside the dependency graph: {id}"),
        }
    }
    if seeds.is_empty() {
        return DirtySet::empty();
    }

    let mut table = NodeStateTable::for_graph(graph);
    mark_dependents(graph, &seeds, &mut table);
    DirtySet {
        members: table
            .dirty_indices()
            .map(|idx| graph.node(idx).clone())
            .collect(),
    }
}
