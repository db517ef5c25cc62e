//! Strongly connected components and independent dependency clusters.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::graph::{DependencyGraph, NodeId};
use crate::state::NodeStateTable;

/// Assign each node its strongly connected component id.
///
/// Ids follow petgraph's Tarjan output order. Two nodes share an id exactly
/// when each is reachable from the other. Returns the number of components.
pub fn assign_scc<N: NodeId>(graph: &DependencyGraph<N>, table: &mut NodeStateTable) -> usize {
    let components = tarjan_scc(graph.inner());
    for (id, members) in components.iter().enumerate() {
        for &idx in members {
            if let Some(state) = table.get_mut(idx) {
                state.scc = Some(id);
            }
        }
    }
    components.len()
}

/// Assign each node the id of its undirected connected component.
///
/// Every edge is mirrored by a synthetic back-reference so that strong
/// connectivity of the copy equals weak connectivity of `graph`.
/// Returns the number of clusters.
pub fn assign_clusters<N: NodeId>(graph: &DependencyGraph<N>, table: &mut NodeStateTable) -> usize {
    let inner = graph.inner();
    let mut mirrored: DiGraph<(), ()> = DiGraph::with_capacity(inner.node_count(), inner.edge_count() * 2);
    for _ in inner.node_indices() {
        mirrored.add_node(());
    }
    for edge in inner.edge_references() {
        mirrored.add_edge(edge.source(), edge.target(), ());
        mirrored.add_edge(edge.target(), edge.source(), ());
    }

    let components = tarjan_scc(&mirrored);
    for (id, members) in components.iter().enumerate() {
        for &idx in members {
            if let Some(state) = table.get_mut(idx) {
                state.cluster = Some(id);
            }
        }
    }
    components.len()
}

/// Strongly connected components as groups of node identities.
pub fn strongly_connected<N: NodeId>(graph: &DependencyGraph<N>) -> Vec<Vec<N>> {
    let mut table = NodeStateTable::for_graph(graph);
    let count = assign_scc(graph, &mut table);
    group_by(graph, count, |idx| table.scc_of(idx))
}

/// Groups of nodes that take part in a dependency cycle, sorted.
pub fn cycles<N: NodeId>(graph: &DependencyGraph<N>) -> Vec<Vec<N>> {
    let mut groups: Vec<Vec<N>> = strongly_connected(graph)
        .into_iter()
        .filter(|group| group.len() > 1)
        .map(|mut group| {
            group.sort_unstable();
            group
        })
        .collect();
    groups.sort_unstable();
    groups
}

/// Independent dependency clusters: members sorted, clusters ordered by
/// their first member.
pub fn clusters<N: NodeId>(graph: &DependencyGraph<N>) -> Vec<Vec<N>> {
    let mut table = NodeStateTable::for_graph(graph);
    let count = assign_clusters(graph, &mut table);
    let mut groups = group_by(graph, count, |idx| table.cluster_of(idx));
    for group in &mut groups {
        group.sort_unstable();
    }
    groups.sort_unstable();
    groups
}

fn group_by<N, F>(graph: &DependencyGraph<N>, count: usize, id_of: F) -> Vec<Vec<N>>
where
    N: NodeId,
    F: Fn(NodeIndex) -> Option<usize>,
{
    let mut groups: Vec<Vec<N>> = vec![Vec::new(); count];
    for idx in graph.inner().node_indices() {
        if let Some(id) = id_of(idx) {
            groups[id].push(graph.node(idx).clone());
        }
    }
    groups.retain(|g| !g.is_empty());
    groups
}
