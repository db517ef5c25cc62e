//! Directed artifact graph with stable node identities.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Identity of a graph node. Implemented for every type that can be used as
/// a map key and printed, so plain `String` paths work out of the box.
pub trait NodeId: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

/// Why one artifact depends on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The dependent textually includes a header.
    Include,
    /// The dependent is rewritten at compile time by the target module.
    Transform,
    /// The dependent implements an interface declared by the target module.
    Interface,
    /// A transform applied to every module of a unit.
    GlobalTransform,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeKind::Include => "include",
            EdgeKind::Transform => "transform",
            EdgeKind::Interface => "interface",
            EdgeKind::GlobalTransform => "global transform",
        };
        f.write_str(label)
    }
}

/// A dependency graph backed by petgraph.
///
/// An edge `a -> b` means `a` depends on `b`: `b` must be built first.
/// Self-loops are never stored and at most one edge exists per ordered pair.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N: NodeId> {
    graph: DiGraph<N, EdgeKind>,
    index: HashMap<N, NodeIndex>,
}

impl<N: NodeId> DependencyGraph<N> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Add or retrieve a node. If the identity already exists, returns the existing index.
    pub fn add_node(&mut self, id: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// Record that `from` depends on `to`.
    ///
    /// Returns `false` when the edge was not inserted: an endpoint is not a
    /// node, the edge would be a self-loop, or the pair is already connected
    /// (the first kind recorded wins).
    pub fn add_edge(&mut self, from: &N, to: &N, kind: EdgeKind) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, kind);
        true
    }

    /// Remove the edge `from -> to`, returning its kind if it existed.
    pub fn remove_edge(&mut self, from: &N, to: &N) -> Option<EdgeKind> {
        let a = self.find(from)?;
        let b = self.find(to)?;
        let edge: EdgeIndex = self.graph.find_edge(a, b)?;
        self.graph.remove_edge(edge)
    }

    /// Look up a node index by identity.
    pub fn find(&self, id: &N) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &N) -> bool {
        self.index.contains_key(id)
    }

    /// Get the node identity for an index.
    pub fn node(&self, idx: NodeIndex) -> &N {
        &self.graph[idx]
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct dependencies of a node, in the order the edges were added.
    pub fn outgoing_indices(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeKind)> {
        // petgraph walks adjacency lists newest first.
        let mut edges: Vec<(NodeIndex, EdgeKind)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        edges.reverse();
        edges
    }

    /// Direct dependents of a node, in the order the edges were added.
    pub fn incoming_indices(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeKind)> {
        let mut edges: Vec<(NodeIndex, EdgeKind)> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.source(), *e.weight()))
            .collect();
        edges.reverse();
        edges
    }

    /// What `id` depends on. Empty for unknown identities.
    pub fn outgoing(&self, id: &N) -> Vec<&N> {
        match self.find(id) {
            Some(idx) => self
                .outgoing_indices(idx)
                .into_iter()
                .map(|(t, _)| &self.graph[t])
                .collect(),
            None => Vec::new(),
        }
    }

    /// What depends on `id`. Empty for unknown identities.
    pub fn incoming(&self, id: &N) -> Vec<&N> {
        match self.find(id) {
            Some(idx) => self
                .incoming_indices(idx)
                .into_iter()
                .map(|(s, _)| &self.graph[s])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Borrow the underlying petgraph graph for algorithms.
    pub fn inner(&self) -> &DiGraph<N, EdgeKind> {
        &self.graph
    }

    /// Render every node nobody depends on, followed by its dependencies.
    ///
    /// Each node's children are listed once. Later appearances are marked
    /// `(*)` and not expanded, which also terminates cycles. Nodes reachable
    /// only through a cycle are rendered from the first of them not yet shown.
    pub fn print_tree<F>(&self, label: F) -> String
    where
        F: Fn(&N) -> String,
    {
        let mut output = String::new();
        let mut expanded = HashSet::new();
        let roots = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, Direction::Incoming).next().is_none());
        let rest: Vec<NodeIndex> = self.graph.node_indices().collect();
        for idx in roots.collect::<Vec<_>>().into_iter().chain(rest) {
            if expanded.contains(&idx) {
                continue;
            }
            output.push_str(&label(&self.graph[idx]));
            output.push('\n');
            self.print_children(&mut output, idx, "", Direction::Outgoing, &label, &mut expanded);
        }
        output
    }

    /// Render everything that depends on `id`, directly or transitively.
    ///
    /// Returns an empty string for unknown identities.
    pub fn print_inverted_tree<F>(&self, id: &N, label: F) -> String
    where
        F: Fn(&N) -> String,
    {
        let mut output = String::new();
        let Some(idx) = self.find(id) else {
            return output;
        };
        output.push_str(&label(&self.graph[idx]));
        output.push('\n');
        self.print_children(&mut output, idx, "", Direction::Incoming, &label, &mut HashSet::new());
        output
    }

    fn print_children<F>(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        direction: Direction,
        label: &F,
        expanded: &mut HashSet<NodeIndex>,
    ) where
        F: Fn(&N) -> String,
    {
        expanded.insert(idx);
        let next = match direction {
            Direction::Outgoing => self.outgoing_indices(idx),
            Direction::Incoming => self.incoming_indices(idx),
        };
        let count = next.len();
        for (i, (child, kind)) in next.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            let name = label(&self.graph[child]);
            if expanded.contains(&child) {
                output.push_str(&format!("{prefix}{connector}{name} ({kind}) (*)\n"));
                continue;
            }
            output.push_str(&format!("{prefix}{connector}{name} ({kind})\n"));
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            self.print_children(output, child, &child_prefix, direction, label, expanded);
        }
    }
}

impl<N: NodeId> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}
