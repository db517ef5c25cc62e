//! Cycle-checked topological sort.
//!
//! A depth-first traversal over nodes in insertion order. The post-order
//! finish sequence lists every dependency before its dependents. The first
//! edge that points back to a node still on the traversal stack is kept as
//! the cycle witness.

use petgraph::graph::NodeIndex;

use ordo_util::errors::OrdoError;

use crate::graph::{DependencyGraph, NodeId};

/// Result of [`sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome<N> {
    /// Every node exactly once, dependencies first. Meaningless as a build
    /// order when `first_cycle_edge` is set.
    pub order: Vec<N>,
    /// `(node whose edge closes the cycle, node it points back to)`.
    pub first_cycle_edge: Option<(N, N)>,
}

impl<N: NodeId> SortOutcome<N> {
    pub fn is_acyclic(&self) -> bool {
        self.first_cycle_edge.is_none()
    }

    /// The order, or [`OrdoError::CyclicDependency`] naming both cycle ends.
    pub fn into_order(self) -> Result<Vec<N>, OrdoError> {
        match self.first_cycle_edge {
            None => Ok(self.order),
            Some((first, second)) => Err(OrdoError::CyclicDependency {
                first: first.to_string(),
                second: second.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    OnStack,
    Done,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

impl Frame {
    fn enter<N: NodeId>(graph: &DependencyGraph<N>, node: NodeIndex) -> Self {
        Self {
            node,
            successors: graph
                .outgoing_indices(node)
                .into_iter()
                .map(|(t, _)| t)
                .collect(),
            next: 0,
        }
    }
}

/// Topologically sort `graph`, reporting the first back edge found.
pub fn sort<N: NodeId>(graph: &DependencyGraph<N>) -> SortOutcome<N> {
    let inner = graph.inner();
    let mut marks = vec![Mark::New; inner.node_count()];
    let mut order = Vec::with_capacity(inner.node_count());
    let mut first_cycle_edge = None;
    let mut stack: Vec<Frame> = Vec::new();

    for start in inner.node_indices() {
        if marks[start.index()] != Mark::New {
            continue;
        }
        marks[start.index()] = Mark::OnStack;
        stack.push(Frame::enter(graph, start));

        while let Some(frame) = stack.last_mut() {
            let from = frame.node;
            let Some(&succ) = frame.successors.get(frame.next) else {
                stack.pop();
                marks[from.index()] = Mark::Done;
                order.push(inner[from].clone());
                continue;
            };
            frame.next += 1;

            match marks[succ.index()] {
                Mark::New => {
                    marks[succ.index()] = Mark::OnStack;
                    stack.push(Frame::enter(graph, succ));
                }
                Mark::OnStack => {
                    if first_cycle_edge.is_none() {
                        tracing::debug!("back edge {} -> {}", inner[from], inner[succ]);
                        first_cycle_edge = Some((inner[from].clone(), inner[succ].clone()));
                    }
                }
                Mark::Done => {}
            }
        }
    }

    SortOutcome {
        order,
        first_cycle_edge,
    }
}
