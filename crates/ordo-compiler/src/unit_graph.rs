//! Compilation unit dependency graph.
//!
//! Models the `depends-on` relation between units. Used to order units,
//! to compute which units a reference may resolve into, and to derive a
//! unit's code path. Uses `petgraph` for topological sorting.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use ordo_core::artifact::Role;
use ordo_core::unit::CompilationUnit;
use ordo_util::errors::{OrdoError, OrdoResult};

use crate::index::ResolutionScope;

/// A build graph that orders compilation units.
pub struct UnitGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
    units: HashMap<String, CompilationUnit>,
}

impl UnitGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
            units: HashMap::new(),
        }
    }

    /// Build the graph from resolved units and their `depends-on` lists.
    pub fn from_units(units: &[CompilationUnit]) -> Self {
        let mut graph = Self::new();
        for unit in units {
            graph.add_unit(unit.clone());
        }
        for unit in units {
            for dep in &unit.depends_on {
                graph.add_dependency(dep, &unit.name);
            }
        }
        graph
    }

    /// Add a compilation unit to the graph.
    pub fn add_unit(&mut self, unit: CompilationUnit) {
        let idx = self.graph.add_node(unit.name.clone());
        self.indices.insert(unit.name.clone(), idx);
        self.units.insert(unit.name.clone(), unit);
    }

    /// Declare that `dependent` depends on `dependency` (must be compiled after).
    pub fn add_dependency(&mut self, dependency: &str, dependent: &str) {
        if let (Some(&from), Some(&to)) =
            (self.indices.get(dependency), self.indices.get(dependent))
        {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn unit(&self, name: &str) -> Option<&CompilationUnit> {
        self.units.get(name)
    }

    /// Return compilation units in topological order (dependencies first).
    pub fn topological_order(&self) -> OrdoResult<Vec<&CompilationUnit>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.units.get(&self.graph[idx]))
                .collect()),
            Err(cycle) => {
                let culprit = cycle.node_id();
                let mut names: Vec<String> = tarjan_scc(&self.graph)
                    .into_iter()
                    .find(|group| group.contains(&culprit))
                    .unwrap_or_else(|| vec![culprit])
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect();
                names.sort();
                if let Some(first) = names.first().cloned() {
                    names.push(first);
                }
                Err(OrdoError::UnitCycle { units: names }.into())
            }
        }
    }

    /// `name` followed by every unit it transitively depends on, each once,
    /// in depth-first pre-order of the `depends-on` lists.
    pub fn closure(&self, name: &str) -> Vec<&CompilationUnit> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(unit) = self.units.get(current) else {
                continue;
            };
            out.push(unit);
            for dep in unit.depends_on.iter().rev() {
                if !seen.contains(dep.as_str()) {
                    stack.push(dep.as_str());
                }
            }
        }
        out
    }

    /// Units a reference written in `name` may resolve into.
    pub fn resolution_scope(&self, name: &str) -> ResolutionScope {
        ResolutionScope::new(self.closure(name).into_iter().map(|u| u.name.clone()))
    }

    /// Directories a compiler needs on its code path to build `name`.
    ///
    /// For the test role the unit's test output comes first. Output
    /// directories of the closure follow, then the content roots.
    pub fn code_path(&self, name: &str, role: Role) -> Vec<PathBuf> {
        let closure = self.closure(name);
        let mut path: Vec<PathBuf> = Vec::new();
        let mut push = |p: &PathBuf| {
            if !path.contains(p) {
                path.push(p.clone());
            }
        };
        if role.is_test() {
            if let Some(unit) = closure.first() {
                push(&unit.test_output_dir);
            }
        }
        for unit in &closure {
            push(&unit.output_dir);
        }
        for unit in &closure {
            push(&unit.root);
        }
        path
    }

    /// Include directories visible from `name`, in closure order.
    pub fn include_dirs(&self, name: &str) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for unit in self.closure(name) {
            for dir in &unit.include_roots {
                if !dirs.contains(dir) {
                    dirs.push(dir.clone());
                }
            }
        }
        dirs
    }
}

impl Default for UnitGraph {
    fn default() -> Self {
        Self::new()
    }
}
