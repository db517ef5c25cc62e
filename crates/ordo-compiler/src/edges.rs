//! Turn declared names into dependency edges between discovered artifacts.

use std::collections::HashMap;

use ordo_core::artifact::{Artifact, ArtifactId, Role};
use ordo_core::unit::CompilationUnit;
use ordo_graph::{DependencyGraph, EdgeKind};

use crate::index::{ArtifactIndex, NameResolver, ResolutionScope};
use crate::oracle::LanguageOracle;
use crate::unit_graph::UnitGraph;

/// Builds the project dependency graph.
///
/// Production files only see production files; test files see both.
/// Includes resolve to visible headers. Transforms and interfaces resolve
/// to visible modules. Every module additionally depends on its unit's
/// global transforms. Names that resolve to nothing are dropped.
pub struct EdgeBuilder<'a> {
    oracle: &'a dyn LanguageOracle,
    resolver: &'a dyn NameResolver,
}

impl<'a> EdgeBuilder<'a> {
    pub fn new(oracle: &'a dyn LanguageOracle, resolver: &'a dyn NameResolver) -> Self {
        Self { oracle, resolver }
    }

    /// One node per indexed artifact, in discovery order, plus the
    /// resolved edges.
    pub fn build(&self, index: &ArtifactIndex, units: &[CompilationUnit]) -> DependencyGraph<ArtifactId> {
        let unit_graph = UnitGraph::from_units(units);
        let mut scopes: HashMap<(&str, Role), ResolutionScope> = HashMap::new();
        for unit in units {
            let scope = unit_graph.resolution_scope(&unit.name);
            for role in [Role::Production, Role::Test] {
                scopes.insert((unit.name.as_str(), role), scope.clone().for_role(role));
            }
        }
        let global_transforms: HashMap<&str, &[String]> = units
            .iter()
            .map(|u| (u.name.as_str(), u.global_transforms.as_slice()))
            .collect();

        let mut graph = DependencyGraph::new();
        for artifact in index.artifacts() {
            graph.add_node(artifact.path.clone());
        }

        let empty = ResolutionScope::default();
        for artifact in index.artifacts() {
            let scope = scopes
                .get(&(artifact.unit.as_str(), artifact.role))
                .unwrap_or(&empty);
            self.add_declared_edges(&mut graph, artifact, scope);

            if artifact.is_module() {
                let globals = global_transforms
                    .get(artifact.unit.as_str())
                    .copied()
                    .unwrap_or_default();
                for name in globals {
                    let targets = self.resolver.resolve_module(name, scope);
                    connect(&mut graph, artifact, name, &targets, EdgeKind::GlobalTransform);
                }
            }
        }

        tracing::debug!(
            "dependency graph: {} artifacts, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    fn add_declared_edges(
        &self,
        graph: &mut DependencyGraph<ArtifactId>,
        artifact: &Artifact,
        scope: &ResolutionScope,
    ) {
        let decls = match self.oracle.declarations(artifact) {
            Ok(decls) => decls,
            Err(e) => {
                tracing::warn!("{e}; its dependencies are ignored");
                return;
            }
        };

        for name in &decls.includes {
            let targets = self.resolver.resolve_include(name, artifact, scope);
            connect(graph, artifact, name, &targets, EdgeKind::Include);
        }
        for name in &decls.transforms {
            let targets = self.resolver.resolve_module(name, scope);
            connect(graph, artifact, name, &targets, EdgeKind::Transform);
        }
        for name in &decls.interfaces {
            let targets = self.resolver.resolve_module(name, scope);
            connect(graph, artifact, name, &targets, EdgeKind::Interface);
        }
    }
}

fn connect(
    graph: &mut DependencyGraph<ArtifactId>,
    from: &Artifact,
    name: &str,
    targets: &[ArtifactId],
    kind: EdgeKind,
) {
    if targets.is_empty() {
        tracing::trace!("{from}: unresolved {kind} '{name}'");
        return;
    }
    if targets.len() > 1 {
        tracing::debug!("{from}: {kind} '{name}' matches {} artifacts", targets.len());
    }
    for target in targets {
        graph.add_edge(&from.path, target, kind);
    }
}
