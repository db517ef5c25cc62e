//! Operation: resolve the project dependency graph and persist it.

use ordo_compiler::partition::{content_roots, unit_major};
use ordo_compiler::store::DependencyTree;
use ordo_compiler::unit_graph::UnitGraph;
use ordo_core::artifact::ArtifactId;
use ordo_graph::sort;
use ordo_util::errors::OrdoError;

use crate::ProjectContext;

/// Summary of a successful prepare pass.
#[derive(Debug, Clone)]
pub struct PrepareResult {
    pub artifacts: usize,
    pub edges: usize,
    /// Global build order, dependencies first, files of each unit after
    /// those of the units it depends on.
    pub order: Vec<ArtifactId>,
    /// The dependency tree could not be written; the next order pass falls
    /// back to a full rebuild.
    pub persisted: bool,
}

/// Discover every artifact, resolve declarations into edges and write the
/// topologically sorted tree to the build-order store.
///
/// A dependency cycle aborts the pass, naming both files relative to the
/// project root. Any tree left by an earlier pass is removed so later
/// phases cannot act on stale data.
pub fn prepare(ctx: &ProjectContext) -> miette::Result<PrepareResult> {
    tracing::info!("preparing {}", ctx.manifest.project.name);
    let unit_graph = UnitGraph::from_units(&ctx.units);
    let unit_order = unit_graph.topological_order()?;

    let graph = ctx.dependency_graph()?;
    let outcome = sort(&graph);
    if let Some((first, second)) = &outcome.first_cycle_edge {
        discard_stale_tree(ctx);
        return Err(OrdoError::CyclicDependency {
            first: ctx.display_path(first),
            second: ctx.display_path(second),
        }
        .into());
    }
    let order = unit_major(outcome.order, &content_roots(&ctx.units), unit_order);

    let tree = DependencyTree::from_graph(&graph, &order);
    let persisted = match ctx.store.write_tree(&tree) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    };

    ordo_util::progress::status(
        "Prepared",
        &format!(
            "{} ({} files, {} dependencies)",
            ctx.manifest.project.name,
            graph.node_count(),
            graph.edge_count()
        ),
    );

    Ok(PrepareResult {
        artifacts: graph.node_count(),
        edges: graph.edge_count(),
        order,
        persisted,
    })
}

fn discard_stale_tree(ctx: &ProjectContext) {
    let path = ctx.store.tree_path();
    if path.exists() {
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("Failed to remove {}: {e}", path.display());
        }
    }
}
