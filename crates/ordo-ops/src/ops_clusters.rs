//! Operation: group files into independent clusters and report cycles.

use ordo_core::artifact::ArtifactId;
use ordo_graph::scc;

use crate::ProjectContext;

/// Groups of files with no dependency path between groups.
pub fn clusters(ctx: &ProjectContext) -> miette::Result<Vec<Vec<ArtifactId>>> {
    let graph = ctx.dependency_graph()?;
    Ok(scc::clusters(&graph))
}

/// Groups of files that depend on each other in a cycle. Empty when the
/// project can be ordered.
pub fn cycles(ctx: &ProjectContext) -> miette::Result<Vec<Vec<ArtifactId>>> {
    let graph = ctx.dependency_graph()?;
    Ok(scc::cycles(&graph))
}
