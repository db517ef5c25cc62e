//! Operation: display the file dependency tree.

use std::path::{Path, PathBuf};

use ordo_core::artifact::ArtifactId;
use ordo_util::errors::OrdoError;

use crate::ProjectContext;

/// Options for `ordo tree`.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Show what depends on this file instead of the whole tree.
    pub inverted: Option<PathBuf>,
}

/// Render the dependency tree, with paths relative to the project root.
pub fn tree(ctx: &ProjectContext, opts: &TreeOptions) -> miette::Result<String> {
    let graph = ctx.dependency_graph()?;
    let label = |id: &ArtifactId| ctx.display_path(id);

    let Some(target) = &opts.inverted else {
        return Ok(graph.print_tree(label));
    };
    let id = resolve_target(ctx, graph.nodes(), target)?;
    Ok(graph.print_inverted_tree(&id, label))
}

/// Match `target` against known files: as a path relative to the working
/// directory, relative to the project root, then by file name alone.
fn resolve_target<'a>(
    ctx: &ProjectContext,
    nodes: impl Iterator<Item = &'a ArtifactId>,
    target: &Path,
) -> miette::Result<ArtifactId> {
    let nodes: Vec<&ArtifactId> = nodes.collect();
    let candidates = [
        ctx.artifact_id(target),
        ordo_util::fs::normalize_path(&ctx.root, target)
            .to_string_lossy()
            .into_owned(),
    ];
    for candidate in &candidates {
        if nodes.iter().any(|n| *n == candidate) {
            return Ok(candidate.clone());
        }
    }

    let by_name: Vec<&ArtifactId> = nodes
        .into_iter()
        .filter(|n| Path::new(n.as_str()).file_name() == Some(target.as_os_str()))
        .collect();
    match by_name.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(OrdoError::Generic {
            message: format!("'{}' is not a file of this project", target.display()),
        }
        .into()),
        many => Err(OrdoError::Generic {
            message: format!(
                "'{}' is ambiguous, it matches {}",
                target.display(),
                many.iter()
                    .map(|n| ctx.display_path(n))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
        .into()),
    }
}
