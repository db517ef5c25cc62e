//! Operation: turn changed files into per-unit build orders.

use std::path::PathBuf;

use ordo_compiler::fingerprint::{self, Snapshot};
use ordo_compiler::partition::{partition, source_roots, UnitOrders};
use ordo_compiler::unit_graph::UnitGraph;
use ordo_core::artifact::ArtifactId;
use ordo_graph::propagate;

use crate::ProjectContext;

/// Where the dirty seed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtySource {
    /// Compare content hashes against the previous pass.
    Fingerprints,
    /// Exactly these files changed.
    Explicit(Vec<PathBuf>),
    /// Treat every file as changed.
    All,
}

/// Result of an order pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// No dependency tree was available. Every per-unit document was
    /// removed, so each unit is rebuilt from its roots.
    FullRebuild,
    /// Per-unit orders written to the store, dependencies first.
    Partitioned(UnitOrders),
}

impl OrderOutcome {
    /// Total number of files scheduled, or `None` for a full rebuild.
    pub fn scheduled(&self) -> Option<usize> {
        match self {
            OrderOutcome::FullRebuild => None,
            OrderOutcome::Partitioned(orders) => Some(
                orders
                    .values()
                    .map(|o| o.production.len() + o.test.len())
                    .sum(),
            ),
        }
    }
}

/// Compute the dirty closure of `source` over the stored dependency tree and
/// write one build-order document per unit, including empty ones.
pub fn order(ctx: &ProjectContext, source: &DirtySource) -> miette::Result<OrderOutcome> {
    let fingerprints = fingerprint::storage_path(&ctx.state_dir);

    let Some(tree) = ctx.store.read_tree() else {
        tracing::warn!("no dependency tree found, project will be fully rebuilt");
        ordo_util::progress::status_warn(
            "Rebuilding",
            &format!("{} (no dependency tree)", ctx.manifest.project.name),
        );
        let removed = ctx.store.remove_orders();
        tracing::debug!("removed {removed} stale build orders");
        if fingerprints.exists() {
            if let Err(e) = std::fs::remove_file(&fingerprints) {
                tracing::warn!("Failed to remove {}: {e}", fingerprints.display());
            }
        }
        return Ok(OrderOutcome::FullRebuild);
    };

    let graph = tree.to_graph();
    let global_order = tree.order();
    let current = Snapshot::capture(&tree);

    let seeds: Vec<ArtifactId> = match source {
        DirtySource::Fingerprints => match Snapshot::load(&fingerprints) {
            Some(previous) => {
                let changes = previous.changes(&current);
                tracing::debug!(
                    "{} added, {} modified, {} removed",
                    changes.added.len(),
                    changes.modified.len(),
                    changes.removed.len()
                );
                changes.seeds(&previous)
            }
            None => {
                tracing::debug!("no previous fingerprints, every file is dirty");
                global_order.clone()
            }
        },
        DirtySource::Explicit(paths) => paths.iter().map(|p| ctx.artifact_id(p)).collect(),
        DirtySource::All => global_order.clone(),
    };

    let dirty = propagate(&graph, seeds.iter());
    tracing::info!("{} seeds, {} dirty files", seeds.len(), dirty.len());

    let unit_graph = UnitGraph::from_units(&ctx.units);
    let roots = source_roots(&ctx.units);
    let orders = partition(
        &global_order,
        &dirty,
        &ctx.manifest.extensions(),
        &roots,
        unit_graph.topological_order()?,
    )?;

    for (unit, unit_order) in orders.iter() {
        if let Err(e) = ctx.store.write_order(unit, unit_order) {
            tracing::warn!("{e}");
        }
    }

    // Explicit seeds say nothing about other files, so the previous
    // snapshot stays authoritative for them.
    if !matches!(source, DirtySource::Explicit(_)) {
        if let Err(e) = current.save(&fingerprints) {
            tracing::warn!("{e}");
        }
    }

    let outcome = OrderOutcome::Partitioned(orders);
    ordo_util::progress::status(
        "Ordered",
        &format!(
            "{} ({} files to compile)",
            ctx.manifest.project.name,
            outcome.scheduled().unwrap_or_default()
        ),
    );
    Ok(outcome)
}
