//! Operation: run every phase and produce compile plans for all units.

use ordo_compiler::plan::{plan_unit, UnitCompilePlan};
use ordo_compiler::unit_graph::UnitGraph;
use ordo_core::artifact::Role;

use crate::ops_order::{self, DirtySource, OrderOutcome};
use crate::ops_prepare::{self, PrepareResult};
use crate::ProjectContext;

/// Options for `ordo build`.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Also plan each unit's test step.
    pub tests: bool,
    pub dirty: DirtySource,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            tests: false,
            dirty: DirtySource::Fingerprints,
        }
    }
}

/// Everything one build pass decided.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub prepared: PrepareResult,
    pub ordered: OrderOutcome,
    /// Plans in unit dependency order; a unit's test step directly follows
    /// its production step.
    pub plans: Vec<UnitCompilePlan>,
}

impl BuildResult {
    pub fn is_up_to_date(&self) -> bool {
        self.plans.iter().all(UnitCompilePlan::is_up_to_date)
    }
}

/// Prepare, order and plan every unit.
pub fn build(ctx: &ProjectContext, opts: &BuildOptions) -> miette::Result<BuildResult> {
    let prepared = ops_prepare::prepare(ctx)?;
    let ordered = ops_order::order(ctx, &opts.dirty)?;

    let units = UnitGraph::from_units(&ctx.units);
    let enumerator = ctx.enumerator()?;
    let mut roles = vec![Role::Production];
    if opts.tests {
        roles.push(Role::Test);
    }

    let mut plans = Vec::new();
    for unit in units.topological_order()? {
        for role in &roles {
            let plan = plan_unit(unit, *role, &ctx.store, &units, &enumerator)?;
            tracing::debug!(
                "{} ({role}): {} files, {}",
                plan.unit,
                plan.files.len(),
                plan.origin
            );
            plans.push(plan);
        }
    }

    let result = BuildResult {
        prepared,
        ordered,
        plans,
    };
    if result.is_up_to_date() {
        ordo_util::progress::status_info("Fresh", &ctx.manifest.project.name);
    }
    Ok(result)
}
