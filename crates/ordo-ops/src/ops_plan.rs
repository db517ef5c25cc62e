//! Operation: show what the compile phase of one unit would do.

use ordo_compiler::plan::{plan_unit, UnitCompilePlan};
use ordo_compiler::unit_graph::UnitGraph;
use ordo_core::artifact::Role;

use crate::ProjectContext;

/// Compile plan for the production or test step of `unit`, read from the
/// build-order store without running earlier phases.
pub fn plan(ctx: &ProjectContext, unit: &str, role: Role) -> miette::Result<UnitCompilePlan> {
    let unit = ctx.unit(unit)?;
    let units = UnitGraph::from_units(&ctx.units);
    let enumerator = ctx.enumerator()?;
    plan_unit(unit, role, &ctx.store, &units, &enumerator)
}
