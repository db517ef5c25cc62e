//! Handler for `ordo plan`.

use std::path::Path;

use miette::Result;

use ordo_compiler::plan::UnitCompilePlan;
use ordo_core::artifact::Role;
use ordo_ops::ops_plan;
use ordo_ops::ProjectContext;

pub fn exec(ctx: &ProjectContext, unit: &str, tests: bool) -> Result<()> {
    let role = if tests { Role::Test } else { Role::Production };
    let plan = ops_plan::plan(ctx, unit, role)?;
    print_plan(ctx, &plan, true);
    Ok(())
}

/// Print a plan header followed by its files, and with `detailed` the
/// directories handed to the compiler.
pub(super) fn print_plan(ctx: &ProjectContext, plan: &UnitCompilePlan, detailed: bool) {
    let bold = console::Style::new().bold();
    println!(
        "{} ({}, {}): {} files",
        bold.apply_to(&plan.unit),
        plan.role,
        plan.origin,
        plan.files.len()
    );
    for file in &plan.files {
        println!("  {}", relative(ctx, file));
    }
    if !detailed {
        return;
    }
    println!("output: {}", relative(ctx, &plan.output_dir));
    for dir in &plan.include_dirs {
        println!("include: {}", relative(ctx, dir));
    }
    for dir in &plan.code_path {
        println!("code path: {}", relative(ctx, dir));
    }
}

fn relative(ctx: &ProjectContext, path: &Path) -> String {
    ctx.display_path(&path.to_string_lossy())
}
