//! Handler for `ordo build`.

use miette::Result;

use ordo_ops::ops_build::{self, BuildOptions};
use ordo_ops::ops_order::DirtySource;
use ordo_ops::ProjectContext;

use super::plan::print_plan;

pub fn exec(ctx: &ProjectContext, tests: bool, all: bool) -> Result<()> {
    let opts = BuildOptions {
        tests,
        dirty: if all {
            DirtySource::All
        } else {
            DirtySource::Fingerprints
        },
    };
    let result = ops_build::build(ctx, &opts)?;
    for plan in &result.plans {
        print_plan(ctx, plan, false);
    }
    Ok(())
}
