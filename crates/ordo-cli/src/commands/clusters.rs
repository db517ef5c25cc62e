//! Handlers for `ordo clusters` and `ordo cycles`.

use miette::Result;

use ordo_core::artifact::ArtifactId;
use ordo_ops::ops_clusters;
use ordo_ops::ProjectContext;

pub fn exec_clusters(ctx: &ProjectContext) -> Result<()> {
    let groups = ops_clusters::clusters(ctx)?;
    print_groups(ctx, "cluster", &groups);
    Ok(())
}

pub fn exec_cycles(ctx: &ProjectContext) -> Result<()> {
    let groups = ops_clusters::cycles(ctx)?;
    if groups.is_empty() {
        println!("No dependency cycles.");
        return Ok(());
    }
    print_groups(ctx, "cycle", &groups);
    Ok(())
}

fn print_groups(ctx: &ProjectContext, name: &str, groups: &[Vec<ArtifactId>]) {
    for (i, group) in groups.iter().enumerate() {
        println!("{name} {}:", i + 1);
        for path in group {
            println!("  {}", ctx.display_path(path));
        }
    }
}
