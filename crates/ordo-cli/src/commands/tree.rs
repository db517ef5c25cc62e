//! Handler for `ordo tree`.

use std::path::PathBuf;

use miette::Result;

use ordo_ops::ops_tree::{self, TreeOptions};
use ordo_ops::ProjectContext;

pub fn exec(ctx: &ProjectContext, inverted: Option<PathBuf>) -> Result<()> {
    let output = ops_tree::tree(ctx, &TreeOptions { inverted })?;
    print!("{output}");
    Ok(())
}
