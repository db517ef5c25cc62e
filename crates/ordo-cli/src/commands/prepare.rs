//! Handler for `ordo prepare`.

use miette::Result;

use ordo_ops::ops_prepare;
use ordo_ops::ProjectContext;

pub fn exec(ctx: &ProjectContext, verbose: bool) -> Result<()> {
    let result = ops_prepare::prepare(ctx)?;
    if verbose {
        for path in &result.order {
            println!("{}", ctx.display_path(path));
        }
    }
    Ok(())
}
