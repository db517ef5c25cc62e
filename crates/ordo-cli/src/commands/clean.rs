//! Handler for `ordo clean`.

use miette::Result;

use ordo_ops::ops_clean::{self, CleanResult};
use ordo_ops::ProjectContext;

pub fn exec(ctx: &ProjectContext) -> Result<()> {
    match ops_clean::clean(ctx)? {
        CleanResult::Cleaned => println!("Removed build orders and fingerprints"),
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }
    Ok(())
}
