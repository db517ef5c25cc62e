//! Handler for `ordo order`.

use std::path::PathBuf;

use miette::Result;

use ordo_ops::ops_order::{self, DirtySource, OrderOutcome};
use ordo_ops::ProjectContext;

pub fn exec(ctx: &ProjectContext, dirty: Vec<PathBuf>, all: bool) -> Result<()> {
    let source = if all {
        DirtySource::All
    } else if !dirty.is_empty() {
        DirtySource::Explicit(dirty)
    } else {
        DirtySource::Fingerprints
    };

    match ops_order::order(ctx, &source)? {
        OrderOutcome::FullRebuild => println!("every unit will be fully rebuilt"),
        OrderOutcome::Partitioned(orders) => {
            for (unit, order) in orders.iter() {
                println!(
                    "{unit}: {} production, {} test",
                    order.production.len(),
                    order.test.len()
                );
            }
        }
    }
    Ok(())
}
