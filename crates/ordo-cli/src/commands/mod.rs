//! Command dispatch and handler modules.

mod build;
mod clean;
mod clusters;
mod order;
mod plan;
mod prepare;
mod tree;

use miette::Result;

use ordo_ops::ProjectContext;
use ordo_util::errors::OrdoError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = project(&cli)?;
    match cli.command {
        Command::Prepare => prepare::exec(&ctx, cli.verbose),
        Command::Order { dirty, all } => order::exec(&ctx, dirty, all),
        Command::Build { tests, all } => build::exec(&ctx, tests, all),
        Command::Plan { unit, tests } => plan::exec(&ctx, &unit, tests),
        Command::Tree { inverted } => tree::exec(&ctx, inverted),
        Command::Clusters => clusters::exec_clusters(&ctx),
        Command::Cycles => clusters::exec_cycles(&ctx),
        Command::Clean => clean::exec(&ctx),
    }
}

fn project(cli: &Cli) -> Result<ProjectContext> {
    let state_dir = cli.state_dir.as_deref();
    match &cli.manifest_path {
        Some(path) => {
            tracing::debug!("using manifest {}", path.display());
            ProjectContext::load(path, state_dir)
        }
        None => {
            let cwd = std::env::current_dir().map_err(OrdoError::Io)?;
            ProjectContext::discover(&cwd, state_dir)
        }
    }
}
