//! CLI argument definitions for Ordo.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ordo",
    version,
    about = "Incremental build-order scheduler for module-based projects",
    long_about = "Ordo resolves include, transform and interface dependencies between source \
                  files and tells the compiler which files to rebuild, and in which order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to Ordo.toml (default: search the current directory and its parents)
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Directory for build orders and fingerprints, relative to the project root
    #[arg(long, global = true, env = "ORDO_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve file dependencies and store the global build order
    Prepare,

    /// Compute which files each unit must recompile
    Order {
        /// Treat these files as changed instead of comparing fingerprints
        #[arg(long, value_name = "PATH", conflicts_with = "all")]
        dirty: Vec<PathBuf>,
        /// Treat every file as changed
        #[arg(long)]
        all: bool,
    },

    /// Prepare, order and print the compile plan of every unit
    Build {
        /// Also plan the test step of each unit
        #[arg(long)]
        tests: bool,
        /// Treat every file as changed
        #[arg(long)]
        all: bool,
    },

    /// Print the compile plan of one unit from the stored build order
    Plan {
        /// Unit name
        unit: String,
        /// Plan the test step instead of the production step
        #[arg(long)]
        tests: bool,
    },

    /// Display the file dependency tree
    Tree {
        /// Show what depends on this file instead
        #[arg(short, long, value_name = "FILE")]
        inverted: Option<PathBuf>,
    },

    /// List groups of files that can be built independently
    Clusters,

    /// List groups of files that depend on each other in a cycle
    Cycles,

    /// Remove stored build orders and fingerprints
    Clean,
}

pub fn parse() -> Cli {
    Cli::parse()
}
