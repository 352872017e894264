//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bootcfg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Resolve firmware feature-flag profiles against a flag catalog")]
pub struct Cli {
    /// Config file (TOML, JSON or YAML); `BOOTCFG__*` variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file to use instead of the configured (or built-in) one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the flags and relationships of the active catalog
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the active catalog (registry and relationship graph)
    Check {},
    /// Resolve a candidate profile and print the resolved profile as JSON
    Resolve {
        /// Profile file: a TOML table of `flag = true | integer | "string"`
        profile: PathBuf,
        /// Compact single-line JSON
        #[arg(long)]
        compact: bool,
    },
}
