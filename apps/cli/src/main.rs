#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod args;
pub mod commands;

use crate::args::{Cli, Command};
use anyhow::Context;
use bootcfg::kernel::prelude::load_app_config;
use bootcfg_logger::Logger;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        load_app_config(cli.config.as_deref()).context("Configuration is malformed")?;
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;

    match cli.command {
        Command::Catalog { json } => commands::catalog(&config, json),
        Command::Check {} => commands::check(&config),
        Command::Resolve { profile, compact } => commands::resolve(&config, &profile, compact),
    }
}
