//! Subcommand handlers. Results go to stdout, logs to stderr.

use anyhow::{Context, Result};
use bootcfg::kernel::prelude::{AppConfig, CatalogSpec};
use bootcfg::{Catalog, read_profile};
use std::path::Path;
use tracing::info;

fn load(config: &AppConfig) -> Result<Catalog> {
    Catalog::from_config(config).context("Failed to load the flag catalog")
}

pub fn catalog(config: &AppConfig, json: bool) -> Result<()> {
    let catalog = load(config)?;
    let graph = catalog.graph();

    if json {
        let spec = CatalogSpec {
            flags: graph.flags().cloned().collect(),
            relations: graph.relationships().cloned().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    let width = graph.flags().map(|f| f.id.as_str().len()).max().unwrap_or_default();
    println!("Flags ({}):", graph.flag_count());
    for flag in graph.flags() {
        let default = flag.default.as_ref().map(|d| format!(" = {d}")).unwrap_or_default();
        let help = flag.help.as_deref().unwrap_or_default();
        println!("  {:width$}  {:<8}{default}  {help}", flag.id.as_str(), flag.kind.as_ref());
    }

    println!("Relationships ({}):", graph.relation_count());
    for rel in graph.relationships() {
        println!("  {rel}");
    }
    Ok(())
}

pub fn check(config: &AppConfig) -> Result<()> {
    let catalog = load(config)?;
    let graph = catalog.graph();
    println!("Catalog OK: {} flags, {} relationships", graph.flag_count(), graph.relation_count());
    Ok(())
}

pub fn resolve(config: &AppConfig, profile: &Path, compact: bool) -> Result<()> {
    let catalog = load(config)?;
    let candidate = read_profile(profile)?;

    let resolved = catalog
        .resolve(&candidate)
        .with_context(|| format!("Failed to resolve {}", profile.display()))?;
    info!(
        flags = resolved.len(),
        implied = resolved.implied().count(),
        profile = %profile.display(),
        "Resolved"
    );

    let out = if compact {
        serde_json::to_string(&resolved)?
    } else {
        serde_json::to_string_pretty(&resolved)?
    };
    println!("{out}");
    Ok(())
}
