use crate::builtin;
use bootcfg_graph::{GraphError, RelationshipGraph};
use bootcfg_kernel::domain::config::AppConfig;
use bootcfg_kernel::domain::{CandidateSet, CatalogSpec};
use bootcfg_resolver::{ResolveError, ResolvedProfile, Resolver};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Startup errors: reading or decoding a catalog or profile, or a malformed catalog.
#[bootcfg_derive::bootcfg_error]
pub enum CatalogError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid TOML{}: {source}", format_context(.context))]
    Decode { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid catalog{}: {source}", format_context(.context))]
    Graph { source: GraphError, context: Option<Cow<'static, str>> },
}

/// A validated flag catalog, ready to resolve profiles.
///
/// Built once at startup; clone it freely, all clones share one graph.
#[derive(Debug, Clone)]
pub struct Catalog {
    resolver: Resolver,
}

impl Catalog {
    /// The built-in U-Boot USB catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::Graph`] if the built-in definitions fail validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_spec(&builtin::uboot_usb()).context("Built-in U-Boot USB catalog")
    }

    /// # Errors
    /// Returns [`CatalogError::Graph`] for any registry or graph-build error.
    pub fn from_spec(spec: &CatalogSpec) -> Result<Self, CatalogError> {
        let graph = RelationshipGraph::from_catalog(spec)?;
        Ok(Self { resolver: Resolver::new(Arc::new(graph)) })
    }

    /// Parses a TOML catalog (`[[flags]]` and `[[relations]]` tables).
    ///
    /// # Errors
    /// Returns [`CatalogError::Decode`] for malformed TOML, else see [`Catalog::from_spec`].
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = toml::from_str(text)?;
        Self::from_spec(&spec)
    }

    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, else see [`Catalog::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
        Self::from_toml_str(&text).context(format!("Catalog {}", path.display()))
    }

    /// Catalog named by `config.catalog.path`, or the built-in one when unset.
    ///
    /// # Errors
    /// See [`Catalog::from_file`] and [`Catalog::builtin`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog.path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };
        let source =
            config.catalog.path.as_deref().map_or_else(|| "builtin".into(), |p| p.display().to_string());
        info!(%source, flags = catalog.graph().flag_count(), "Catalog ready");
        Ok(catalog)
    }

    #[must_use]
    pub fn graph(&self) -> &RelationshipGraph {
        self.resolver.graph()
    }

    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// # Errors
    /// See [`bootcfg_resolver::resolve`].
    pub fn resolve(&self, candidate: &CandidateSet) -> Result<ResolvedProfile, ResolveError> {
        self.resolver.resolve(candidate)
    }
}

/// Parses a candidate profile: a TOML table of `flag = true | integer | "string"`.
///
/// # Errors
/// Returns [`CatalogError::Decode`] for malformed TOML or values of another type.
pub fn parse_profile(text: &str) -> Result<CandidateSet, CatalogError> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses a candidate profile file.
///
/// # Errors
/// Returns [`CatalogError::Io`] if the file cannot be read, else see [`parse_profile`].
pub fn read_profile(path: impl AsRef<Path>) -> Result<CandidateSet, CatalogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    parse_profile(&text).context(format!("Profile {}", path.display()))
}
