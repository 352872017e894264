//! Common imports for crates built on the kernel.

pub use crate::config::{ConfigError, ConfigErrorExt, load_app_config, load_config};
pub use bootcfg_domain::config::AppConfig;
pub use bootcfg_domain::{
    CandidateSet, CatalogSpec, FlagDescriptor, FlagId, FlagKind, FlagValue, RelationKind,
    RelationKinds, Relationship,
};
