//! Static catalog definitions: the flags a registry knows and the relationships between them.

use crate::flag::FlagDescriptor;
use crate::relation::Relationship;
use serde::{Deserialize, Serialize};

/// Declarative source for a registry and its relationship graph.
///
/// Loaded once at startup; how it reached memory (file, embedded table) is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSpec {
    pub flags: Vec<FlagDescriptor>,
    pub relations: Vec<Relationship>,
}

impl CatalogSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn flag(mut self, descriptor: FlagDescriptor) -> Self {
        self.flags.push(descriptor);
        self
    }

    #[must_use]
    pub fn relation(mut self, relationship: Relationship) -> Self {
        self.relations.push(relationship);
        self
    }
}
