use bootcfg_kernel::domain::{FlagDescriptor, FlagId, RelationKind, RelationKinds, Relationship};
use bootcfg_registry::FlagRegistry;
use std::collections::{BTreeMap, BTreeSet};

/// Immutable, validated relationship graph.
///
/// Produced only by [`crate::GraphBuilder::build`], so every instance is free of requirement
/// cycles and contradictory declarations. Holds no interior mutability: share it behind an `Arc`
/// (or a plain reference) across any number of threads.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    registry: FlagRegistry,
    relations: BTreeSet<Relationship>,
    /// `from -> {to}` for REQUIRES edges.
    requires: BTreeMap<FlagId, BTreeSet<FlagId>>,
    /// `target -> {provider}` for PROVIDES edges.
    providers: BTreeMap<FlagId, BTreeSet<FlagId>>,
    /// Symmetric view of CONFLICTS edges.
    conflicts: BTreeMap<FlagId, BTreeSet<FlagId>>,
}

impl RelationshipGraph {
    pub(crate) fn assemble(registry: FlagRegistry, relations: BTreeSet<Relationship>) -> Self {
        let mut requires: BTreeMap<FlagId, BTreeSet<FlagId>> = BTreeMap::new();
        let mut providers: BTreeMap<FlagId, BTreeSet<FlagId>> = BTreeMap::new();
        let mut conflicts: BTreeMap<FlagId, BTreeSet<FlagId>> = BTreeMap::new();

        for rel in &relations {
            match rel.kind {
                RelationKind::Requires => {
                    requires.entry(rel.from.clone()).or_default().insert(rel.to.clone());
                },
                RelationKind::Provides => {
                    providers.entry(rel.to.clone()).or_default().insert(rel.from.clone());
                },
                RelationKind::Conflicts => {
                    conflicts.entry(rel.from.clone()).or_default().insert(rel.to.clone());
                    conflicts.entry(rel.to.clone()).or_default().insert(rel.from.clone());
                },
            }
        }

        Self { registry, relations, requires, providers, conflicts }
    }

    /// The registry the graph was built from.
    #[must_use]
    pub const fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    #[must_use]
    pub fn descriptor(&self, id: &str) -> Option<&FlagDescriptor> {
        self.registry.lookup(id).ok()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// All flag descriptors in identifier order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagDescriptor> {
        self.registry.iter()
    }

    /// All relationships, ordered by kind, then source, then target.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relations.iter()
    }

    /// Outgoing edges of `from` whose kind is in `kinds`.
    pub fn edges<'a>(
        &'a self,
        from: &'a str,
        kinds: RelationKinds,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relations.iter().filter(move |rel| kinds.includes(rel.kind) && rel.from.as_str() == from)
    }

    /// Flags that `id` directly requires.
    pub fn requirements_of(&self, id: &str) -> impl Iterator<Item = &FlagId> {
        self.requires.get(id).into_iter().flatten()
    }

    /// Flags whose presence satisfies a requirement on `id`.
    pub fn providers_of(&self, id: &str) -> impl Iterator<Item = &FlagId> {
        self.providers.get(id).into_iter().flatten()
    }

    /// Flags that must never be set together with `id`.
    pub fn conflicts_of(&self, id: &str) -> impl Iterator<Item = &FlagId> {
        self.conflicts.get(id).into_iter().flatten()
    }

    /// Every CONFLICTS edge as declared, in relationship order.
    pub fn conflict_pairs(&self) -> impl Iterator<Item = (&FlagId, &FlagId)> {
        self.relations
            .iter()
            .filter(|rel| rel.kind == RelationKind::Conflicts)
            .map(|rel| (&rel.from, &rel.to))
    }

    #[must_use]
    pub fn flag_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}
