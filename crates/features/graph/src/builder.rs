use crate::error::{GraphError, GraphErrorExt};
use crate::graph::RelationshipGraph;
use crate::traversal::{Adjacency, find_cycle, reaches};
use bootcfg_kernel::domain::{CatalogSpec, FlagId, RelationKind, RelationKinds, Relationship};
use bootcfg_registry::FlagRegistry;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Collects relationships over a registry and validates them into a [`RelationshipGraph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    registry: FlagRegistry,
    relations: BTreeSet<Relationship>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(registry: FlagRegistry) -> Self {
        Self { registry, relations: BTreeSet::new() }
    }

    /// Registers every flag of `spec` and declares every relationship of it.
    ///
    /// # Errors
    /// * [`GraphError::Registry`] if a flag definition is rejected by the registry.
    /// * Any error of [`GraphBuilder::add_relationship`].
    pub fn from_catalog(spec: &CatalogSpec) -> Result<Self, GraphError> {
        let registry = FlagRegistry::from_descriptors(spec.flags.iter().cloned())
            .context("Registering catalog flags")?;

        let mut builder = Self::new(registry);
        for rel in &spec.relations {
            builder.add(rel.clone())?;
        }
        Ok(builder)
    }

    #[must_use]
    pub const fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Declares a `(kind, from, to)` relationship.
    ///
    /// CONFLICTS is symmetric: once `CONFLICTS(a, b)` is declared, `CONFLICTS(b, a)` counts as
    /// the same relationship.
    ///
    /// # Errors
    /// * [`GraphError::UnknownFlag`] if either endpoint is not registered.
    /// * [`GraphError::DuplicateRelationship`] if the relationship already exists.
    pub fn add_relationship(
        &mut self,
        kind: RelationKind,
        from: impl Into<FlagId>,
        to: impl Into<FlagId>,
    ) -> Result<&mut Self, GraphError> {
        self.add(Relationship::new(kind, from, to))
    }

    /// Declares a relationship given as a triple value.
    ///
    /// # Errors
    /// See [`GraphBuilder::add_relationship`].
    pub fn add(&mut self, relationship: Relationship) -> Result<&mut Self, GraphError> {
        for endpoint in [&relationship.from, &relationship.to] {
            if !self.registry.contains(endpoint.as_str()) {
                return Err(GraphError::UnknownFlag { flag: endpoint.clone() });
            }
        }

        let mirrored = relationship.kind == RelationKind::Conflicts
            && self.relations.contains(&relationship.reversed());
        if mirrored || self.relations.contains(&relationship) {
            return Err(GraphError::DuplicateRelationship { relationship });
        }

        debug!(%relationship, "Declared relationship");
        self.relations.insert(relationship);
        Ok(self)
    }

    /// Validates the declarations and freezes them into a [`RelationshipGraph`].
    ///
    /// Checks, in order:
    /// 1. **Cycles**: a depth-first walk over REQUIRES and PROVIDES edges, marking each flag
    ///    in progress while its successors are explored. Meeting an in-progress flag again
    ///    means a cycle.
    /// 2. **Contradictions**: a CONFLICTS pair whose endpoints are connected by a REQUIRES /
    ///    PROVIDES chain (in either direction), or a flag declared to conflict with itself.
    ///
    /// # Errors
    /// * [`GraphError::DependencyCycle`] naming the cycle path.
    /// * [`GraphError::ContradictoryRelationship`] naming the conflicting pair.
    #[instrument(skip_all, fields(flags = self.registry.len(), relations = self.relations.len()))]
    pub fn build(self) -> Result<RelationshipGraph, GraphError> {
        let implication = self.adjacency(RelationKinds::IMPLICATION);

        if let Some(path) = find_cycle(&implication) {
            return Err(GraphError::DependencyCycle { path });
        }

        for rel in self.relations.iter().filter(|rel| rel.kind == RelationKind::Conflicts) {
            let (a, b) = (&rel.from, &rel.to);
            if a == b || reaches(&implication, a, b) || reaches(&implication, b, a) {
                return Err(GraphError::ContradictoryRelationship {
                    first: a.clone(),
                    second: b.clone(),
                });
            }
        }

        let graph = RelationshipGraph::assemble(self.registry, self.relations);
        info!(
            flags = graph.flag_count(),
            relations = graph.relation_count(),
            "Relationship graph built"
        );
        Ok(graph)
    }

    fn adjacency(&self, kinds: RelationKinds) -> Adjacency {
        let mut adjacency = Adjacency::new();
        for rel in self.relations.iter().filter(|rel| kinds.includes(rel.kind)) {
            adjacency.entry(rel.from.clone()).or_default().insert(rel.to.clone());
        }
        adjacency
    }
}

impl RelationshipGraph {
    /// Builds a graph straight from a catalog definition.
    ///
    /// # Errors
    /// Any error of [`GraphBuilder::from_catalog`] or [`GraphBuilder::build`].
    pub fn from_catalog(spec: &CatalogSpec) -> Result<Self, GraphError> {
        GraphBuilder::from_catalog(spec)?.build()
    }
}
