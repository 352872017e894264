use crate::error::{ConflictParty, ResolveError};
use crate::profile::{Provenance, ResolvedFlag, ResolvedProfile};
use bootcfg_graph::RelationshipGraph;
use bootcfg_kernel::domain::{CandidateSet, FlagId, FlagValue};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves candidate sets against one shared, immutable [`RelationshipGraph`].
///
/// Cloning is cheap and every call is independent, so a single resolver can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Resolver {
    graph: Arc<RelationshipGraph>,
}

impl Resolver {
    #[must_use]
    pub fn new(graph: impl Into<Arc<RelationshipGraph>>) -> Self {
        Self { graph: graph.into() }
    }

    #[must_use]
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// See [`resolve`].
    ///
    /// # Errors
    /// See [`resolve`].
    pub fn resolve(&self, candidate: &CandidateSet) -> Result<ResolvedProfile, ResolveError> {
        resolve(&self.graph, candidate)
    }
}

/// Closes `candidate` under the REQUIRES/PROVIDES edges of `graph` and checks the result for
/// CONFLICTS.
///
/// Implied flags are added in rounds: every round looks at the working set as it stood when the
/// round began and adds each required flag that is neither present nor satisfied by a present
/// provider. Rounds repeat until one adds nothing. Because no round depends on the order in which
/// flags are visited, the outcome depends only on the inputs.
///
/// Explicit values are passed through untouched; implied valued flags take the registry default.
///
/// # Errors
/// * [`ResolveError::UnknownFlag`] if the candidate names a flag the graph does not know.
/// * [`ResolveError::ValueMismatch`] if a value does not fit its flag's kind.
/// * [`ResolveError::FlagConflict`] for the first CONFLICTS edge (in relationship order) whose
///   endpoints are both present after closure.
pub fn resolve(
    graph: &RelationshipGraph,
    candidate: &CandidateSet,
) -> Result<ResolvedProfile, ResolveError> {
    validate(graph, candidate)?;

    let explicit: BTreeSet<&FlagId> = candidate.ids().collect();
    let mut present: BTreeSet<&FlagId> = explicit.clone();
    let mut rounds = 0_usize;

    loop {
        let additions: BTreeSet<&FlagId> = present
            .iter()
            .flat_map(|flag| graph.requirements_of(flag.as_str()))
            .filter(|target| !present.contains(target) && !is_provided(graph, &present, target))
            .collect();

        if additions.is_empty() {
            break;
        }
        rounds += 1;
        debug!(round = rounds, added = additions.len(), "Implied requirements");
        present.extend(additions);
    }

    let flags: BTreeMap<FlagId, ResolvedFlag> = present
        .iter()
        .map(|&flag| {
            let resolved = if explicit.contains(flag) {
                ResolvedFlag {
                    value: candidate.get(flag.as_str()).flatten().cloned(),
                    provenance: Provenance::Explicit,
                }
            } else {
                ResolvedFlag {
                    value: implied_default(graph, flag),
                    provenance: Provenance::Implied { required_by: requirers(graph, &present, flag) },
                }
            };
            (flag.clone(), resolved)
        })
        .collect();
    let profile = ResolvedProfile::from_flags(flags);

    if let Some((a, b)) =
        graph.conflict_pairs().find(|(a, b)| profile.contains(a.as_str()) && profile.contains(b.as_str()))
    {
        let (first, second) = (party(&profile, a), party(&profile, b));
        warn!(%first, %second, "Flag conflict");
        return Err(ResolveError::FlagConflict { first, second });
    }

    debug!(
        explicit = explicit.len(),
        implied = profile.len() - explicit.len(),
        rounds,
        "Profile resolved"
    );
    Ok(profile)
}

fn validate(graph: &RelationshipGraph, candidate: &CandidateSet) -> Result<(), ResolveError> {
    for (flag, value) in candidate.iter() {
        let Some(descriptor) = graph.descriptor(flag.as_str()) else {
            return Err(ResolveError::UnknownFlag { flag: flag.clone() });
        };
        if let Some(found) = value
            && !descriptor.kind.accepts(Some(found))
        {
            return Err(ResolveError::ValueMismatch {
                flag: flag.clone(),
                expected: descriptor.kind,
                found: found.clone(),
            });
        }
    }
    Ok(())
}

fn is_provided(graph: &RelationshipGraph, present: &BTreeSet<&FlagId>, target: &FlagId) -> bool {
    graph.providers_of(target.as_str()).any(|provider| present.contains(provider))
}

/// Present flags with a REQUIRES edge onto `target`.
fn requirers(graph: &RelationshipGraph, present: &BTreeSet<&FlagId>, target: &FlagId) -> BTreeSet<FlagId> {
    present
        .iter()
        .filter(|flag| graph.requirements_of(flag.as_str()).any(|t| t == target))
        .map(|&flag| flag.clone())
        .collect()
}

fn implied_default(graph: &RelationshipGraph, flag: &FlagId) -> Option<FlagValue> {
    graph.descriptor(flag.as_str()).and_then(|d| d.default.clone())
}

fn party(profile: &ResolvedProfile, flag: &FlagId) -> ConflictParty {
    let provenance =
        profile.get(flag.as_str()).map_or(Provenance::Explicit, |f| f.provenance.clone());
    ConflictParty { flag: flag.clone(), provenance, induced_by: profile.origins(flag.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootcfg_graph::GraphBuilder;
    use bootcfg_kernel::domain::{FlagDescriptor, FlagKind, RelationKind};
    use bootcfg_registry::FlagRegistry;

    fn graph(edges: &[(RelationKind, &str, &str)]) -> RelationshipGraph {
        let registry = FlagRegistry::from_descriptors(
            ["a", "b", "c", "d", "cap"].map(|id| FlagDescriptor::new(id, FlagKind::Presence)),
        )
        .expect("registry");
        let mut builder = GraphBuilder::new(registry);
        for (kind, from, to) in edges {
            builder.add_relationship(*kind, *from, *to).expect("edge");
        }
        builder.build().expect("graph")
    }

    #[test]
    fn transitive_requirements_record_direct_requirers() {
        use RelationKind::Requires;
        let graph = graph(&[(Requires, "a", "b"), (Requires, "b", "c"), (Requires, "a", "c")]);
        let profile = resolve(&graph, &CandidateSet::presence(["a"])).unwrap();

        let Some(Provenance::Implied { required_by }) = profile.get("c").map(|f| &f.provenance) else {
            panic!("c should be implied");
        };
        assert_eq!(required_by.iter().map(FlagId::as_str).collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(profile.origins("c"), BTreeSet::from([FlagId::new("a")]));
    }

    #[test]
    fn provider_added_in_same_round_does_not_remove_target() {
        use RelationKind::{Provides, Requires};
        let graph = graph(&[(Requires, "a", "cap"), (Requires, "a", "d"), (Provides, "d", "cap")]);
        let profile = resolve(&graph, &CandidateSet::presence(["a"])).unwrap();

        assert!(profile.contains("d"));
        assert!(profile.contains("cap"));
    }

    #[test]
    fn explicit_provider_satisfies_requirement() {
        use RelationKind::{Provides, Requires};
        let graph = graph(&[(Requires, "a", "cap"), (Provides, "d", "cap")]);
        let profile = resolve(&graph, &CandidateSet::presence(["a", "d"])).unwrap();

        assert!(!profile.contains("cap"));
        assert_eq!(profile.implied().count(), 0);
    }

    #[test]
    fn empty_candidate_resolves_to_empty_profile() {
        let graph = graph(&[]);
        assert!(resolve(&graph, &CandidateSet::new()).unwrap().is_empty());
    }
}
