use bootcfg_kernel::domain::{FlagId, Relationship};
use bootcfg_registry::RegistryError;
use std::borrow::Cow;

/// Graph authoring errors, detected while declaring or building the graph.
///
/// They indicate a defect in the static definitions, so initialization should stop on any of them.
#[bootcfg_derive::bootcfg_error]
pub enum GraphError {
    #[error("Unknown flag in relationship: {flag}")]
    UnknownFlag { flag: FlagId },

    #[error("Duplicate relationship: {relationship}")]
    DuplicateRelationship { relationship: Relationship },

    /// `path` starts and ends with the same flag.
    #[error("Dependency cycle: {}", join_path(.path))]
    DependencyCycle { path: Vec<FlagId> },

    #[error("Contradictory relationships: {first} and {second} conflict but one leads to the other")]
    ContradictoryRelationship { first: FlagId, second: FlagId },

    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },
}

fn join_path(path: &[FlagId]) -> String {
    path.iter().map(FlagId::as_str).collect::<Vec<_>>().join(" -> ")
}
