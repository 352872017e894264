//! # Domain Models
//!
//! Pure data types shared by the registry, graph and resolver crates: flag identifiers and values,
//! relationship kinds, candidate sets, catalog definitions and application config.
//! Keep it lean: no I/O and no resolution logic, just data and small helpers.

pub mod candidate;
pub mod catalog;
pub mod config;
pub mod flag;
pub mod relation;

pub use candidate::CandidateSet;
pub use catalog::CatalogSpec;
pub use flag::{FlagDescriptor, FlagId, FlagKind, FlagValue};
pub use relation::{RelationKind, RelationKinds, Relationship};
