//! Resolver engine.
//!
//! Turns a [`CandidateSet`](bootcfg_kernel::domain::CandidateSet) into a [`ResolvedProfile`]:
//! required flags are pulled in until nothing more is missing, then the result is checked
//! against every CONFLICTS edge. Each flag of the profile records whether it was requested or
//! implied, and by which flags.
//!
//! ```
//! use bootcfg_graph::GraphBuilder;
//! use bootcfg_kernel::domain::{CandidateSet, FlagKind, RelationKind};
//! use bootcfg_registry::FlagRegistry;
//! use bootcfg_resolver::Resolver;
//!
//! let mut registry = FlagRegistry::new();
//! registry.register("usb", FlagKind::Presence)?;
//! registry.register("usb_gadget", FlagKind::Presence)?;
//!
//! let mut builder = GraphBuilder::new(registry);
//! builder.add_relationship(RelationKind::Requires, "usb_gadget", "usb")?;
//! let resolver = Resolver::new(builder.build()?);
//!
//! let profile = resolver.resolve(&CandidateSet::presence(["usb_gadget"]))?;
//! assert!(profile.get("usb").is_some_and(|f| f.provenance.is_implied()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;
mod error;
mod profile;

pub use engine::{Resolver, resolve};
pub use error::{ConflictParty, ResolveError, ResolveErrorExt};
pub use profile::{Provenance, ResolvedFlag, ResolvedProfile};
