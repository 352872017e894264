//! # Relationship Graph
//!
//! Turns flag relationships into a validated, read-only graph.
//!
//! * **REQUIRES(A, B)**: A set implies B must also be set.
//! * **CONFLICTS(A, B)**: A and B must never both be set.
//! * **PROVIDES(A, B)**: A set satisfies any requirement targeting B (one-of-many backends,
//!   e.g. a controller driver providing the capability a gadget stack requires).
//!
//! [`GraphBuilder`] rejects unknown endpoints and duplicate declarations as they are added, and
//! [`GraphBuilder::build`] rejects requirement cycles and contradictory declarations once all
//! of them are in. A [`RelationshipGraph`] is acyclic and free of direct contradictions, but a flag
//! can still be unusable: requiring two flags that conflict with each other builds fine, and every
//! candidate set containing it then fails resolution.
//!
//! ```rust
//! use bootcfg_graph::{GraphBuilder, GraphError};
//! use bootcfg_kernel::domain::{FlagKind, RelationKind};
//! use bootcfg_registry::FlagRegistry;
//!
//! let mut registry = FlagRegistry::new();
//! for id in ["usb", "usb_gadget", "usb_storage"] {
//!     registry.register(id, FlagKind::Presence)?;
//! }
//!
//! let mut builder = GraphBuilder::new(registry);
//! builder
//!     .add_relationship(RelationKind::Requires, "usb_gadget", "usb")?
//!     .add_relationship(RelationKind::Requires, "usb_storage", "usb")?;
//!
//! let graph = builder.build()?;
//! assert_eq!(graph.requirements_of("usb_gadget").count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod graph;
mod traversal;

pub use crate::builder::GraphBuilder;
pub use crate::error::{GraphError, GraphErrorExt};
pub use crate::graph::RelationshipGraph;
