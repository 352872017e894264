//! Facade crate for the bootcfg flag resolver.
//! Re-exports the domain/kernel primitives and the registry, graph and resolver crates, and adds
//! catalog startup on top of them. Keep this crate thin: it composes, it does not resolve.
//!
//! ## Usage
//! - Load an [`AppConfig`](domain::config::AppConfig) with `kernel::config::load_app_config`.
//! - Build a [`Catalog`] once with [`Catalog::from_config`] (or [`Catalog::builtin`]).
//! - Resolve any number of candidate profiles against it, from any thread.
//!
//! ```
//! use bootcfg::{Catalog, builtin, parse_profile};
//!
//! let catalog = Catalog::builtin()?;
//! let profile = catalog.resolve(&parse_profile(builtin::ZYNQMP_USB_PROFILE)?)?;
//! assert!(profile.contains("usb_dwc3_gadget"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builtin;
mod catalog;

pub use bootcfg_graph as graph;
pub use bootcfg_kernel as kernel;
pub use bootcfg_kernel::domain;
pub use bootcfg_registry as registry;
pub use bootcfg_resolver as resolver;

pub use catalog::{Catalog, CatalogError, CatalogErrorExt, parse_profile, read_profile};
