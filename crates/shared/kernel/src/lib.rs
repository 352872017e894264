//! Kernel utilities shared across the workspace.
//! Keep this crate lightweight: layered config loading and a prelude of the domain types most
//! callers need.
//!
//! ## Config loading
//! ```rust,no_run
//! use bootcfg_kernel::config::load_app_config;
//!
//! let cfg = load_app_config(Some("bootcfg.toml")).unwrap();
//! println!("log level: {}", cfg.logging.level);
//! ```
pub mod config;
pub mod prelude;

pub use bootcfg_domain as domain;
