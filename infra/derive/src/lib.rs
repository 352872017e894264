#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the `bootcfg` workspace.
//!
//! Currently a single attribute macro, [`macro@bootcfg_error`], which turns a plain enum into a
//! crate error type with context support. Every library crate in the workspace declares its error
//! enum through it so diagnostics look and compose the same way everywhere.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A companion `<Name>Ext` trait providing `.context(..)` on `Result<T, Name>` and, for every
///   variant holding a `source` field, on `Result<T, Source>` as well.
/// * `From<Source>` for every variant with a `source` field (so `?` works on upstream errors).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper to be used in `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. The item must be an **enum**.
/// 2. Variants must use named fields. Tuple and unit variants are rejected.
/// 3. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 4. Variants carrying a `source` (or `#[source]`/`#[from]`) field must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[bootcfg_derive::bootcfg_error]
/// pub enum CatalogError {
///     #[error("Unknown flag: {flag}")]
///     UnknownFlag { flag: String },
///
///     #[error("Catalog decode error{}: {source}", format_context(.context))]
///     Decode { source: toml::de::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<Spec, CatalogError> {
///     toml::from_str(raw).context("Decoding catalog file")
/// }
/// ```
#[proc_macro_attribute]
pub fn bootcfg_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
