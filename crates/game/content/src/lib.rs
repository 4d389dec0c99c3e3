//! Card catalog content and loaders.
//!
//! This crate houses the built-in card set and loaders for RON/TOML catalog
//! files. Content is consumed by the runtime's card oracle and never appears
//! in match state beyond card codes.

mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::builtin_catalog;

#[cfg(feature = "loaders")]
pub use loaders::{CardCatalog, CatalogLoader};
