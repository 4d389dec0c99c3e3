//! Runtime wrappers around static card content.
//!
//! The catalog is immutable once the orchestrator is built; dynamic state
//! lives in repositories.
mod catalog;

pub use catalog::CatalogOracleImpl;
