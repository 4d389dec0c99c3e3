//! Public session API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, storage, or hooks.

pub mod actions;
pub mod errors;
pub mod response;

pub use actions::SessionAction;
pub use errors::{Result, SessionError};
pub use response::{ExpiryReport, MatchResult, MatchSummary, ParticipantStats, SessionResponse};
