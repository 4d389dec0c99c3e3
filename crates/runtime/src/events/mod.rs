//! Match event publishing.
//!
//! The orchestrator hands every completed action's snapshot to a
//! [`Publisher`]; [`MatchEventBus`] is the in-process default.

mod bus;
mod types;

pub use bus::{MatchEventBus, Publisher};
pub use types::{MatchEvent, MatchEventKind};
