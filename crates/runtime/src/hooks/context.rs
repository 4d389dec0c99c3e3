//! Execution context provided to hooks during evaluation.

use chrono::{DateTime, Utc};

use game_core::{CardOracle, Match};

/// Read-only view handed to hooks.
pub struct HookContext<'a> {
    /// Match after the command (and any earlier hooks) applied.
    pub state: &'a Match,

    /// Card catalog for lookups.
    pub cards: &'a dyn CardOracle,

    pub now: DateTime<Utc>,
}
