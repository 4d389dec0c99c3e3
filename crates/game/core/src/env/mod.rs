//! Read-only data the engines consult while resolving moves.
//!
//! [`MatchEnv`] bundles the card oracle, the rule configuration and the
//! current wall-clock time so the engines stay free of I/O and clocks.
mod cards;

pub use cards::{Attribute, CardDefinition, CardOracle};

use chrono::{DateTime, Duration, Utc};

use crate::config::MatchConfig;

/// Everything an engine needs besides the match itself and an RNG.
#[derive(Clone, Copy)]
pub struct MatchEnv<'a> {
    pub cards: &'a dyn CardOracle,
    pub config: &'a MatchConfig,
    pub now: DateTime<Utc>,
}

impl<'a> MatchEnv<'a> {
    pub fn new(cards: &'a dyn CardOracle, config: &'a MatchConfig, now: DateTime<Utc>) -> Self {
        Self { cards, config, now }
    }

    /// Deadline for a turn or round starting now.
    pub fn next_deadline(&self) -> DateTime<Utc> {
        self.now + self.config.turn_duration()
    }

    pub fn turn_duration(&self) -> Duration {
        self.config.turn_duration()
    }
}
