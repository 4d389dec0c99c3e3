//! Match configuration constants and tunable parameters.

use chrono::Duration;

/// Per-match rule parameters shared by both engines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    /// Cards dealt to each participant at match start.
    pub hand_size: usize,

    /// Starting hit points for Classic matches.
    pub starting_hp: u32,

    /// Seconds a participant has to act before the engine moves for them.
    pub turn_duration_secs: i64,

    /// Copies of every catalog code shuffled into each participant's deck.
    pub deck_copies: usize,
}

impl MatchConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_SIZE: usize = 4;
    pub const DEFAULT_STARTING_HP: u32 = 20;
    pub const DEFAULT_TURN_DURATION_SECS: i64 = 30;
    pub const DEFAULT_DECK_COPIES: usize = 1;

    pub fn new() -> Self {
        Self {
            hand_size: Self::DEFAULT_HAND_SIZE,
            starting_hp: Self::DEFAULT_STARTING_HP,
            turn_duration_secs: Self::DEFAULT_TURN_DURATION_SECS,
            deck_copies: Self::DEFAULT_DECK_COPIES,
        }
    }

    /// Turn/round duration used to rearm deadlines.
    pub fn turn_duration(&self) -> Duration {
        Duration::seconds(self.turn_duration_secs)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
