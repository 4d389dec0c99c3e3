//! Session configuration.
//!
//! Defaults match the production rules; every field can be overridden from
//! `SESSION_*` environment variables.

use std::env;
use std::path::PathBuf;

use chrono::Duration;
use game_core::MatchConfig;

/// Runtime configuration shared by the orchestrator and its stores.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub match_config: MatchConfig,
    /// Classic matches idle this long are dropped from memory.
    pub classic_idle_secs: i64,
    /// Duel matches idle this long are resolved without a winner.
    pub duel_idle_secs: i64,
    pub event_buffer_size: usize,
    /// Seed for match dealing and random fallback moves. Random when unset.
    pub rng_seed: Option<u64>,
    /// Directory for durable match files. In-memory store when unset.
    pub data_dir: Option<PathBuf>,
    /// RON/TOML catalog file. Built-in catalog when unset.
    pub catalog_path: Option<PathBuf>,
}

impl SessionConfig {
    pub const DEFAULT_CLASSIC_IDLE_SECS: i64 = 5 * 60;
    pub const DEFAULT_DUEL_IDLE_SECS: i64 = 30 * 60;
    pub const DEFAULT_EVENT_BUFFER: usize = 100;

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(hand_size) = read_env::<usize>("SESSION_HAND_SIZE") {
            config.match_config.hand_size = hand_size.max(1);
        }
        if let Some(hp) = read_env::<u32>("SESSION_STARTING_HP") {
            config.match_config.starting_hp = hp.max(1);
        }
        if let Some(secs) = read_env::<i64>("SESSION_TURN_SECS") {
            config.match_config.turn_duration_secs = secs.max(1);
        }
        if let Some(copies) = read_env::<usize>("SESSION_DECK_COPIES") {
            config.match_config.deck_copies = copies.max(1);
        }
        if let Some(secs) = read_env::<i64>("SESSION_CLASSIC_IDLE_SECS") {
            config.classic_idle_secs = secs.max(1);
        }
        if let Some(secs) = read_env::<i64>("SESSION_DUEL_IDLE_SECS") {
            config.duel_idle_secs = secs.max(1);
        }
        if let Some(capacity) = read_env::<usize>("SESSION_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config.rng_seed = read_env::<u64>("SESSION_RNG_SEED");
        config.data_dir = env::var_os("SESSION_DATA_DIR").map(PathBuf::from);
        config.catalog_path = env::var_os("SESSION_CATALOG_PATH").map(PathBuf::from);

        config
    }

    pub fn classic_idle(&self) -> Duration {
        Duration::seconds(self.classic_idle_secs)
    }

    pub fn duel_idle(&self) -> Duration {
        Duration::seconds(self.duel_idle_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            classic_idle_secs: Self::DEFAULT_CLASSIC_IDLE_SECS,
            duel_idle_secs: Self::DEFAULT_DUEL_IDLE_SECS,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            rng_seed: None,
            data_dir: None,
            catalog_path: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
