//! Deterministic match rules and data types shared by the session stack.
//!
//! `game-core` defines the canonical match model and the two rule engines
//! (Classic and Attribute Duel). It performs no I/O: card data arrives through
//! [`CardOracle`], time through [`MatchEnv::now`], and randomness through a
//! caller-supplied RNG. All state mutation flows through [`ClassicEngine`] and
//! [`DuelEngine`]; storage, locking and bots live in the runtime crate.
pub mod config;
pub mod deck;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::MatchConfig;
pub use engine::{ClassicEngine, DuelEngine, MatchCommand, Transition, new_match};
pub use env::{Attribute, CardDefinition, CardOracle, MatchEnv};
pub use error::{ErrorKind, MatchError};
pub use state::{
    CardCode, DuelCenter, DuelStage, Match, MatchId, Outcome, ParticipantId, Seat, Side, Variant,
};
