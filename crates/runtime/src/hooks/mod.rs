//! Post-transition hook system for bot continuations.
//!
//! Hooks inspect a match right after a state-changing command and may emit
//! follow-up [`MatchCommand`]s. Those run through the same engine entry point
//! as client commands, so bot moves obey every rule a human move does.
//!
//! # Architecture
//!
//! - Hooks are registered on the orchestrator builder and sorted by priority
//! - After each changing command, every hook whose `should_trigger()` holds
//!   contributes commands, which are applied in priority order
//! - The cascade repeats until no hook triggers, bounded by [`MAX_HOOK_DEPTH`]
//!
//! A typical Duel cascade: the human stages a card, `duel_bot_card` stages
//! the bot's, both cards are in, the bot is chooser, `duel_bot_attribute`
//! picks the attribute and the round is revealed.

mod classic_bot;
mod context;
mod duel_bot;
mod registry;

pub use classic_bot::ClassicBotHook;
pub use context::HookContext;
pub use duel_bot::{DuelBotAttributeHook, DuelBotCardHook};
pub use registry::HookRegistry;

use rand::RngCore;

use game_core::MatchCommand;

/// Upper bound on cascade rounds triggered by a single command.
pub const MAX_HOOK_DEPTH: usize = 8;

/// How a failing hook command is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Failure fails the whole action; nothing is written.
    Critical,

    /// Failure is logged and the cascade stops; the action still commits.
    Important,
}

/// Hook evaluated after every state-changing command.
///
/// Hooks must only trigger when their command will change the match;
/// otherwise the cascade stops as soon as a round makes no progress.
pub trait PostTransitionHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    /// Follow-up commands. Empty means nothing to do.
    fn create_commands(&self, ctx: &HookContext<'_>, rng: &mut dyn RngCore) -> Vec<MatchCommand>;
}
