//! Bot turn in Classic matches.

use std::sync::Arc;

use rand::RngCore;

use game_core::{MatchCommand, Variant};

use super::{HookContext, PostTransitionHook};
use crate::providers::BotPolicy;

/// Plays exactly one bot turn whenever the turn passes to the bot.
///
/// A random card from the bot's hand, or a logged skip when the hand is
/// empty. The bot's move passes the turn back, so the hook fires at most
/// once per human move.
pub struct ClassicBotHook {
    policy: Arc<dyn BotPolicy>,
}

impl ClassicBotHook {
    pub fn new(policy: Arc<dyn BotPolicy>) -> Self {
        Self { policy }
    }
}

impl PostTransitionHook for ClassicBotHook {
    fn name(&self) -> &'static str {
        "classic_bot"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.state.variant == Variant::Classic
            && !ctx.state.is_finished()
            && ctx.state.current_participant().is_bot()
    }

    fn create_commands(&self, ctx: &HookContext<'_>, rng: &mut dyn RngCore) -> Vec<MatchCommand> {
        let seat = ctx.state.seat(ctx.state.current_side());
        let actor = seat.participant.clone();
        let command = match self.policy.pick_card(&seat.hand, rng) {
            Some(card) => MatchCommand::PlayCard { actor, card },
            None => MatchCommand::SkipTurn { actor },
        };
        vec![command]
    }
}
