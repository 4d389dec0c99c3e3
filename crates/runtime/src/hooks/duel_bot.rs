//! Bot staging and attribute choice in Attribute Duel matches.

use std::sync::Arc;

use rand::RngCore;

use game_core::{DuelStage, MatchCommand, Side, Variant};

use super::{HookContext, PostTransitionHook};
use crate::providers::BotPolicy;

fn bot_side(ctx: &HookContext<'_>) -> Option<Side> {
    if ctx.state.variant != Variant::AttributeDuel || ctx.state.is_finished() {
        return None;
    }
    Side::BOTH
        .into_iter()
        .find(|side| ctx.state.seat(*side).participant.is_bot())
}

/// Stages a card for the bot while card selection is open.
pub struct DuelBotCardHook {
    policy: Arc<dyn BotPolicy>,
}

impl DuelBotCardHook {
    pub fn new(policy: Arc<dyn BotPolicy>) -> Self {
        Self { policy }
    }
}

impl PostTransitionHook for DuelBotCardHook {
    fn name(&self) -> &'static str {
        "duel_bot_card"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        let Some(side) = bot_side(ctx) else {
            return false;
        };
        ctx.state.stage == Some(DuelStage::PickCard)
            && !ctx.state.seat(side).hand.is_empty()
            && ctx
                .state
                .center
                .as_ref()
                .is_some_and(|center| center.card(side).is_none())
    }

    fn create_commands(&self, ctx: &HookContext<'_>, rng: &mut dyn RngCore) -> Vec<MatchCommand> {
        let Some(side) = bot_side(ctx) else {
            return Vec::new();
        };
        let seat = ctx.state.seat(side);
        self.policy
            .pick_card(&seat.hand, rng)
            .map(|card| MatchCommand::ChooseCard {
                actor: seat.participant.clone(),
                card,
            })
            .into_iter()
            .collect()
    }
}

/// Picks the comparison attribute when the bot is the round's chooser.
pub struct DuelBotAttributeHook {
    policy: Arc<dyn BotPolicy>,
}

impl DuelBotAttributeHook {
    pub fn new(policy: Arc<dyn BotPolicy>) -> Self {
        Self { policy }
    }
}

impl PostTransitionHook for DuelBotAttributeHook {
    fn name(&self) -> &'static str {
        "duel_bot_attribute"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        let Some(side) = bot_side(ctx) else {
            return false;
        };
        ctx.state.stage == Some(DuelStage::PickAttribute)
            && ctx
                .state
                .center
                .as_ref()
                .is_some_and(|center| center.chooser == Some(side))
    }

    fn create_commands(&self, ctx: &HookContext<'_>, _rng: &mut dyn RngCore) -> Vec<MatchCommand> {
        let (Some(side), Some(center)) = (bot_side(ctx), ctx.state.center.as_ref()) else {
            return Vec::new();
        };
        let (Some(own), Some(opponent)) = (
            center.card(side).and_then(|code| ctx.cards.lookup(code)),
            center.card(side.other()).and_then(|code| ctx.cards.lookup(code)),
        ) else {
            tracing::warn!(
                match_id = %ctx.state.id,
                "bot cannot evaluate staged cards, leaving the choice to the round deadline"
            );
            return Vec::new();
        };

        vec![MatchCommand::ChooseAttribute {
            actor: ctx.state.seat(side).participant.clone(),
            attribute: self.policy.pick_attribute(&own, &opponent),
        }]
    }
}
