//! Automated opponent decisions.

use rand::RngCore;

use game_core::{Attribute, CardCode, CardDefinition, deck};

/// Decision policy for the bot seat.
pub trait BotPolicy: Send + Sync {
    /// Card to play or stage from `hand`. `None` when the hand is empty.
    fn pick_card(&self, hand: &[CardCode], rng: &mut dyn RngCore) -> Option<CardCode>;

    /// Attribute to compare on, given the bot's staged card and the
    /// opponent's.
    fn pick_attribute(&self, own: &CardDefinition, opponent: &CardDefinition) -> Attribute;
}

/// Uniformly random cards; attribute with the largest advantage.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBotPolicy;

impl BotPolicy for DefaultBotPolicy {
    fn pick_card(&self, hand: &[CardCode], rng: &mut dyn RngCore) -> Option<CardCode> {
        deck::pick_random(hand, rng).cloned()
    }

    /// Maximizes `own - opponent`; ties go to the earlier attribute in
    /// magic, might, fire order.
    fn pick_attribute(&self, own: &CardDefinition, opponent: &CardDefinition) -> Attribute {
        let delta = |attribute: Attribute| {
            i64::from(own.attribute(attribute)) - i64::from(opponent.attribute(attribute))
        };

        let mut best = Attribute::Magic;
        for attribute in Attribute::ALL {
            if delta(attribute) > delta(best) {
                best = attribute;
            }
        }
        best
    }
}
