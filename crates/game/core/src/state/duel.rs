//! Attribute Duel round state.

use chrono::{DateTime, Utc};

use super::{CardCode, Side};
use crate::env::Attribute;

/// Phase of an Attribute Duel round.
///
/// Stages only move forward (`PickCard → PickAttribute → Reveal → PickCard |
/// Resolved`); taking a card back is the single backward edge to `PickCard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum DuelStage {
    PickCard,
    PickAttribute,
    Reveal,
    Resolved,
}

impl DuelStage {
    pub fn is_terminal(self) -> bool {
        self == DuelStage::Resolved
    }
}

/// Cards and choices of the round in progress.
///
/// Present on a Duel match while the stage is not `Resolved`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelCenter {
    /// Card staged by side A, hidden until reveal.
    pub a_card: Option<CardCode>,
    /// Card staged by side B, hidden until reveal.
    pub b_card: Option<CardCode>,
    pub attribute: Option<Attribute>,
    pub a_value: Option<u32>,
    pub b_value: Option<u32>,
    /// Side that won the revealed comparison. `None` after a tie.
    pub round_winner: Option<Side>,
    /// Side authorized to pick the comparison attribute.
    pub chooser: Option<Side>,
    /// Round deadline. Cleared once the round is revealed.
    pub deadline: Option<DateTime<Utc>>,
}

impl DuelCenter {
    /// Fresh round state with the given chooser and deadline.
    pub fn new_round(chooser: Option<Side>, deadline: DateTime<Utc>) -> Self {
        Self {
            chooser,
            deadline: Some(deadline),
            ..Self::default()
        }
    }

    pub fn card(&self, side: Side) -> Option<&CardCode> {
        match side {
            Side::A => self.a_card.as_ref(),
            Side::B => self.b_card.as_ref(),
        }
    }

    pub fn set_card(&mut self, side: Side, card: CardCode) {
        match side {
            Side::A => self.a_card = Some(card),
            Side::B => self.b_card = Some(card),
        }
    }

    pub fn take_card(&mut self, side: Side) -> Option<CardCode> {
        match side {
            Side::A => self.a_card.take(),
            Side::B => self.b_card.take(),
        }
    }

    pub fn both_staged(&self) -> bool {
        self.a_card.is_some() && self.b_card.is_some()
    }

    pub fn deadline_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }
}
