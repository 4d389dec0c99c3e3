//! Authoritative match state representation.
//!
//! Runtime layers clone, store and publish [`Match`] values but mutate them
//! exclusively through the engines in [`crate::engine`].
mod duel;
mod ids;

pub use duel::{DuelCenter, DuelStage};
pub use ids::{CardCode, MatchId, ParticipantId};

use std::fmt;

use chrono::{DateTime, Utc};

/// Game mode of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Variant {
    /// Sequential single-card-per-turn duel with hit points.
    Classic,
    /// Sealed-selection simultaneous-reveal duel.
    AttributeDuel,
}

/// Seat index within a match. `players[0]` sits on side A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub const fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub const fn from_turn(turn: u32) -> Side {
        if turn % 2 == 0 { Side::A } else { Side::B }
    }
}

/// Final result of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Winner(ParticipantId),
    Draw,
}

impl Outcome {
    /// Wire sentinel used for drawn matches.
    pub const DRAW: &'static str = "DRAW";

    pub fn winner(&self) -> Option<&ParticipantId> {
        match self {
            Outcome::Winner(id) => Some(id),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(id) => write!(f, "{id}"),
            Outcome::Draw => f.write_str(Self::DRAW),
        }
    }
}

/// Everything one participant owns inside a match.
///
/// A dealt card unit lives in exactly one of `hand`, `deck`, `discard`, or
/// the duel center.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    pub participant: ParticipantId,
    /// Hit points (Classic only).
    pub hp: u32,
    /// Unordered bag of card codes.
    pub hand: Vec<CardCode>,
    /// Remaining deck; draws take a random unit.
    pub deck: Vec<CardCode>,
    /// Cards won in resolved Duel rounds.
    pub discard: Vec<CardCode>,
}

impl Seat {
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            hp: 0,
            hand: Vec::new(),
            deck: Vec::new(),
            discard: Vec::new(),
        }
    }

    /// Label used in match log lines.
    pub fn label(&self) -> String {
        if self.participant.is_bot() {
            "Bot".to_string()
        } else {
            format!("Player {}", self.participant)
        }
    }

    /// Removes one unit of `card` from the hand. Returns false if absent.
    pub fn take_from_hand(&mut self, card: &CardCode) -> bool {
        match self.hand.iter().position(|held| held == card) {
            Some(position) => {
                self.hand.remove(position);
                true
            }
            None => false,
        }
    }

    /// Cards still owned by this seat outside the duel center.
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.discard.len()
    }
}

/// One played-out session between two participants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub variant: Variant,
    pub seats: [Seat; 2],
    /// Strictly increasing. In Classic `seats[turn % 2]` acts next.
    pub turn: u32,
    /// Append-only, player-facing history.
    pub log: Vec<String>,
    /// Set at most once; see [`Match::resolve`].
    pub winner: Option<Outcome>,
    pub last_activity: DateTime<Utc>,
    /// Classic turn deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Duel stage (`None` for Classic).
    pub stage: Option<DuelStage>,
    /// Duel round in progress (`None` for Classic and once resolved).
    pub center: Option<DuelCenter>,
}

impl Match {
    pub fn players(&self) -> [&ParticipantId; 2] {
        [&self.seats[0].participant, &self.seats[1].participant]
    }

    pub fn seat(&self, side: Side) -> &Seat {
        &self.seats[side.index()]
    }

    pub fn seat_mut(&mut self, side: Side) -> &mut Seat {
        &mut self.seats[side.index()]
    }

    pub fn side_of(&self, participant: &ParticipantId) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| &self.seat(*side).participant == participant)
    }

    pub fn has_participant(&self, participant: &ParticipantId) -> bool {
        self.side_of(participant).is_some()
    }

    pub fn has_bot(&self) -> bool {
        self.seats.iter().any(|seat| seat.participant.is_bot())
    }

    /// Side whose turn it is (Classic).
    pub fn current_side(&self) -> Side {
        Side::from_turn(self.turn)
    }

    pub fn current_participant(&self) -> &ParticipantId {
        &self.seat(self.current_side()).participant
    }

    /// A match is finished once a winner (or draw) is recorded or, for Duel,
    /// once the stage reaches `Resolved` (idle expiry resolves without winner).
    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.stage.is_some_and(DuelStage::is_terminal)
    }

    /// Records the final outcome. Returns false and leaves the match untouched
    /// if an outcome was already recorded.
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(outcome);
        true
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Sum of owned cards across both seats, including staged cards.
    pub fn cards_in_play(&self) -> usize {
        let staged = self.center.as_ref().map_or(0, |center| {
            usize::from(center.a_card.is_some()) + usize::from(center.b_card.is_some())
        });
        self.seats.iter().map(Seat::card_count).sum::<usize>() + staged
    }
}
