//! Attribute Duel variant: sealed card selection, attribute choice, reveal.
//!
//! Every operation is gated on the match stage. A call that does not fit the
//! current stage, or comes from someone who may not make it, returns
//! [`Transition::Unchanged`] and leaves the match untouched.

use std::cmp::Ordering;

use chrono::Duration;
use rand::RngCore;
use rand::seq::SliceRandom;

use super::Transition;
use crate::deck;
use crate::env::{Attribute, MatchEnv};
use crate::error::MatchError;
use crate::state::{
    CardCode, DuelCenter, DuelStage, Match, Outcome, ParticipantId, Side, Variant,
};

/// Placeholder used in round logs when a staged code has no catalog entry.
const UNKNOWN_CARD: &str = "Unknown card";

/// Rules engine for [`Variant::AttributeDuel`] matches.
pub struct DuelEngine<'a> {
    state: &'a mut Match,
    env: MatchEnv<'a>,
    rng: &'a mut dyn RngCore,
}

impl<'a> DuelEngine<'a> {
    /// Binds the engine to an Attribute Duel match.
    pub fn new(
        state: &'a mut Match,
        env: MatchEnv<'a>,
        rng: &'a mut dyn RngCore,
    ) -> Result<Self, MatchError> {
        if state.variant != Variant::AttributeDuel {
            return Err(MatchError::WrongVariant);
        }
        Ok(Self { state, env, rng })
    }

    pub fn state(&self) -> &Match {
        self.state
    }

    pub fn stage(&self) -> Option<DuelStage> {
        self.state.stage
    }

    pub fn round_deadline_elapsed(&self) -> bool {
        self.state
            .center
            .as_ref()
            .is_some_and(|center| center.deadline_elapsed(self.env.now))
    }

    /// Stages `card` from the actor's hand for this round.
    ///
    /// Once the round deadline has passed, every unstaged side first gets a
    /// random card staged on its behalf. Callers outside the match change
    /// nothing, deadline or not.
    pub fn choose_card(
        &mut self,
        actor: &ParticipantId,
        card: &CardCode,
    ) -> Result<Transition, MatchError> {
        if self.state.stage != Some(DuelStage::PickCard) {
            return Ok(Transition::Unchanged);
        }
        let Some(side) = self.state.side_of(actor) else {
            return Ok(Transition::Unchanged);
        };

        let mut changed = false;
        if self.round_deadline_elapsed() {
            changed |= self.stage_random_for_unstaged();
        }

        if self.staged(side).is_none() && self.state.seat_mut(side).take_from_hand(card) {
            let line = format!("{} locked in a card", self.state.seat(side).label());
            self.center_mut().set_card(side, card.clone());
            self.state.push_log(line);
            changed = true;
        }

        if !changed {
            return Ok(Transition::Unchanged);
        }
        self.state.touch(self.env.now);
        self.lock_in_if_ready();
        Ok(Transition::Updated)
    }

    /// Picks the attribute the staged cards are compared on, then reveals.
    ///
    /// Only the round's chooser may pick, unless the round deadline has
    /// passed; then the pick is made on the chooser's behalf at random.
    pub fn choose_attribute(
        &mut self,
        actor: &ParticipantId,
        attribute: Attribute,
    ) -> Result<Transition, MatchError> {
        if self.state.stage != Some(DuelStage::PickAttribute) {
            return Ok(Transition::Unchanged);
        }
        let Some(chooser) = self.state.center.as_ref().and_then(|center| center.chooser) else {
            return Ok(Transition::Unchanged);
        };
        let Some(side) = self.state.side_of(actor) else {
            return Ok(Transition::Unchanged);
        };

        let timed_out = self.round_deadline_elapsed();
        let attribute = if timed_out {
            Attribute::ALL
                .choose(&mut *self.rng)
                .copied()
                .unwrap_or(attribute)
        } else if side == chooser {
            attribute
        } else {
            return Ok(Transition::Unchanged);
        };

        let (Some(a_card), Some(b_card)) = (self.staged(Side::A), self.staged(Side::B)) else {
            return Ok(Transition::Unchanged);
        };
        let a_value = self.card_value(a_card, attribute)?;
        let b_value = self.card_value(b_card, attribute)?;
        let round_winner = match a_value.cmp(&b_value) {
            Ordering::Greater => Some(Side::A),
            Ordering::Less => Some(Side::B),
            Ordering::Equal => None,
        };

        let label = self.state.seat(chooser).label();
        if timed_out {
            self.state
                .push_log(format!("{label} ran out of time, {attribute} picked at random"));
        } else {
            self.state.push_log(format!("{label} chose {attribute}"));
        }

        let center = self.center_mut();
        center.attribute = Some(attribute);
        center.a_value = Some(a_value);
        center.b_value = Some(b_value);
        center.round_winner = round_winner;
        center.deadline = None;
        self.state.stage = Some(DuelStage::Reveal);
        self.state.touch(self.env.now);
        Ok(Transition::Updated)
    }

    /// Settles a revealed round and either deals the next one or ends the
    /// match.
    pub fn advance_round(&mut self) -> Result<Transition, MatchError> {
        if self.state.stage != Some(DuelStage::Reveal) {
            return Ok(Transition::Unchanged);
        }
        let Some(mut center) = self.state.center.take() else {
            return Ok(Transition::Unchanged);
        };

        let a_name = self.display_name(center.a_card.as_ref());
        let b_name = self.display_name(center.b_card.as_ref());
        let attribute = center
            .attribute
            .map_or_else(|| "?".to_string(), |attribute| attribute.to_string());
        let staged: Vec<CardCode> = Side::BOTH
            .into_iter()
            .filter_map(|side| center.take_card(side))
            .collect();

        let outcome = match center.round_winner {
            Some(side) => {
                self.state.seat_mut(side).discard.extend(staged);
                format!("{} wins the round", self.state.seat(side).label())
            }
            None => "tie, no one takes the cards".to_string(),
        };
        self.state.push_log(format!(
            "{attribute}: {a_name} ({}) vs {b_name} ({}) — {outcome}",
            center.a_value.unwrap_or_default(),
            center.b_value.unwrap_or_default(),
        ));

        for seat in self.state.seats.iter_mut() {
            if let Some(card) = deck::draw_random(&mut seat.deck, &mut *self.rng) {
                seat.hand.push(card);
            }
        }

        self.state.turn += 1;
        self.state.touch(self.env.now);

        if self.state.seats.iter().any(|seat| seat.hand.is_empty()) {
            let [a, b] = &self.state.seats;
            let result = match a.discard.len().cmp(&b.discard.len()) {
                Ordering::Greater => Outcome::Winner(a.participant.clone()),
                Ordering::Less => Outcome::Winner(b.participant.clone()),
                Ordering::Equal => Outcome::Draw,
            };
            let line = match &result {
                Outcome::Winner(id) => {
                    let side = self.state.side_of(id).unwrap_or(Side::A);
                    format!("Match over — {} wins", self.state.seat(side).label())
                }
                Outcome::Draw => "Match over — draw".to_string(),
            };
            self.state.resolve(result);
            self.state.push_log(line);
            self.state.stage = Some(DuelStage::Resolved);
            return Ok(Transition::Finished);
        }

        let next_chooser = center.chooser.unwrap_or(Side::A).other();
        self.state.center = Some(DuelCenter::new_round(
            Some(next_chooser),
            self.env.next_deadline(),
        ));
        self.state.stage = Some(DuelStage::PickCard);
        Ok(Transition::Updated)
    }

    /// Takes the actor's staged card back, returning the opponent's too, and
    /// restarts card selection with the actor as chooser.
    pub fn unchoose_card(&mut self, actor: &ParticipantId) -> Result<Transition, MatchError> {
        if !matches!(
            self.state.stage,
            Some(DuelStage::PickCard | DuelStage::PickAttribute)
        ) {
            return Ok(Transition::Unchanged);
        }
        let Some(side) = self.state.side_of(actor) else {
            return Ok(Transition::Unchanged);
        };
        if self.staged(side).is_none() {
            return Ok(Transition::Unchanged);
        }

        self.return_staged_cards();
        self.state.center = Some(DuelCenter::new_round(Some(side), self.env.next_deadline()));
        self.state.stage = Some(DuelStage::PickCard);
        let line = format!("{} took back their card", self.state.seat(side).label());
        self.state.push_log(line);
        self.state.touch(self.env.now);
        Ok(Transition::Updated)
    }

    /// Concedes the match; the opponent wins.
    pub fn surrender(&mut self, actor: &ParticipantId) -> Result<Transition, MatchError> {
        if self.state.is_finished() {
            return Err(MatchError::AlreadyResolved);
        }
        let side = self
            .state
            .side_of(actor)
            .ok_or_else(|| MatchError::NotAParticipant(actor.clone()))?;

        let winner = self.state.seat(side.other());
        let line = format!(
            "{} surrenders — {} wins",
            self.state.seat(side).label(),
            winner.label()
        );
        let outcome = Outcome::Winner(winner.participant.clone());
        self.state.resolve(outcome);
        self.state.push_log(line);
        self.close();
        Ok(Transition::Finished)
    }

    /// Ends a live match without recording a winner.
    pub fn abandon(&mut self) -> Result<Transition, MatchError> {
        if self.state.is_finished() {
            return Err(MatchError::AlreadyResolved);
        }
        self.state.push_log("Match ended without a result");
        self.close();
        Ok(Transition::Finished)
    }

    /// Resolves the match without a winner if it saw no activity for `window`.
    pub fn expire_idle(&mut self, window: Duration) -> Transition {
        if self.state.is_finished() || self.env.now - self.state.last_activity < window {
            return Transition::Unchanged;
        }
        self.state.push_log("Match expired after inactivity");
        self.close();
        Transition::Finished
    }

    fn staged(&self, side: Side) -> Option<&CardCode> {
        self.state.center.as_ref().and_then(|center| center.card(side))
    }

    fn center_mut(&mut self) -> &mut DuelCenter {
        self.state.center.get_or_insert_with(DuelCenter::default)
    }

    fn card_value(&self, card: &CardCode, attribute: Attribute) -> Result<u32, MatchError> {
        self.env
            .cards
            .lookup(card)
            .map(|definition| definition.attribute(attribute))
            .ok_or_else(|| MatchError::UnknownCard(card.clone()))
    }

    fn display_name(&self, card: Option<&CardCode>) -> String {
        match card {
            Some(code) => self
                .env
                .cards
                .lookup(code)
                .map_or_else(|| code.to_string(), |definition| definition.display_name),
            None => UNKNOWN_CARD.to_string(),
        }
    }

    /// Stages a random hand card for every side that has not staged yet.
    fn stage_random_for_unstaged(&mut self) -> bool {
        let mut changed = false;
        for side in Side::BOTH {
            if self.staged(side).is_some() {
                continue;
            }
            let seat = &mut self.state.seats[side.index()];
            let Some(card) = deck::pick_random(&seat.hand, &mut *self.rng).cloned() else {
                continue;
            };
            seat.take_from_hand(&card);
            let line = format!("{} ran out of time, a random card is locked in", seat.label());
            self.center_mut().set_card(side, card);
            self.state.push_log(line);
            changed = true;
        }
        changed
    }

    /// Moves to attribute selection once both sides have staged.
    fn lock_in_if_ready(&mut self) {
        let deadline = self.env.next_deadline();
        let Some(center) = self.state.center.as_mut() else {
            return;
        };
        if !center.both_staged() {
            return;
        }
        let chooser = *center.chooser.get_or_insert(Side::A);
        center.deadline = Some(deadline);
        self.state.stage = Some(DuelStage::PickAttribute);
        let line = format!(
            "Both cards locked in, {} chooses the attribute",
            self.state.seat(chooser).label()
        );
        self.state.push_log(line);
    }

    fn return_staged_cards(&mut self) {
        let Some(center) = self.state.center.as_mut() else {
            return;
        };
        for side in Side::BOTH {
            if let Some(card) = center.take_card(side) {
                self.state.seats[side.index()].hand.push(card);
            }
        }
    }

    fn close(&mut self) {
        self.return_staged_cards();
        self.state.center = None;
        self.state.stage = Some(DuelStage::Resolved);
        self.state.touch(self.env.now);
    }
}
