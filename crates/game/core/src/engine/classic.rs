//! Classic variant: sequential single-card turns with hit points.
//!
//! Turn ownership is implicit: `seats[turn % 2]` acts next. Every call either
//! fails before touching the match or applies its whole effect.

use rand::RngCore;

use super::Transition;
use crate::deck;
use crate::env::{CardDefinition, MatchEnv};
use crate::error::MatchError;
use crate::state::{CardCode, Match, Outcome, ParticipantId, Side, Variant};

/// Rules engine for [`Variant::Classic`] matches.
pub struct ClassicEngine<'a> {
    state: &'a mut Match,
    env: MatchEnv<'a>,
    rng: &'a mut dyn RngCore,
}

impl<'a> ClassicEngine<'a> {
    /// Binds the engine to a Classic match.
    pub fn new(
        state: &'a mut Match,
        env: MatchEnv<'a>,
        rng: &'a mut dyn RngCore,
    ) -> Result<Self, MatchError> {
        if state.variant != Variant::Classic {
            return Err(MatchError::WrongVariant);
        }
        Ok(Self { state, env, rng })
    }

    pub fn state(&self) -> &Match {
        self.state
    }

    pub fn deadline_elapsed(&self) -> bool {
        self.state
            .deadline
            .is_some_and(|deadline| deadline <= self.env.now)
    }

    /// Moves on behalf of a participant whose turn deadline has passed.
    ///
    /// Plays a random card from the stale hand, or skips when the hand is
    /// empty. Returns `Unchanged` while the deadline still holds.
    pub fn enforce_deadline(&mut self) -> Result<Transition, MatchError> {
        if self.state.is_finished() || !self.deadline_elapsed() {
            return Ok(Transition::Unchanged);
        }

        let side = self.state.current_side();
        let label = self.state.seat(side).label();
        let pick = deck::pick_random(&self.state.seat(side).hand, &mut *self.rng).cloned();

        match pick {
            Some(card) => {
                let definition = self.definition(&card)?;
                self.state
                    .push_log(format!("{label} ran out of time, playing a random card"));
                Ok(self.resolve_play(side, &definition))
            }
            None => {
                self.state.push_log(format!("{label} ran out of time — skip"));
                Ok(self.pass_turn())
            }
        }
    }

    /// Plays `card` from the actor's hand.
    pub fn play_card(
        &mut self,
        actor: &ParticipantId,
        card: &CardCode,
    ) -> Result<Transition, MatchError> {
        let side = self.acting_side(actor)?;
        let definition = self.definition(card)?;
        if !self.state.seat(side).hand.contains(card) {
            return Err(MatchError::CardNotInHand {
                actor: actor.clone(),
                card: card.clone(),
            });
        }
        Ok(self.resolve_play(side, &definition))
    }

    /// Passes the turn. Allowed with an empty hand.
    pub fn skip_turn(&mut self, actor: &ParticipantId) -> Result<Transition, MatchError> {
        let side = self.acting_side(actor)?;
        let seat = self.state.seat(side);
        let line = if seat.hand.is_empty() {
            format!("{} has no cards — skip", seat.label())
        } else {
            format!("{} skips", seat.label())
        };
        self.state.push_log(line);
        Ok(self.pass_turn())
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
        let winner = self.state.seat(side.other()).participant.clone();
        let line = format!(
            "{} surrenders — {} wins",
            self.state.seat(side).label(),
            self.state.seat(side.other()).label()
        );
        self.state.resolve(Outcome::Winner(winner));
        self.state.push_log(line);
        self.conclude();
        Ok(Transition::Finished)
    }

    /// Ends a live match without recording a winner.
    pub fn abandon(&mut self) -> Result<Transition, MatchError> {
        if self.state.is_finished() {
            return Err(MatchError::AlreadyResolved);
        }
        self.state.push_log("Match ended without a result");
        self.conclude();
        Ok(Transition::Finished)
    }

    fn acting_side(&self, actor: &ParticipantId) -> Result<Side, MatchError> {
        if self.state.is_finished() {
            return Err(MatchError::AlreadyResolved);
        }
        let side = self
            .state
            .side_of(actor)
            .ok_or_else(|| MatchError::NotAParticipant(actor.clone()))?;
        if side != self.state.current_side() {
            return Err(MatchError::NotYourTurn {
                actor: actor.clone(),
                current: self.state.current_participant().clone(),
            });
        }
        Ok(side)
    }

    fn definition(&self, card: &CardCode) -> Result<CardDefinition, MatchError> {
        self.env
            .cards
            .lookup(card)
            .ok_or_else(|| MatchError::UnknownCard(card.clone()))
    }

    /// Applies a validated play. The card must be in the side's hand.
    fn resolve_play(&mut self, side: Side, card: &CardDefinition) -> Transition {
        let opponent = side.other();
        let actor = self.state.seat(side).participant.clone();
        let mut line = format!("{} played {}", self.state.seat(side).label(), card.display_name);

        self.state.seat_mut(side).take_from_hand(&card.code);

        if let Some(damage) = card.damage.filter(|damage| *damage > 0) {
            let target = self.state.seat_mut(opponent);
            target.hp = target.hp.saturating_sub(damage);
            line.push_str(&format!(" → {damage} dmg"));
        }
        if let Some(heal) = card.heal.filter(|heal| *heal > 0) {
            let seat = self.state.seat_mut(side);
            seat.hp = seat.hp.saturating_add(heal);
            line.push_str(&format!(" → +{heal} HP"));
        }

        if self.state.seat(opponent).hp == 0 && self.state.resolve(Outcome::Winner(actor)) {
            line.push_str(" — WIN");
        }
        self.state.push_log(line);

        self.state.turn += 1;
        self.state.touch(self.env.now);
        if self.state.is_finished() {
            self.state.deadline = None;
            return Transition::Finished;
        }

        self.state.deadline = Some(self.env.next_deadline());
        self.draw_for_current();
        Transition::Updated
    }

    fn pass_turn(&mut self) -> Transition {
        self.state.turn += 1;
        self.state.touch(self.env.now);
        self.state.deadline = Some(self.env.next_deadline());
        self.draw_for_current();

        if self.state.seats.iter().all(|seat| seat.hand.is_empty()) {
            self.state.resolve(Outcome::Draw);
            self.state.push_log("Both out of cards — draw");
            self.state.deadline = None;
            return Transition::Finished;
        }
        Transition::Updated
    }

    fn draw_for_current(&mut self) {
        let side = self.state.current_side();
        let seat = &mut self.state.seats[side.index()];
        let line = match deck::draw_random(&mut seat.deck, &mut *self.rng) {
            Some(card) => {
                seat.hand.push(card);
                format!("{} draws a card", seat.participant)
            }
            None => format!("{} cannot draw (deck empty)", seat.participant),
        };
        self.state.push_log(line);
    }

    fn conclude(&mut self) {
        self.state.deadline = None;
        self.state.touch(self.env.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::engine::test_support::{TestCatalog, fixture, t0};
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn alice() -> ParticipantId {
        ParticipantId::new("alice")
    }

    fn bob() -> ParticipantId {
        ParticipantId::new("bob")
    }

    fn card(code: &str) -> CardCode {
        CardCode::new(code)
    }

    #[test]
    fn four_fireballs_defeat_a_twenty_hp_opponent() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = fixture(
            Variant::Classic,
            "alice",
            "bob",
            [&["fireball"; 4], &["knight"; 4]],
            [&[], &["knight"; 4]],
        );

        for hit in 1..=4u32 {
            let env = MatchEnv::new(&catalog, &config, t0());
            let mut engine = ClassicEngine::new(&mut state, env, &mut rng).unwrap();
            let transition = engine.play_card(&alice(), &card("fireball")).unwrap();
            assert_eq!(state.seats[1].hp, 20 - 5 * hit);

            if hit < 4 {
                assert_eq!(transition, Transition::Updated);
                let env = MatchEnv::new(&catalog, &config, t0());
                let mut engine = ClassicEngine::new(&mut state, env, &mut rng).unwrap();
                engine.play_card(&bob(), &card("knight")).unwrap();
            } else {
                assert_eq!(transition, Transition::Finished);
            }
        }

        assert_eq!(state.seats[1].hp, 0);
        assert_eq!(state.winner, Some(Outcome::Winner(alice())));
        assert!(state.log.iter().any(|line| line.ends_with("— WIN")));
        assert!(state.deadline.is_none());
    }

    #[test]
    fn hit_points_clamp_at_zero() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&["fireball"], &["heal"]], [&[], &[]]);
        state.seats[1].hp = 2;

        let env = MatchEnv::new(&catalog, &config, t0());
        ClassicEngine::new(&mut state, env, &mut rng)
            .unwrap()
            .play_card(&alice(), &card("fireball"))
            .unwrap();

        assert_eq!(state.seats[1].hp, 0);
        assert_eq!(state.winner, Some(Outcome::Winner(alice())));
    }

    #[test]
    fn heal_raises_own_hit_points_and_draws_for_next_player() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = fixture(
            Variant::Classic,
            "alice",
            "bob",
            [&["heal"], &["knight"]],
            [&[], &["warrior"]],
        );

        let env = MatchEnv::new(&catalog, &config, t0());
        let transition = ClassicEngine::new(&mut state, env, &mut rng)
            .unwrap()
            .play_card(&alice(), &card("heal"))
            .unwrap();

        assert_eq!(transition, Transition::Updated);
        assert_eq!(state.seats[0].hp, 24);
        assert_eq!(state.turn, 1);
        assert_eq!(state.seats[1].hand, vec![card("knight"), card("warrior")]);
        assert_eq!(state.log.last().map(String::as_str), Some("bob draws a card"));
        assert_eq!(state.deadline, Some(t0() + config.turn_duration()));
    }

    #[test]
    fn rejects_out_of_turn_and_missing_cards_without_mutation() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&["heal"], &["knight"]], [&[], &[]]);
        let before = state.clone();

        let env = MatchEnv::new(&catalog, &config, t0());
        let mut engine = ClassicEngine::new(&mut state, env, &mut rng).unwrap();

        let err = engine.play_card(&bob(), &card("knight")).unwrap_err();
        assert!(matches!(err, MatchError::NotYourTurn { .. }));

        let err = engine.play_card(&alice(), &card("fireball")).unwrap_err();
        assert!(matches!(err, MatchError::CardNotInHand { .. }));

        let err = engine.play_card(&alice(), &card("no_such_card")).unwrap_err();
        assert_eq!(err, MatchError::UnknownCard(card("no_such_card")));

        let err = engine.skip_turn(&ParticipantId::new("eve")).unwrap_err();
        assert_eq!(err, MatchError::NotAParticipant(ParticipantId::new("eve")));

        assert_eq!(state, before);
    }

    #[test]
    fn skipping_with_both_hands_empty_is_a_draw() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&[], &[]], [&[], &[]]);

        let env = MatchEnv::new(&catalog, &config, t0());
        let mut engine = ClassicEngine::new(&mut state, env, &mut rng).unwrap();
        let transition = engine.skip_turn(&alice()).unwrap();

        assert_eq!(transition, Transition::Finished);
        assert_eq!(state.winner, Some(Outcome::Draw));
        assert!(state.log.contains(&"Player alice has no cards — skip".to_string()));
        assert!(state.log.contains(&"bob cannot draw (deck empty)".to_string()));
        assert_eq!(state.log.last().map(String::as_str), Some("Both out of cards — draw"));
    }

    #[test]
    fn finished_match_rejects_further_moves() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&["heal"], &[]], [&[], &[]]);
        state.winner = Some(Outcome::Draw);

        let env = MatchEnv::new(&catalog, &config, t0());
        let mut engine = ClassicEngine::new(&mut state, env, &mut rng).unwrap();
        assert_eq!(
            engine.play_card(&alice(), &card("heal")).unwrap_err(),
            MatchError::AlreadyResolved
        );
        assert_eq!(engine.surrender(&alice()).unwrap_err(), MatchError::AlreadyResolved);
    }

    #[test]
    fn duel_match_is_rejected() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = fixture(Variant::AttributeDuel, "alice", "bob", [&[], &[]], [&[], &[]]);

        let env = MatchEnv::new(&catalog, &config, t0());
        assert!(matches!(
            ClassicEngine::new(&mut state, env, &mut rng),
            Err(MatchError::WrongVariant)
        ));
    }

    #[test]
    fn elapsed_deadline_plays_for_the_stale_participant() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&["fireball"], &["knight"]], [&[], &[]]);

        let early = MatchEnv::new(&catalog, &config, t0() + Duration::seconds(10));
        let mut engine = ClassicEngine::new(&mut state, early, &mut rng).unwrap();
        assert_eq!(engine.enforce_deadline().unwrap(), Transition::Unchanged);

        let late_now = t0() + Duration::seconds(31);
        let late = MatchEnv::new(&catalog, &config, late_now);
        let mut engine = ClassicEngine::new(&mut state, late, &mut rng).unwrap();
        assert_eq!(engine.enforce_deadline().unwrap(), Transition::Updated);

        assert!(state.seats[0].hand.is_empty());
        assert_eq!(state.seats[1].hp, 15);
        assert_eq!(state.turn, 1);
        assert_eq!(state.deadline, Some(late_now + config.turn_duration()));
        assert!(state.log.iter().any(|line| line.contains("ran out of time")));
    }

    #[test]
    fn elapsed_deadline_with_empty_hand_forces_a_skip() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&[], &["knight"]], [&[], &[]]);

        let late = MatchEnv::new(&catalog, &config, t0() + Duration::minutes(2));
        let transition = ClassicEngine::new(&mut state, late, &mut rng)
            .unwrap()
            .enforce_deadline()
            .unwrap();

        assert_eq!(transition, Transition::Updated);
        assert_eq!(state.turn, 1);
        assert_eq!(state.current_participant(), &bob());
        assert!(state.log.contains(&"Player alice ran out of time — skip".to_string()));
    }

    #[test]
    fn surrender_awards_the_opponent() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let mut rng = StdRng::seed_from_u64(10);
        let mut state = fixture(Variant::Classic, "alice", "bob", [&["heal"], &[]], [&[], &[]]);

        let env = MatchEnv::new(&catalog, &config, t0());
        let transition = ClassicEngine::new(&mut state, env, &mut rng)
            .unwrap()
            .surrender(&bob())
            .unwrap();

        assert_eq!(transition, Transition::Finished);
        assert_eq!(state.winner, Some(Outcome::Winner(alice())));
        assert!(state.deadline.is_none());
    }
}
