//! Match creation.

use rand::Rng;

use crate::deck;
use crate::env::MatchEnv;
use crate::error::MatchError;
use crate::state::{
    DuelCenter, DuelStage, Match, MatchId, Outcome, ParticipantId, Seat, Variant,
};

/// Creates a freshly dealt match.
///
/// Each participant gets their own shuffled deck built from every catalog
/// code, then draws the configured opening hand from it.
///
/// Ids that collide with stored sentinels are refused: `"DRAW"` in either
/// seat, and the bot id in the first (human) seat.
pub fn new_match<R: Rng + ?Sized>(
    id: MatchId,
    players: [ParticipantId; 2],
    variant: Variant,
    env: &MatchEnv<'_>,
    rng: &mut R,
) -> Result<Match, MatchError> {
    let [a, b] = players;
    if a == b {
        return Err(MatchError::SameParticipant(a));
    }
    for id in [&a, &b] {
        if id.as_str() == Outcome::DRAW {
            return Err(MatchError::ReservedParticipant(id.clone()));
        }
    }
    if a.is_bot() {
        return Err(MatchError::ReservedParticipant(a));
    }

    let codes = env.cards.codes();
    if codes.is_empty() {
        return Err(MatchError::EmptyCatalog);
    }

    let mut seats = [Seat::new(a), Seat::new(b)];
    for seat in seats.iter_mut() {
        seat.deck = deck::build_deck(&codes, env.config.deck_copies, rng);
        seat.hand = deck::deal(&mut seat.deck, env.config.hand_size, rng);
        if variant == Variant::Classic {
            seat.hp = env.config.starting_hp;
        }
    }

    let (deadline, stage, center) = match variant {
        Variant::Classic => (Some(env.next_deadline()), None, None),
        Variant::AttributeDuel => (
            None,
            Some(DuelStage::PickCard),
            Some(DuelCenter::new_round(None, env.next_deadline())),
        ),
    };

    Ok(Match {
        id,
        variant,
        seats,
        turn: 0,
        log: vec!["Match started, hands dealt".to_string()],
        winner: None,
        last_activity: env.now,
        deadline,
        stage,
        center,
    })
}
