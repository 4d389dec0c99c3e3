//! Engine entry point keyed by command.

use chrono::Duration;
use rand::RngCore;

use super::{ClassicEngine, DuelEngine, Transition};
use crate::env::{Attribute, MatchEnv};
use crate::error::MatchError;
use crate::state::{CardCode, Match, ParticipantId, Variant};

/// A single state-changing request against one match.
///
/// Classic commands sent to a Duel match fail with
/// [`MatchError::WrongVariant`]; Duel commands sent to a Classic match are
/// structural no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchCommand {
    PlayCard {
        actor: ParticipantId,
        card: CardCode,
    },
    SkipTurn {
        actor: ParticipantId,
    },
    /// Force-resolves a stale Classic turn.
    EnforceDeadline,
    ChooseCard {
        actor: ParticipantId,
        card: CardCode,
    },
    ChooseAttribute {
        actor: ParticipantId,
        attribute: Attribute,
    },
    AdvanceRound,
    UnchooseCard {
        actor: ParticipantId,
    },
    /// Resolves an idle Duel match without a winner.
    ExpireIdle {
        window: Duration,
    },
    Surrender {
        actor: ParticipantId,
    },
    Abandon,
}

impl MatchCommand {
    pub fn is_classic_only(&self) -> bool {
        matches!(
            self,
            MatchCommand::PlayCard { .. } | MatchCommand::SkipTurn { .. } | MatchCommand::EnforceDeadline
        )
    }

    pub fn is_duel_only(&self) -> bool {
        matches!(
            self,
            MatchCommand::ChooseCard { .. }
                | MatchCommand::ChooseAttribute { .. }
                | MatchCommand::AdvanceRound
                | MatchCommand::UnchooseCard { .. }
                | MatchCommand::ExpireIdle { .. }
        )
    }

    /// Routes the command to the engine of the match's variant.
    pub fn apply(
        &self,
        state: &mut Match,
        env: MatchEnv<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Transition, MatchError> {
        match state.variant {
            Variant::Classic => {
                if self.is_duel_only() {
                    return Ok(Transition::Unchanged);
                }
                let mut engine = ClassicEngine::new(state, env, rng)?;
                match self {
                    MatchCommand::PlayCard { actor, card } => engine.play_card(actor, card),
                    MatchCommand::SkipTurn { actor } => engine.skip_turn(actor),
                    MatchCommand::EnforceDeadline => engine.enforce_deadline(),
                    MatchCommand::Surrender { actor } => engine.surrender(actor),
                    MatchCommand::Abandon => engine.abandon(),
                    _ => Ok(Transition::Unchanged),
                }
            }
            Variant::AttributeDuel => {
                if self.is_classic_only() {
                    return Err(MatchError::WrongVariant);
                }
                let mut engine = DuelEngine::new(state, env, rng)?;
                match self {
                    MatchCommand::ChooseCard { actor, card } => engine.choose_card(actor, card),
                    MatchCommand::ChooseAttribute { actor, attribute } => {
                        engine.choose_attribute(actor, *attribute)
                    }
                    MatchCommand::AdvanceRound => engine.advance_round(),
                    MatchCommand::UnchooseCard { actor } => engine.unchoose_card(actor),
                    MatchCommand::ExpireIdle { window } => Ok(engine.expire_idle(*window)),
                    MatchCommand::Surrender { actor } => engine.surrender(actor),
                    MatchCommand::Abandon => engine.abandon(),
                    _ => Ok(Transition::Unchanged),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::engine::test_support::{TestCatalog, fixture, t0};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn variant_mismatch_is_asymmetric() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let env = MatchEnv::new(&catalog, &config, t0());
        let mut rng = StdRng::seed_from_u64(1);

        let mut classic = fixture(Variant::Classic, "alice", "bob", [&["knight"], &[]], [&[], &[]]);
        let before = classic.clone();
        let choose = MatchCommand::ChooseCard {
            actor: ParticipantId::new("alice"),
            card: CardCode::new("knight"),
        };
        assert_eq!(choose.apply(&mut classic, env, &mut rng), Ok(Transition::Unchanged));
        assert_eq!(classic, before);

        let mut duel = fixture(Variant::AttributeDuel, "alice", "bob", [&["knight"], &[]], [&[], &[]]);
        let play = MatchCommand::PlayCard {
            actor: ParticipantId::new("alice"),
            card: CardCode::new("knight"),
        };
        assert_eq!(play.apply(&mut duel, env, &mut rng), Err(MatchError::WrongVariant));
    }

    #[test]
    fn routes_surrender_by_variant() {
        let catalog = TestCatalog::standard();
        let config = MatchConfig::default();
        let env = MatchEnv::new(&catalog, &config, t0());
        let mut rng = StdRng::seed_from_u64(2);
        let surrender = MatchCommand::Surrender {
            actor: ParticipantId::new("bob"),
        };

        for variant in [Variant::Classic, Variant::AttributeDuel] {
            let mut state = fixture(variant, "alice", "bob", [&["knight"], &["heal"]], [&[], &[]]);
            assert_eq!(surrender.apply(&mut state, env, &mut rng), Ok(Transition::Finished));
            assert_eq!(
                state.winner.as_ref().and_then(|outcome| outcome.winner()),
                Some(&ParticipantId::new("alice"))
            );
        }
    }
}
