//! Attribute Duel store policy: every change is written back to the durable
//! record in one piece.

use tracing::debug;

use game_core::{Attribute, CardCode, Match, MatchCommand, MatchId, ParticipantId};

use super::{SessionOrchestrator, event_for};
use crate::api::{Result, SessionError};
use crate::events::MatchEvent;

impl SessionOrchestrator {
    pub async fn choose_card(
        &self,
        id: &MatchId,
        participant: ParticipantId,
        card: CardCode,
    ) -> Result<Match> {
        self.run(
            id,
            MatchCommand::ChooseCard {
                actor: participant,
                card,
            },
        )
        .await
    }

    pub async fn choose_attribute(
        &self,
        id: &MatchId,
        participant: ParticipantId,
        attribute: Attribute,
    ) -> Result<Match> {
        self.run(
            id,
            MatchCommand::ChooseAttribute {
                actor: participant,
                attribute,
            },
        )
        .await
    }

    /// Settles a revealed round and starts the next one (or ends the match).
    pub async fn advance(&self, id: &MatchId) -> Result<Match> {
        self.run(id, MatchCommand::AdvanceRound).await
    }

    pub async fn unchoose_card(&self, id: &MatchId, participant: ParticipantId) -> Result<Match> {
        self.run(id, MatchCommand::UnchooseCard { actor: participant })
            .await
    }

    /// Read, mutate a working copy, write back once. Nothing is written on
    /// error.
    pub(super) fn apply_duel(
        &self,
        current: Match,
        command: &MatchCommand,
        events: &mut Vec<MatchEvent>,
    ) -> Result<Match> {
        if command.is_classic_only() {
            return Err(SessionError::InvalidVariant(current.id));
        }

        let env = self.env(self.clock.now());
        let mut working = current;
        let transition = {
            let mut rng = self.rng();
            self.step(&mut working, command, env, &mut rng)?
        };
        if transition.changed() {
            self.repository.update(&working)?;
            debug!(match_id = %working.id, stage = ?working.stage, "duel record written");
        }
        events.extend(event_for(transition, &working));
        Ok(working)
    }
}
