//! Classic store policy: volatile while live, archived once finished.

use tracing::{info, warn};

use game_core::{CardCode, Match, MatchCommand, MatchId, ParticipantId, Transition};

use super::{SessionOrchestrator, event_for};
use crate::api::Result;
use crate::events::MatchEvent;

impl SessionOrchestrator {
    /// Plays `card` for `participant`, after force-resolving a stale turn.
    pub async fn play_card(
        &self,
        id: &MatchId,
        participant: ParticipantId,
        card: CardCode,
    ) -> Result<Match> {
        self.run(
            id,
            MatchCommand::PlayCard {
                actor: participant,
                card,
            },
        )
        .await
    }

    /// Passes the turn of `participant`, after force-resolving a stale turn.
    pub async fn skip_turn(&self, id: &MatchId, participant: ParticipantId) -> Result<Match> {
        self.run(id, MatchCommand::SkipTurn { actor: participant })
            .await
    }

    pub(super) fn apply_classic(
        &self,
        current: Match,
        command: &MatchCommand,
        events: &mut Vec<MatchEvent>,
    ) -> Result<Match> {
        if command.is_duel_only() {
            return Ok(current);
        }

        let env = self.env(self.clock.now());
        let (staged, enforced, attempt) = {
            let mut rng = self.rng();

            let mut staged = current;
            let enforced = if command.is_classic_only() {
                let transition =
                    self.step(&mut staged, &MatchCommand::EnforceDeadline, env, &mut rng)?;
                if transition.changed() {
                    warn!(match_id = %staged.id, turn = staged.turn, "turn deadline elapsed, forced a move");
                }
                transition
            } else {
                Transition::Unchanged
            };

            // A stale turn that ended the match leaves nothing to do.
            let attempt = (!enforced.finished()).then(|| {
                let mut working = staged.clone();
                self.step(&mut working, command, env, &mut rng)
                    .map(|transition| (working, transition))
            });
            (staged, enforced, attempt)
        };

        match attempt {
            None => {
                self.commit_classic(&staged, enforced, events)?;
                Ok(staged)
            }
            Some(Ok((working, transition))) => {
                self.commit_classic(&working, enforced.then(transition), events)?;
                Ok(working)
            }
            Some(Err(error)) => {
                // Forced moves stand even when the caller's request is rejected.
                self.commit_classic(&staged, enforced, events)?;
                Err(error)
            }
        }
    }

    fn commit_classic(
        &self,
        state: &Match,
        transition: Transition,
        events: &mut Vec<MatchEvent>,
    ) -> Result<()> {
        match transition {
            Transition::Unchanged => return Ok(()),
            Transition::Updated => self.table.replace(state.clone())?,
            Transition::Finished => {
                self.repository.create(state)?;
                self.table.remove(&state.id)?;
                info!(match_id = %state.id, turn = state.turn, "classic match archived");
            }
        }
        events.extend(event_for(transition, state));
        Ok(())
    }
}
