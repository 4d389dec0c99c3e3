//! Match creation, termination and the idle sweep.

use tracing::info;
use uuid::Uuid;

use game_core::{Match, MatchCommand, MatchId, ParticipantId, Variant, new_match};

use super::SessionOrchestrator;
use crate::api::{ExpiryReport, Result};
use crate::events::{MatchEvent, MatchEventKind};

impl SessionOrchestrator {
    /// Deals a new match. Without `opponent` the bot takes the second seat.
    pub async fn start(
        &self,
        participant: ParticipantId,
        variant: Variant,
        opponent: Option<ParticipantId>,
    ) -> Result<Match> {
        let id = MatchId::new(Uuid::new_v4().to_string());
        let players = [participant, opponent.unwrap_or_else(ParticipantId::bot)];

        let mut events = Vec::new();
        let result = {
            let _guard = self.locks.acquire(&id).await;
            self.start_locked(id.clone(), players, variant, &mut events)
        };
        self.publish_all(events).await;
        result
    }

    fn start_locked(
        &self,
        id: MatchId,
        players: [ParticipantId; 2],
        variant: Variant,
        events: &mut Vec<MatchEvent>,
    ) -> Result<Match> {
        let env = self.env(self.clock.now());
        let (state, opened) = {
            let mut rng = self.rng();
            let mut state = new_match(id, players, variant, &env, &mut *rng)?;
            let opened = self.hooks.run(&mut state, env, &mut *rng)?;
            (state, opened)
        };

        match variant {
            Variant::Classic if opened.finished() => self.repository.create(&state)?,
            Variant::Classic => self.table.insert(state.clone())?,
            Variant::AttributeDuel => self.repository.create(&state)?,
        }

        let [a, b] = state.players();
        info!(match_id = %state.id, %variant, player_a = %a, player_b = %b, "match started");

        events.push(MatchEvent::new(MatchEventKind::Started, state.clone()));
        Ok(state)
    }

    /// Concedes on behalf of `participant`; the opponent wins.
    pub async fn surrender(&self, id: &MatchId, participant: ParticipantId) -> Result<Match> {
        self.run(id, MatchCommand::Surrender { actor: participant })
            .await
    }

    /// Ends a live match without a winner.
    pub async fn end(&self, id: &MatchId) -> Result<Match> {
        self.run(id, MatchCommand::Abandon).await
    }

    /// Reclaims idle matches.
    ///
    /// Classic matches idle past the Classic window are dropped from memory
    /// without archiving. Duel matches idle past the Duel window are resolved
    /// without a winner.
    pub async fn expire(&self) -> Result<ExpiryReport> {
        let now = self.clock.now();
        let mut report = ExpiryReport::default();
        let mut events = Vec::new();

        let classic_idle = self.config.classic_idle();
        for candidate in self.table.list()? {
            if now - candidate.last_activity < classic_idle {
                continue;
            }
            let _guard = self.locks.acquire(&candidate.id).await;
            if let Some(current) = self.table.get(&candidate.id)?
                && now - current.last_activity >= classic_idle
            {
                self.table.remove(&current.id)?;
                info!(match_id = %current.id, "idle classic match dropped");
                report.classic.push(current.id.clone());
                events.push(MatchEvent::new(MatchEventKind::Expired, current));
            }
        }

        let expire = MatchCommand::ExpireIdle {
            window: self.config.duel_idle(),
        };
        for candidate in self.repository.find_active()? {
            let _guard = self.locks.acquire(&candidate.id).await;
            let Some(mut current) = self.repository.find(&candidate.id)? else {
                continue;
            };
            let expired = {
                let mut rng = self.rng();
                expire
                    .apply(&mut current, self.env(now), &mut *rng)
                    .map_err(|error| super::lift(&current.id, error))?
            };
            if expired.changed() {
                self.repository.update(&current)?;
                info!(match_id = %current.id, "idle duel match resolved");
                report.duel.push(current.id.clone());
                events.push(MatchEvent::new(MatchEventKind::Expired, current));
            }
        }

        self.publish_all(events).await;
        self.locks.prune();

        if report.total() > 0 {
            info!(
                classic = report.classic.len(),
                duel = report.duel.len(),
                "expiry sweep finished"
            );
        }
        Ok(report)
    }
}
