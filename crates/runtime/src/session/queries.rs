//! Read-only queries across both stores and the catalog.

use game_core::{CardCode, CardDefinition, Match, MatchError, MatchId, Outcome, ParticipantId};

use super::{Located, SessionOrchestrator};
use crate::api::{MatchResult, MatchSummary, ParticipantStats, Result};

impl SessionOrchestrator {
    /// Current snapshot, from whichever store holds the match.
    pub fn get_state(&self, id: &MatchId) -> Result<Match> {
        match self.locate(id)? {
            Located::Live(state) | Located::Stored(state) => Ok(state),
        }
    }

    pub fn get_result(&self, id: &MatchId) -> Result<MatchResult> {
        self.get_state(id).map(|state| MatchResult::from(&state))
    }

    /// Live Classic matches plus unfinished Duel rows, oldest activity first.
    pub fn list_active(&self, participant: Option<&ParticipantId>) -> Result<Vec<MatchSummary>> {
        let durable = self.repository.find_active()?;

        let mut active: Vec<Match> = self
            .table
            .list()?
            .into_iter()
            .chain(durable)
            .filter(|state| participant.is_none_or(|id| state.has_participant(id)))
            .collect();
        active.sort_by(|a, b| a.last_activity.cmp(&b.last_activity));

        Ok(active.iter().map(MatchSummary::from).collect())
    }

    /// Played, won, drawn and lost counts over the participant's decided
    /// matches. Matches that ended without a winner are not counted.
    pub fn stats(&self, participant: &ParticipantId) -> Result<ParticipantStats> {
        let mut stats = ParticipantStats {
            participant_id: participant.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
        };

        for state in self.repository.find_by_participant(participant)? {
            match &state.winner {
                Some(Outcome::Winner(winner)) if winner == participant => stats.won += 1,
                Some(Outcome::Winner(_)) => stats.lost += 1,
                Some(Outcome::Draw) => stats.drawn += 1,
                None => continue,
            }
            stats.played += 1;
        }
        Ok(stats)
    }

    pub fn list_cards(&self) -> Vec<CardDefinition> {
        self.cards.lookup_many(&self.cards.codes())
    }

    pub fn get_card(&self, code: &CardCode) -> Result<CardDefinition> {
        self.cards
            .lookup(code)
            .ok_or_else(|| MatchError::UnknownCard(code.clone()).into())
    }
}
