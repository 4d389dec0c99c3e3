//! Outputs returned by [`SessionOrchestrator::dispatch`](crate::SessionOrchestrator::dispatch).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::{CardDefinition, DuelStage, Match, MatchId, ParticipantId, Variant};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum SessionResponse {
    /// Full post-action snapshot.
    Match(Box<Match>),
    Result(MatchResult),
    Active(Vec<MatchSummary>),
    Expired(ExpiryReport),
    Stats(ParticipantStats),
    Catalog(Vec<CardDefinition>),
    Card(CardDefinition),
}

/// Narrow view of a match outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Participant id, `"DRAW"`, or `None` while live or after an abandoned match.
    pub winner: Option<String>,
    pub log: Vec<String>,
}

impl From<&Match> for MatchResult {
    fn from(state: &Match) -> Self {
        Self {
            winner: state.winner.as_ref().map(ToString::to_string),
            log: state.log.clone(),
        }
    }
}

/// One row of the active-match listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: MatchId,
    pub variant: Variant,
    pub players: [ParticipantId; 2],
    pub turn: u32,
    pub stage: Option<DuelStage>,
    pub last_activity: DateTime<Utc>,
}

impl From<&Match> for MatchSummary {
    fn from(state: &Match) -> Self {
        let [a, b] = state.players();
        Self {
            id: state.id.clone(),
            variant: state.variant,
            players: [a.clone(), b.clone()],
            turn: state.turn,
            stage: state.stage,
            last_activity: state.last_activity,
        }
    }
}

/// Matches reclaimed by one expiry sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryReport {
    /// Classic matches dropped from memory.
    pub classic: Vec<MatchId>,
    /// Duel matches forced to `RESOLVED`.
    pub duel: Vec<MatchId>,
}

impl ExpiryReport {
    pub fn total(&self) -> usize {
        self.classic.len() + self.duel.len()
    }
}

/// Aggregate results over a participant's finished matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    pub participant_id: ParticipantId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
}
