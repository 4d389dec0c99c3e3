//! Event payloads published after completed actions.

use game_core::{Match, MatchId};
use serde::{Deserialize, Serialize};

/// What kind of change produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchEventKind {
    Started,
    Updated,
    Finished,
    /// Dropped or resolved by the idle sweep.
    Expired,
}

/// Post-action snapshot of one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub match_id: MatchId,
    pub kind: MatchEventKind,
    pub snapshot: Box<Match>,
}

impl MatchEvent {
    pub fn new(kind: MatchEventKind, snapshot: Match) -> Self {
        Self {
            match_id: snapshot.id.clone(),
            kind,
            snapshot: Box::new(snapshot),
        }
    }
}
