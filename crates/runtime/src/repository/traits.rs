//! Repository contracts for durable match storage.

use game_core::{Match, MatchId, ParticipantId, Variant};

use super::error::Result;

/// Durable match store.
///
/// Holds every Attribute Duel match from creation on, and every Classic match
/// once it has finished. Implementations convert through
/// [`MatchRecord`](super::MatchRecord) at the storage edge.
pub trait MatchRepository: Send + Sync {
    /// Insert a new match. Fails if the id is already stored.
    fn create(&self, state: &Match) -> Result<()>;

    /// Replace a stored match with `state`. Fails if the id is unknown.
    fn update(&self, state: &Match) -> Result<()>;

    /// Load a match by id.
    fn find(&self, id: &MatchId) -> Result<Option<Match>>;

    /// Every stored match.
    fn list(&self) -> Result<Vec<Match>>;

    /// Duel matches that have not finished yet.
    ///
    /// Classic rows are only written once the match is over, including
    /// matches ended without a winner, so they are never active here.
    fn find_active(&self) -> Result<Vec<Match>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|state| state.variant == Variant::AttributeDuel && !state.is_finished())
            .collect())
    }

    /// Stored matches the participant sits in, finished or not.
    fn find_by_participant(&self, participant: &ParticipantId) -> Result<Vec<Match>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|state| state.has_participant(participant))
            .collect())
    }
}
