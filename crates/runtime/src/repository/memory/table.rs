//! Volatile table of live Classic matches.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::{Match, MatchId};

use crate::repository::{RepositoryError, Result};

/// Process-local match table indexed by match id.
///
/// Owned by the orchestrator; entries are removed when a match finishes or
/// idles out.
#[derive(Default)]
pub struct InMemoryMatchTable {
    matches: RwLock<HashMap<MatchId, Match>>,
}

impl InMemoryMatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new match. Fails if the id is already present.
    pub fn insert(&self, state: Match) -> Result<()> {
        let mut matches = self.matches.write().map_err(|_| RepositoryError::LockPoisoned)?;
        if matches.contains_key(&state.id) {
            return Err(RepositoryError::AlreadyExists(state.id.to_string()));
        }
        matches.insert(state.id.clone(), state);
        Ok(())
    }

    pub fn get(&self, id: &MatchId) -> Result<Option<Match>> {
        let matches = self.matches.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.get(id).cloned())
    }

    /// Overwrites an existing entry with `state`.
    pub fn replace(&self, state: Match) -> Result<()> {
        let mut matches = self.matches.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match matches.get_mut(&state.id) {
            Some(slot) => {
                *slot = state;
                Ok(())
            }
            None => Err(RepositoryError::Missing(state.id.to_string())),
        }
    }

    pub fn remove(&self, id: &MatchId) -> Result<Option<Match>> {
        let mut matches = self.matches.write().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.remove(id))
    }

    pub fn list(&self) -> Result<Vec<Match>> {
        let matches = self.matches.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.values().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.matches.read().map(|matches| matches.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
