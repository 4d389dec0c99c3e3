//! In-memory [`MatchRepository`] for tests and single-process deployments.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::{Match, MatchId};

use crate::repository::{MatchRecord, MatchRepository, RepositoryError, Result};

/// Durable-store stand-in that keeps [`MatchRecord`] rows in a map.
///
/// Rows go through the same record conversion as the file store, so
/// round-trip bugs surface without touching disk.
#[derive(Default)]
pub struct InMemoryMatchRepository {
    records: RwLock<BTreeMap<String, MatchRecord>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchRepository for InMemoryMatchRepository {
    fn create(&self, state: &Match) -> Result<()> {
        let record = MatchRecord::try_from(state)?;
        let mut records = self.records.write().map_err(|_| RepositoryError::LockPoisoned)?;
        if records.contains_key(&record.id) {
            return Err(RepositoryError::AlreadyExists(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(&self, state: &Match) -> Result<()> {
        let record = MatchRecord::try_from(state)?;
        let mut records = self.records.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::Missing(record.id)),
        }
    }

    fn find(&self, id: &MatchId) -> Result<Option<Match>> {
        let records = self.records.read().map_err(|_| RepositoryError::LockPoisoned)?;
        records
            .get(id.as_str())
            .cloned()
            .map(Match::try_from)
            .transpose()
    }

    fn list(&self) -> Result<Vec<Match>> {
        let records = self.records.read().map_err(|_| RepositoryError::LockPoisoned)?;
        records.values().cloned().map(Match::try_from).collect()
    }
}
