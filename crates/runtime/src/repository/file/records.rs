//! File-based MatchRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::{Match, MatchId};

use crate::repository::{MatchRecord, MatchRepository, RepositoryError, Result};

/// File-based implementation of MatchRepository.
///
/// Stores one pretty-printed JSON [`MatchRecord`] per match as
/// `match_{id}.json`. Writes go to a temp file first and are renamed into
/// place, so a crash never leaves a half-written row.
pub struct FileMatchRepository {
    base_dir: PathBuf,
}

impl FileMatchRepository {
    /// Create a new file-based match repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a match file. `None` for ids that are not safe file
    /// name components.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.base_dir.join(format!("match_{}.json", id)))
    }

    fn write(&self, record: &MatchRecord) -> Result<()> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| RepositoryError::CorruptedData(format!("invalid match id {}", record.id)))?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved match[{}] to {}", record.id, path.display());

        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Match> {
        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        let record: MatchRecord = serde_json::from_slice(&bytes)?;
        Match::try_from(record)
    }
}

impl MatchRepository for FileMatchRepository {
    fn create(&self, state: &Match) -> Result<()> {
        if self
            .record_path(state.id.as_str())
            .is_some_and(|path| path.exists())
        {
            return Err(RepositoryError::AlreadyExists(state.id.to_string()));
        }
        self.write(&MatchRecord::try_from(state)?)
    }

    fn update(&self, state: &Match) -> Result<()> {
        if !self
            .record_path(state.id.as_str())
            .is_some_and(|path| path.exists())
        {
            return Err(RepositoryError::Missing(state.id.to_string()));
        }
        self.write(&MatchRecord::try_from(state)?)
    }

    fn find(&self, id: &MatchId) -> Result<Option<Match>> {
        let Some(path) = self.record_path(id.as_str()) else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let state = self.read(&path)?;
        tracing::debug!("Loaded match[{}] from {}", id, path.display());

        Ok(Some(state))
    }

    fn list(&self) -> Result<Vec<Match>> {
        let mut matches = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && filename.starts_with("match_")
                && filename.ends_with(".json")
            {
                matches.push(self.read(&path)?);
            }
        }

        matches.sort_by(|a, b| a.last_activity.cmp(&b.last_activity));
        Ok(matches)
    }
}
