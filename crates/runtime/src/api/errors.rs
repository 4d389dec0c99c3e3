//! Unified error types surfaced by the session API.
//!
//! Wraps failures from the engines, repositories and hook cascades so
//! transports can map them onto one taxonomy via [`SessionError::kind`].
use thiserror::Error;

use game_core::{ErrorKind, MatchError, MatchId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("match {0} does not accept this action's variant")]
    InvalidVariant(MatchId),

    #[error("match {0} is already resolved")]
    AlreadyResolved(MatchId),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("hook cascade exceeded maximum depth of {max_depth}")]
    HookDepthExceeded { max_depth: usize },

    #[error("card catalog error: {0}")]
    Catalog(String),
}

impl SessionError {
    /// Taxonomy bucket, or `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::MatchNotFound(_) => Some(ErrorKind::NotFound),
            SessionError::InvalidVariant(_) => Some(ErrorKind::InvalidVariant),
            SessionError::AlreadyResolved(_) => Some(ErrorKind::AlreadyResolved),
            SessionError::Match(error) => Some(error.kind()),
            SessionError::Repository(_)
            | SessionError::HookDepthExceeded { .. }
            | SessionError::Catalog(_) => None,
        }
    }

    /// Stable error code for wire responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::MatchNotFound(_) => "SESSION_MATCH_NOT_FOUND",
            SessionError::InvalidVariant(_) => "SESSION_INVALID_VARIANT",
            SessionError::AlreadyResolved(_) => "SESSION_ALREADY_RESOLVED",
            SessionError::Match(error) => error.error_code(),
            SessionError::Repository(_) => "SESSION_STORAGE",
            SessionError::HookDepthExceeded { .. } => "SESSION_HOOK_DEPTH",
            SessionError::Catalog(_) => "SESSION_CATALOG",
        }
    }
}
