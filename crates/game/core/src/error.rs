//! Error infrastructure for game-core.
//!
//! Engines only raise errors for failures that would threaten match
//! invariants (unknown cards, acting out of turn, playing a card that is not
//! in hand). Structural mismatches such as a Duel message arriving in the
//! wrong stage are not errors; the engines report them as
//! [`Transition::Unchanged`](crate::engine::Transition::Unchanged).

use crate::state::{CardCode, ParticipantId};

/// Coarse classification shared by every layer of the session stack.
///
/// Transports map these onto their own status codes (HTTP, socket acks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Unknown match or card.
    NotFound,
    /// Action sent to the engine of the other variant.
    InvalidVariant,
    /// Card absent from hand, acting out of turn.
    InvalidMove,
    /// Caller is not allowed to act on this match.
    Unauthorized,
    /// Action on a terminal match.
    AlreadyResolved,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidVariant => "invalid_variant",
            Self::InvalidMove => "invalid_move",
            Self::Unauthorized => "unauthorized",
            Self::AlreadyResolved => "already_resolved",
        }
    }
}

/// Errors raised by the match engines.
///
/// Every variant is raised before the engine mutates the match, so callers
/// never observe a partially applied move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    #[error("{actor} does not hold card \"{card}\"")]
    CardNotInHand { actor: ParticipantId, card: CardCode },

    #[error("it is not {actor}'s turn (waiting on {current})")]
    NotYourTurn {
        actor: ParticipantId,
        current: ParticipantId,
    },

    #[error("{0} is not a participant of this match")]
    NotAParticipant(ParticipantId),

    #[error("card \"{0}\" not found in catalog")]
    UnknownCard(CardCode),

    #[error("operation is not supported by this match variant")]
    WrongVariant,

    #[error("match already resolved")]
    AlreadyResolved,

    #[error("card catalog is empty")]
    EmptyCatalog,

    #[error("a participant cannot play against themselves ({0})")]
    SameParticipant(ParticipantId),

    #[error("participant id \"{0}\" is reserved")]
    ReservedParticipant(ParticipantId),
}

impl MatchError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        use MatchError::*;
        match self {
            CardNotInHand { .. }
            | NotYourTurn { .. }
            | SameParticipant(_)
            | ReservedParticipant(_) => ErrorKind::InvalidMove,
            NotAParticipant(_) => ErrorKind::Unauthorized,
            UnknownCard(_) | EmptyCatalog => ErrorKind::NotFound,
            WrongVariant => ErrorKind::InvalidVariant,
            AlreadyResolved => ErrorKind::AlreadyResolved,
        }
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        use MatchError::*;
        match self {
            CardNotInHand { .. } => "MATCH_CARD_NOT_IN_HAND",
            NotYourTurn { .. } => "MATCH_NOT_YOUR_TURN",
            NotAParticipant(_) => "MATCH_NOT_A_PARTICIPANT",
            UnknownCard(_) => "MATCH_UNKNOWN_CARD",
            WrongVariant => "MATCH_WRONG_VARIANT",
            AlreadyResolved => "MATCH_ALREADY_RESOLVED",
            EmptyCatalog => "MATCH_EMPTY_CATALOG",
            SameParticipant(_) => "MATCH_SAME_PARTICIPANT",
            ReservedParticipant(_) => "MATCH_RESERVED_PARTICIPANT",
        }
    }
}
