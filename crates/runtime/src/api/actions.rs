//! Transport-agnostic action inputs.
//!
//! Every request a client can make is one [`SessionAction`]. The JSON form is
//! tagged by `"action"` with camelCase fields, e.g.
//! `{"action":"playCard","matchId":"…","participantId":"alice","cardCode":"fireball"}`.
use serde::{Deserialize, Serialize};

use game_core::{Attribute, CardCode, MatchId, ParticipantId, Variant};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionAction {
    /// Opens a match. Without `opponentId` the bot takes the second seat.
    Start {
        participant_id: ParticipantId,
        variant: Variant,
        #[serde(default)]
        opponent_id: Option<ParticipantId>,
    },
    PlayCard {
        match_id: MatchId,
        participant_id: ParticipantId,
        card_code: CardCode,
    },
    SkipTurn {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    ChooseCard {
        match_id: MatchId,
        participant_id: ParticipantId,
        card_code: CardCode,
    },
    ChooseAttribute {
        match_id: MatchId,
        participant_id: ParticipantId,
        attribute: Attribute,
    },
    Advance {
        match_id: MatchId,
    },
    UnchooseCard {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    Surrender {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    End {
        match_id: MatchId,
    },
    GetState {
        match_id: MatchId,
    },
    GetResult {
        match_id: MatchId,
    },
    ListActive {
        #[serde(default)]
        participant_id: Option<ParticipantId>,
    },
    Expire,
    Stats {
        participant_id: ParticipantId,
    },
    ListCards,
    GetCard {
        card_code: CardCode,
    },
}

impl SessionAction {
    /// Whether the action can change match state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            SessionAction::GetState { .. }
                | SessionAction::GetResult { .. }
                | SessionAction::ListActive { .. }
                | SessionAction::Stats { .. }
                | SessionAction::ListCards
                | SessionAction::GetCard { .. }
        )
    }
}
