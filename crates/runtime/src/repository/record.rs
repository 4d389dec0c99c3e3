//! Durable row shape of a match.
//!
//! [`MatchRecord`] is the only place where the strongly typed [`Match`] meets
//! the persisted form: participant-keyed maps, the duel center as a JSON
//! column and the winner as a plain string.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use game_core::{
    CardCode, DuelCenter, DuelStage, Match, MatchId, Outcome, ParticipantId, Seat, Variant,
};
use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, Result};

/// Persisted representation of a [`Match`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub variant: Variant,
    pub players: [String; 2],
    pub turn: u32,
    /// Classic only; empty for Duel rows.
    #[serde(default)]
    pub hp: BTreeMap<String, u32>,
    pub hands: BTreeMap<String, Vec<String>>,
    pub decks: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub discards: BTreeMap<String, Vec<String>>,
    pub log: Vec<String>,
    /// Participant id, `"DRAW"`, or unset.
    pub winner: Option<String>,
    pub stage: Option<DuelStage>,
    pub duel_center: Option<serde_json::Value>,
    pub last_activity: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}

impl MatchRecord {
    /// Mirrors [`Match::is_finished`] without decoding the row.
    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.stage == Some(DuelStage::Resolved)
    }

    pub fn involves(&self, participant: &ParticipantId) -> bool {
        self.players.iter().any(|id| id == participant.as_str())
    }
}

fn codes_to_strings(codes: &[CardCode]) -> Vec<String> {
    codes.iter().map(|code| code.as_str().to_string()).collect()
}

fn strings_to_codes(values: &[String]) -> Vec<CardCode> {
    values.iter().map(|value| CardCode::new(value.as_str())).collect()
}

impl TryFrom<&Match> for MatchRecord {
    type Error = RepositoryError;

    fn try_from(state: &Match) -> Result<Self> {
        let players = [
            state.seats[0].participant.as_str().to_string(),
            state.seats[1].participant.as_str().to_string(),
        ];
        let by_player = |pick: fn(&Seat) -> &[CardCode]| -> BTreeMap<String, Vec<String>> {
            state
                .seats
                .iter()
                .map(|seat| (seat.participant.as_str().to_string(), codes_to_strings(pick(seat))))
                .collect()
        };

        let hp = match state.variant {
            Variant::Classic => state
                .seats
                .iter()
                .map(|seat| (seat.participant.as_str().to_string(), seat.hp))
                .collect(),
            Variant::AttributeDuel => BTreeMap::new(),
        };
        let discards = match state.variant {
            Variant::Classic => BTreeMap::new(),
            Variant::AttributeDuel => by_player(|seat| seat.discard.as_slice()),
        };
        let duel_center = state
            .center
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        Ok(Self {
            id: state.id.as_str().to_string(),
            variant: state.variant,
            players,
            turn: state.turn,
            hp,
            hands: by_player(|seat| seat.hand.as_slice()),
            decks: by_player(|seat| seat.deck.as_slice()),
            discards,
            log: state.log.clone(),
            winner: state.winner.as_ref().map(ToString::to_string),
            stage: state.stage,
            duel_center,
            last_activity: state.last_activity,
            deadline: state.deadline,
        })
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = RepositoryError;

    fn try_from(record: MatchRecord) -> Result<Self> {
        let [a, b] = record.players.clone();
        let seat = |participant: String| -> Result<Seat> {
            let hand = record.hands.get(&participant).ok_or_else(|| {
                RepositoryError::CorruptedData(format!(
                    "match {} has no hand for {participant}",
                    record.id
                ))
            })?;
            let deck = record.decks.get(&participant).map(Vec::as_slice).unwrap_or_default();
            let discard = record
                .discards
                .get(&participant)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let mut seat = Seat::new(ParticipantId::new(participant.as_str()));
            seat.hp = record.hp.get(&participant).copied().unwrap_or_default();
            seat.hand = strings_to_codes(hand);
            seat.deck = strings_to_codes(deck);
            seat.discard = strings_to_codes(discard);
            Ok(seat)
        };
        let seats = [seat(a)?, seat(b)?];

        let winner = match record.winner.as_deref() {
            None => None,
            Some(Outcome::DRAW) => Some(Outcome::Draw),
            Some(id) if record.players.iter().any(|player| player == id) => {
                Some(Outcome::Winner(ParticipantId::new(id)))
            }
            Some(id) => {
                return Err(RepositoryError::CorruptedData(format!(
                    "match {} names non-participant winner {id}",
                    record.id
                )));
            }
        };

        let center: Option<DuelCenter> = record
            .duel_center
            .map(serde_json::from_value)
            .transpose()?;

        Ok(Match {
            id: MatchId::new(record.id),
            variant: record.variant,
            seats,
            turn: record.turn,
            log: record.log,
            winner,
            last_activity: record.last_activity,
            deadline: record.deadline,
            stage: record.stage,
            center,
        })
    }
}
