//! Data models for tournaments, participants, and bracket matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = i64;

/// Participant ID type
pub type ParticipantId = i64;

/// Match ID type
pub type MatchId = i64;

/// Display value substituted for an empty round-1 slot.
pub const BYE: &str = "BYE";

/// Tournament lifecycle status.
///
/// Tournaments are created `Pending`; no further transitions are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Pending,
}

impl TournamentStatus {
    /// Storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }

    /// Parse a stored status string. Unknown values fall back to `Pending`.
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            _ => Self::Pending,
        }
    }
}

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Awaiting a result
    Pending,
    /// Result recorded, winner advanced
    Completed,
}

impl MatchStatus {
    /// Storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parse a stored status string. Unknown values fall back to `Pending`.
    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

/// One of the two participant positions within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    First,
    Second,
}

/// A single-elimination tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub weight_category: String,
    pub age_category: String,
    pub total_participants: i32,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

/// A tournament entrant. The seed number is its 1-based roster position at
/// tournament creation and determines round-1 pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub seed_number: i32,
    pub weight_category: String,
    pub age_category: String,
}

/// One bracket match.
///
/// `None` participant slots mean "not yet decided" in rounds 2 and later, and
/// "bye" in round 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round_number: i32,
    pub match_number: i32,
    pub participant1_id: Option<ParticipantId>,
    pub participant2_id: Option<ParticipantId>,
    pub winner_id: Option<ParticipantId>,
    pub score: Option<String>,
    pub status: MatchStatus,
}

/// Creation input for a tournament. Roster order is seed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub weight_category: String,
    pub age_category: String,
    pub participants: Vec<String>,
}

/// Round-1 snapshot returned from bracket creation, with [`BYE`] standing in
/// for an empty slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededMatch {
    pub id: MatchId,
    pub round_number: i32,
    pub match_number: i32,
    pub participant1: String,
    pub participant2: String,
}

/// Result of creating a tournament and its full bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedBracket {
    pub tournament_id: TournamentId,
    pub matches: Vec<SeededMatch>,
}

/// Name-joined display row for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub round_number: i32,
    pub match_number: i32,
    pub participant1: Option<String>,
    pub participant2: Option<String>,
    pub winner: Option<String>,
    pub score: Option<String>,
    pub status: MatchStatus,
}

/// A tournament together with its bracket in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentBracket {
    pub tournament: Tournament,
    pub matches: Vec<MatchView>,
}

/// Where a winner was placed by advancement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRef {
    pub match_id: MatchId,
    pub round_number: i32,
    pub match_number: i32,
    pub slot: Slot,
}

/// Result of reporting a match result.
///
/// `advanced_to` is `None` when the reported match was the final: there is no
/// next round to advance into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    pub tournament_id: TournamentId,
    pub round_number: i32,
    pub match_number: i32,
    pub winner_id: ParticipantId,
    pub advanced_to: Option<SlotRef>,
}
