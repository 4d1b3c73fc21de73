//! Bracket error types.

use thiserror::Error;

use super::models::{MatchId, ParticipantId, TournamentId};

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// A bracket needs at least one pairing
    #[error("Roster too small: need at least 2 participants, got {count}")]
    InvalidRoster { count: usize },

    /// Referenced tournament does not exist
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Referenced match does not exist
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Reported winner is not one of the match's participants
    #[error("Participant {winner_id} is not playing in match {match_id}")]
    InvalidWinner {
        match_id: MatchId,
        winner_id: ParticipantId,
    },

    /// A result was already recorded for this match
    #[error("Match {0} is already completed")]
    AlreadyCompleted(MatchId),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type BracketResult<T> = Result<T, BracketError>;
