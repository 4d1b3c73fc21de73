//! Match API handlers: result reporting and raw match listing.
//!
//! ```bash
//! curl -X PUT http://localhost:8080/api/v1/matches/17/result \
//!   -H "Content-Type: application/json" \
//!   -d '{"winner_id": 42, "score": "10:8"}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use olympic_bracket::bracket::{AdvanceOutcome, Match, MatchId, TournamentId};
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse, error_response};

#[derive(Debug, Deserialize)]
pub struct UpdateMatchResultRequest {
    pub winner_id: i64,
    pub score: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

/// Record a match result and advance the winner into the next round.
///
/// The result write and the next-round slot fill happen in one transaction.
/// Responds with the advance outcome; `advanced_to` is `null` when the
/// reported match was the final.
///
/// # Errors
///
/// - `400 Bad Request`: winner is not one of the match's participants
/// - `404 Not Found`: match does not exist
/// - `409 Conflict`: match already has a recorded result
pub async fn update_match_result(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Json(request): Json<UpdateMatchResultRequest>,
) -> Result<Json<AdvanceOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .brackets
        .report_result(match_id, request.winner_id, request.score)
        .await
        .map_err(error_response)?;

    Ok(Json(outcome))
}

/// Raw match rows for one tournament in bracket order.
pub async fn list_matches(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<MatchListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let matches = state
        .brackets
        .list_matches(tournament_id)
        .await
        .map_err(error_response)?;

    Ok(Json(MatchListResponse { matches }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_request_deserializes() {
        let request: UpdateMatchResultRequest =
            serde_json::from_str(r#"{"winner_id": 42, "score": "10:8"}"#).unwrap();
        assert_eq!(request.winner_id, 42);
        assert_eq!(request.score.as_deref(), Some("10:8"));
    }

    #[test]
    fn score_is_optional() {
        let request: UpdateMatchResultRequest =
            serde_json::from_str(r#"{"winner_id": 42}"#).unwrap();
        assert_eq!(request.score, None);
    }
}
