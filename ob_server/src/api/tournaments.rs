//! Tournament API handlers: creation, listing, and bracket display.
//!
//! Creating a tournament takes the full roster in seed order and returns the
//! seeded round-1 matches, with `"BYE"` marking slots padded past the roster:
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/tournaments \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "City Open", "weight_category": "-73kg",
//!        "age_category": "Seniors",
//!        "participants": ["Aliev", "Borisov", "Ganiev", "Drozdov", "Eliseev"]}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use olympic_bracket::bracket::{
    CreatedBracket, NewTournament, SeededMatch, Tournament, TournamentBracket, TournamentId,
};
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse, error_response};

/// Default and maximum page size for tournament listings.
const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub weight_category: String,
    pub age_category: String,
    /// Roster in seed order.
    pub participants: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTournamentResponse {
    pub tournament_id: TournamentId,
    pub matches: Vec<SeededMatch>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TournamentListResponse {
    pub tournaments: Vec<Tournament>,
}

/// Create a tournament with its roster and full bracket.
///
/// Returns `201 Created` with the tournament id and the seeded round-1
/// matches. Rosters with fewer than two participants are rejected with
/// `400 Bad Request`.
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<CreateTournamentResponse>), (StatusCode, Json<ErrorResponse>)> {
    let CreatedBracket {
        tournament_id,
        matches,
    } = state
        .brackets
        .create_tournament(NewTournament {
            name: request.name,
            weight_category: request.weight_category,
            age_category: request.age_category,
            participants: request.participants,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTournamentResponse {
            tournament_id,
            matches,
        }),
    ))
}

/// List tournaments, newest first.
///
/// `?limit=N` caps the page; the default and upper bound is 50.
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TournamentListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, DEFAULT_LIST_LIMIT);

    let tournaments = state
        .brackets
        .list_tournaments(limit)
        .await
        .map_err(error_response)?;

    Ok(Json(TournamentListResponse { tournaments }))
}

/// Get one tournament with its bracket in display order.
///
/// Match rows carry participant names joined in; empty slots are `null`.
/// Returns `404 Not Found` for an unknown tournament.
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<TournamentBracket>, (StatusCode, Json<ErrorResponse>)> {
    let bracket = state
        .brackets
        .tournament_bracket(tournament_id)
        .await
        .map_err(error_response)?;

    Ok(Json(bracket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes() {
        let body = r#"{
            "name": "City Open",
            "weight_category": "-73kg",
            "age_category": "Seniors",
            "participants": ["Aliev", "Borisov"]
        }"#;

        let request: CreateTournamentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.name, "City Open");
        assert_eq!(request.participants.len(), 2);
    }

    #[test]
    fn create_request_requires_roster() {
        let body = r#"{"name": "City Open", "weight_category": "-73kg", "age_category": "Seniors"}"#;
        assert!(serde_json::from_str::<CreateTournamentRequest>(body).is_err());
    }

    #[test]
    fn list_query_limit_is_optional() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, None);

        let query: ListQuery = serde_json::from_str(r#"{"limit": 10}"#).unwrap();
        assert_eq!(query.limit, Some(10));
    }
}
