//! HTTP API for the bracket server.
//!
//! REST endpoints over the bracket manager:
//!
//! ```text
//! GET  /health                              - Health check
//! POST /api/v1/tournaments                  - Create tournament + bracket
//! GET  /api/v1/tournaments                  - List tournaments (newest first)
//! GET  /api/v1/tournaments/{id}             - Tournament with name-joined bracket
//! GET  /api/v1/tournaments/{id}/matches     - Raw match rows
//! PUT  /api/v1/matches/{id}/result          - Report result, advance winner
//! ```
//!
//! CORS is permissive: the API is consumed directly by a browser frontend.
//! Every request carries an `x-request-id` (generated when the client does
//! not send one) for log correlation.

pub mod matches;
pub mod request_id;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
};
use olympic_bracket::bracket::{BracketError, BracketManager};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; cheap due to the `Arc` wrappers.
#[derive(Clone)]
pub struct AppState {
    pub brackets: Arc<BracketManager>,
    pub pool: Arc<PgPool>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/tournaments/{tournament_id}",
            get(tournaments::get_tournament),
        )
        .route(
            "/tournaments/{tournament_id}/matches",
            get(matches::list_matches),
        )
        .route("/matches/{match_id}/result", put(matches::update_match_result));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JSON error body shared by all handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a bracket error onto an HTTP status and JSON body.
pub(crate) fn error_response(err: BracketError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        BracketError::InvalidRoster { .. } | BracketError::InvalidWinner { .. } => {
            StatusCode::BAD_REQUEST
        }
        BracketError::TournamentNotFound(_) | BracketError::MatchNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        BracketError::AlreadyCompleted(_) => StatusCode::CONFLICT,
        BracketError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers a trivial query, otherwise
/// `503 Service Unavailable`.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1").execute(&*state.pool).await.is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
