//! Router-level tests exercising routing, CORS, the request-id middleware,
//! and payload validation without a live database.
//!
//! The pool is built with `connect_lazy`, so no connection is attempted
//! until a handler actually queries it; these tests stay on paths that
//! never do.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ob_server::api::{AppState, create_router};
use olympic_bracket::bracket::BracketManager;
use sqlx::postgres::PgPoolOptions;
use tower::util::ServiceExt;

fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost/bracket_test")
        .expect("lazy pool never fails to build");
    let pool = Arc::new(pool);

    AppState {
        brackets: Arc::new(BracketManager::new(pool.clone())),
        pool,
    }
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-id-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "test-id-123");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/v1/tournaments")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn create_tournament_rejects_malformed_body() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tournaments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": 42}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum's Json extractor rejects the payload before any handler runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(!body.is_empty());
}
