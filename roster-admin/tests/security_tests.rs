//! Security tests for roster-admin
//!
//! Protected routes must reject every request without a valid admin token,
//! and request bodies are bounded.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use roster_admin::{build_router, AppState};
use roster_common::api::AuthGate;
use roster_common::db::{init_schema, SqliteRecordStore};
use roster_common::import::{RecordValidator, ValidationRules};
use tower::util::ServiceExt; // for `oneshot` method

const SECRET: &str = "test-secret";

async fn setup_app(max_body_bytes: usize) -> Router {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();

    let state = AppState::new(
        Arc::new(SqliteRecordStore::new(pool)),
        AuthGate::new("admin", "pw", SECRET, 3600),
        RecordValidator::new(&ValidationRules::default()).unwrap(),
    )
    .with_max_body_bytes(max_body_bytes);
    build_router(state)
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn delete_request(authorization: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/records/delete")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(r#"{"ids": ["00000000-0000-0000-0000-000000000000"]}"#))
        .unwrap()
}

async fn status_of(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

// =============================================================================
// Token Tests
// =============================================================================

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = setup_app(1024).await;
    assert_eq!(status_of(&app, delete_request(None)).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthorized() {
    let app = setup_app(1024).await;
    let token = AuthGate::new("admin", "pw", SECRET, 3600).issue_at("admin", now());

    let request = delete_request(Some(format!("Basic {}", token.as_str())));
    assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);

    let request = delete_request(Some("Bearer ".to_string()));
    assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_is_accepted() {
    let app = setup_app(1024).await;
    let token = AuthGate::new("admin", "pw", SECRET, 3600).issue_at("admin", now());

    let request = delete_request(Some(format!("Bearer {}", token.as_str())));
    assert_eq!(status_of(&app, request).await, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = setup_app(1024).await;
    let token = AuthGate::new("admin", "pw", SECRET, 3600).issue_at("admin", now() - 7200);

    let request = delete_request(Some(format!("Bearer {}", token.as_str())));
    assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = setup_app(1024).await;
    let token = AuthGate::new("admin", "pw", "another-secret", 3600).issue_at("admin", now());

    let request = delete_request(Some(format!("Bearer {}", token.as_str())));
    assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = setup_app(1024).await;
    let request = delete_request(Some("Bearer not.a-token".to_string()));
    assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_every_protected_route_requires_token() {
    let app = setup_app(1024).await;

    for uri in ["/api/records", "/api/records/batch", "/api/records/batch/validate", "/api/records/delete"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from("{}"))
            .unwrap();
        assert_eq!(status_of(&app, request).await, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = setup_app(1024).await;

    for uri in ["/health", "/api/records", "/api/records/options", "/api/stats", "/api/buildinfo"] {
        let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, request).await, StatusCode::OK, "{uri}");
    }
}

// =============================================================================
// Body Limit Tests
// =============================================================================

#[tokio::test]
async fn test_oversized_batch_is_rejected() {
    let app = setup_app(256).await;
    let token = AuthGate::new("admin", "pw", SECRET, 3600).issue_at("admin", now());

    let request = Request::builder()
        .method("POST")
        .uri("/api/records/batch/validate")
        .header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()))
        .body(Body::from("x".repeat(4096)))
        .unwrap();
    assert_eq!(status_of(&app, request).await, StatusCode::PAYLOAD_TOO_LARGE);
}
