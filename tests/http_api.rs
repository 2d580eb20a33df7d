//! HTTP API Tests
//!
//! Drives the full router (CORS, token check, handlers, error translation)
//! with in-process requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlgate::api::ErrorTranslator;
use sqlgate::gateway::{Gateway, Persistence};
use sqlgate::http_server::{build_router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

const TOKEN: &str = "test-token";

// =============================================================================
// Test Utilities
// =============================================================================

fn create_app(temp_dir: &TempDir, initialize: bool) -> (Router, Arc<Gateway>) {
    let gateway = Arc::new(Gateway::new(Persistence::new(temp_dir.path().join("app.db"))));
    if initialize {
        gateway.initialize().unwrap();
    }
    let state = AppState::new(Arc::clone(&gateway), TOKEN, ErrorTranslator::new(false));
    (build_router(state), gateway)
}

fn post_query(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/json")
        .header("x-api-token", TOKEN)
        .body(Body::from(body.into()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn sql(router: &Router, sql: &str) -> (StatusCode, Value) {
    send(router, post_query(json!({ "sql": sql }).to_string())).await
}

// =============================================================================
// Liveness and health
// =============================================================================

#[tokio::test]
async fn test_root_liveness() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = send(&router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let temp_dir = TempDir::new().unwrap();
    let (router, gateway) = create_app(&temp_dir, false);

    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "not initialized"}));

    gateway.initialize().unwrap();
    let (_, body) = send(&router, get("/health")).await;
    assert_eq!(body["database"], "initialized");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let request = Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"sql": "SELECT 1"}"#))
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication Error");
}

#[tokio::test]
async fn test_wrong_token_is_rejected_everywhere() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    for uri in ["/", "/health"] {
        let request = Request::builder()
            .uri(uri)
            .header("authorization", "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Authentication Error");
    }
}

#[tokio::test]
async fn test_rejected_request_never_reaches_store() {
    let temp_dir = TempDir::new().unwrap();
    let (router, gateway) = create_app(&temp_dir, true);

    let request = Request::builder()
        .method("POST")
        .uri("/query")
        .header("x-api-token", "wrong")
        .body(Body::from(r#"{"sql": "CREATE TABLE t (id INTEGER)"}"#))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!gateway.persistence().exists());
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_sql_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = send(&router, post_query("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "SQL query is required");
}

#[tokio::test]
async fn test_non_string_sql_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = send(&router, post_query(r#"{"sql": 123}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "SQL query must be a string");
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = send(&router, post_query("{\"sql\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
}

#[tokio::test]
async fn test_form_encoded_body() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let form = |body: &'static str| {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("x-api-token", TOKEN)
            .body(Body::from(body))
            .unwrap()
    };

    let (status, body) = send(&router, form("sql=CREATE+TABLE+t+%28id+INTEGER%29")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    send(&router, form("sql=INSERT+INTO+t+VALUES+(7)")).await;
    let (status, body) = send(&router, form("sql=SELECT+id+FROM+t")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 7}]));

    let (status, body) = send(&router, form("sql=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "SQL query is required");
}

// =============================================================================
// Execution
// =============================================================================

#[tokio::test]
async fn test_create_insert_select_flow() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = sql(&router, "CREATE TABLE t (id INTEGER)").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = sql(&router, "INSERT INTO t VALUES (1)").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = sql(&router, "SELECT * FROM t").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_zero_row_read_is_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    sql(&router, "CREATE TABLE t (id INTEGER)").await;
    let (status, body) = sql(&router, "  select * from t").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_engine_failure_is_database_error() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);

    let (status, body) = sql(&router, "SELECT * FROM missing").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Database query failed: "));
}

#[tokio::test]
async fn test_transaction_cannot_span_requests() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);
    sql(&router, "CREATE TABLE t (id INTEGER)").await;

    let (status, body) = sql(&router, "BEGIN").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error");

    sql(&router, "INSERT INTO t VALUES (1)").await;
    let (status, _) = sql(&router, "ROLLBACK").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = sql(&router, "SELECT id FROM t").await;
    assert_eq!(body, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_uninitialized_store_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, false);

    let (status, body) = sql(&router, "SELECT 1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Database Error");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_writes() {
    let temp_dir = TempDir::new().unwrap();
    let (router, _) = create_app(&temp_dir, true);
    sql(&router, "CREATE TABLE hits (n INTEGER)").await;

    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let router = router.clone();
            tokio::spawn(async move { sql(&router, &format!("INSERT INTO hits VALUES ({n})")).await })
        })
        .collect();
    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = sql(&router, "SELECT count(*) AS c, sum(n) AS s FROM hits").await;
    assert_eq!(body, json!([{"c": 16, "s": 120}]));
}
