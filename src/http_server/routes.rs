//! Gateway HTTP routes
//!
//! - `GET /` liveness marker
//! - `GET /health` process and database readiness
//! - `POST /query` execute SQL

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Form, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::{GatewayError, GatewayResult};
use crate::gateway::{QueryRequest, QueryResponse};

use super::auth::require_token;
use super::state::AppState;

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Create the gateway routes. Every route sits behind the token check.
pub fn gateway_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/query", post(query_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

async fn root_handler() -> impl IntoResponse {
    Json(MessageResponse {
        message: "sqlgate is running".to_string(),
    })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = if state.gateway.is_initialized() {
        "initialized"
    } else {
        "not initialized"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            database: database.to_string(),
        }),
    )
}

async fn query_handler(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match execute_query(&state, request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => state.translator.translate(&err, &method, &path),
    }
}

/// Validate the body, then run the gateway on the blocking pool as a single
/// unit of work so the store lock is never held across an await point.
async fn execute_query(state: &AppState, request: Request) -> GatewayResult<QueryResponse> {
    let request = read_query_request(request).await?;
    let gateway = Arc::clone(&state.gateway);

    tokio::task::spawn_blocking(move || gateway.handle(&request))
        .await
        .map_err(|e| GatewayError::unexpected(format!("Query task failed: {}", e)))?
}

/// Decode a url-encoded form when the client declares one, JSON otherwise
async fn read_query_request(request: Request) -> GatewayResult<QueryRequest> {
    if is_form(request.headers()) {
        let Form(fields) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| GatewayError::validation(format!("Invalid form body: {}", e)))?;
        return QueryRequest::from_form(fields);
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| GatewayError::validation(format!("Invalid request body: {}", e)))?;
    QueryRequest::parse(&body)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}
