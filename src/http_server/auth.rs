//! Shared-secret authentication middleware
//!
//! Every request must carry the configured token, either as the second part
//! of the `Authorization` header (`Bearer <token>`) or in `x-api-token`.
//! The Authorization header wins when both are present.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::api::GatewayError;

use super::state::AppState;

/// Header carrying the raw token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Reject requests that do not present the configured token
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = presented_token(request.headers())
        .map(|token| token_matches(token, state.api_token()))
        .unwrap_or(false);

    if authorized {
        return next.run(request).await;
    }

    let err = GatewayError::authentication("Invalid or missing API token");
    state
        .translator
        .translate(&err, request.method(), request.uri().path())
}

/// Extract the token a request presents, if any
pub fn presented_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        headers
            .get(API_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
    })
}

/// Constant-time token comparison
fn token_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(presented.as_bytes().ct_eq(expected.as_bytes()))
}
