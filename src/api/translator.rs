//! Error translator
//!
//! Applied at the outermost boundary: turns any `GatewayError` into a JSON
//! body `{ error, message }` with the matching status, and logs the failure
//! server-side whatever the caller gets to see.

use std::error::Error as _;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::observability::Logger;

use super::errors::{FaultKind, GatewayError};

/// Message shown for unexpected faults outside development mode
const REDACTED_MESSAGE: &str = "An unexpected error occurred";

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Maps faults to responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorTranslator {
    development: bool,
}

impl ErrorTranslator {
    pub fn new(development: bool) -> Self {
        Self { development }
    }

    /// Body shown to the caller
    pub fn body(&self, err: &GatewayError) -> ErrorBody {
        let kind = err.kind();
        let message = match kind {
            FaultKind::Unexpected if !self.development => REDACTED_MESSAGE.to_string(),
            _ => err.to_string(),
        };

        ErrorBody {
            error: kind.label().to_string(),
            message,
        }
    }

    /// Log the fault and build the HTTP response
    pub fn translate(&self, err: &GatewayError, method: &Method, path: &str) -> Response {
        let kind = err.kind();
        let message = err.to_string();
        let mut fields = vec![
            ("kind", kind.as_str()),
            ("message", message.as_str()),
            ("method", method.as_str()),
            ("path", path),
        ];

        let cause = self.development.then(|| cause_chain(err)).flatten();
        if let Some(ref cause) = cause {
            fields.push(("cause", cause.as_str()));
        }
        Logger::error("REQUEST_FAILED", &fields);

        (err.status_code(), Json(self.body(err))).into_response()
    }
}

/// Render the source chain below the top-level error, if any
fn cause_chain(err: &GatewayError) -> Option<String> {
    let mut parts = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" <- "))
    }
}
