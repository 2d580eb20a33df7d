//! Fault taxonomy for the query gateway
//!
//! Every failure the gateway can surface falls into one of four kinds. The
//! translator matches on the kind, never on where the error came from.

use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Fault categories exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Malformed or missing input
    Validation,
    /// Missing or incorrect credential
    Authentication,
    /// Engine execution, store readiness, or persistence failure
    Database,
    /// Anything else
    Unexpected,
}

impl FaultKind {
    /// Category label placed in the `error` field of response bodies
    pub fn label(&self) -> &'static str {
        match self {
            FaultKind::Validation => "Validation Error",
            FaultKind::Authentication => "Authentication Error",
            FaultKind::Database => "Database Error",
            FaultKind::Unexpected => "Internal Server Error",
        }
    }

    /// Name used in server-side logs
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Validation => "VALIDATION",
            FaultKind::Authentication => "AUTHENTICATION",
            FaultKind::Database => "DATABASE",
            FaultKind::Unexpected => "UNEXPECTED",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Credential check failed
    #[error("{0}")]
    Authentication(String),

    /// Store-level failure; the original store error is kept as the source
    #[error("{message}")]
    Database {
        message: String,
        status: StatusCode,
        #[source]
        source: Option<StoreError>,
    },

    /// Failure outside the known categories
    #[error("{0}")]
    Unexpected(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        GatewayError::Authentication(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        GatewayError::Unexpected(message.into())
    }

    /// Store has not finished initializing
    pub fn not_initialized() -> Self {
        GatewayError::Database {
            message: "Database not initialized".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            source: None,
        }
    }

    /// Wrap a failure raised while running a statement or persisting its effect
    pub fn query_failed(err: StoreError) -> Self {
        GatewayError::Database {
            message: format!("Database query failed: {}", err),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            source: Some(err),
        }
    }

    /// Wrap a store failure under an arbitrary context message
    pub fn database(context: &str, err: StoreError) -> Self {
        GatewayError::Database {
            message: format!("{}: {}", context, err),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            source: Some(err),
        }
    }

    /// The fault category
    pub fn kind(&self) -> FaultKind {
        match self {
            GatewayError::Validation(_) => FaultKind::Validation,
            GatewayError::Authentication(_) => FaultKind::Authentication,
            GatewayError::Database { .. } => FaultKind::Database,
            GatewayError::Unexpected(_) => FaultKind::Unexpected,
        }
    }

    /// HTTP status for this fault
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Database { status, .. } => *status,
            GatewayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::not_initialized().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::unexpected("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_query_failed_keeps_cause() {
        let err = GatewayError::query_failed(StoreError::Engine(rusqlite::Error::InvalidQuery));
        assert_eq!(err.kind(), FaultKind::Database);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Database query failed: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_labels() {
        assert_eq!(FaultKind::Validation.label(), "Validation Error");
        assert_eq!(FaultKind::Authentication.label(), "Authentication Error");
        assert_eq!(FaultKind::Database.label(), "Database Error");
        assert_eq!(FaultKind::Unexpected.label(), "Internal Server Error");
    }
}
