//! # sqlgate HTTP Server Module
//!
//! Axum server exposing the query gateway.
//!
//! # Endpoints
//!
//! - `/` - Liveness marker
//! - `/health` - Health check with database readiness
//! - `/query` - SQL execution
//!
//! All endpoints require the shared API token.

pub mod auth;
pub mod config;
pub mod routes;
pub mod server;
mod state;

pub use config::{ConfigError, GatewayConfig};
pub use server::{build_router, HttpServer, ServerError};
pub use state::AppState;
