//! # HTTP Server
//!
//! Builds the gateway, loads the database, then serves the router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::{ErrorTranslator, GatewayError};
use crate::gateway::{Gateway, Persistence};
use crate::observability::{LogAuditSink, Logger};

use super::config::{ConfigError, GatewayConfig};
use super::routes::gateway_routes;
use super::state::AppState;

/// Failures while booting or serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid socket address '{0}'")]
    Address(String),

    #[error("Database initialization failed: {0}")]
    Init(#[source] GatewayError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the query gateway
pub struct HttpServer {
    config: GatewayConfig,
    gateway: Arc<Gateway>,
    router: Router,
}

impl HttpServer {
    /// Create a server from a validated configuration.
    ///
    /// The database is not loaded until `start`.
    pub fn with_config(config: GatewayConfig) -> Result<Self, ServerError> {
        config.validate()?;

        let (database_file, api_token) = match (&config.database_file, &config.api_token) {
            (Some(file), Some(token)) => (file.clone(), token.clone()),
            _ => return Err(ConfigError::Invalid("incomplete configuration".to_string()).into()),
        };

        let mut gateway = Gateway::new(Persistence::new(database_file));
        if config.audit_log {
            gateway = gateway.with_audit(Arc::new(LogAuditSink::new()));
        }
        let gateway = Arc::new(gateway);

        let state = AppState::new(
            Arc::clone(&gateway),
            &api_token,
            ErrorTranslator::new(config.development),
        );
        let router = build_router(state);

        Ok(Self {
            config,
            gateway,
            router,
        })
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn gateway(&self) -> Arc<Gateway> {
        Arc::clone(&self.gateway)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Load the database, then bind and serve until the process exits.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|_| ServerError::Address(self.config.socket_addr()))?;

        let gateway = Arc::clone(&self.gateway);
        tokio::task::spawn_blocking(move || gateway.initialize())
            .await
            .map_err(|e| ServerError::Init(GatewayError::unexpected(e.to_string())))?
            .map_err(ServerError::Init)?;

        let listener = TcpListener::bind(addr).await?;
        let addr_str = addr.to_string();
        Logger::info(
            "SERVER_START",
            &[
                ("addr", addr_str.as_str()),
                ("audit_log", if self.config.audit_log { "on" } else { "off" }),
            ],
        );

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Assemble the full router: gateway routes plus a permissive CORS layer.
///
/// CORS is the outermost layer so preflight requests are answered before
/// the token check.
pub fn build_router(state: AppState) -> Router {
    gateway_routes(state).layer(CorsLayer::permissive())
}
