//! CLI command implementations

use std::path::Path;

use crate::api::ErrorTranslator;
use crate::gateway::{Gateway, Persistence, QueryRequest};
use crate::http_server::{GatewayConfig, HttpServer};

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args),
        Command::Query { db_file, sql } => query(&db_file, &sql),
    }
}

/// Merge the optional config file with command-line overrides
pub fn resolve_config(args: ServeArgs) -> CliResult<GatewayConfig> {
    let mut config = match &args.config {
        Some(path) => {
            GatewayConfig::load(path).map_err(|e| CliError::config_error(e.to_string()))?
        }
        None => GatewayConfig::default(),
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(db_file) = args.db_file {
        config.database_file = Some(db_file);
    }
    if let Some(token) = args.api_token {
        config.api_token = Some(token);
    }
    config.audit_log |= args.audit_log;
    config.development |= args.development;

    config
        .validate()
        .map_err(|e| CliError::config_error(e.to_string()))?;
    Ok(config)
}

/// Load the database and serve HTTP until the process is stopped
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let server =
        HttpServer::with_config(config).map_err(|e| CliError::config_error(e.to_string()))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Execute one statement against the database file, print the JSON result
///
/// Write-class statements persist exactly as they would through HTTP.
pub fn query(db_file: &Path, sql: &str) -> CliResult<()> {
    let gateway = Gateway::new(Persistence::new(db_file));
    gateway
        .initialize()
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let result = QueryRequest::from_value(&serde_json::json!({ "sql": sql }))
        .and_then(|request| gateway.handle(&request));

    match result {
        Ok(response) => write_json(&response),
        Err(err) => {
            write_json(&ErrorTranslator::default().body(&err))?;
            Err(CliError::query_failed(err.to_string()))
        }
    }
}
