//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlgate serve [--config <path>] [--port <port>] ...
//! - sqlgate query --db-file <path> <sql>

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

/// sqlgate - HTTP gateway for ad-hoc SQL against an embedded database
#[derive(Parser, Debug)]
#[command(name = "sqlgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the database and serve the HTTP gateway
    Serve(ServeArgs),

    /// Execute a single statement against the database file and exit
    Query {
        /// Database snapshot file
        #[arg(long = "db-file", env = "DB_FILE")]
        db_file: PathBuf,

        /// SQL text to execute
        sql: String,
    },
}

/// Options for `serve`. Each overrides the matching config file value.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Database snapshot file
    #[arg(long = "db-file", env = "DB_FILE")]
    pub db_file: Option<PathBuf>,

    /// Shared secret every request must present
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Log one record per executed query
    #[arg(long, env = "QUERY_LOG", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub audit_log: bool,

    /// Development mode: unredacted internal errors
    #[arg(long, env = "GATEWAY_DEV", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub development: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from(["sqlgate", "query", "--db-file", "app.db", "SELECT 1"]).unwrap();
        match cli.command {
            Command::Query { db_file, sql } => {
                assert_eq!(db_file, PathBuf::from("app.db"));
                assert_eq!(sql, "SELECT 1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "sqlgate",
            "serve",
            "--port",
            "8080",
            "--db-file",
            "app.db",
            "--api-token",
            "secret",
            "--audit-log",
        ])
        .unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.api_token.as_deref(), Some("secret"));
                assert!(args.audit_log);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
