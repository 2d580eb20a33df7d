//! CLI module for sqlgate
//!
//! Provides command-line interface for:
//! - serve: Load the database and run the HTTP gateway
//! - query: One-shot statement execution

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{query, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
