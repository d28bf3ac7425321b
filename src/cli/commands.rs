//! CLI command implementations

use std::path::Path;

use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::http_server::{HttpServer, ServerConfig};
use crate::validation::parse_slug;

use super::args::Command;
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> AppResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> AppResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(config.as_deref()),
        Command::Slug { text } => slug(&text),
    }
}

/// Load configuration and run the HTTP server until it stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> AppResult<()> {
    let mut config = ServerConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::internal(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(server.start())
}

/// Print the effective configuration
pub fn check_config(config_path: Option<&Path>) -> AppResult<()> {
    let config = ServerConfig::load(config_path)?;
    write_response(describe_config(&config)?)
}

/// Print the slug for `text`; invalid text is reported as JSON, not as a failure
pub fn slug(text: &str) -> AppResult<()> {
    match parse_slug(text) {
        Ok(slug) => write_response(json!({ "slug": slug })),
        Err(error) => write_error(&error),
    }
}

/// Configuration as printed by `check-config`; the admin token is masked
fn describe_config(config: &ServerConfig) -> AppResult<Value> {
    let mut value = serde_json::to_value(config)?;
    if config.admin_token.is_some() {
        value["admin_token"] = json!("********");
    }
    Ok(value)
}
