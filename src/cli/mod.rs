//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP server
//! - check-config: Validate and print configuration
//! - slug: Convert text to a URL slug

mod args;
mod commands;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve, slug};
pub use io::{error_envelope, response_envelope, write_error, write_response};
