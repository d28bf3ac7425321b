//! CLI argument definitions using clap
//!
//! Commands:
//! - blackforge serve [--config <path>] [--port <n>]
//! - blackforge check-config [--config <path>]
//! - blackforge slug <text>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blackforge Digital site backend
#[derive(Parser, Debug)]
#[command(name = "blackforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, then print it
    CheckConfig {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the URL slug for a piece of text
    Slug {
        /// Text to convert
        text: String,
    },
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

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["blackforge", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_slug() {
        let cli = Cli::try_parse_from(["blackforge", "slug", "Hello World"]).unwrap();
        assert!(matches!(cli.command, Command::Slug { text } if text == "Hello World"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["blackforge", "serve", "--port", "99999"]).is_err());
    }
}
