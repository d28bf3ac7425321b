//! HTTP Server Configuration
//!
//! Host, port, deployment environment, CORS, admin access and rate
//! limiting. Loaded from an optional JSON file, then overridden by
//! `BLACKFORGE_*` environment variables.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::observability::{LogLevel, LoggerConfig};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: verbose logs, detailed error bodies
    #[default]
    Development,
    /// Public deployment: redacted error bodies, HSTS
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::validation(format!("Unknown environment: {}", other))
                .with_field("value", other)),
        }
    }
}

/// Fixed-window rate limit settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_requests() -> u32 {
    60
}

fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5173)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment (default: development)
    #[serde(default)]
    pub environment: Environment,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Token accepted as an admin session; no admin access when unset
    #[serde(default)]
    pub admin_token: Option<String>,

    /// Rate limiting for API and contact endpoints
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Overrides the environment's default minimum log level
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5173
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(), // Vite dev server
        "http://localhost:4173".to_string(), // Vite preview
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            cors_origins: default_cors_origins(),
            admin_token: None,
            rate_limit: RateLimitConfig::default(),
            log_level: None,
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether this is a public deployment
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Logger settings implied by the environment and override
    pub fn logger_config(&self) -> LoggerConfig {
        let base = match self.environment {
            Environment::Production => LoggerConfig::production(),
            Environment::Development => LoggerConfig::development(),
        };
        LoggerConfig {
            min_level: self.log_level.unwrap_or(base.min_level),
            ..base
        }
    }

    /// Load from a JSON file (if given) and the process environment
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Parse a JSON configuration file; missing keys take defaults
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::internal(format!("Failed to read config file: {}", e))
                .with_field("path", path.display().to_string())
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::validation(format!("Invalid config file: {}", e))
                .with_field("path", path.display().to_string())
        })
    }

    /// Apply `BLACKFORGE_*` overrides read through `lookup`
    pub fn apply_env<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BLACKFORGE_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("BLACKFORGE_PORT") {
            self.port = parse_number("BLACKFORGE_PORT", &port)?;
        }
        if let Some(env) = lookup("BLACKFORGE_ENV") {
            self.environment = env.parse()?;
        }
        if let Some(origins) = lookup("BLACKFORGE_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(token) = lookup("BLACKFORGE_ADMIN_TOKEN") {
            self.admin_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(limit) = lookup("BLACKFORGE_RATE_LIMIT") {
            self.rate_limit.max_requests = parse_number("BLACKFORGE_RATE_LIMIT", &limit)?;
        }
        if let Some(level) = lookup("BLACKFORGE_LOG_LEVEL") {
            self.log_level = Some(level.parse()?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return Err(AppError::validation("Rate limit window and limit must be positive")
                .with_field("maxRequests", self.rate_limit.max_requests)
                .with_field("windowSecs", self.rate_limit.window_secs));
        }
        if let Some(token) = &self.admin_token {
            if token.len() < 16 {
                return Err(AppError::validation("Admin token must be at least 16 characters"));
            }
        }
        Ok(())
    }
}

fn parse_number<N: FromStr>(key: &str, raw: &str) -> AppResult<N> {
    raw.trim().parse().map_err(|_| {
        AppError::validation(format!("{} must be a number", key)).with_field("value", raw)
    })
}
