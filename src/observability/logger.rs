//! Structured logger
//!
//! - One log line = one event
//! - JSON in production, human-readable in development
//! - Levels below the configured minimum are dropped
//! - error/fatal are always emitted, on stderr
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{format_timestamp, AppError, StructuredError};

/// Log severity, in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail
    Debug = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// The process cannot continue
    Fatal = 4,
}

impl LogLevel {
    /// Lower-case name used in structured output
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            other => Err(AppError::validation(format!("Unknown log level: {}", other))
                .with_field("value", other)),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Least severe level that is emitted
    pub min_level: LogLevel,
    /// Human-readable output instead of JSON
    pub is_development: bool,
}

impl LoggerConfig {
    /// Verbose, human-readable
    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            is_development: true,
        }
    }

    /// Info and above, one JSON object per line
    pub fn production() -> Self {
        Self {
            min_level: LogLevel::Info,
            is_development: false,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Structured logger.
///
/// Created once from configuration and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// Create a logger with the given configuration
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> LoggerConfig {
        self.config
    }

    /// Whether events at `level` are emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= LogLevel::Error || level >= self.config.min_level
    }

    /// Log at DEBUG level
    pub fn debug(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Debug, message, context, None);
    }

    /// Log at INFO level
    pub fn info(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Info, message, context, None);
    }

    /// Log at WARN level
    pub fn warn(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Warn, message, context, None);
    }

    /// Log at ERROR level, with the failing error if there is one
    pub fn error(&self, message: &str, error: Option<&dyn StructuredError>, context: Option<Value>) {
        self.log(LogLevel::Error, message, context, error);
    }

    /// Log at FATAL level, with the failing error if there is one
    pub fn fatal(&self, message: &str, error: Option<&dyn StructuredError>, context: Option<Value>) {
        self.log(LogLevel::Fatal, message, context, error);
    }

    /// Emit one event
    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<Value>,
        error: Option<&dyn StructuredError>,
    ) {
        let Some(line) = self.format_entry(level, message, context, error) else {
            return;
        };

        if level >= LogLevel::Error {
            Self::write_line(&mut io::stderr(), &line);
        } else {
            Self::write_line(&mut io::stdout(), &line);
        }
    }

    /// Render an event, or `None` when its level is filtered out
    pub fn format_entry(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<Value>,
        error: Option<&dyn StructuredError>,
    ) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let timestamp = format_timestamp(Utc::now());
        let error = error.map(|e| e.to_loggable());

        if self.config.is_development {
            return Some(Self::format_pretty(level, message, context.as_ref(), error.as_ref()));
        }

        let mut entry = Map::new();
        entry.insert("level".into(), Value::from(level.as_str()));
        entry.insert("message".into(), Value::from(message));
        entry.insert("timestamp".into(), Value::from(timestamp));
        if let Some(context) = context {
            entry.insert("context".into(), context);
        }
        if let Some(error) = error {
            entry.insert("error".into(), error);
        }

        Some(Value::Object(entry).to_string())
    }

    fn format_pretty(
        level: LogLevel,
        message: &str,
        context: Option<&Value>,
        error: Option<&Value>,
    ) -> String {
        let mut output = format!("[{}] {}", level.as_str().to_uppercase(), message);
        if let Some(context) = context {
            output.push_str("\n  context: ");
            output.push_str(&context.to_string());
        }
        if let Some(error) = error {
            output.push_str("\n  error: ");
            output.push_str(&error.to_string());
        }
        output
    }

    fn write_line<W: Write>(writer: &mut W, line: &str) {
        // Single write per event
        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');
        let _ = writer.write_all(buffer.as_bytes());
        let _ = writer.flush();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}
