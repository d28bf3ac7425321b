//! Observability
//!
//! Structured logging for the site backend. The logger is configured
//! explicitly and passed to the components that use it; there is no
//! global instance.

mod logger;

pub use logger::{LogLevel, Logger, LoggerConfig};
