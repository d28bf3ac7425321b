//! Application error value
//!
//! An `AppError` is pure data captured at the point of failure: the kind,
//! a human message, a timestamp, a free-form context map and, when the
//! runtime has backtraces enabled, the originating stack.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::kind::ErrorKind;

/// Free-form diagnostic data attached to an error
pub type ErrorContext = Map<String, Value>;

/// Common capability of every error the application can report.
///
/// The logger and the HTTP boundary only rely on this trait, so new error
/// types can be reported without touching either of them.
pub trait StructuredError: std::error::Error + Send + Sync + 'static {
    /// Machine-readable code
    fn code(&self) -> &str;

    /// HTTP status code
    fn status_code(&self) -> u16;

    /// Type name reported in serialized form
    fn name(&self) -> &str;

    /// Human-readable message
    fn message(&self) -> &str;

    /// Moment the error was constructed
    fn timestamp(&self) -> DateTime<Utc>;

    /// Diagnostic context
    fn context(&self) -> &ErrorContext;

    /// Rendered stack trace, if one was captured
    fn stack(&self) -> Option<String> {
        None
    }

    /// Message safe to show untrusted clients
    fn public_message(&self) -> &str {
        "An unexpected error occurred"
    }

    /// Plain mapping for structured logs and API responses
    fn to_loggable(&self) -> Value {
        json!({
            "name": self.name(),
            "code": self.code(),
            "message": self.message(),
            "statusCode": self.status_code(),
            "timestamp": format_timestamp(self.timestamp()),
            "context": Value::Object(self.context().clone()),
            "stack": self.stack(),
        })
    }
}

/// ISO-8601 rendering used everywhere a timestamp leaves the process
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result alias for fallible application operations
pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// Application error
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    timestamp: DateTime<Utc>,
    context: ErrorContext,
    trace: Arc<Backtrace>,
}

impl AppError {
    /// Create an error of the given kind with an empty context
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
            context: ErrorContext::new(),
            trace: Arc::new(Backtrace::capture()),
        }
    }

    /// Invalid input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Missing resource
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Insufficient privileges
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Missing or invalid credentials
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Unexpected failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Request frequency exceeded
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    /// Corrupted or inconsistent data
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataIntegrity, message)
    }

    /// Not enough input to proceed
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientData, message)
    }

    /// Merge entries into the context
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context.extend(context);
        self
    }

    /// Add a single context entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The error's classification
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Look up one context entry
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }
}

impl StructuredError for AppError {
    fn code(&self) -> &str {
        self.kind.code()
    }

    fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn context(&self) -> &ErrorContext {
        &self.context
    }

    fn stack(&self) -> Option<String> {
        match self.trace.status() {
            BacktraceStatus::Captured => Some(self.trace.to_string()),
            _ => None,
        }
    }

    fn public_message(&self) -> &str {
        self.kind.public_message()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::validation(format!("Malformed JSON: {}", e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::internal(format!("I/O error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_fix_code_and_status() {
        let cases = [
            (AppError::validation("x"), ErrorKind::Validation),
            (AppError::not_found("x"), ErrorKind::NotFound),
            (AppError::authorization("x"), ErrorKind::Authorization),
            (AppError::authentication("x"), ErrorKind::Authentication),
            (AppError::internal("x"), ErrorKind::Internal),
            (AppError::rate_limit("x"), ErrorKind::RateLimit),
            (AppError::data_integrity("x"), ErrorKind::DataIntegrity),
            (AppError::insufficient_data("x"), ErrorKind::InsufficientData),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.code(), kind.code());
            assert_eq!(err.status_code(), kind.status_code());
            assert_eq!(err.name(), kind.name());
        }
    }

    #[test]
    fn test_context_defaults_to_empty() {
        let err = AppError::not_found("Post not found");
        assert!(err.context().is_empty());
    }

    #[test]
    fn test_context_does_not_change_classification() {
        let err = AppError::validation("Email is required")
            .with_field("field", "email")
            .with_field("statusCode", 500)
            .with_field("code", "INTERNAL_ERROR");

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.field("field"), Some(&json!("email")));
    }

    #[test]
    fn test_with_context_merges() {
        let mut ctx = ErrorContext::new();
        ctx.insert("retryAfter".into(), json!(60));
        let err = AppError::rate_limit("Too many requests")
            .with_field("ip", "10.0.0.1")
            .with_context(ctx);

        assert_eq!(err.context().len(), 2);
        assert_eq!(err.field("retryAfter"), Some(&json!(60)));
    }

    #[test]
    fn test_timestamp_is_stable_and_iso() {
        let err = AppError::internal("boom");
        let first = format_timestamp(err.timestamp());
        let second = format_timestamp(err.timestamp());
        assert_eq!(first, second);
        assert!(first.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&first).is_ok());
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::validation("Slug too long");
        assert_eq!(err.to_string(), "Slug too long");
    }

    #[test]
    fn test_loggable_shape() {
        let err = AppError::insufficient_data("Need at least 10 data points")
            .with_field("received", 5);
        let value = err.to_loggable();

        assert_eq!(value["name"], "InsufficientDataError");
        assert_eq!(value["code"], "INSUFFICIENT_DATA");
        assert_eq!(value["message"], "Need at least 10 data points");
        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["context"]["received"], 5);
        assert_eq!(value["timestamp"], format_timestamp(err.timestamp()));
        assert!(value.as_object().unwrap().contains_key("stack"));
    }

    #[test]
    fn test_clone_keeps_fields() {
        let err = AppError::not_found("missing").with_field("slug", "a");
        let copy = err.clone();
        assert_eq!(copy.timestamp(), err.timestamp());
        assert_eq!(copy.message(), err.message());
        assert_eq!(copy.context(), err.context());
    }

    #[test]
    fn test_json_error_is_validation() {
        let parse: Result<Value, _> = serde_json::from_str("{not json");
        let err = AppError::from(parse.unwrap_err());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
