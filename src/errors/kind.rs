//! Error kinds
//!
//! The closed classification every application failure falls into.
//! Code and status are fixed per kind.

use std::fmt;

use serde::Serialize;

/// Classification of an application failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed or invalid input
    Validation,
    /// Referenced entity is absent
    NotFound,
    /// Authenticated but insufficiently privileged
    Authorization,
    /// Missing or invalid credentials
    Authentication,
    /// Unexpected failure, not attributable to the caller
    Internal,
    /// Caller exceeded the allowed request frequency
    RateLimit,
    /// Invariant violation in stored or derived data
    DataIntegrity,
    /// Operation needs more input than was supplied
    InsufficientData,
}

impl ErrorKind {
    /// Every kind, in declaration order
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::Validation,
        ErrorKind::NotFound,
        ErrorKind::Authorization,
        ErrorKind::Authentication,
        ErrorKind::Internal,
        ErrorKind::RateLimit,
        ErrorKind::DataIntegrity,
        ErrorKind::InsufficientData,
    ];

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Authorization => "UNAUTHORIZED",
            ErrorKind::Authentication => "UNAUTHENTICATED",
            ErrorKind::Internal => "INTERNAL_ERROR",
            ErrorKind::RateLimit => "RATE_LIMIT_EXCEEDED",
            ErrorKind::DataIntegrity => "DATA_INTEGRITY_ERROR",
            ErrorKind::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            ErrorKind::Validation => 400,
            ErrorKind::InsufficientData => 400,

            // 401/403
            ErrorKind::Authentication => 401,
            ErrorKind::Authorization => 403,

            // 404 Not Found
            ErrorKind::NotFound => 404,

            // 429 Too Many Requests
            ErrorKind::RateLimit => 429,

            // 500 Internal Server Error
            ErrorKind::Internal => 500,
            ErrorKind::DataIntegrity => 500,
        }
    }

    /// Type name reported in serialized errors
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Authorization => "AuthorizationError",
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::Internal => "InternalError",
            ErrorKind::RateLimit => "RateLimitError",
            ErrorKind::DataIntegrity => "DataIntegrityError",
            ErrorKind::InsufficientData => "InsufficientDataError",
        }
    }

    /// Generic phrase safe to show untrusted clients
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "The request could not be validated",
            ErrorKind::NotFound => "The requested resource was not found",
            ErrorKind::Authorization => "You do not have access to this resource",
            ErrorKind::Authentication => "Authentication required",
            ErrorKind::Internal => "An unexpected error occurred",
            ErrorKind::RateLimit => "Too many requests, please try again later",
            ErrorKind::DataIntegrity => "An unexpected error occurred",
            ErrorKind::InsufficientData => "Not enough data to complete the request",
        }
    }

    /// Whether the failure is attributable to the server rather than the caller
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
