//! # Errors
//!
//! Typed error taxonomy shared by every layer of the site backend.
//!
//! Each failure is classified by exactly one [`ErrorKind`], which fixes its
//! machine code and HTTP status. [`AppError`] carries the kind plus the
//! message, timestamp and context captured at construction. Consumers that
//! only need to report an error depend on [`StructuredError`].

mod app_error;
mod kind;

pub use app_error::{format_timestamp, AppError, AppResult, ErrorContext, StructuredError};
pub use kind::ErrorKind;
