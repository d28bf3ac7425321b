//! blackforge - site backend for Blackforge Digital
//!
//! Typed application errors, `Result` combinators, input validation and
//! the HTTP boundary where errors become responses.

pub mod blog;
pub mod cli;
pub mod errors;
pub mod http_server;
pub mod observability;
pub mod result;
pub mod validation;
