//! JSON output for CLI commands
//!
//! Every command prints a single JSON object on stdout.

use std::io::{self, Write};

use serde_json::{json, Value};

use crate::errors::{AppResult, StructuredError};

/// Success envelope
pub fn response_envelope(data: Value) -> Value {
    json!({ "status": "ok", "data": data })
}

/// Error envelope; carries the code and message, never internals
pub fn error_envelope(error: &dyn StructuredError) -> Value {
    json!({
        "status": "error",
        "code": error.code(),
        "message": error.message(),
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> AppResult<()> {
    write_json(&response_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(error: &dyn StructuredError) -> AppResult<()> {
    write_json(&error_envelope(error))
}

fn write_json(value: &Value) -> AppResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
