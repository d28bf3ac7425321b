//! Compiled regular expressions
//!
//! Patterns are compiled on first use and shared afterwards.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{AppError, AppResult};

/// Compile `source` into `cell` once; a bad pattern is an internal error
pub(crate) fn compiled(cell: &'static OnceLock<Regex>, source: &str) -> AppResult<&'static Regex> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }
    let regex = Regex::new(source).map_err(|e| {
        AppError::internal(format!("Invalid pattern: {}", e)).with_field("pattern", source)
    })?;
    Ok(cell.get_or_init(|| regex))
}

macro_rules! pattern {
    ($name:ident, $source:expr) => {
        pub(crate) fn $name() -> AppResult<&'static Regex> {
            static CELL: OnceLock<Regex> = OnceLock::new();
            compiled(&CELL, $source)
        }
    };
}

pattern!(person_name, r"^[a-zA-Z\s\-']+$");
pattern!(email, r"^[^\s@]+@[^\s@]+\.[^\s@]+$");
pattern!(us_phone, r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$");
pattern!(slug, r"^[a-z0-9]+(?:-[a-z0-9]+)*$");
pattern!(h2_heading, r"(?i)<h2[^>]*>(.*?)</h2>");
pattern!(h3_heading, r"(?i)<h3[^>]*>(.*?)</h3>");
pattern!(html_tag, r"<[^>]*>");
