//! URL slugs

use crate::errors::{AppError, AppResult};

use super::patterns;

/// Longest accepted slug, in characters
pub const MAX_SLUG_LEN: usize = 200;

/// Turn free text into a URL slug.
///
/// Lower-cases the input, replaces every run of characters outside
/// `[a-z0-9-]` with a single hyphen, collapses repeated hyphens and trims
/// them from both ends.
pub fn parse_slug(input: &str) -> AppResult<String> {
    let mut slug = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(AppError::validation("Slug cannot be empty"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::validation("Slug too long")
            .with_field("length", slug.len())
            .with_field("max", MAX_SLUG_LEN));
    }
    Ok(slug.to_string())
}

/// Accept an explicit slug only if it is already in canonical form
pub fn check_slug(slug: &str) -> AppResult<String> {
    if slug.is_empty() {
        return Err(AppError::validation("Slug is required"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::validation("Slug too long").with_field("length", slug.len()));
    }
    if !patterns::slug()?.is_match(slug) {
        return Err(AppError::validation("Invalid slug format").with_field("slug", slug));
    }
    Ok(slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, StructuredError};

    #[test]
    fn test_parse_slug_valid_input() {
        assert_eq!(parse_slug("Hello World").unwrap(), "hello-world");
    }

    #[test]
    fn test_parse_slug_collapses_and_trims() {
        assert_eq!(parse_slug("  Rust -- & Axum!! ").unwrap(), "rust-axum");
        assert_eq!(parse_slug("already-a-slug").unwrap(), "already-a-slug");
        assert_eq!(parse_slug("Café 2025").unwrap(), "caf-2025");
    }

    #[test]
    fn test_parse_slug_rejects_empty() {
        let err = parse_slug("!!!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Slug cannot be empty");

        assert_eq!(parse_slug("").unwrap_err().message(), "Slug cannot be empty");
    }

    #[test]
    fn test_parse_slug_rejects_too_long() {
        let err = parse_slug(&"a".repeat(300)).unwrap_err();
        assert_eq!(err.message(), "Slug too long");
        assert_eq!(err.field("length").unwrap(), 300);
    }

    #[test]
    fn test_parse_slug_boundary_length() {
        assert!(parse_slug(&"a".repeat(MAX_SLUG_LEN)).is_ok());
        assert!(parse_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }

    #[test]
    fn test_check_slug() {
        assert_eq!(check_slug("hello-world").unwrap(), "hello-world");
        assert_eq!(check_slug("Hello").unwrap_err().message(), "Invalid slug format");
        assert_eq!(check_slug("a--b").unwrap_err().message(), "Invalid slug format");
        assert_eq!(check_slug("").unwrap_err().message(), "Slug is required");
    }
}
