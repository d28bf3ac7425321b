//! Per-field error accumulation

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Message used for every multi-field validation failure
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Validation messages grouped by field, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record `message` unless `valid` holds
    pub fn ensure(&mut self, valid: bool, field: &str, message: &str) {
        if !valid {
            self.add(field, message);
        }
    }

    /// Keep the value of `result`, or record its message against `field`
    pub fn capture<T>(&mut self, field: &str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error.to_string());
                None
            }
        }
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field → messages as JSON
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.errors).unwrap_or(Value::Null)
    }

    /// `Ok(value)` when nothing was recorded, otherwise one validation error
    /// carrying every message under the `fields` context key
    pub fn into_result<T>(self, value: T) -> AppResult<T> {
        if self.is_empty() {
            return Ok(value);
        }
        Err(AppError::validation(VALIDATION_FAILED).with_field("fields", self.to_json()))
    }
}
