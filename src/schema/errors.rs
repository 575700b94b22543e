//! Schema error types
//!
//! Error codes:
//! - READINGLIST_INVALID_FIELD (REJECT)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::errors::Severity;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A submitted value violates its field declaration
    InvalidField,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::InvalidField => "READINGLIST_INVALID_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single offending field and why it was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name (e.g. "read_position")
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "Required")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, format!("expected {}, got {}", expected, actual))
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        Self::new(field, format!("Shorter than minimum length {}", min))
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        Self::new(field, format!("Longer than maximum length {}", max))
    }

    pub fn below_minimum(field: impl Into<String>, value: i64, min: i64) -> Self {
        Self::new(field, format!("{} is less than minimum value {}", value, min))
    }

    pub fn invalid_url(field: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::new(field, format!("Must be a URL ({})", cause))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validation failure for a raw record.
///
/// Carries every offending field, in declaration order.
#[derive(Debug, Clone, Error)]
#[error("[{}] {}: {}", .code.severity(), .code, join_errors(.errors))]
pub struct SchemaError {
    code: SchemaErrorCode,
    errors: Vec<FieldError>,
}

impl SchemaError {
    /// Create an invalid-field error from collected field errors.
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            code: SchemaErrorCode::InvalidField,
            errors,
        }
    }

    /// Create an invalid-field error for one field.
    pub fn single(error: FieldError) -> Self {
        Self::invalid(vec![error])
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns every field error
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the first offending field name
    pub fn field(&self) -> Option<&str> {
        self.errors.first().map(|e| e.field.as_str())
    }

    /// Returns the error for a given field, if it failed
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
