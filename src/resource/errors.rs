//! Unified processing error
//!
//! Validation failures and rule violations share one shape (field + reason)
//! so callers can present both the same way.

use thiserror::Error;

use crate::errors::Severity;
use crate::rules::RuleError;
use crate::schema::{FieldError, SchemaError};

/// Why a submitted record could not be turned into a persistable one.
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    /// Raw input failed the schema
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// Candidate broke a transition rule
    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl ProcessError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code().code(),
            Self::Rule(e) => e.code().code(),
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            Self::Validation(e) => e.severity(),
            Self::Rule(e) => e.severity(),
        }
    }

    /// Every offending field, whichever stage refused the record.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Validation(e) => e.errors().to_vec(),
            Self::Rule(e) => vec![e.error().clone()],
        }
    }

    /// The first offending field name.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => e.field(),
            Self::Rule(e) => Some(e.field()),
        }
    }
}

/// Result type for resource operations
pub type ProcessResult<T> = Result<T, ProcessError>;
