//! CLI-specific error types
//!
//! Configuration and I/O failures are FATAL. A record refused by the schema
//! or a transition rule is reported with its own code and field errors.

use std::io;

use thiserror::Error;

use crate::errors::Severity;
use crate::resource::ProcessError;
use crate::schema::FieldError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout, prior record file)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "READINGLIST_CLI_CONFIG_ERROR",
            Self::IoError => "READINGLIST_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {message}", .code.code())]
    Fatal { code: CliErrorCode, message: String },

    #[error(transparent)]
    Rejected(#[from] ProcessError),
}

impl CliError {
    /// Create a new fatal CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self::Fatal {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Fatal { code, .. } => code.code(),
            Self::Rejected(e) => e.code(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Fatal { .. } => Severity::Fatal,
            Self::Rejected(e) => e.severity(),
        }
    }

    /// Field errors of a rejected record; empty for fatal errors.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Fatal { .. } => Vec::new(),
            Self::Rejected(e) => e.field_errors(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;

    #[test]
    fn test_fatal_display() {
        let err = CliError::io_error("Empty input");
        assert_eq!(err.to_string(), "READINGLIST_CLI_IO_ERROR: Empty input");
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.field_errors().is_empty());
    }

    #[test]
    fn test_rejected_carries_fields() {
        let process: ProcessError = SchemaError::single(FieldError::required("url")).into();
        let err = CliError::from(process);

        assert_eq!(err.code_str(), "READINGLIST_INVALID_FIELD");
        assert_eq!(err.severity(), Severity::Reject);
        assert_eq!(err.field_errors(), vec![FieldError::required("url")]);
    }
}
