//! Business-rule error types
//!
//! Error codes:
//! - READINGLIST_RULE_VIOLATION (REJECT)

use std::fmt;

use thiserror::Error;

use crate::errors::Severity;
use crate::schema::FieldError;

/// Rule-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleErrorCode {
    /// A structurally valid candidate breaks a cross-field invariant
    RuleViolation,
}

impl RuleErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RuleErrorCode::RuleViolation => "READINGLIST_RULE_VIOLATION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for RuleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejection raised by a transition rule.
#[derive(Debug, Clone, Error)]
#[error("[{}] {}: {} (rule {})", .code.severity(), .code, .error, .rule)]
pub struct RuleError {
    code: RuleErrorCode,
    rule: &'static str,
    error: FieldError,
}

impl RuleError {
    /// Create a violation raised by `rule` against `field`.
    pub fn violation(rule: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: RuleErrorCode::RuleViolation,
            rule,
            error: FieldError::new(field, reason),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RuleErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the name of the rule that rejected the candidate
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Returns the offending field and reason
    pub fn error(&self) -> &FieldError {
        &self.error
    }

    /// Returns the offending field name
    pub fn field(&self) -> &str {
        &self.error.field
    }

    /// Returns the human-readable reason
    pub fn reason(&self) -> &str {
        &self.error.reason
    }
}

/// Result type for rule evaluation
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let err = RuleError::violation("mark_as_read_guard", "unread", "Missing info");
        assert_eq!(err.field(), "unread");
        assert_eq!(err.reason(), "Missing info");
        assert_eq!(
            err.to_string(),
            "[REJECT] READINGLIST_RULE_VIOLATION: unread: Missing info (rule mark_as_read_guard)"
        );
    }
}
