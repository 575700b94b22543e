//! Observable events
//!
//! Every log line the crate emits carries one of these as its `event`
//! field, so log consumers can match on a stable name instead of message
//! text.

use std::fmt;

/// Observable events in the article lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Schema
    /// Raw input normalized into a candidate
    RecordValidated,
    /// Raw input refused by the schema
    ValidationRejected,

    // Transitions
    /// Creation transition applied
    RecordCreated,
    /// Update transition applied
    RecordUpdated,
    /// Submitted read position was lower than the stored one
    ReadPositionClamped,
    /// Mark-as-read without device or date refused
    MarkAsReadRejected,
    /// Submitted read markers replaced by the stored ones
    ReadStateFrozen,
    /// Article flipped back to unread, read markers cleared
    UnreadReset,

    // Persistence collaborator
    /// Unique field collided with another record
    UniqueConflict,
    /// Replacement tried to change a read-only field
    ReadOnlyViolation,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RecordValidated => "RECORD_VALIDATED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::ReadPositionClamped => "READ_POSITION_CLAMPED",
            Event::MarkAsReadRejected => "MARK_AS_READ_REJECTED",
            Event::ReadStateFrozen => "READ_STATE_FROZEN",
            Event::UnreadReset => "UNREAD_RESET",
            Event::UniqueConflict => "UNIQUE_CONFLICT",
            Event::ReadOnlyViolation => "READONLY_VIOLATION",
        }
    }

    /// Returns true if this event reports a refused request
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Event::ValidationRejected
                | Event::MarkAsReadRejected
                | Event::UniqueConflict
                | Event::ReadOnlyViolation
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
