//! Transition Rule Engine
//!
//! Applies ordered business rules reconciling a validated candidate with
//! the stored record (absent on creation).
//!
//! # Design Principles
//!
//! - Fixed pipeline of pure `(prior, candidate) -> candidate` rules
//! - Each rule independently testable
//! - The clock is injected, never read directly
//! - Only `MarkAsReadGuard` can reject

mod builtin;
mod engine;
mod errors;
mod rule;

pub use builtin::{
    derive_resolved_fields, stamp_creation, update_rules, MarkAsReadGuard, MonotonicProgress,
    ReadStateFreeze, UnreadReset, MISSING_READ_MARKER,
};
pub use engine::TransitionEngine;
pub use errors::{RuleError, RuleErrorCode, RuleResult};
pub use rule::TransitionRule;
