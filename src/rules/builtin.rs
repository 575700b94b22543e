//! Article transition rules
//!
//! Update rules, in pipeline order:
//! 1. `MonotonicProgress`  - read position never goes backwards
//! 2. `MarkAsReadGuard`    - marking read needs a device or a date
//! 3. `ReadStateFreeze`    - read markers are fixed once read
//! 4. `UnreadReset`        - flipping back to unread clears progress
//!
//! Rule 4 runs after rule 3, so an update that re-sends read markers while
//! flipping back to unread ends up with the markers cleared.

use tracing::{debug, info};

use crate::article::Article;
use crate::clock::Timestamp;
use crate::observability::Event;

use super::errors::{RuleError, RuleResult};
use super::rule::TransitionRule;

/// Reason given when a mark-as-read carries no device or date.
pub const MISSING_READ_MARKER: &str = "Missing marked_read_by or marked_read_on fields";

/// Keeps `read_position` from decreasing.
///
/// A lower submitted position is replaced silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicProgress;

impl TransitionRule for MonotonicProgress {
    fn name(&self) -> &'static str {
        "monotonic_progress"
    }

    fn apply(&self, prior: &Article, mut candidate: Article) -> RuleResult<Article> {
        if prior.read_position > candidate.read_position {
            debug!(
                event = %Event::ReadPositionClamped,
                url = %prior.url,
                stored = prior.read_position,
                submitted = candidate.read_position,
                "read position regression discarded"
            );
            candidate.read_position = prior.read_position;
        }
        Ok(candidate)
    }
}

/// Rejects an unread → read transition that names neither device nor date.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkAsReadGuard;

impl TransitionRule for MarkAsReadGuard {
    fn name(&self) -> &'static str {
        "mark_as_read_guard"
    }

    fn apply(&self, prior: &Article, candidate: Article) -> RuleResult<Article> {
        if prior.unread && candidate.is_read() && !candidate.has_read_marker() {
            info!(
                event = %Event::MarkAsReadRejected,
                url = %prior.url,
                "mark as read without device information"
            );
            return Err(RuleError::violation(self.name(), "unread", MISSING_READ_MARKER));
        }
        Ok(candidate)
    }
}

/// Pins `marked_read_on`/`marked_read_by` to the stored values once the
/// stored record is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadStateFreeze;

impl TransitionRule for ReadStateFreeze {
    fn name(&self) -> &'static str {
        "read_state_freeze"
    }

    fn apply(&self, prior: &Article, mut candidate: Article) -> RuleResult<Article> {
        if prior.is_read() {
            if candidate.marked_read_on != prior.marked_read_on
                || candidate.marked_read_by != prior.marked_read_by
            {
                debug!(
                    event = %Event::ReadStateFrozen,
                    url = %prior.url,
                    "submitted read markers ignored"
                );
            }
            candidate.marked_read_on = prior.marked_read_on;
            candidate.marked_read_by = prior.marked_read_by.clone();
        }
        Ok(candidate)
    }
}

/// Clears read markers and progress on a read → unread transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreadReset;

impl TransitionRule for UnreadReset {
    fn name(&self) -> &'static str {
        "unread_reset"
    }

    fn apply(&self, prior: &Article, mut candidate: Article) -> RuleResult<Article> {
        if candidate.unread && prior.is_read() {
            debug!(event = %Event::UnreadReset, url = %prior.url, "article marked unread");
            candidate.marked_read_on = None;
            candidate.marked_read_by = None;
            candidate.read_position = 0;
        }
        Ok(candidate)
    }
}

/// Returns the update rules in pipeline order.
pub fn update_rules() -> Vec<Box<dyn TransitionRule>> {
    vec![
        Box::new(MonotonicProgress),
        Box::new(MarkAsReadGuard),
        Box::new(ReadStateFreeze),
        Box::new(UnreadReset),
    ]
}

/// Stamps the server-side creation time, overriding anything submitted.
pub fn stamp_creation(mut candidate: Article, now: Timestamp) -> Article {
    candidate.stored_on = now;
    candidate
}

/// Fills `resolved_title` and `resolved_url` when absent.
///
/// Resolution is an echo of the submitted `title` and `url`; no content is
/// fetched and redirects are not followed.
pub fn derive_resolved_fields(mut record: Article) -> Article {
    if record.resolved_title.is_none() {
        record.resolved_title = record.title.clone();
    }
    if record.resolved_url.is_none() {
        record.resolved_url = Some(record.url.clone());
    }
    record
}
