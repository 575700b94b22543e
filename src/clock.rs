//! Current-time provider
//!
//! Timestamps are epoch milliseconds. The transition engine never reads the
//! system time directly; it is handed a `Clock` so that `stored_on` stamping
//! is reproducible in tests.

use chrono::Utc;

/// Epoch timestamp in milliseconds.
pub type Timestamp = u64;

/// Source of the current server time.
pub trait Clock: Send + Sync {
    /// Returns the current time in epoch milliseconds.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Pre-epoch system time is clamped to zero.
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock {
    millis: Timestamp,
}

impl FixedClock {
    /// Create a clock frozen at `millis`.
    pub fn at(millis: Timestamp) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.millis
    }
}
