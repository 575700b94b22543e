//! Observability subsystem
//!
//! Structured logging through `tracing`. Each emitted line carries an
//! `event` field naming an [`Event`].
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on record processing
//! 3. Logs go to stderr; stdout is reserved for CLI responses
//!
//! # Usage
//!
//! ```ignore
//! use readinglist::observability::{self, Event};
//!
//! observability::init("info", LogFormat::Json);
//! tracing::info!(event = %Event::RecordCreated, url = "http://a.b", "article created");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `level` when set. Installing twice is a no-op, so
/// hosts that already configured `tracing` keep their subscriber.
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
