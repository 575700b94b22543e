//! Article resource
//!
//! Host-facing layer: create/patch processing and the persistence
//! collaborator interface.

mod errors;
mod handler;
pub mod store;

pub use errors::{ProcessError, ProcessResult};
pub use handler::ArticleResource;
pub use store::{ArticleStore, MemoryStore, StoreError, StoreResult};
