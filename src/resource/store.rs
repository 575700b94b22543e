//! Persistence collaborator
//!
//! The article schema only declares which fields are read-only and which
//! are unique. Whatever persists records enforces that declaration; this
//! module defines the interface and an in-memory implementation that
//! checks both under a single write lock.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::article::Article;
use crate::observability::Event;
use crate::schema::ResourceMetadata;

/// Persistence errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique field value is already used by another record
    #[error("Conflict: field '{field}' already used by record {existing_id}")]
    Conflict { field: String, existing_id: String },

    /// A replacement changed a read-only field
    #[error("Cannot modify {field}")]
    ReadOnly { field: String },

    /// No record with this id
    #[error("Record {0} not found")]
    NotFound(String),

    /// Lock poisoned by a panicking writer
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "READINGLIST_STORE_CONFLICT",
            Self::ReadOnly { .. } => "READINGLIST_STORE_READONLY",
            Self::NotFound(_) => "READINGLIST_STORE_NOT_FOUND",
            Self::Unavailable(_) => "READINGLIST_STORE_UNAVAILABLE",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Conflict { .. } => 409,
            Self::ReadOnly { .. } => 400,
            Self::NotFound(_) => 404,
            Self::Unavailable(_) => 503,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for the article storage backend
pub trait ArticleStore: Send + Sync {
    /// Read a record by id
    fn get(&self, id: &str) -> StoreResult<Option<Article>>;

    /// Insert a new record, returning its id
    fn create(&self, record: Article) -> StoreResult<String>;

    /// Replace an existing record
    fn replace(&self, id: &str, record: Article) -> StoreResult<()>;

    /// Delete a record, returning whether it existed
    fn delete(&self, id: &str) -> StoreResult<bool>;
}

/// In-memory store enforcing read-only and unique declarations.
pub struct MemoryStore<M: ResourceMetadata> {
    metadata: M,
    records: RwLock<HashMap<String, Article>>,
}

impl<M: ResourceMetadata> MemoryStore<M> {
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_unique(
        &self,
        records: &HashMap<String, Article>,
        record: &Article,
        exclude: Option<&str>,
    ) -> StoreResult<()> {
        for field in self.metadata.unique_fields() {
            let value = match record.field(field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };

            let clash = records
                .iter()
                .filter(|(id, _)| Some(id.as_str()) != exclude)
                .find(|(_, other)| other.field(field).as_ref() == Some(&value));

            if let Some((existing_id, _)) = clash {
                info!(
                    event = %Event::UniqueConflict,
                    field = %field,
                    existing_id = %existing_id,
                    "unique field already used"
                );
                return Err(StoreError::Conflict {
                    field: field.to_string(),
                    existing_id: existing_id.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_readonly(&self, existing: &Article, record: &Article) -> StoreResult<()> {
        for field in self.metadata.readonly_fields() {
            if existing.field(field) != record.field(field) {
                info!(event = %Event::ReadOnlyViolation, field = %field, "read-only field changed");
                return Err(StoreError::ReadOnly {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl<M: ResourceMetadata + Send + Sync> ArticleStore for MemoryStore<M> {
    fn get(&self, id: &str) -> StoreResult<Option<Article>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn create(&self, record: Article) -> StoreResult<String> {
        let mut records = self.records.write().map_err(poisoned)?;
        self.check_unique(&records, &record, None)?;

        let id = Uuid::new_v4().to_string();
        records.insert(id.clone(), record);
        Ok(id)
    }

    fn replace(&self, id: &str, record: Article) -> StoreResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        let existing = records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        self.check_readonly(existing, &record)?;
        self.check_unique(&records, &record, Some(id))?;

        records.insert(id.to_string(), record);
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(id).is_some())
    }
}
