//! Article resource
//!
//! Runs submitted records through the schema and the transition engine for
//! each write method the host exposes:
//!
//! - `create` (POST):  validate → stamp creation → derive
//! - `patch`  (PATCH): merge changes onto stored record → validate → update
//!   rules → derive
//!
//! There is no full replacement. Omitting `unread` or `title` from one would
//! reset the article to unread and drop its title.
//!
//! Nothing here touches storage. The host persists the returned record and
//! enforces the constraints exposed by `metadata()`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::article::{Article, ArticleSchema};
use crate::clock::{Clock, SystemClock};
use crate::observability::Event;
use crate::rules::TransitionEngine;
use crate::schema::{FieldError, SchemaError, SchemaOptions};

use super::errors::{ProcessError, ProcessResult};

/// Fields the server stamps on creation. Submitted values are discarded
/// unchecked.
const SERVER_STAMPED: [&str; 1] = ["stored_on"];

/// Write-side contract of the article resource.
pub struct ArticleResource {
    schema: ArticleSchema,
    engine: TransitionEngine,
}

impl ArticleResource {
    /// Resource with the default schema and the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_schema(ArticleSchema::new(), clock)
    }

    /// Resource with a custom schema (e.g. configured limits).
    pub fn with_schema(schema: ArticleSchema, clock: Arc<dyn Clock>) -> Self {
        Self {
            schema,
            engine: TransitionEngine::new(clock),
        }
    }

    pub fn schema(&self) -> &ArticleSchema {
        &self.schema
    }

    /// Read-only and unique field declarations for the host.
    pub fn metadata(&self) -> &SchemaOptions {
        self.schema.options()
    }

    /// Validates raw input without applying transitions.
    pub fn validate(&self, raw: &Value) -> ProcessResult<Article> {
        match self.schema.validate(raw, self.engine.now()) {
            Ok(candidate) => {
                debug!(event = %Event::RecordValidated, url = %candidate.url, "candidate normalized");
                Ok(candidate)
            }
            Err(e) => {
                let fields: Vec<_> = e.errors().iter().map(|f| f.field.as_str()).collect();
                info!(
                    event = %Event::ValidationRejected,
                    fields = %fields.join(","),
                    "record refused by schema"
                );
                Err(e.into())
            }
        }
    }

    /// Processes a new record.
    pub fn create(&self, raw: &Value) -> ProcessResult<Article> {
        let mut raw = raw.clone();
        if let Some(obj) = raw.as_object_mut() {
            for field in SERVER_STAMPED {
                obj.remove(field);
            }
        }

        let candidate = self.validate(&raw)?;
        let record = self.engine.process(candidate, None)?;
        info!(
            event = %Event::RecordCreated,
            url = %record.url,
            stored_on = record.stored_on,
            "article created"
        );
        Ok(record)
    }

    /// Processes a partial update: keys in `changes` overwrite the stored
    /// record's keys, the rest is kept.
    pub fn patch(&self, prior: &Article, changes: &Value) -> ProcessResult<Article> {
        let changes = changes.as_object().ok_or_else(|| {
            ProcessError::from(SchemaError::single(FieldError::type_mismatch(
                "$root",
                "object",
                crate::schema::json_type_name(changes),
            )))
        })?;

        let mut merged: Map<String, Value> = match prior.to_json() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }

        let candidate = self.validate(&Value::Object(merged))?;
        let record = self.engine.process(candidate, Some(prior))?;
        info!(
            event = %Event::RecordUpdated,
            url = %record.url,
            unread = record.unread,
            read_position = record.read_position,
            "article updated"
        );
        Ok(record)
    }
}

impl Default for ArticleResource {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
