//! Article schema declaration

use serde_json::Value;

use crate::clock::Timestamp;
use crate::schema::{
    FieldDef, FieldType, FieldValue, ResourceMetadata, Schema, SchemaOptions, SchemaResult,
    SchemaValidator,
};

use super::record::Article;

/// Maximum length of title-like fields, in characters.
pub const TITLE_MAX_LENGTH: usize = 1024;

/// Maximum length of URL fields, in characters.
pub const URL_MAX_LENGTH: usize = 2048;

/// Length bounds applied by the article schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaLimits {
    pub title_max_length: usize,
    pub url_max_length: usize,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            title_max_length: TITLE_MAX_LENGTH,
            url_max_length: URL_MAX_LENGTH,
        }
    }
}

/// Schema for a reading list article.
#[derive(Debug, Clone)]
pub struct ArticleSchema {
    schema: Schema,
}

impl ArticleSchema {
    pub fn new() -> Self {
        Self::with_limits(SchemaLimits::default())
    }

    pub fn with_limits(limits: SchemaLimits) -> Self {
        let url = FieldType::Url {
            max_len: limits.url_max_length,
        };
        let title = FieldType::Title {
            max_len: limits.title_max_length,
        };
        let int = |min| FieldType::Int { min };
        let flag = |default| FieldValue::Bool(default);

        let fields = vec![
            FieldDef::required("url", url.clone()),
            FieldDef::nullable("preview", url.clone()),
            FieldDef::nullable("title", title.clone()),
            FieldDef::required("added_by", FieldType::DeviceName),
            FieldDef::auto_now("added_on"),
            FieldDef::auto_now("stored_on"),
            FieldDef::with_default("archived", FieldType::Bool, flag(false)),
            FieldDef::with_default("favorite", FieldType::Bool, flag(false)),
            FieldDef::with_default("unread", FieldType::Bool, flag(true)),
            FieldDef::with_default("is_article", FieldType::Bool, flag(true)),
            FieldDef::with_default("excerpt", FieldType::Text, FieldValue::Text(String::new())),
            FieldDef::with_default("read_position", int(Some(0)), FieldValue::Int(0)),
            FieldDef::nullable("marked_read_by", FieldType::DeviceName),
            FieldDef::nullable("marked_read_on", FieldType::Timestamp),
            FieldDef::nullable("word_count", int(None)),
            FieldDef::nullable("resolved_url", url),
            FieldDef::nullable("resolved_title", title),
        ];

        let options = SchemaOptions::resource_defaults()
            .readonly(&["url", "stored_on"])
            .unique(&["url", "resolved_url"]);

        Self {
            schema: Schema::new("article", fields, options),
        }
    }

    /// Returns the underlying declaration.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the declared read-only and unique fields.
    pub fn options(&self) -> &SchemaOptions {
        &self.schema.options
    }

    /// Validates raw input into a candidate article.
    ///
    /// `now` fills auto-now timestamps (`added_on`, `stored_on`) that were
    /// not submitted.
    pub fn validate(&self, raw: &Value, now: Timestamp) -> SchemaResult<Article> {
        let record = SchemaValidator::new(&self.schema).validate(raw, now)?;
        Ok(Article::from_normalized(&record))
    }
}

impl Default for ArticleSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceMetadata for ArticleSchema {
    fn readonly_fields(&self) -> &[&'static str] {
        self.options().readonly_fields()
    }

    fn unique_fields(&self) -> &[&'static str] {
        self.options().unique_fields()
    }
}
