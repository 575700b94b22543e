//! The article record

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::clock::Timestamp;
use crate::schema::NormalizedRecord;

/// Field names in declaration order.
pub const FIELDS: [&str; 17] = [
    "url",
    "preview",
    "title",
    "added_by",
    "added_on",
    "stored_on",
    "archived",
    "favorite",
    "unread",
    "is_article",
    "excerpt",
    "read_position",
    "marked_read_by",
    "marked_read_on",
    "word_count",
    "resolved_url",
    "resolved_title",
];

/// A reading-list article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub preview: Option<String>,
    pub title: Option<String>,
    pub added_by: String,
    pub added_on: Timestamp,
    pub stored_on: Timestamp,
    pub archived: bool,
    pub favorite: bool,
    pub unread: bool,
    pub is_article: bool,
    pub excerpt: String,
    pub read_position: u64,
    pub marked_read_by: Option<String>,
    pub marked_read_on: Option<Timestamp>,
    pub word_count: Option<i64>,
    pub resolved_url: Option<String>,
    pub resolved_title: Option<String>,
}

impl Article {
    /// Builds a typed article from values the article schema produced.
    ///
    /// Every field is declared by the schema, so lookups only miss when the
    /// record came from a different schema; those fall back to the zero value.
    pub fn from_normalized(record: &NormalizedRecord) -> Self {

        Self {
            url: record.text("url").unwrap_or_default(),
            preview: record.text("preview"),
            title: record.text("title"),
            added_by: record.text("added_by").unwrap_or_default(),
            added_on: record.timestamp("added_on").unwrap_or_default(),
            stored_on: record.timestamp("stored_on").unwrap_or_default(),
            archived: record.bool("archived").unwrap_or(false),
            favorite: record.bool("favorite").unwrap_or(false),
            unread: record.bool("unread").unwrap_or(true),
            is_article: record.bool("is_article").unwrap_or(true),
            excerpt: record.text("excerpt").unwrap_or_default(),
            read_position: record
                .int("read_position")
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or_default(),
            marked_read_by: record.text("marked_read_by"),
            marked_read_on: record.timestamp("marked_read_on"),
            word_count: record.int("word_count"),
            resolved_url: record.text("resolved_url"),
            resolved_title: record.text("resolved_title"),
        }
    }

    /// Whether the article has been marked as read.
    pub fn is_read(&self) -> bool {
        !self.unread
    }

    /// Whether any mark-as-read information is present.
    pub fn has_read_marker(&self) -> bool {
        self.marked_read_by.is_some() || self.marked_read_on.is_some()
    }

    /// Returns one field as JSON, or `None` for an unknown name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "url" => json!(self.url),
            "preview" => json!(self.preview),
            "title" => json!(self.title),
            "added_by" => json!(self.added_by),
            "added_on" => json!(self.added_on),
            "stored_on" => json!(self.stored_on),
            "archived" => json!(self.archived),
            "favorite" => json!(self.favorite),
            "unread" => json!(self.unread),
            "is_article" => json!(self.is_article),
            "excerpt" => json!(self.excerpt),
            "read_position" => json!(self.read_position),
            "marked_read_by" => json!(self.marked_read_by),
            "marked_read_on" => json!(self.marked_read_on),
            "word_count" => json!(self.word_count),
            "resolved_url" => json!(self.resolved_url),
            "resolved_title" => json!(self.resolved_title),
            _ => return None,
        };
        Some(value)
    }

    /// Returns the whole record as a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = FIELDS
            .iter()
            .filter_map(|name| self.field(name).map(|v| (name.to_string(), v)))
            .collect();
        Value::Object(map)
    }
}
