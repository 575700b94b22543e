//! Article record and its schema

mod record;
mod schema;

pub use record::{Article, FIELDS};
pub use schema::{ArticleSchema, SchemaLimits, TITLE_MAX_LENGTH, URL_MAX_LENGTH};
