//! Schema type definitions
//!
//! Supported field kinds:
//! - url: absolute URL, trimmed
//! - text: plain string, untouched
//! - device_name: trimmed, non-empty
//! - title: trimmed, truncated, empty string kept distinct from null
//! - int: 64-bit signed integer with optional lower bound
//! - bool: boolean with string/number coercion
//! - timestamp: unsigned epoch milliseconds, optionally auto-filled with "now"

use serde::Serialize;
use serde_json::Value;

/// Tagged optional distinguishing a missing key from an explicit `null`.
///
/// Generic optional handling would collapse `""`, `null` and "not sent"
/// into one state. Title-like fields need all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
    /// Key not present in the raw mapping
    Missing,
    /// Key present with an explicit `null`
    Null,
    /// Key present with a value
    Value(T),
}

impl<'a> Presence<&'a Value> {
    /// Looks up `key` in a raw JSON mapping.
    pub fn lookup(raw: &'a serde_json::Map<String, Value>, key: &str) -> Self {
        match raw.get(key) {
            None => Presence::Missing,
            Some(Value::Null) => Presence::Null,
            Some(value) => Presence::Value(value),
        }
    }
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Timestamp(u64),
    Text(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<u64> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// Field kinds understood by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Absolute URL with a host
    Url { max_len: usize },
    /// Plain string, not trimmed
    Text,
    /// Device identifier, trimmed and non-empty
    DeviceName,
    /// Title-like string, trimmed then truncated to `max_len` characters
    Title { max_len: usize },
    /// Integer with an optional lower bound
    Int { min: Option<i64> },
    /// Boolean
    Bool,
    /// Epoch milliseconds
    Timestamp,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Url { .. } => "url",
            FieldType::Text => "string",
            FieldType::DeviceName => "device name",
            FieldType::Title { .. } => "title",
            FieldType::Int { .. } => "integer",
            FieldType::Bool => "boolean",
            FieldType::Timestamp => "timestamp",
        }
    }

    /// Whether an explicit `null` is kept as a value rather than
    /// replaced by the declared default.
    pub fn keeps_explicit_null(&self) -> bool {
        matches!(self, FieldType::Title { .. })
    }
}

/// What a field resolves to when no usable value was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    /// Field must be submitted
    Required,
    /// Fixed value (may be `FieldValue::Null`)
    Value(FieldValue),
    /// Current server time
    Now,
}

/// Field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
    pub default: FieldDefault,
}

impl FieldDef {
    pub fn new(name: &'static str, field_type: FieldType, default: FieldDefault) -> Self {
        Self {
            name,
            field_type,
            default,
        }
    }

    /// Required field
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, FieldDefault::Required)
    }

    /// Optional field defaulting to `null`
    pub fn nullable(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, FieldDefault::Value(FieldValue::Null))
    }

    /// Optional field with a fixed default
    pub fn with_default(name: &'static str, field_type: FieldType, value: FieldValue) -> Self {
        Self::new(name, field_type, FieldDefault::Value(value))
    }

    /// Timestamp defaulting to the current time
    pub fn auto_now(name: &'static str) -> Self {
        Self::new(name, FieldType::Timestamp, FieldDefault::Now)
    }

    pub fn is_required(&self) -> bool {
        self.default == FieldDefault::Required
    }
}

/// Constraints the schema declares but does not enforce.
///
/// The persistence collaborator reads these to enforce immutability and
/// uniqueness.
pub trait ResourceMetadata {
    /// Fields that cannot change once the record exists.
    fn readonly_fields(&self) -> &[&'static str];

    /// Fields whose values must be unique across stored records.
    fn unique_fields(&self) -> &[&'static str];

    fn is_readonly(&self, field: &str) -> bool {
        self.readonly_fields().contains(&field)
    }

    fn is_unique(&self, field: &str) -> bool {
        self.unique_fields().contains(&field)
    }
}

/// Schema-level options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOptions {
    pub readonly_fields: Vec<&'static str>,
    pub unique_fields: Vec<&'static str>,
}

impl SchemaOptions {
    /// Options every resource carries: the host-managed `id` and
    /// `last_modified` are read-only.
    pub fn resource_defaults() -> Self {
        Self {
            readonly_fields: vec!["id", "last_modified"],
            unique_fields: Vec::new(),
        }
    }

    /// Prepend resource-specific read-only fields.
    pub fn readonly(mut self, fields: &[&'static str]) -> Self {
        let mut merged = fields.to_vec();
        merged.append(&mut self.readonly_fields);
        self.readonly_fields = merged;
        self
    }

    /// Prepend resource-specific unique fields.
    pub fn unique(mut self, fields: &[&'static str]) -> Self {
        let mut merged = fields.to_vec();
        merged.append(&mut self.unique_fields);
        self.unique_fields = merged;
        self
    }
}

impl ResourceMetadata for SchemaOptions {
    fn readonly_fields(&self) -> &[&'static str] {
        &self.readonly_fields
    }

    fn unique_fields(&self) -> &[&'static str] {
        &self.unique_fields
    }
}

/// Complete schema definition: ordered fields plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
    pub options: SchemaOptions,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldDef>, options: SchemaOptions) -> Self {
        Self {
            name,
            fields,
            options,
        }
    }

    /// Looks up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
