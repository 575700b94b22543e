//! Schema validator producing normalized records from raw input
//!
//! Normalization semantics:
//! - Declared fields are read in declaration order
//! - Undeclared keys are ignored
//! - An empty string counts as "not submitted", except for title fields
//! - An explicit `null` counts as "not submitted", except for title fields
//! - Missing values resolve to the declared default, or fail if required
//! - Every failing field is reported, not only the first
//!
//! The validator does not mutate its input and reads no clock: the caller
//! passes `now` for auto-now timestamps.

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::clock::Timestamp;

use super::errors::{FieldError, SchemaError, SchemaResult};
use super::types::{FieldDef, FieldDefault, FieldType, FieldValue, Presence, Schema};

/// Field values after normalization, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    values: BTreeMap<&'static str, FieldValue>,
}

impl NormalizedRecord {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_int)
    }

    pub fn timestamp(&self, field: &str) -> Option<Timestamp> {
        self.get(field).and_then(FieldValue::as_timestamp)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(FieldValue::as_text).map(str::to_owned)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, field: &'static str, value: FieldValue) {
        self.values.insert(field, value);
    }
}

/// Schema validator that normalizes raw records.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates and normalizes a raw record.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` listing every field that is missing, of the
    /// wrong type, or out of bounds. A non-object root is reported on the
    /// `$root` pseudo-field.
    pub fn validate(&self, raw: &Value, now: Timestamp) -> SchemaResult<NormalizedRecord> {
        let obj = raw.as_object().ok_or_else(|| {
            SchemaError::single(FieldError::type_mismatch("$root", "object", json_type_name(raw)))
        })?;

        let mut record = NormalizedRecord::default();
        let mut errors = Vec::new();

        for def in &self.schema.fields {
            match normalize_field(def, Presence::lookup(obj, def.name), now) {
                Ok(value) => record.insert(def.name, value),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(SchemaError::invalid(errors))
        }
    }
}

/// Normalizes one field: type check, prepare, bound check, default.
fn normalize_field(
    def: &FieldDef,
    presence: Presence<&Value>,
    now: Timestamp,
) -> Result<FieldValue, FieldError> {
    let submitted = match presence {
        Presence::Value(value) => deserialize(def, value)?,
        Presence::Null if def.field_type.keeps_explicit_null() => Some(FieldValue::Null),
        Presence::Null | Presence::Missing => None,
    };

    match submitted {
        Some(value) => Ok(value),
        None => resolve_default(def, now),
    }
}

fn resolve_default(def: &FieldDef, now: Timestamp) -> Result<FieldValue, FieldError> {
    match &def.default {
        FieldDefault::Required => Err(FieldError::required(def.name)),
        FieldDefault::Value(value) => Ok(value.clone()),
        FieldDefault::Now => Ok(FieldValue::Timestamp(now)),
    }
}

/// Converts a submitted value to its field type.
///
/// Returns `None` when the value counts as not submitted.
fn deserialize(def: &FieldDef, value: &Value) -> Result<Option<FieldValue>, FieldError> {
    let name = def.name;

    match &def.field_type {
        FieldType::Url { max_len } => {
            let s = expect_str(name, def, value)?.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if s.chars().count() > *max_len {
                return Err(FieldError::too_long(name, *max_len));
            }
            let parsed = Url::parse(s).map_err(|e| FieldError::invalid_url(name, e))?;
            if !parsed.has_host() {
                return Err(FieldError::invalid_url(name, "missing host"));
            }
            Ok(Some(FieldValue::Text(s.to_owned())))
        }
        FieldType::Text => {
            let s = expect_str(name, def, value)?;
            if s.is_empty() {
                return Ok(None);
            }
            Ok(Some(FieldValue::Text(s.to_owned())))
        }
        FieldType::DeviceName => {
            let s = expect_str(name, def, value)?;
            if s.is_empty() {
                return Ok(None);
            }
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(FieldError::too_short(name, 1));
            }
            Ok(Some(FieldValue::Text(trimmed.to_owned())))
        }
        FieldType::Title { max_len } => {
            let s = expect_str(name, def, value)?;
            // Truncation is silent: the bound can never fail afterwards.
            let title: String = s.trim().chars().take(*max_len).collect();
            Ok(Some(FieldValue::Text(title)))
        }
        FieldType::Int { min } => {
            let Some(n) = parse_int(name, def, value)? else {
                return Ok(None);
            };
            if let Some(min) = min {
                if n < *min {
                    return Err(FieldError::below_minimum(name, n, *min));
                }
            }
            Ok(Some(FieldValue::Int(n)))
        }
        FieldType::Timestamp => {
            Ok(parse_timestamp(name, def, value)?.map(FieldValue::Timestamp))
        }
        FieldType::Bool => Ok(parse_bool(name, def, value)?.map(FieldValue::Bool)),
    }
}

fn expect_str<'v>(name: &str, def: &FieldDef, value: &'v Value) -> Result<&'v str, FieldError> {
    value
        .as_str()
        .ok_or_else(|| type_error(name, def, value))
}

/// Accepts JSON integers and decimal strings. `Ok(None)` for a blank string.
fn parse_int(name: &str, def: &FieldDef, value: &Value) -> Result<Option<i64>, FieldError> {
    match value {
        Value::Number(n) => n.as_i64().map(Some).ok_or_else(|| type_error(name, def, value)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map(Some)
                .map_err(|_| FieldError::new(name, format!("\"{}\" is not a number", s)))
        }
        _ => Err(type_error(name, def, value)),
    }
}

/// Accepts unsigned JSON integers and decimal strings. `Ok(None)` for a
/// blank string.
fn parse_timestamp(
    name: &str,
    def: &FieldDef,
    value: &Value,
) -> Result<Option<Timestamp>, FieldError> {
    match value {
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(millis), _) => Ok(Some(millis)),
            (None, Some(negative)) => Err(FieldError::below_minimum(name, negative, 0)),
            (None, None) => Err(type_error(name, def, value)),
        },
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(millis) = s.parse::<Timestamp>() {
                return Ok(Some(millis));
            }
            match s.parse::<i64>() {
                Ok(negative) => Err(FieldError::below_minimum(name, negative, 0)),
                Err(_) => Err(FieldError::new(name, format!("\"{}\" is not a number", s))),
            }
        }
        _ => Err(type_error(name, def, value)),
    }
}

/// Accepts JSON booleans, 0/1, and "true"/"false"/"1"/"0" in any case.
/// `Ok(None)` for a blank string.
fn parse_bool(name: &str, def: &FieldDef, value: &Value) -> Result<Option<bool>, FieldError> {
    match value {
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(type_error(name, def, value)),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(FieldError::new(
                name,
                format!("\"{}\" is neither in (false, 0) nor in (true, 1)", other),
            )),
        },
        _ => Err(type_error(name, def, value)),
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a type mismatch error.
fn type_error(name: &str, def: &FieldDef, actual: &Value) -> FieldError {
    FieldError::type_mismatch(name, def.field_type.type_name(), json_type_name(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaOptions;
    use serde_json::json;

    const NOW: Timestamp = 1_700_000_000_000;

    fn sample_schema() -> Schema {
        Schema::new(
            "sample",
            vec![
                FieldDef::required("link", FieldType::Url { max_len: 64 }),
                FieldDef::nullable("name", FieldType::Title { max_len: 5 }),
                FieldDef::required("device", FieldType::DeviceName),
                FieldDef::with_default("count", FieldType::Int { min: Some(0) }, FieldValue::Int(0)),
                FieldDef::with_default("flag", FieldType::Bool, FieldValue::Bool(true)),
                FieldDef::with_default("note", FieldType::Text, FieldValue::Text(String::new())),
                FieldDef::auto_now("seen_on"),
                FieldDef::nullable("done_on", FieldType::Timestamp),
            ],
            SchemaOptions::resource_defaults(),
        )
    }

    fn validate(raw: Value) -> SchemaResult<NormalizedRecord> {
        let schema = sample_schema();
        SchemaValidator::new(&schema).validate(&raw, NOW)
    }

    #[test]
    fn test_defaults_applied() {
        let record = validate(json!({ "link": "http://a.b/", "device": "phone" })).unwrap();

        assert_eq!(record.get("name"), Some(&FieldValue::Null));
        assert_eq!(record.int("count"), Some(0));
        assert_eq!(record.bool("flag"), Some(true));
        assert_eq!(record.text("note"), Some(String::new()));
        assert_eq!(record.timestamp("seen_on"), Some(NOW));
        assert_eq!(record.get("done_on"), Some(&FieldValue::Null));
        assert_eq!(record.len(), 8);
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = validate(json!([1, 2])).unwrap_err();
        assert_eq!(err.field(), Some("$root"));
        assert!(err.errors()[0].reason.contains("array"));
    }

    #[test]
    fn test_all_errors_collected_in_order() {
        let err = validate(json!({ "count": -3, "flag": "maybe" })).unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["link", "device", "count", "flag"]);
    }

    #[test]
    fn test_undeclared_keys_ignored() {
        let record = validate(json!({
            "link": "http://a.b/",
            "device": "phone",
            "extra": 1
        }))
        .unwrap();
        assert!(record.get("extra").is_none());
    }

    #[test]
    fn test_title_empty_distinct_from_missing() {
        let empty = validate(json!({ "link": "http://a.b/", "device": "d", "name": "" })).unwrap();
        assert_eq!(empty.text("name"), Some(String::new()));

        let missing = validate(json!({ "link": "http://a.b/", "device": "d" })).unwrap();
        assert_eq!(missing.get("name"), Some(&FieldValue::Null));

        let null = validate(json!({ "link": "http://a.b/", "device": "d", "name": null })).unwrap();
        assert_eq!(null.get("name"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_title_trimmed_then_truncated() {
        let record = validate(json!({
            "link": "http://a.b/",
            "device": "d",
            "name": "   abcdefgh  "
        }))
        .unwrap();
        assert_eq!(record.text("name"), Some("abcde".to_string()));
    }

    #[test]
    fn test_title_truncates_by_character() {
        let record = validate(json!({
            "link": "http://a.b/",
            "device": "d",
            "name": "ééééééé"
        }))
        .unwrap();
        assert_eq!(record.text("name"), Some("ééééé".to_string()));
    }

    #[test]
    fn test_device_name_trimmed() {
        let record = validate(json!({ "link": "http://a.b/", "device": "  laptop " })).unwrap();
        assert_eq!(record.text("device"), Some("laptop".to_string()));
    }

    #[test]
    fn test_device_name_blank_rejected() {
        let err = validate(json!({ "link": "http://a.b/", "device": "   " })).unwrap_err();
        let e = err.error_for("device").unwrap();
        assert!(e.reason.contains("minimum length 1"));
    }

    #[test]
    fn test_required_null_rejected() {
        let err = validate(json!({ "link": null, "device": "d" })).unwrap_err();
        assert_eq!(err.error_for("link").unwrap().reason, "Required");
    }

    #[test]
    fn test_url_must_be_absolute() {
        let err = validate(json!({ "link": "/relative/path", "device": "d" })).unwrap_err();
        assert!(err.error_for("link").unwrap().reason.starts_with("Must be a URL"));

        let err = validate(json!({ "link": "mailto:someone@example.com", "device": "d" })).unwrap_err();
        assert!(err.error_for("link").unwrap().reason.contains("missing host"));
    }

    #[test]
    fn test_url_trimmed_and_kept_verbatim() {
        let record = validate(json!({ "link": "  HTTP://Example.com/A?b=1  ", "device": "d" })).unwrap();
        assert_eq!(record.text("link"), Some("HTTP://Example.com/A?b=1".to_string()));
    }

    #[test]
    fn test_url_length_bound() {
        let long = format!("http://a.b/{}", "x".repeat(64));
        let err = validate(json!({ "link": long, "device": "d" })).unwrap_err();
        assert!(err.error_for("link").unwrap().reason.contains("maximum length 64"));
    }

    #[test]
    fn test_int_range_and_coercion() {
        let record = validate(json!({ "link": "http://a.b/", "device": "d", "count": "12" })).unwrap();
        assert_eq!(record.int("count"), Some(12));

        let err = validate(json!({ "link": "http://a.b/", "device": "d", "count": -1 })).unwrap_err();
        assert_eq!(
            err.error_for("count").unwrap().reason,
            "-1 is less than minimum value 0"
        );

        let err = validate(json!({ "link": "http://a.b/", "device": "d", "count": 1.5 })).unwrap_err();
        assert!(err.error_for("count").unwrap().reason.contains("float"));
    }

    #[test]
    fn test_bool_coercion() {
        for (raw, expected) in [
            (json!(false), false),
            (json!("FALSE"), false),
            (json!("0"), false),
            (json!(0), false),
            (json!("true"), true),
            (json!(1), true),
        ] {
            let record = validate(json!({ "link": "http://a.b/", "device": "d", "flag": raw })).unwrap();
            assert_eq!(record.bool("flag"), Some(expected));
        }
    }

    #[test]
    fn test_null_falls_back_to_default() {
        let record = validate(json!({
            "link": "http://a.b/",
            "device": "d",
            "flag": null,
            "count": null,
            "seen_on": null
        }))
        .unwrap();
        assert_eq!(record.bool("flag"), Some(true));
        assert_eq!(record.int("count"), Some(0));
        assert_eq!(record.timestamp("seen_on"), Some(NOW));
    }

    #[test]
    fn test_timestamp_must_be_non_negative() {
        let err = validate(json!({ "link": "http://a.b/", "device": "d", "done_on": -5 })).unwrap_err();
        assert_eq!(
            err.error_for("done_on").unwrap().reason,
            "-5 is less than minimum value 0"
        );

        let err = validate(json!({ "link": "http://a.b/", "device": "d", "done_on": "-5" })).unwrap_err();
        assert_eq!(
            err.error_for("done_on").unwrap().reason,
            "-5 is less than minimum value 0"
        );
    }

    #[test]
    fn test_timestamp_accepts_full_unsigned_range() {
        let record = validate(json!({ "link": "http://a.b/", "device": "d", "done_on": u64::MAX })).unwrap();
        assert_eq!(record.timestamp("done_on"), Some(u64::MAX));

        let record = validate(json!({ "link": "http://a.b/", "device": "d", "done_on": " 1500 " })).unwrap();
        assert_eq!(record.timestamp("done_on"), Some(1_500));

        let err = validate(json!({ "link": "http://a.b/", "device": "d", "done_on": 1.5 })).unwrap_err();
        assert!(err.error_for("done_on").unwrap().reason.contains("float"));
    }

    #[test]
    fn test_text_kept_untrimmed() {
        let record = validate(json!({ "link": "http://a.b/", "device": "d", "note": "  hi " })).unwrap();
        assert_eq!(record.text("note"), Some("  hi ".to_string()));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let raw = json!({ "link": "http://a.b/", "device": "d", "name": "x" });
        let first = validate(raw.clone()).unwrap();
        for _ in 0..50 {
            assert_eq!(validate(raw.clone()).unwrap(), first);
        }
    }
}
