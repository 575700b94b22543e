//! Schema Invariant Tests
//!
//! Normalization of raw article input:
//! - Validation is deterministic and never mutates input
//! - All required fields must be present
//! - Titles are trimmed and silently truncated
//! - Empty title and missing title stay distinct
//! - Every offending field is reported, in declaration order

use readinglist::article::{ArticleSchema, SchemaLimits, TITLE_MAX_LENGTH};
use readinglist::schema::{FieldError, ResourceMetadata, SchemaErrorCode};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

const NOW: u64 = 1_700_000_000_000;

fn minimal() -> Value {
    json!({
        "url": "http://example.com/article",
        "added_by": "laptop"
    })
}

fn with(key: &str, value: Value) -> Value {
    let mut raw = minimal();
    raw[key] = value;
    raw
}

// =============================================================================
// Validation Determinism Tests
// =============================================================================

/// Same input validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let schema = ArticleSchema::new();
    let first = schema.validate(&minimal(), NOW).unwrap();

    for _ in 0..100 {
        assert_eq!(schema.validate(&minimal(), NOW).unwrap(), first);
    }
}

/// Raw input is left untouched.
#[test]
fn test_input_not_mutated() {
    let raw = with("title", json!("  padded  "));
    let before = raw.clone();
    ArticleSchema::new().validate(&raw, NOW).unwrap();
    assert_eq!(raw, before);
}

// =============================================================================
// Defaults Tests
// =============================================================================

#[test]
fn test_defaults_applied() {
    let article = ArticleSchema::new().validate(&minimal(), NOW).unwrap();

    assert!(!article.archived);
    assert!(!article.favorite);
    assert!(article.unread);
    assert!(article.is_article);
    assert_eq!(article.excerpt, "");
    assert_eq!(article.read_position, 0);
    assert_eq!(article.added_on, NOW);
    assert_eq!(article.title, None);
    assert_eq!(article.marked_read_by, None);
    assert_eq!(article.marked_read_on, None);
    assert_eq!(article.word_count, None);
    assert_eq!(article.preview, None);
}

/// Validation alone derives nothing.
#[test]
fn test_validation_does_not_derive() {
    let article = ArticleSchema::new().validate(&minimal(), NOW).unwrap();
    assert_eq!(article.resolved_url, None);
    assert_eq!(article.resolved_title, None);
}

// =============================================================================
// Title Tests
// =============================================================================

/// 2000 characters normalize to exactly 1024, no error.
#[test]
fn test_title_truncated() {
    let raw = with("title", json!("a".repeat(2000)));
    let article = ArticleSchema::new().validate(&raw, NOW).unwrap();

    assert_eq!(article.title, Some("a".repeat(TITLE_MAX_LENGTH)));
}

/// Truncation counts characters, not bytes.
#[test]
fn test_title_truncated_by_chars() {
    let raw = with("title", json!("é".repeat(1500)));
    let title = ArticleSchema::new().validate(&raw, NOW).unwrap().title.unwrap();

    assert_eq!(title.chars().count(), TITLE_MAX_LENGTH);
}

/// Trimming happens before truncation.
#[test]
fn test_title_trimmed_then_truncated() {
    let schema = ArticleSchema::with_limits(SchemaLimits {
        title_max_length: 4,
        ..SchemaLimits::default()
    });
    let article = schema.validate(&with("title", json!("   abcdef")), NOW).unwrap();
    assert_eq!(article.title.as_deref(), Some("abcd"));
}

#[test]
fn test_empty_title_distinct_from_missing() {
    let schema = ArticleSchema::new();

    let empty = schema.validate(&with("title", json!("")), NOW).unwrap();
    assert_eq!(empty.title.as_deref(), Some(""));

    let blank = schema.validate(&with("title", json!("   ")), NOW).unwrap();
    assert_eq!(blank.title.as_deref(), Some(""));

    let missing = schema.validate(&minimal(), NOW).unwrap();
    assert_eq!(missing.title, None);

    let null = schema.validate(&with("title", Value::Null), NOW).unwrap();
    assert_eq!(null.title, None);
}

// =============================================================================
// Required Field Tests
// =============================================================================

#[test]
fn test_missing_url_rejected() {
    let raw = json!({ "added_by": "laptop" });
    let err = ArticleSchema::new().validate(&raw, NOW).unwrap_err();

    assert_eq!(err.code(), SchemaErrorCode::InvalidField);
    assert_eq!(err.error_for("url"), Some(&FieldError::required("url")));
}

/// An empty or whitespace url counts as missing.
#[test]
fn test_blank_url_is_missing() {
    for url in ["", "   "] {
        let err = ArticleSchema::new()
            .validate(&with("url", json!(url)), NOW)
            .unwrap_err();
        assert_eq!(err.error_for("url"), Some(&FieldError::required("url")));
    }
}

/// Whitespace-only device names are too short, not missing.
#[test]
fn test_blank_device_name() {
    let err = ArticleSchema::new()
        .validate(&with("added_by", json!("   ")), NOW)
        .unwrap_err();
    assert_eq!(err.error_for("added_by"), Some(&FieldError::too_short("added_by", 1)));
}

#[test]
fn test_device_name_trimmed() {
    let article = ArticleSchema::new()
        .validate(&with("added_by", json!("  phone  ")), NOW)
        .unwrap();
    assert_eq!(article.added_by, "phone");
}

// =============================================================================
// Type Tests
// =============================================================================

#[test]
fn test_malformed_urls_rejected() {
    for url in ["not a url", "example.com/path", "mailto:someone@example.com"] {
        let err = ArticleSchema::new()
            .validate(&with("url", json!(url)), NOW)
            .unwrap_err();
        let reason = &err.error_for("url").unwrap().reason;
        assert!(reason.starts_with("Must be a URL"), "{}: {}", url, reason);
    }
}

#[test]
fn test_url_length_bound() {
    let long = format!("http://example.com/{}", "p".repeat(2100));
    let err = ArticleSchema::new()
        .validate(&with("url", json!(long)), NOW)
        .unwrap_err();
    assert_eq!(err.error_for("url"), Some(&FieldError::too_long("url", 2048)));
}

#[test]
fn test_negative_read_position_rejected() {
    let err = ArticleSchema::new()
        .validate(&with("read_position", json!(-1)), NOW)
        .unwrap_err();
    assert_eq!(
        err.error_for("read_position"),
        Some(&FieldError::below_minimum("read_position", -1, 0))
    );
}

#[test]
fn test_boolean_coercion() {
    let schema = ArticleSchema::new();
    let cases = [
        (json!(false), false),
        (json!("false"), false),
        (json!("0"), false),
        (json!(0), false),
        (json!("TRUE"), true),
        (json!(1), true),
    ];

    for (value, expected) in cases {
        let article = schema.validate(&with("favorite", value.clone()), NOW).unwrap();
        assert_eq!(article.favorite, expected, "{}", value);
    }

    assert!(schema.validate(&with("favorite", json!("yes")), NOW).is_err());
    assert!(schema.validate(&with("favorite", json!(2)), NOW).is_err());
}

#[test]
fn test_numeric_strings_accepted() {
    let article = ArticleSchema::new()
        .validate(&with("word_count", json!(" 420 ")), NOW)
        .unwrap();
    assert_eq!(article.word_count, Some(420));
}

#[test]
fn test_float_rejected() {
    let err = ArticleSchema::new()
        .validate(&with("read_position", json!(1.5)), NOW)
        .unwrap_err();
    assert_eq!(
        err.error_for("read_position"),
        Some(&FieldError::type_mismatch("read_position", "integer", "float"))
    );
}

#[test]
fn test_non_object_root() {
    let err = ArticleSchema::new().validate(&json!([1, 2]), NOW).unwrap_err();
    assert_eq!(err.field(), Some("$root"));
}

// =============================================================================
// Error Collection Tests
// =============================================================================

/// Every failing field is listed, in declaration order.
#[test]
fn test_all_errors_collected() {
    let raw = json!({
        "added_by": " ",
        "read_position": -3,
        "favorite": "maybe"
    });
    let err = ArticleSchema::new().validate(&raw, NOW).unwrap_err();
    let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();

    assert_eq!(fields, vec!["url", "added_by", "favorite", "read_position"]);
}

#[test]
fn test_unknown_fields_dropped() {
    let raw = with("colour", json!("blue"));
    let article = ArticleSchema::new().validate(&raw, NOW).unwrap();
    assert_eq!(article.field("colour"), None);
    assert!(!article.to_json().as_object().unwrap().contains_key("colour"));
}

// =============================================================================
// Metadata Tests
// =============================================================================

#[test]
fn test_metadata_declared() {
    let schema = ArticleSchema::new();

    assert!(schema.is_readonly("url"));
    assert!(schema.is_readonly("stored_on"));
    assert!(!schema.is_readonly("title"));
    assert!(schema.is_unique("url"));
    assert!(schema.is_unique("resolved_url"));
    assert!(!schema.is_unique("preview"));
}
