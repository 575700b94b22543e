//! Schema Validator subsystem
//!
//! Declares field types, defaults and constraints, and turns raw client
//! input into normalized field values.
//!
//! # Design Principles
//!
//! - Pure: no I/O, no clock reads, input never mutated
//! - Field-level errors, all collected
//! - Empty string and absent value kept distinct where a field asks for it
//! - Read-only and unique fields are declared here, enforced by the host

mod errors;
mod types;
mod validator;

pub use errors::{FieldError, SchemaError, SchemaErrorCode, SchemaResult};
pub use types::{
    FieldDef, FieldDefault, FieldType, FieldValue, Presence, ResourceMetadata, Schema,
    SchemaOptions,
};
pub use validator::{NormalizedRecord, SchemaValidator};

pub(crate) use validator::json_type_name;
