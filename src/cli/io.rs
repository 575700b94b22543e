//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::article::Article;

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    read_json(io::stdin().lock())
}

/// Read one JSON document from `reader`.
pub fn read_json<R: Read>(mut reader: R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&input)?;
    Ok(value)
}

/// Read a stored record from a file.
pub fn read_prior(path: &Path) -> CliResult<Article> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read prior record {:?}: {}", path, e))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::io_error(format!("Invalid prior record: {}", e)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_line(&error_body(err))
}

pub(crate) fn error_body(err: &CliError) -> Value {
    json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.to_string(),
        "errors": err.field_errors()
    })
}

fn write_line(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
