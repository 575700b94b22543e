//! CLI module for readinglist
//!
//! Provides command-line interface for:
//! - validate: Normalize a record
//! - create: Process a new record
//! - patch: Process a partial update
//! - metadata: Print field declarations

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{create, metadata, patch, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json, read_prior, read_request, write_error, write_response};
