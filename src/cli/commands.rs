//! CLI command implementations
//!
//! Each command reads one document from stdin, runs it through the article
//! resource and writes one response line. The CLI never persists anything;
//! `patch` takes the stored record from a file.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::article::ArticleSchema;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::observability::{self, Event};
use crate::resource::ArticleResource;
use crate::schema::ResourceMetadata;

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_prior, read_request, write_error, write_response};

/// Parse arguments, run the command and report a failure on stdout.
///
/// The error is returned as well so the entry point can exit non-zero.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let result = Config::load_or_default(cli.config.as_deref()).and_then(|config| {
        observability::init(&config.log_level, config.log_format);
        debug!(
            event = %Event::ConfigLoaded,
            title_max_length = config.title_max_length,
            url_max_length = config.url_max_length,
            "configuration loaded"
        );
        run_command(&config, cli.command)
    });

    if let Err(e) = &result {
        write_error(e)?;
    }
    result
}

/// Dispatch a parsed command.
pub fn run_command(config: &Config, cmd: Command) -> CliResult<()> {
    let resource = build_resource(config);

    match cmd {
        Command::Validate => validate(&resource),
        Command::Create => create(&resource),
        Command::Patch { prior } => patch(&resource, &prior),
        Command::Metadata => metadata(&resource),
    }
}

fn build_resource(config: &Config) -> ArticleResource {
    let schema = ArticleSchema::with_limits(config.limits());
    ArticleResource::with_schema(schema, Arc::new(SystemClock))
}

/// Normalize a record without applying transitions
pub fn validate(resource: &ArticleResource) -> CliResult<()> {
    let raw = read_request()?;
    let candidate = resource.validate(&raw)?;
    write_response(candidate.to_json())
}

/// Process a new record
pub fn create(resource: &ArticleResource) -> CliResult<()> {
    let raw = read_request()?;
    let record = resource.create(&raw)?;
    write_response(record.to_json())
}

/// Merge changes onto the stored record at `prior_path`
pub fn patch(resource: &ArticleResource, prior_path: &Path) -> CliResult<()> {
    let prior = read_prior(prior_path)?;
    let changes = read_request()?;
    let record = resource.patch(&prior, &changes)?;
    write_response(record.to_json())
}

/// Print the read-only and unique field declarations
pub fn metadata(resource: &ArticleResource) -> CliResult<()> {
    write_response(metadata_body(resource))
}

fn metadata_body(resource: &ArticleResource) -> Value {
    let options = resource.metadata();
    json!({
        "readonly_fields": options.readonly_fields(),
        "unique_fields": options.unique_fields(),
    })
}
