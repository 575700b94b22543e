//! Configuration file
//!
//! A single JSON object; every key is optional.
//!
//! ```json
//! {
//!   "title_max_length": 1024,
//!   "url_max_length": 2048,
//!   "log_level": "warn",
//!   "log_format": "text"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::article::{SchemaLimits, TITLE_MAX_LENGTH, URL_MAX_LENGTH};
use crate::cli::{CliError, CliResult};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Truncation length for titles (default 1024)
    #[serde(default = "default_title_max_length")]
    pub title_max_length: usize,

    /// Maximum URL length (default 2048)
    #[serde(default = "default_url_max_length")]
    pub url_max_length: usize,

    /// Filter directive for the log subscriber (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_title_max_length() -> usize {
    TITLE_MAX_LENGTH
}
fn default_url_max_length() -> usize {
    URL_MAX_LENGTH
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title_max_length: default_title_max_length(),
            url_max_length: default_url_max_length(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.title_max_length == 0 {
            return Err(CliError::config_error("title_max_length must be > 0"));
        }

        if self.url_max_length == 0 {
            return Err(CliError::config_error("url_max_length must be > 0"));
        }

        if self.log_level.trim().is_empty() {
            return Err(CliError::config_error("log_level must not be empty"));
        }

        Ok(())
    }

    /// Length bounds for the article schema.
    pub fn limits(&self) -> SchemaLimits {
        SchemaLimits {
            title_max_length: self.title_max_length,
            url_max_length: self.url_max_length,
        }
    }
}
