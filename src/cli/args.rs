//! CLI argument definitions using clap
//!
//! Commands:
//! - readinglist validate
//! - readinglist create
//! - readinglist patch --prior <path>
//! - readinglist metadata

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reading list article processor
#[derive(Parser, Debug)]
#[command(name = "readinglist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize a record from stdin without applying transitions
    Validate,

    /// Process a new record from stdin
    Create,

    /// Merge changes from stdin onto a stored record
    Patch {
        /// Stored record the changes apply to
        #[arg(long)]
        prior: PathBuf,
    },

    /// Print read-only and unique field names
    Metadata,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
