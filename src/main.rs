//! readinglist CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. The command has
//! already written its JSON error line to stdout; the human-readable form
//! goes to stderr and the process exits non-zero.

use readinglist::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("[{}] {}", e.severity(), e);
        std::process::exit(1);
    }
}
