//! CLI support for jqlite
//!
//! Provides programmatic access to the `jqlite` command's behavior so other
//! tools (for example a web front end) can embed it without spawning a
//! process.

mod run;
mod visualize;

pub use run::{execute, OutputFormat, RunOptions, RunResult};
pub use visualize::{build_report, Report};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Query syntax error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::QueryError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Pass a FILE or pipe JSON to stdin.")]
    NoInput,
}
