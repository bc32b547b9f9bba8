//! Execute jqlite queries against JSON input

use log::debug;

use super::{CliError, Report, build_report};
use crate::{
    convert::parse_json,
    evaluator::{EvalOptions, Evaluator},
    output::{to_display, to_json},
    parser::parse_query,
    value::Value,
};

/// How successful results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented display format (strings unescaped)
    #[default]
    Display,
    /// Compact, escaped JSON
    Json,
}

/// Options for a query run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The filter program
    pub query: String,
    /// JSON input text
    pub input: Option<String>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Produce a step-by-step report instead of a plain result
    pub visualize: bool,
    pub format: OutputFormat,
    pub eval: EvalOptions,
}

/// Result of a run
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully
    Success(Value),
    /// Visualization report; it carries its own error message on failure
    Report(Report),
}

impl RunResult {
    /// Text the binary prints on stdout for this result.
    pub fn render(&self, format: OutputFormat) -> String {
        match self {
            RunResult::SyntaxValid => "Syntax is valid".to_string(),
            RunResult::Success(value) => match format {
                OutputFormat::Display => to_display(value),
                OutputFormat::Json => to_json(value),
            },
            RunResult::Report(report) => report.to_string(),
        }
    }
}

/// Execute a jqlite run
///
/// Whitespace-only input counts as "no input value" and surfaces
/// [`QueryError::NullInput`](crate::QueryError::NullInput).
pub fn execute(options: &RunOptions) -> Result<RunResult, CliError> {
    if options.visualize {
        let report = build_report(&options.query, options.input.as_deref(), options.eval);
        return Ok(RunResult::Report(report));
    }

    let query = parse_query(&options.query)?;
    debug!("parsed query: {}", query);

    if options.syntax_only {
        return Ok(RunResult::SyntaxValid);
    }

    let text = options.input.as_deref().ok_or(CliError::NoInput)?;
    let document = if text.trim().is_empty() {
        None
    } else {
        Some(parse_json(text)?)
    };
    debug!("input parsed: {}", document.as_ref().map_or("none", Value::type_name));

    let result = Evaluator::with_options(options.eval).evaluate_input(&query, document.as_ref())?;
    Ok(RunResult::Success(result))
}
