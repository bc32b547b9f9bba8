//! Step-by-step report of a query run.
//!
//! The report is one JSON object:
//!
//! ```text
//! {"tokens": [...], "parseSteps": [...], "executionTrace": [{"step": ...}], "finalResult": ...}
//! ```
//!
//! When any phase fails the remaining arrays stay empty and an `"error"`
//! member replaces `"finalResult"`.

use std::fmt;

use serde_json::{Map, Value as Json, json};

use super::CliError;
use crate::{
    ast::Token,
    convert::{parse_json, value_to_json},
    evaluator::{EvalOptions, Evaluator},
    lexer::Lexer,
    parser::Parser,
    trace::ExecutionTrace,
};

/// A finished visualization report
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    body: Map<String, Json>,
}

impl Report {
    /// True when the run failed and the report carries an `"error"` member.
    pub fn is_error(&self) -> bool {
        self.body.contains_key("error")
    }

    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Json::as_str)
    }

    pub fn get(&self, section: &str) -> Option<&Json> {
        self.body.get(section)
    }

    pub fn into_json(self) -> Json {
        Json::Object(self.body)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Json::Object(self.body.clone()))
    }
}

/// Runs a query with every phase recorded.
pub fn build_report(query: &str, input: Option<&str>, options: EvalOptions) -> Report {
    let mut body = Map::new();
    for section in ["tokens", "parseSteps", "executionTrace"] {
        body.insert(section.to_string(), json!([]));
    }

    match run_phases(query, input, options, &mut body) {
        Ok(result) => {
            body.insert("finalResult".to_string(), result);
        }
        Err(e) => {
            body.insert("error".to_string(), Json::String(e.to_string()));
        }
    }
    Report { body }
}

fn run_phases(
    query: &str,
    input: Option<&str>,
    options: EvalOptions,
    body: &mut Map<String, Json>,
) -> Result<Json, CliError> {
    let tokens = Lexer::new(query)
        .tokenize()
        .map_err(|e| CliError::Parse(e.into()))?;
    body.insert(
        "tokens".to_string(),
        tokens
            .iter()
            .filter(|(token, _)| *token != Token::Eof)
            .map(|(token, _)| Json::String(token.to_string()))
            .collect(),
    );

    let mut parser = Parser::new(Lexer::new(query))?.record_steps();
    let parsed = parser.parse();
    body.insert("parseSteps".to_string(), parser.take_steps().into());
    let parsed = parsed?;

    let text = input.ok_or(CliError::NoInput)?;
    let document = if text.trim().is_empty() {
        None
    } else {
        Some(parse_json(text)?)
    };

    let mut trace = ExecutionTrace::new();
    let result = Evaluator::with_options(options)
        .with_trace(&mut trace)
        .evaluate_input(&parsed, document.as_ref());
    body.insert("executionTrace".to_string(), trace.to_json());

    Ok(value_to_json(&result?))
}
