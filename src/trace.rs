//! Execution tracing for query evaluation.
//!
//! A [`TraceSink`] receives one human-readable line per evaluation step. It
//! is a passive observer: the evaluator never reads anything back from it.
//! The sink is borrowed mutably for the duration of one evaluation, so two
//! evaluations can never interleave their steps in the same trace.
//!
//! # Examples
//!
//! ```
//! use jqlite::{parse_query, Evaluator, ExecutionTrace, Value};
//!
//! let query = parse_query(".[0]").unwrap();
//! let input = Value::from(vec![Value::from(7)]);
//!
//! let mut trace = ExecutionTrace::new();
//! let result = Evaluator::new()
//!     .with_trace(&mut trace)
//!     .evaluate(&query, &input)
//!     .unwrap();
//!
//! assert_eq!(result, Value::from(7));
//! assert_eq!(trace.steps()[0], "Starting query execution");
//! ```

use serde_json::json;

/// Receives evaluation steps in the order they happen.
pub trait TraceSink {
    fn record(&mut self, step: &str);
}

/// A [`TraceSink`] that keeps every step in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionTrace {
    steps: Vec<String>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Renders the trace as a JSON array of `{"step": "..."}` objects.
    pub fn to_json(&self) -> serde_json::Value {
        self.steps.iter().map(|step| json!({ "step": step })).collect()
    }
}

impl TraceSink for ExecutionTrace {
    fn record(&mut self, step: &str) {
        self.steps.push(step.to_string());
    }
}

impl TraceSink for Vec<String> {
    fn record(&mut self, step: &str) {
        self.push(step.to_string());
    }
}
