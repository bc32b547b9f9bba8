use log::{Level, debug, log_enabled, trace};
use thiserror::Error;

use crate::{
    ast::{Condition, Query},
    trace::TraceSink,
    value::Value,
};

/// Default bound on evaluator recursion.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Errors that can occur during query evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The operation needed an object or array and got something else
    #[error("Type error: cannot {operation} on {actual} (expected {expected})")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Key absent from an object
    #[error("Field '{0}' not found in object")]
    FieldNotFound(String),

    /// Index at or past the end of an array, or negative
    #[error("Array index {index} out of bounds (array size: {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    /// Evaluation was invoked without an input value
    #[error("Cannot execute query on missing input")]
    NullInput,

    /// Node kind the evaluator does not implement. Queries built from this
    /// crate's `Query` type never produce it; it exists so callers matching on
    /// the error taxonomy see every kind.
    #[error("Unknown query operation: {0}")]
    UnknownOperation(String),

    /// Recursion went deeper than [`EvalOptions::max_depth`]
    #[error("Evaluation depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),
}

impl QueryError {
    pub(crate) fn type_mismatch(
        operation: impl Into<String>,
        expected: &'static str,
        actual: &Value,
    ) -> Self {
        QueryError::TypeMismatch {
            operation: operation.into(),
            expected,
            actual: actual.type_name(),
        }
    }

    /// Resource failures abort the whole evaluation, even inside iteration.
    fn is_fatal(&self) -> bool {
        matches!(self, QueryError::DepthLimitExceeded(_))
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum recursion depth before evaluation fails with
    /// [`QueryError::DepthLimitExceeded`]
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The chain steps still to run once the current step produces its output.
#[derive(Clone, Copy)]
enum Next<'a> {
    Done,
    Steps(&'a [Query], &'a Next<'a>),
}

impl<'a> Next<'a> {
    /// Runs `steps` before `rest`; never builds an empty `Steps`.
    fn then(steps: &'a [Query], rest: &'a Next<'a>) -> Next<'a> {
        if steps.is_empty() {
            *rest
        } else {
            Next::Steps(steps, rest)
        }
    }
}

/// The filter-program evaluator.
///
/// Inputs are never mutated; every result is a fresh value that shares no
/// storage with the input document.
#[derive(Default)]
pub struct Evaluator<'t> {
    options: EvalOptions,
    trace: Option<&'t mut dyn TraceSink>,
}

/// Label used for values in execution traces
fn kind_label(v: &Value) -> &'static str {
    match v {
        Value::Null => "NULL",
        Value::Bool(true) => "BOOLEAN(true)",
        Value::Bool(false) => "BOOLEAN(false)",
        Value::Number(_) => "NUMBER",
        Value::String(_) => "STRING",
        Value::Array(_) => "ARRAY",
        Value::Object(_) => "OBJECT",
    }
}

fn expect_array<'v>(
    value: &'v Value,
    operation: impl FnOnce() -> String,
) -> Result<&'v [Value], QueryError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(QueryError::type_mismatch(operation(), "array", other)),
    }
}

impl<'t> Evaluator<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Evaluator {
            options,
            trace: None,
        }
    }

    /// Attaches a sink that receives one line per evaluation step.
    pub fn with_trace<'a>(self, sink: &'a mut dyn TraceSink) -> Evaluator<'a> {
        Evaluator {
            options: self.options,
            trace: Some(sink),
        }
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Evaluates a filter program against a JSON value.
    ///
    /// Returns the first error encountered. The only failures that do not
    /// abort are per-element ones inside iteration and `select()`, which drop
    /// the element instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use jqlite::{Evaluator, Query, Value};
    ///
    /// let mut doc = Value::object();
    /// doc.insert("answer", 42).unwrap();
    ///
    /// let result = Evaluator::new()
    ///     .evaluate(&Query::field("answer"), &doc)
    ///     .unwrap();
    /// assert_eq!(result, Value::Number(42.0));
    /// ```
    pub fn evaluate(&mut self, query: &Query, input: &Value) -> Result<Value, QueryError> {
        debug!("evaluating `{}` against {}", query, input.type_name());
        self.step(|| "Starting query execution".to_string());

        let result = self.eval(query, input, Next::Done, 0);

        match &result {
            Ok(value) => {
                debug!("evaluation produced {}", value.type_name());
                self.step(|| {
                    format!("Query execution complete, result type: {}", kind_label(value))
                });
            }
            Err(e) => {
                debug!("evaluation failed: {}", e);
                self.step(|| format!("Query execution failed: {}", e));
            }
        }
        result
    }

    /// Like [`evaluate`](Self::evaluate), but fails with
    /// [`QueryError::NullInput`] when there is no input value.
    pub fn evaluate_input(
        &mut self,
        query: &Query,
        input: Option<&Value>,
    ) -> Result<Value, QueryError> {
        match input {
            Some(value) => self.evaluate(query, value),
            None => {
                self.step(|| "ERROR: Cannot execute query on missing input".to_string());
                Err(QueryError::NullInput)
            }
        }
    }

    fn step(&mut self, describe: impl FnOnce() -> String) {
        if self.trace.is_none() && !log_enabled!(Level::Trace) {
            return;
        }
        let line = describe();
        trace!("{}", line);
        if let Some(sink) = self.trace.as_mut() {
            sink.record(&line);
        }
    }

    fn eval(
        &mut self,
        query: &Query,
        input: &Value,
        next: Next<'_>,
        depth: usize,
    ) -> Result<Value, QueryError> {
        if depth > self.options.max_depth {
            let limit = self.options.max_depth;
            self.step(|| format!("ERROR: depth limit of {} exceeded", limit));
            return Err(QueryError::DepthLimitExceeded(limit));
        }

        match query {
            Query::Identity => {
                self.step(|| "Executing IDENTITY operation (.)".to_string());
                self.resume(next, input, depth)
            }

            Query::Field(name) => {
                self.step(|| {
                    format!("Executing FIELD access: '{}' on {}", name, kind_label(input))
                });
                let members = match input {
                    Value::Object(members) => members,
                    other => {
                        return Err(QueryError::type_mismatch(
                            format!("access field '{}'", name),
                            "object",
                            other,
                        ));
                    }
                };
                let found = members
                    .get(name)
                    .ok_or_else(|| QueryError::FieldNotFound(name.clone()))?;

                self.step(|| format!("Field '{}' found, type: {}", name, kind_label(found)));
                self.resume(next, found, depth)
            }

            Query::Index(index) => {
                self.step(|| format!("Executing INDEX access: [{}] on {}", index, kind_label(input)));
                let items = expect_array(input, || format!("index with [{}]", index))?;
                let found = usize::try_from(*index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or(QueryError::IndexOutOfBounds {
                        index: *index,
                        len: items.len(),
                    })?;

                self.step(|| format!("Index [{}] found, type: {}", index, kind_label(found)));
                self.resume(next, found, depth)
            }

            Query::Slice { start, end } => {
                let items = expect_array(input, || "slice".to_string())?;
                let len = items.len() as i64;
                // Positions outside the array clamp silently.
                let lo = (*start).clamp(0, len);
                let hi = end.unwrap_or(len).clamp(lo, len);
                let sliced = Value::Array(items[lo as usize..hi as usize].to_vec());

                self.step(|| {
                    format!(
                        "Slice collected {} elements from range [{}:{}]",
                        hi - lo,
                        start,
                        end.unwrap_or(len)
                    )
                });
                self.resume(next, &sliced, depth)
            }

            Query::Iterate => {
                let items = expect_array(input, || "iterate over".to_string())?;
                if let Next::Done = next {
                    self.step(|| "Array iteration complete: returning array as-is".to_string());
                    return Ok(input.clone());
                }

                let mut mapped = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.step(|| format!("Processing array element {}", i));
                    match self.resume(next, item, depth) {
                        Ok(value) => mapped.push(value),
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => self.step(|| format!("Element {} dropped: {}", i, e)),
                    }
                }

                self.step(|| {
                    format!(
                        "Array iteration complete: kept {}/{} elements",
                        mapped.len(),
                        items.len()
                    )
                });
                Ok(Value::Array(mapped))
            }

            Query::Select(condition) => {
                self.step(|| format!("Executing SELECT filter on {}", kind_label(input)));
                let items = expect_array(input, || "select".to_string())?;

                let mut kept = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    if self.test(condition, item, depth)? {
                        self.step(|| format!("Element {} PASSED filter", i));
                        kept.push(item.clone());
                    } else {
                        self.step(|| format!("Element {} FILTERED OUT", i));
                    }
                }

                self.step(|| {
                    format!(
                        "SELECT complete: {}/{} elements passed filter",
                        kept.len(),
                        items.len()
                    )
                });
                self.resume(next, &Value::Array(kept), depth)
            }

            Query::Chain(steps) => match steps.split_first() {
                Some((first, rest)) => {
                    self.eval(first, input, Next::then(rest, &next), depth + 1)
                }
                None => self.resume(next, input, depth),
            },

            Query::Pipe(left, right) => {
                self.step(|| "Executing PIPE left-hand side".to_string());
                let piped = self.eval(left, input, Next::Done, depth + 1)?;

                self.step(|| {
                    format!(
                        "PIPE left result: {}; executing right-hand side",
                        kind_label(&piped)
                    )
                });
                let result = self.eval(right, &piped, Next::Done, depth + 1)?;
                self.resume(next, &result, depth)
            }
        }
    }

    /// Feeds `value` to the pending steps, or returns it when none are left.
    fn resume(&mut self, next: Next<'_>, value: &Value, depth: usize) -> Result<Value, QueryError> {
        match next {
            Next::Done => {
                self.step(|| "Query chain complete: returning current value".to_string());
                Ok(value.clone())
            }
            Next::Steps(steps, rest) => match steps.split_first() {
                Some((first, tail)) => self.eval(first, value, Next::then(tail, rest), depth + 1),
                None => self.resume(*rest, value, depth),
            },
        }
    }

    /// Evaluates a `select()` predicate against one element.
    ///
    /// The sub-query sees only the element. Its failure, or a non-numeric
    /// result, makes the predicate false.
    fn test(&mut self, condition: &Condition, item: &Value, depth: usize) -> Result<bool, QueryError> {
        self.step(|| "Evaluating condition left-hand side".to_string());

        let lhs = match self.eval(&condition.lhs, item, Next::Done, depth + 1) {
            Ok(value) => value,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.step(|| format!("Condition left-hand side failed: {}", e));
                return Ok(false);
            }
        };

        let Some(left) = lhs.as_number() else {
            self.step(|| {
                format!(
                    "Condition type mismatch: expected NUMBER, got {}",
                    kind_label(&lhs)
                )
            });
            return Ok(false);
        };

        let passed = condition.op.compare(left, condition.rhs);
        self.step(|| {
            format!(
                "Condition: {:.2} {} {:.2} = {}",
                left,
                condition.op,
                condition.rhs,
                if passed { "TRUE" } else { "FALSE" }
            )
        });
        Ok(passed)
    }
}
