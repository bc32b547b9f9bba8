use std::fmt;

use crate::ast::Condition;

/// A compiled filter program.
///
/// Built by the [`Parser`](crate::Parser) (or by hand) and never mutated by
/// the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Pass the current value through unchanged (`.`)
    Identity,

    /// Object member lookup
    ///
    /// # Examples
    /// ```text
    /// .name
    /// .["first name"]
    /// ```
    Field(String),

    /// Array element by position
    ///
    /// Negative positions are kept so the evaluator can report them as out of
    /// bounds instead of wrapping.
    ///
    /// # Example
    /// ```text
    /// [0]
    /// ```
    Index(i64),

    /// Half-open sub-array `[start, end)`; `end: None` runs to the end
    ///
    /// # Examples
    /// ```text
    /// [1:3]
    /// [2:]
    /// ```
    Slice { start: i64, end: Option<i64> },

    /// Array iteration (`[]`)
    ///
    /// Applies the rest of the program to every element.
    Iterate,

    /// Array filtering by a numeric predicate
    ///
    /// # Example
    /// ```text
    /// select(.age >= 18)
    /// ```
    Select(Condition),

    /// Steps written back to back (`.a[0].b`), an implicit pipe
    ///
    /// Each step's output feeds the next one, and an [`Iterate`](Query::Iterate)
    /// step applies every later step of the chain to each element.
    Chain(Vec<Query>),

    /// Run the left program in full, then the right program on its output (`|`)
    Pipe(Box<Query>, Box<Query>),
}

impl Query {
    pub fn field(name: impl Into<String>) -> Self {
        Query::Field(name.into())
    }

    pub fn slice(start: i64, end: Option<i64>) -> Self {
        Query::Slice { start, end }
    }

    pub fn pipe(left: Query, right: Query) -> Self {
        Query::Pipe(Box::new(left), Box::new(right))
    }

    /// Builds a chain from a sequence of steps.
    ///
    /// An empty sequence is the identity program and a single step is
    /// returned as is.
    pub fn chain(steps: impl IntoIterator<Item = Query>) -> Self {
        let mut steps: Vec<Query> = steps.into_iter().collect();
        match steps.len() {
            0 => Query::Identity,
            1 => steps.remove(0),
            _ => Query::Chain(steps),
        }
    }

    /// Short operation label used in execution traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Identity => "IDENTITY",
            Query::Field(_) => "FIELD",
            Query::Index(_) => "INDEX",
            Query::Slice { .. } => "SLICE",
            Query::Iterate => "ARRAY_ITER",
            Query::Select(_) => "SELECT",
            Query::Chain(_) => "CHAIN",
            Query::Pipe(..) => "PIPE",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Identity => write!(f, "."),
            Query::Field(name) if is_identifier(name) => write!(f, ".{}", name),
            Query::Field(name) => {
                write!(f, ".\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Query::Index(i) => write!(f, "[{}]", i),
            Query::Slice { start, end: Some(end) } => write!(f, "[{}:{}]", start, end),
            Query::Slice { start, end: None } => write!(f, "[{}:]", start),
            Query::Iterate => write!(f, "[]"),
            Query::Select(cond) => write!(f, "select({})", cond),
            Query::Chain(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 && matches!(step, Query::Select(_) | Query::Identity | Query::Pipe(..)) {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", step)?;
                }
                Ok(())
            }
            Query::Pipe(left, right) => write!(f, "{} | {}", left, right),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
