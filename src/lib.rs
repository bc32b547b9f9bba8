pub mod ast;
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod trace;
pub mod value;

pub use ast::{CmpOp, Condition, Query, Token};
pub use convert::parse_json;
pub use evaluator::{EvalOptions, Evaluator, QueryError};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_display, to_json};
pub use parser::{ParseError, Parser, parse_query};
pub use trace::{ExecutionTrace, TraceSink};
pub use value::{Object, Value};
