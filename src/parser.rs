use std::mem;

use thiserror::Error;

use crate::{
    ast::{CmpOp, Condition, Query, Token},
    evaluator::DEFAULT_MAX_DEPTH,
    lexer::{LexError, Lexer, Position},
};

/// Default bound on the number of steps and pipes in one program.
pub const DEFAULT_MAX_STEPS: usize = DEFAULT_MAX_DEPTH;

/// Errors produced while parsing a filter program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Expected {expected}, got {found} at {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: Position,
    },

    #[error("Unknown function '{name}' at {position}")]
    UnknownFunction { name: String, position: Position },

    #[error("Query has more than {limit} steps (at {position})")]
    TooManySteps { limit: usize, position: Position },
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    steps: Option<Vec<String>>,
    step_count: usize,
    max_steps: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let (current_token, current_position) = lexer.next_spanned()?;
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            steps: None,
            step_count: 0,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }

    /// Sets how many steps and pipes a program may contain, counting those
    /// nested inside `select()`.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Keep a human-readable log of every node the parser builds.
    pub fn record_steps(mut self) -> Self {
        self.steps = Some(Vec::new());
        self
    }

    /// Takes the recorded parse steps (empty unless [`record_steps`](Self::record_steps) was called).
    pub fn take_steps(&mut self) -> Vec<String> {
        self.steps.as_mut().map(mem::take).unwrap_or_default()
    }

    fn record(&mut self, step: impl FnOnce() -> String) {
        if let Some(steps) = self.steps.as_mut() {
            steps.push(step());
        }
    }

    fn count_step(&mut self) -> Result<(), ParseError> {
        self.step_count += 1;
        if self.step_count > self.max_steps {
            return Err(ParseError::TooManySteps {
                limit: self.max_steps,
                position: self.current_position,
            });
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        let (token, position) = self.lexer.next_spanned()?;
        self.current_token = token;
        self.current_position = position;
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.clone(),
            position: self.current_position,
        }
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Parse a complete program, requiring all input to be consumed.
    pub fn parse(&mut self) -> Result<Query, ParseError> {
        let query = self.parse_pipeline()?;
        self.expect(Token::Eof, "end of query")?;
        self.record(|| format!("Parsed program: {}", query));
        Ok(query)
    }

    /// `chain ('|' chain)*`, left-associative
    fn parse_pipeline(&mut self) -> Result<Query, ParseError> {
        let mut left = self.parse_chain()?;

        while self.check(&Token::Pipe) {
            self.count_step()?;
            self.advance()?;
            let right = self.parse_chain()?;
            self.record(|| format!("Parsed PIPE: {} | {}", left, right));
            left = Query::pipe(left, right);
        }
        Ok(left)
    }

    fn parse_chain(&mut self) -> Result<Query, ParseError> {
        let mut steps = Vec::new();

        loop {
            if matches!(&self.current_token, Token::Dot | Token::LBracket)
                || matches!(&self.current_token, Token::Identifier(name) if name == "select")
            {
                self.count_step()?;
            }

            match &self.current_token {
                Token::Dot => {
                    self.advance()?;
                    match mem::replace(&mut self.current_token, Token::Eof) {
                        Token::Identifier(name) | Token::String(name) => {
                            self.advance()?;
                            self.record(|| format!("Parsed FIELD '{}'", name));
                            steps.push(Query::Field(name));
                        }
                        Token::LBracket => {
                            self.advance()?;
                            steps.push(self.parse_bracket()?);
                        }
                        token => {
                            self.current_token = token;
                            if !steps.is_empty() {
                                return Err(self.unexpected("field name or '[' after '.'"));
                            }
                            self.record(|| "Parsed IDENTITY".to_string());
                            steps.push(Query::Identity);
                            break;
                        }
                    }
                }
                Token::LBracket => {
                    self.advance()?;
                    steps.push(self.parse_bracket()?);
                }
                Token::Identifier(name) if name == "select" => {
                    steps.push(self.parse_select()?);
                }
                Token::Identifier(name) if steps.is_empty() => {
                    return Err(ParseError::UnknownFunction {
                        name: name.clone(),
                        position: self.current_position,
                    });
                }
                _ => break,
            }
        }

        if steps.is_empty() {
            return Err(self.unexpected("a filter step ('.', '[' or 'select')"));
        }
        Ok(Query::chain(steps))
    }

    /// Parses the inside of `[...]`, with the opening bracket already consumed.
    fn parse_bracket(&mut self) -> Result<Query, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::RBracket => {
                self.advance()?;
                self.record(|| "Parsed ARRAY_ITER []".to_string());
                Ok(Query::Iterate)
            }
            Token::String(name) => {
                self.advance()?;
                self.expect(Token::RBracket, "']'")?;
                self.record(|| format!("Parsed FIELD '{}'", name));
                Ok(Query::Field(name))
            }
            Token::Colon => {
                self.advance()?;
                self.parse_slice_end(0)
            }
            Token::Integer(n) => {
                self.advance()?;
                if self.check(&Token::Colon) {
                    self.advance()?;
                    self.parse_slice_end(n)
                } else {
                    self.expect(Token::RBracket, "']' or ':'")?;
                    self.record(|| format!("Parsed INDEX [{}]", n));
                    Ok(Query::Index(n))
                }
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("index, slice, string key or ']'"))
            }
        }
    }

    fn parse_slice_end(&mut self, start: i64) -> Result<Query, ParseError> {
        let end = match self.current_token {
            Token::Integer(n) => {
                self.advance()?;
                Some(n)
            }
            _ => None,
        };
        self.expect(Token::RBracket, "']'")?;

        let slice = Query::slice(start, end);
        self.record(|| format!("Parsed SLICE {}", slice));
        Ok(slice)
    }

    /// `select '(' pipeline cmp number ')'`
    fn parse_select(&mut self) -> Result<Query, ParseError> {
        self.advance()?; // consume `select`
        self.expect(Token::LParen, "'(' after select")?;

        let lhs = self.parse_pipeline()?;

        let op = match self.current_token {
            Token::Gt => CmpOp::Gt,
            Token::Lt => CmpOp::Lt,
            Token::EqEq => CmpOp::Eq,
            Token::GtEq => CmpOp::Ge,
            Token::LtEq => CmpOp::Le,
            Token::NotEq => CmpOp::Ne,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance()?;

        let rhs = match self.current_token {
            Token::Integer(n) => n as f64,
            Token::Float(n) => n,
            _ => return Err(self.unexpected("number")),
        };
        self.advance()?;
        self.expect(Token::RParen, "')'")?;

        let condition = Condition::new(lhs, op, rhs);
        self.record(|| format!("Parsed SELECT condition: {}", condition));
        Ok(Query::Select(condition))
    }
}

/// Parses query text into a [`Query`].
///
/// # Examples
///
/// ```
/// use jqlite::{parse_query, Query};
///
/// let query = parse_query(".a.b").unwrap();
/// assert_eq!(query, Query::Chain(vec![Query::field("a"), Query::field("b")]));
/// ```
pub fn parse_query(source: &str) -> Result<Query, ParseError> {
    Parser::new(Lexer::new(source))?.parse()
}
