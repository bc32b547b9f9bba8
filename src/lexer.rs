use std::fmt;

use thiserror::Error;

use crate::ast::Token;

/// Character offset into the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors produced while tokenizing a query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("Unexpected '{ch}' at {position} (did you mean '{suggestion}'?)")]
    IncompleteOperator {
        ch: char,
        suggestion: &'static str,
        position: Position,
    },

    #[error("Unterminated string starting at {0}")]
    UnterminatedString(Position),

    #[error("Invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },

    #[error("Invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        Position {
            offset: self.position,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position(),
                            });
                        }
                        None => return Err(LexError::UnterminatedString(start)),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString(start))
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else if (ch == 'e' || ch == 'E')
                && self
                    .peek_char(1)
                    .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+')
            {
                is_float = true;
                number.push(ch);
                self.advance();
                if let Some(sign @ ('-' | '+')) = self.current_char() {
                    number.push(sign);
                    self.advance();
                }
            } else {
                break;
            }
        }

        let invalid = |text: String| LexError::InvalidNumber {
            text,
            position: start,
        };

        if is_float {
            number
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| invalid(number.clone()))
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| invalid(number.clone()))
        }
    }

    /// Emits a two-character operator if `second` follows, else `single`.
    fn operator(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            self.advance();
            single
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('.') => {
                self.advance();
                Token::Dot
            }
            Some('|') => {
                self.advance();
                Token::Pipe
            }
            Some('[') => {
                self.advance();
                Token::LBracket
            }
            Some(']') => {
                self.advance();
                Token::RBracket
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(':') => {
                self.advance();
                Token::Colon
            }
            Some('>') => self.operator('=', Token::GtEq, Token::Gt),
            Some('<') => self.operator('=', Token::LtEq, Token::Lt),
            Some(ch @ ('=' | '!')) => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    if ch == '=' { Token::EqEq } else { Token::NotEq }
                } else {
                    return Err(LexError::IncompleteOperator {
                        ch,
                        suggestion: if ch == '=' { "==" } else { "!=" },
                        position: self.position(),
                    });
                }
            }
            Some('"') => Token::String(self.read_string()?),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => Token::Identifier(self.read_identifier()),
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position(),
                });
            }
        };

        Ok(token)
    }

    /// Reads the next token together with the position it starts at.
    pub fn next_spanned(&mut self) -> Result<(Token, Position), LexError> {
        self.skip_whitespace();
        let position = self.position();
        Ok((self.next_token()?, position))
    }

    /// Tokenizes the whole input, including the trailing [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<(Token, Position)>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let (token, position) = self.next_spanned()?;
            let done = token == Token::Eof;
            tokens.push((token, position));
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_field_chain() {
    let mut lexer = Lexer::new(".posts[0].title");
    assert_eq!(lexer.next_token(), Ok(Token::Dot));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("posts".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Integer(0)));
    assert_eq!(lexer.next_token(), Ok(Token::RBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Dot));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("title".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_select_condition() {
    let mut lexer = Lexer::new("select(.v >= -2.5)");
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("select".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Dot));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("v".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::GtEq));
    assert_eq!(lexer.next_token(), Ok(Token::Float(-2.5)));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
}
