use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating-point number (only valid as a `select()` right-hand side)
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1
    /// ```
    Integer(i64),

    /// String literal enclosed in double quotes
    ///
    /// Used for field names that are not plain identifiers.
    ///
    /// # Examples
    /// ```text
    /// .["first name"]
    /// ."user-id"
    /// ```
    String(String),

    /// Field name or function name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// posts
    /// select
    /// _id
    /// ```
    Identifier(String),

    // Operators
    /// Identity, or the prefix of a field access
    Dot,

    /// Pipeline operator
    ///
    /// # Examples
    /// ```text
    /// .posts | .[0]
    /// ```
    Pipe,

    // Comparison
    /// Equality operator
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Delimiters
    /// Left bracket for index, slice, and iteration
    LBracket,

    /// Right bracket
    RBracket,

    /// Left parenthesis for `select(...)`
    LParen,

    /// Right parenthesis
    RParen,

    /// Slice separator
    Colon,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Float(n) => write!(f, "NUMBER({})", n),
            Token::Integer(n) => write!(f, "NUMBER({})", n),
            Token::String(s) => write!(f, "STRING(\"{}\")", s),
            Token::Identifier(name) => write!(f, "IDENTIFIER({})", name),
            Token::Dot => write!(f, "DOT"),
            Token::Pipe => write!(f, "PIPE"),
            Token::EqEq => write!(f, "EQ"),
            Token::NotEq => write!(f, "NEQ"),
            Token::Lt => write!(f, "LT"),
            Token::Gt => write!(f, "GT"),
            Token::LtEq => write!(f, "LTE"),
            Token::GtEq => write!(f, "GTE"),
            Token::LBracket => write!(f, "LBRACKET"),
            Token::RBracket => write!(f, "RBRACKET"),
            Token::LParen => write!(f, "LPAREN"),
            Token::RParen => write!(f, "RPAREN"),
            Token::Colon => write!(f, "COLON"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
