use std::fmt;

use crate::ast::Query;

/// Comparison operators accepted inside `select()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Equal (`==`)
    Eq,
    /// Greater than or equal (`>=`)
    Ge,
    /// Less than or equal (`<=`)
    Le,
    /// Not equal (`!=`)
    Ne,
}

impl CmpOp {
    /// Applies the operator with `left` on the left-hand side.
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            CmpOp::Gt => left > right,
            CmpOp::Lt => left < right,
            CmpOp::Eq => left == right,
            CmpOp::Ge => left >= right,
            CmpOp::Le => left <= right,
            CmpOp::Ne => left != right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Eq => "==",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
            CmpOp::Ne => "!=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Predicate used by `select()`.
///
/// The left-hand side is a sub-query run against each candidate element on
/// its own. Only numeric results are compared; a failing sub-query or a
/// non-number makes the predicate false.
///
/// # Example
/// ```text
/// select(.price >= 9.5)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub lhs: Box<Query>,
    pub op: CmpOp,
    pub rhs: f64,
}

impl Condition {
    pub fn new(lhs: Query, op: CmpOp, rhs: f64) -> Self {
        Condition {
            lhs: Box::new(lhs),
            op,
            rhs,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
