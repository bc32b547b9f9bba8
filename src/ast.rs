//! # jqlite Filter Language - Abstract Syntax Tree
//!
//! This module defines the compiled form of a jqlite filter program and the
//! tokens the query lexer produces on the way there.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[query]** - The recursive filter tree (steps, chains and pipes)
//! - **[condition]** - `select()` predicates and their comparison operators
//!
//! ## Quick Start
//!
//! ```text
//! .posts | select(.likes > 10) | .[].title
//! ```
//!
//! This program takes the `posts` array, keeps posts with more than ten
//! likes, and maps each remaining post to its title.
//!
//! ## Composition
//!
//! A program is a single step, a [`Query::Chain`] of steps written back to
//! back, or a [`Query::Pipe`] of two programs.
//!
//! Inside a chain each step feeds the next, and an iteration step (`[]`)
//! applies *every later step of the chain* to each element:
//!
//! ```text
//! .users[].name         // ["alice", "bob"]
//! ```
//!
//! An explicit `|` is a barrier: the left program runs in full, and the
//! right program then runs once on its result. So `.[] | select(.v > 3)`
//! filters the whole array, while `.users[] | .name` looks up `name` on
//! the array itself and fails.
//!
//! Elements for which the rest of a chain fails are dropped from the output.
//!
//! ## Index Behavior
//!
//! - Indices and slice bounds are zero-based
//! - Negative indices are never wrapped; `[-1]` is always out of bounds
//! - Slices clamp silently: `[10:20]` on a short array is `[]`
pub mod condition;
pub mod query;
pub mod tokens;

pub use condition::{CmpOp, Condition};
pub use query::Query;
pub use tokens::Token;
