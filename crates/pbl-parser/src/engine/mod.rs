//! Language-agnostic streaming parser engine.
//!
//! Parsers are plain structs implementing [`Parser`]; their grammar tables
//! are built once and shared. All parsers in one run walk a single shared
//! [`Cursor`].

pub mod cursor;
pub mod grammar;
pub mod matcher;
pub mod sequence;

pub use cursor::{Cursor, ParseError};
pub use grammar::{Grammar, Handler, ParseResult, Parser, Sanitizer, Signal};
pub use matcher::{TokenMatcher, TokenPredicate};
pub use sequence::parse_sequence;

#[cfg(test)]
#[path = "../../tests/engine_tests.rs"]
mod engine_tests;
