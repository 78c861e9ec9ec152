//! Tokenizer for the polybabel compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - Token classes (word, number, symbol, newline, indentation, EOF)
//! - `TokenStream` - Arena of doubly-linked tokens ending in a self-linked EOF
//! - `tokenize` - Converts source text into a `TokenStream`
//! - `token_utils` - Token predicates, searchers and line previews

pub mod token;
pub use token::{Token, TokenId, TokenKind, TokenStream};

pub mod tokenize;
pub use tokenize::{TokenizeError, tokenize};

pub mod token_utils;
