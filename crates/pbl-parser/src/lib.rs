//! Parser for the polybabel compiler.
//!
//! This crate provides:
//! - `engine` - The language-agnostic streaming parser engine
//! - `syntax` - Java syntax tree node types
//! - `java` - The Java grammar, one parser per construct
//! - `parse_java` - Tokenize and parse a Java source file

pub mod engine;
pub use engine::{Cursor, Grammar, ParseError, ParseResult, Parser, Signal, TokenMatcher};

pub mod syntax;
pub use syntax::{JavaSyntaxTree, TopLevelNode};

pub mod java;

use pbl_scanner::{TokenizeError, tokenize};

/// A source file that could not be turned into a syntax tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SourceError {
    /// 1-based line of the failure.
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::Tokenize(error) => error.line(),
            Self::Parse(error) => error.line,
        }
    }
}

/// Tokenize and parse a Java source file.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse_java(source: &str) -> Result<JavaSyntaxTree, SourceError> {
    let tokens = tokenize(source)?;
    let file = {
        let mut cursor = Cursor::new(&tokens);
        cursor.parse_with::<java::JavaParser>()?
    };
    tracing::debug!(nodes = file.nodes.len(), "parsed java file");
    Ok(JavaSyntaxTree {
        package: file.package,
        nodes: file.nodes,
        tokens,
    })
}
