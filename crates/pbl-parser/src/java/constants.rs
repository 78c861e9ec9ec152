//! Java keywords and shared matchers.

use crate::engine::TokenMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

pub const ACCESS_MODIFIERS: &[&str] = &["public", "protected", "private"];

pub const MODIFIERS: &[&str] = &["static", "final", "abstract"];

pub const INSTRUCTIONS: &[&str] = &["return", "throw", "continue", "break"];

pub const KEYWORD_LITERALS: &[&str] = &["true", "false", "null"];

/// Tokens an operator can start with.
pub const OPERATOR_STARTS: &[&str] = &[
    "=", "+", "-", "*", "/", "%", "<", ">", "!", "|", "&", "^", "~", "?", "instanceof",
];

/// Call-like keywords that are never function names.
pub const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "synchronized"];

/// Words which may directly precede a bare reference.
pub const REFERENCE_PRECEDING_WORDS: &[&str] =
    &["instanceof", "return", "throw", "case", "assert", "else", "do"];

pub const RESERVED_WORDS: &[&str] = &[
    "package", "import", "class", "interface", "enum", "extends", "implements", "throws",
    "public", "protected", "private", "static", "final", "abstract", "new", "true", "false",
    "null", "if", "else", "while", "do", "for", "try", "catch", "finally", "switch", "case",
    "default", "return", "throw", "continue", "break", "assert", "instanceof", "byte", "short",
    "int", "long", "float", "double", "boolean", "char", "void",
];

/// Tokens which end a statement without belonging to it.
pub const STATEMENT_END: &[TokenMatcher] = &[
    TokenMatcher::Literal(";"),
    TokenMatcher::Literal(":"),
    TokenMatcher::Literal(","),
    TokenMatcher::Literal("]"),
    TokenMatcher::Literal("}"),
    TokenMatcher::Literal(")"),
];

pub const KEYWORD_LITERAL_MATCHERS: &[TokenMatcher] = &[
    TokenMatcher::Literal("true"),
    TokenMatcher::Literal("false"),
    TokenMatcher::Literal("null"),
];

pub const EXTENDS_CLAUSE_END: &[TokenMatcher] =
    &[TokenMatcher::Literal("implements"), TokenMatcher::Literal("{")];

pub const THROWS_CLAUSE_END: &[TokenMatcher] =
    &[TokenMatcher::Literal(";"), TokenMatcher::Literal("{")];

static ANY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(".").expect("valid token pattern"));

static QUOTE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^['"]$"#).expect("valid token pattern"));

/// Matches any text token.
pub fn any() -> TokenMatcher {
    TokenMatcher::Pattern(Lazy::force(&ANY_PATTERN))
}

/// Matches an opening string or character quote.
pub fn quote() -> TokenMatcher {
    TokenMatcher::Pattern(Lazy::force(&QUOTE_PATTERN))
}
