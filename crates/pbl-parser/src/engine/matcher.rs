//! Token matchers.
//!
//! A matcher tests a single token. Grammars attach matchers to handlers; the
//! `Match` rules of a grammar are tried in specificity order (see
//! [`TokenMatcher::specificity`]).

use pbl_scanner::{TokenId, TokenStream};
use regex::Regex;
use std::fmt;

/// A predicate over a token in its stream.
pub type TokenPredicate = fn(&TokenStream, TokenId) -> bool;

#[derive(Clone, Copy)]
pub enum TokenMatcher {
    /// The token value equals the string exactly.
    Literal(&'static str),
    /// Any of the listed matchers accepts the token.
    AnyOf(&'static [TokenMatcher]),
    /// The predicate accepts the token.
    Predicate(TokenPredicate),
    /// The pattern finds a match anywhere in the token value.
    Pattern(&'static Regex),
}

impl TokenMatcher {
    #[must_use]
    pub fn matches(&self, tokens: &TokenStream, id: TokenId) -> bool {
        match self {
            Self::Literal(value) => tokens.value(id) == *value,
            Self::AnyOf(matchers) => matchers.iter().any(|m| m.matches(tokens, id)),
            Self::Predicate(predicate) => predicate(tokens, id),
            Self::Pattern(pattern) => pattern.is_match(tokens.value(id)),
        }
    }

    /// Sort key for `Match` rules: literals are tried first, then lists,
    /// then predicates, then patterns.
    #[must_use]
    pub const fn specificity(&self) -> u8 {
        match self {
            Self::Literal(_) => 0,
            Self::AnyOf(_) => 1,
            Self::Predicate(_) => 2,
            Self::Pattern(_) => 3,
        }
    }
}

impl fmt::Debug for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "Literal({value:?})"),
            Self::AnyOf(matchers) => f.debug_tuple("AnyOf").field(matchers).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern(pattern) => write!(f, "Pattern({:?})", pattern.as_str()),
        }
    }
}
