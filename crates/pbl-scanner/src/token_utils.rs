//! Token predicates, stream searches and line previews.

use crate::token::{TokenId, TokenKind, TokenStream};
use std::ops::Range;

#[inline]
#[must_use]
pub fn is_word(tokens: &TokenStream, id: TokenId) -> bool {
    tokens.kind(id) == TokenKind::Word
}

#[inline]
#[must_use]
pub fn is_number(tokens: &TokenStream, id: TokenId) -> bool {
    tokens.kind(id) == TokenKind::Number
}

#[inline]
#[must_use]
pub fn is_symbol(tokens: &TokenStream, id: TokenId) -> bool {
    tokens.kind(id) == TokenKind::Symbol
}

#[inline]
#[must_use]
pub fn is_newline(tokens: &TokenStream, id: TokenId) -> bool {
    tokens.kind(id) == TokenKind::Newline
}

#[inline]
#[must_use]
pub fn is_text(tokens: &TokenStream, id: TokenId) -> bool {
    tokens.kind(id).is_text()
}

/// Whether `id` is the first text on its line.
#[must_use]
pub fn is_start_of_line(tokens: &TokenStream, id: TokenId) -> bool {
    match tokens.previous(id) {
        None => true,
        Some(previous) => matches!(
            tokens.kind(previous),
            TokenKind::Newline | TokenKind::Indentation
        ),
    }
}

/// How a search moves from one token to the next candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStep {
    Next,
    Previous,
    NextText,
    PreviousText,
}

impl TokenStep {
    #[must_use]
    pub fn apply(self, tokens: &TokenStream, id: TokenId) -> Option<TokenId> {
        match self {
            Self::Next => Some(tokens.next(id)),
            Self::Previous => tokens.previous(id),
            Self::NextText => Some(tokens.next_text(id)),
            Self::PreviousText => tokens.previous_text(id),
        }
    }
}

/// Step through the stream from `start` (exclusive), returning the first
/// token satisfying `qualifier`. The search gives up with `None` as soon as a
/// token satisfies `disqualifier`, the step runs out of tokens, or EOF is
/// reached.
pub fn search(
    tokens: &TokenStream,
    start: TokenId,
    step: TokenStep,
    qualifier: impl Fn(&TokenStream, TokenId) -> bool,
    disqualifier: impl Fn(&TokenStream, TokenId) -> bool,
) -> Option<TokenId> {
    let mut current = start;
    loop {
        current = step.apply(tokens, current)?;
        if tokens.is_eof(current) {
            return None;
        }
        if qualifier(tokens, current) {
            return Some(current);
        }
        if disqualifier(tokens, current) {
            return None;
        }
    }
}

/// A preview of the source line around a focused token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinePreview {
    pub text: String,
    /// Byte range of the focused token within `text`.
    pub focus: Range<usize>,
}

/// Build a preview of up to `range` text tokens either side of `id`,
/// bounded by the start and end of its line.
#[must_use]
pub fn line_preview(tokens: &TokenStream, id: TokenId, range: usize) -> LinePreview {
    let mut first = id;
    for _ in 0..range {
        match tokens.previous(first) {
            Some(previous) if !is_newline(tokens, previous) => first = previous,
            _ => break,
        }
    }

    let mut text = String::new();
    let mut focus = 0..0;
    let mut current = first;
    for _ in 0..(2 * range) {
        if tokens.is_eof(current) || is_newline(tokens, current) {
            break;
        }
        let token = tokens.get(current);
        if tokens.kind(current) == TokenKind::Indentation {
            current = tokens.next(current);
            continue;
        }
        let spaced = tokens
            .previous(current)
            .is_some_and(|previous| !tokens.are_adjacent(previous, current));
        if !text.is_empty() && spaced {
            text.push(' ');
        }
        if current == id {
            focus = text.len()..text.len() + token.value.len();
        }
        text.push_str(&token.value);
        current = tokens.next(current);
    }

    LinePreview { text, focus }
}

#[cfg(test)]
#[path = "../tests/token_utils_tests.rs"]
mod token_utils_tests;
