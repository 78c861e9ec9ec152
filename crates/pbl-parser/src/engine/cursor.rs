//! Shared token cursor.
//!
//! Every parser in a parse run reads from the same `Cursor`. A child parser
//! spawned with [`Cursor::parse_with`] advances the shared position, so when
//! it returns the parent is already positioned at the child's final token.

use super::grammar::{self, ParseResult, Parser, Sanitizer};
use super::matcher::{TokenMatcher, TokenPredicate};
use super::sequence;
use pbl_common::limits::{LINE_PREVIEW_RANGE, MAX_PARSER_DEPTH};
use pbl_scanner::token_utils::line_preview;
use pbl_scanner::{TokenId, TokenKind, TokenStream};
use smallvec::SmallVec;
use tracing::debug;

/// A parse failure attributed to the token the parser halted on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the offending token.
    pub line: u32,
    /// Byte offset of the offending token.
    pub start: u32,
    /// Byte length of the offending token; zero at end of input.
    pub length: u32,
}

pub struct Cursor<'t> {
    tokens: &'t TokenStream,
    current: TokenId,
    depth: u32,
    sanitizers: SmallVec<[&'static Sanitizer; 2]>,
    sanitizing: bool,
}

impl<'t> Cursor<'t> {
    #[must_use]
    pub fn new(tokens: &'t TokenStream) -> Self {
        Self {
            tokens,
            current: tokens.first_text(),
            depth: 0,
            sanitizers: SmallVec::new(),
            sanitizing: false,
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[inline]
    #[must_use]
    pub const fn tokens(&self) -> &'t TokenStream {
        self.tokens
    }

    #[inline]
    #[must_use]
    pub const fn current(&self) -> TokenId {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &'t str {
        self.tokens.value(self.current)
    }

    #[inline]
    #[must_use]
    pub fn line(&self) -> u32 {
        self.tokens.line(self.current)
    }

    #[inline]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.tokens.is_eof(self.current)
    }

    /// Whether the current token's value is exactly `value`.
    #[inline]
    #[must_use]
    pub fn is(&self, value: &str) -> bool {
        self.value() == value
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, matcher: &TokenMatcher) -> bool {
        matcher.matches(self.tokens, self.current)
    }

    #[inline]
    #[must_use]
    pub fn satisfies(&self, predicate: TokenPredicate) -> bool {
        predicate(self.tokens, self.current)
    }

    /// The next text token.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> TokenId {
        self.tokens.next_text(self.current)
    }

    /// The next raw token, which may be a newline or indentation.
    #[inline]
    #[must_use]
    pub fn peek_raw(&self) -> TokenId {
        self.tokens.next(self.current)
    }

    /// The previous text token.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<TokenId> {
        self.tokens.previous_text(self.current)
    }

    #[inline]
    #[must_use]
    pub fn previous_raw(&self) -> Option<TokenId> {
        self.tokens.previous(self.current)
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Move to the next text token, then run any active sanitizers. Stays put
    /// at EOF.
    pub fn next(&mut self) -> ParseResult<()> {
        if !self.is_eof() {
            self.current = self.tokens.next_text(self.current);
        }
        self.sanitize()
    }

    /// Move to the next raw token without sanitizing. Used by parsers that
    /// consume source verbatim (comments, string literals).
    pub fn advance_raw(&mut self) {
        self.current = self.tokens.next(self.current);
    }

    /// Skip forward to a text token if the cursor rests on layout.
    pub fn skip_layout(&mut self) {
        if !self.tokens.kind(self.current).is_text() && !self.is_eof() {
            self.current = self.tokens.next_text(self.current);
        }
    }

    /// Require the current token to be `value` and step past it.
    pub fn eat(&mut self, value: &str) -> ParseResult<()> {
        if !self.is(value) {
            return Err(self.halt());
        }
        self.next()
    }

    /// Require the current token to be a word, returning it and stepping past.
    pub fn eat_word(&mut self) -> ParseResult<String> {
        if self.tokens.kind(self.current) != TokenKind::Word {
            return Err(self.halt());
        }
        let word = self.value().to_string();
        self.next()?;
        Ok(word)
    }

    /// Step past the current token if it is `value`.
    pub fn allow(&mut self, value: &str) -> ParseResult<bool> {
        if self.is(value) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    // =========================================================================
    // Sanitizers
    // =========================================================================

    pub(crate) fn push_sanitizers(&mut self, sanitizers: &'static [Sanitizer]) -> usize {
        let mark = self.sanitizers.len();
        self.sanitizers.extend(sanitizers.iter());
        mark
    }

    pub(crate) fn truncate_sanitizers(&mut self, mark: usize) {
        self.sanitizers.truncate(mark);
    }

    /// Route the cursor through every sanitizer whose trigger matches the
    /// current token, repeating until none match.
    pub fn sanitize(&mut self) -> ParseResult<()> {
        if self.sanitizing || self.sanitizers.is_empty() {
            return Ok(());
        }
        self.sanitizing = true;
        let result = self.run_sanitizers();
        self.sanitizing = false;
        result
    }

    fn run_sanitizers(&mut self) -> ParseResult<()> {
        loop {
            if self.is_eof() {
                return Ok(());
            }
            let tokens = self.tokens;
            let current = self.current;
            let Some(sanitizer) = self
                .sanitizers
                .iter()
                .copied()
                .find(|sanitizer| sanitizer.matcher.matches(tokens, current))
            else {
                return Ok(());
            };
            (sanitizer.run)(self)?;
            self.skip_layout();
            if self.current == current {
                return Ok(());
            }
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// The error for an unexpected current token.
    #[must_use]
    pub fn halt(&self) -> ParseError {
        if self.is_eof() {
            return self.error("Unexpected end of input");
        }
        let kind = self.tokens.kind(self.current).describe();
        self.error(format!("Unexpected {kind} '{}'", self.value()))
    }

    /// An error with a custom message, attributed to the current token.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let token = self.tokens.get(self.current);
        let message = message.into();
        debug!(
            line = token.line,
            preview = %line_preview(self.tokens, self.current, LINE_PREVIEW_RANGE).text,
            %message,
            "parse halted"
        );
        ParseError {
            message,
            line: token.line,
            start: token.start,
            length: token.value.len() as u32,
        }
    }

    /// Halt on the current token unless `condition` holds.
    pub fn assert(&self, condition: bool) -> ParseResult<()> {
        if condition { Ok(()) } else { Err(self.halt()) }
    }

    /// Fail with a custom message unless `condition` holds.
    pub fn assert_with(&self, condition: bool, message: impl FnOnce() -> String) -> ParseResult<()> {
        if condition {
            Ok(())
        } else {
            Err(self.error(message()))
        }
    }

    // =========================================================================
    // Recursive descent
    // =========================================================================

    /// Parse from the current token with a child parser.
    pub fn parse_with<P: Parser>(&mut self) -> ParseResult<P::Output> {
        if self.depth >= MAX_PARSER_DEPTH {
            return Err(self.error("Maximum parsing depth exceeded"));
        }
        self.depth += 1;
        let result = grammar::stream::<P>(self);
        self.depth -= 1;
        result
    }

    /// Parse `V` values separated by `delimiter`, stopping at `terminator`
    /// without consuming it.
    pub fn parse_sequence<V: Parser>(
        &mut self,
        delimiter: TokenMatcher,
        terminator: TokenMatcher,
    ) -> ParseResult<Vec<V::Output>> {
        sequence::parse_sequence::<V>(self, &delimiter, &terminator)
    }
}
