//! Source text to token stream.
//!
//! At each offset the character classes below are tried in order. The first
//! class that accepts the current character consumes a maximal run of it;
//! symbols and newlines are capped to a single unit (`\r\n` counts as one
//! newline). Whitespace runs are dropped unless they start a line, in which
//! case they are kept as indentation.

use crate::token::{RawToken, TokenKind, TokenStream};
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("Line {line}: Unexpected character '{}'", .character.escape_debug())]
    UnexpectedCharacter { character: char, line: u32, offset: u32 },
}

impl TokenizeError {
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::UnexpectedCharacter { line, .. } => *line,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> u32 {
        match self {
            Self::UnexpectedCharacter { offset, .. } => *offset,
        }
    }
}

/// Characters tokenized as single-character symbols.
const SYMBOL_CHARACTERS: &str = "|=`:;<>?,.-*+/%&!^~[]{}()'\"@\\#";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Symbol,
    Number,
    Word,
    Newline,
    Whitespace,
}

impl CharClass {
    const ORDER: [CharClass; 5] = [
        CharClass::Symbol,
        CharClass::Number,
        CharClass::Word,
        CharClass::Newline,
        CharClass::Whitespace,
    ];

    fn starts(self, c: char) -> bool {
        match self {
            Self::Symbol => SYMBOL_CHARACTERS.contains(c),
            Self::Number => c.is_ascii_digit(),
            Self::Word => c.is_alphanumeric() || c == '_' || c == '$',
            Self::Newline => c == '\r' || c == '\n',
            Self::Whitespace => c.is_whitespace() && c != '\r' && c != '\n',
        }
    }

    fn continues(self, c: char) -> bool {
        match self {
            Self::Number => c.is_ascii_digit() || c == '.',
            Self::Word | Self::Whitespace => self.starts(c),
            Self::Symbol | Self::Newline => false,
        }
    }

    /// Byte length of the run starting at the beginning of `rest`.
    fn consume(self, rest: &str) -> usize {
        match self {
            Self::Symbol => rest.chars().next().map_or(0, char::len_utf8),
            Self::Newline => {
                if rest.starts_with("\r\n") {
                    2
                } else {
                    1
                }
            }
            _ => rest
                .chars()
                .take_while(|&c| self.continues(c))
                .map(char::len_utf8)
                .sum(),
        }
    }
}

/// Tokenize `source` into a linked [`TokenStream`].
///
/// Fails on the first character no class accepts, reporting it with the
/// 1-based line it appears on.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<TokenStream, TokenizeError> {
    let mut raw: Vec<RawToken> = Vec::new();
    let mut line = 1u32;
    let mut offset = 0usize;
    let mut at_line_start = true;

    while let Some(c) = source[offset..].chars().next() {
        let rest = &source[offset..];
        let Some(class) = CharClass::ORDER.iter().copied().find(|class| class.starts(c)) else {
            debug!(line, offset, "unexpected character");
            return Err(TokenizeError::UnexpectedCharacter {
                character: c,
                line,
                offset: offset as u32,
            });
        };

        let length = class.consume(rest);
        let value = &rest[..length];
        let start = offset as u32;

        match class {
            CharClass::Newline => {
                raw.push(RawToken {
                    kind: TokenKind::Newline,
                    value: value.to_string(),
                    line,
                    start,
                });
                line += 1;
                at_line_start = true;
            }
            CharClass::Whitespace => {
                if at_line_start {
                    raw.push(RawToken {
                        kind: TokenKind::Indentation,
                        value: value.to_string(),
                        line,
                        start,
                    });
                }
            }
            CharClass::Symbol | CharClass::Number | CharClass::Word => {
                let kind = match class {
                    CharClass::Symbol => TokenKind::Symbol,
                    CharClass::Number => TokenKind::Number,
                    _ => TokenKind::Word,
                };
                trace!(?kind, value, line, "token");
                raw.push(RawToken {
                    kind,
                    value: value.to_string(),
                    line,
                    start,
                });
                at_line_start = false;
            }
        }

        offset += length;
    }

    debug!(tokens = raw.len(), lines = line, "tokenized");
    Ok(TokenStream::link(raw, line, source))
}

#[cfg(test)]
#[path = "../tests/tokenize_tests.rs"]
mod tokenize_tests;
