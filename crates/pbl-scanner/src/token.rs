//! Token arena.
//!
//! Tokens are stored in a flat `Vec` and addressed by [`TokenId`]. Each token
//! links to its raw neighbours and to its nearest *text* neighbours (words,
//! numbers and symbols), skipping newline and indentation tokens. The stream
//! always ends in an EOF token whose forward links point at itself, so
//! stepping forward can never run off the end.

use std::fmt;

/// Index of a token within its [`TokenStream`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

impl TokenId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Number,
    Symbol,
    Newline,
    Indentation,
    Eof,
}

impl TokenKind {
    /// Words, numbers and symbols are text tokens.
    #[inline]
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Word | Self::Number | Self::Symbol)
    }

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Number => "number",
            Self::Symbol => "symbol",
            Self::Newline | Self::Indentation | Self::Eof => "token",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 1-based source line.
    pub line: u32,
    /// Byte offset of the first character.
    pub start: u32,
    previous: Option<TokenId>,
    next: TokenId,
    previous_text: Option<TokenId>,
    next_text: TokenId,
}

impl Token {
    #[inline]
    #[must_use]
    pub fn end(&self) -> u32 {
        self.start + self.value.len() as u32
    }
}

/// An immutable, doubly-linked token sequence.
#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    source: String,
}

/// Token data collected by the tokenizer before linking.
pub(crate) struct RawToken {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub start: u32,
}

impl TokenStream {
    /// Link raw tokens and append the EOF sentinel.
    pub(crate) fn link(raw: Vec<RawToken>, eof_line: u32, source: &str) -> Self {
        let eof_start = source.len() as u32;
        let count = raw.len() + 1;
        let eof = TokenId((count - 1) as u32);
        let mut tokens: Vec<Token> = raw
            .into_iter()
            .chain(std::iter::once(RawToken {
                kind: TokenKind::Eof,
                value: String::new(),
                line: eof_line,
                start: eof_start,
            }))
            .enumerate()
            .map(|(i, raw)| Token {
                kind: raw.kind,
                value: raw.value,
                line: raw.line,
                start: raw.start,
                previous: i.checked_sub(1).map(|p| TokenId(p as u32)),
                next: if i + 1 < count { TokenId((i + 1) as u32) } else { eof },
                previous_text: None,
                next_text: eof,
            })
            .collect();

        // Forward pass: previous text links.
        let mut last_text: Option<TokenId> = None;
        for (i, token) in tokens.iter_mut().enumerate() {
            token.previous_text = last_text;
            if token.kind.is_text() {
                last_text = Some(TokenId(i as u32));
            }
        }

        // Backward pass: next text links.
        let mut next_text = eof;
        for (i, token) in tokens.iter_mut().enumerate().rev() {
            token.next_text = next_text;
            if token.kind.is_text() {
                next_text = TokenId(i as u32);
            }
        }

        Self {
            tokens,
            source: source.to_string(),
        }
    }

    /// The source text the stream was tokenized from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text from the start of `first` to the end of `last`,
    /// including any whitespace the tokenizer dropped in between.
    #[must_use]
    pub fn source_between(&self, first: TokenId, last: TokenId) -> &str {
        let start = self.get(first).start as usize;
        let end = self.get(last).end() as usize;
        self.source.get(start..end).unwrap_or_default()
    }

    /// The first token of the stream. Always valid; an empty source yields
    /// a stream containing only EOF.
    #[must_use]
    pub const fn first(&self) -> TokenId {
        TokenId(0)
    }

    /// The first text token, or EOF if the stream contains none.
    #[must_use]
    pub fn first_text(&self) -> TokenId {
        let first = self.first();
        if self.kind(first).is_text() {
            first
        } else {
            self.next_text(first)
        }
    }

    #[must_use]
    pub fn eof(&self) -> TokenId {
        TokenId((self.tokens.len() - 1) as u32)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    #[inline]
    #[must_use]
    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.get(id).kind
    }

    #[inline]
    #[must_use]
    pub fn value(&self, id: TokenId) -> &str {
        &self.get(id).value
    }

    #[inline]
    #[must_use]
    pub fn line(&self, id: TokenId) -> u32 {
        self.get(id).line
    }

    #[inline]
    #[must_use]
    pub fn is_eof(&self, id: TokenId) -> bool {
        self.kind(id) == TokenKind::Eof
    }

    #[inline]
    #[must_use]
    pub fn next(&self, id: TokenId) -> TokenId {
        self.get(id).next
    }

    #[inline]
    #[must_use]
    pub fn previous(&self, id: TokenId) -> Option<TokenId> {
        self.get(id).previous
    }

    #[inline]
    #[must_use]
    pub fn next_text(&self, id: TokenId) -> TokenId {
        self.get(id).next_text
    }

    #[inline]
    #[must_use]
    pub fn previous_text(&self, id: TokenId) -> Option<TokenId> {
        self.get(id).previous_text
    }

    /// Whether `b` starts exactly where `a` ends, with no whitespace between.
    #[must_use]
    pub fn are_adjacent(&self, a: TokenId, b: TokenId) -> bool {
        self.get(a).end() == self.get(b).start && self.next(a) == b
    }

    /// Number of tokens, including EOF.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds nothing but EOF.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (TokenId(i as u32), token))
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token.kind {
                TokenKind::Indentation => f.write_str(" ")?,
                _ => f.write_str(&token.value)?,
            }
        }
        Ok(())
    }
}
