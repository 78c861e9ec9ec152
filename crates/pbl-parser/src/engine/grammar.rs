//! Declarative grammars and the streaming driver.
//!
//! A [`Grammar`] is built once per parser type and lists:
//! - ordered `Eat` steps (required) and `Allow` steps (optional), run once
//!   from the first token,
//! - `Match` rules, tried on every following token in specificity order
//!   (literal, list, predicate, pattern; declaration order within a class),
//! - sanitizers, which reroute the cursor before any dispatch while this
//!   parser or one of its children is running.
//!
//! Handlers return a [`Signal`]. `Stop` leaves the cursor where it is for
//! the parent; `Finish` steps past the current token first. Failures are the
//! `Err` arm and unwind through every parser to whoever started the parse.

use super::cursor::{Cursor, ParseError};
use super::matcher::TokenMatcher;
use pbl_scanner::TokenId;
use tracing::trace;

pub type ParseResult<T> = Result<T, ParseError>;

/// A grammar handler. Runs with the cursor on the matched token.
pub type Handler<P> = fn(&mut P, &mut Cursor<'_>) -> ParseResult<Signal>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Keep streaming. If the handler did not move the cursor, the driver
    /// steps to the next token.
    Continue,
    /// End this parser and leave the cursor on the current token.
    Stop,
    /// End this parser and step past the current token.
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepKind {
    Eat,
    Allow,
}

struct Step<P> {
    kind: StepKind,
    matcher: TokenMatcher,
    handler: Handler<P>,
}

struct Rule<P> {
    matcher: TokenMatcher,
    handler: Handler<P>,
}

/// A bypass run whenever its trigger matches the current token.
pub struct Sanitizer {
    pub matcher: TokenMatcher,
    pub run: fn(&mut Cursor<'_>) -> ParseResult<()>,
}

pub struct Grammar<P> {
    name: &'static str,
    steps: Vec<Step<P>>,
    rules: Vec<Rule<P>>,
    sanitizers: Vec<Sanitizer>,
    single_line: bool,
}

impl<P> Grammar<P> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
            rules: Vec::new(),
            sanitizers: Vec::new(),
            single_line: false,
        }
    }

    /// Require the current token to match, then run `handler`.
    #[must_use]
    pub fn eat(mut self, matcher: TokenMatcher, handler: Handler<P>) -> Self {
        self.steps.push(Step {
            kind: StepKind::Eat,
            matcher,
            handler,
        });
        self
    }

    /// Run `handler` if the current token matches; skip otherwise.
    #[must_use]
    pub fn allow(mut self, matcher: TokenMatcher, handler: Handler<P>) -> Self {
        self.steps.push(Step {
            kind: StepKind::Allow,
            matcher,
            handler,
        });
        self
    }

    /// Handle any later token that matches.
    #[must_use]
    pub fn on(mut self, matcher: TokenMatcher, handler: Handler<P>) -> Self {
        self.rules.push(Rule { matcher, handler });
        self
    }

    #[must_use]
    pub fn sanitizer(mut self, matcher: TokenMatcher, run: fn(&mut Cursor<'_>) -> ParseResult<()>) -> Self {
        self.sanitizers.push(Sanitizer { matcher, run });
        self
    }

    /// Halt if the parser crosses onto another line before it ends.
    #[must_use]
    pub const fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    /// Finalize the grammar, ordering `Match` rules by specificity.
    #[must_use]
    pub fn build(mut self) -> Self {
        self.rules.sort_by_key(|rule| rule.matcher.specificity());
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// A parser for one syntactic construct.
pub trait Parser: Sized + 'static {
    type Output;

    fn grammar() -> &'static Grammar<Self>;

    /// Create the parser state; `token` is the construct's first token.
    fn begin(token: TokenId) -> Self;

    /// Runs once, before the grammar's steps.
    fn on_first_token(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Continue)
    }

    /// Produce the parsed node once streaming has ended.
    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Self::Output>;
}

pub(crate) fn stream<P: Parser>(cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
    let grammar = P::grammar();
    cursor.skip_layout();
    let mark = cursor.push_sanitizers(&grammar.sanitizers);
    let result = drive(grammar, cursor);
    cursor.truncate_sanitizers(mark);
    result
}

fn drive<P: Parser>(grammar: &'static Grammar<P>, cursor: &mut Cursor<'_>) -> ParseResult<P::Output> {
    cursor.sanitize()?;
    trace!(parser = grammar.name, line = cursor.line(), "enter");

    let mut parser = P::begin(cursor.current());
    if run(grammar, &mut parser, cursor)? == Signal::Finish {
        cursor.next()?;
    }
    parser.complete(cursor)
}

fn run<P: Parser>(grammar: &Grammar<P>, parser: &mut P, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
    let start_line = cursor.line();

    let signal = parser.on_first_token(cursor)?;
    if signal != Signal::Continue {
        return Ok(signal);
    }

    for step in &grammar.steps {
        let start = cursor.current();
        if !step.matcher.matches(cursor.tokens(), start) {
            if step.kind == StepKind::Eat {
                return Err(cursor.halt());
            }
            continue;
        }
        let signal = (step.handler)(parser, cursor)?;
        if signal != Signal::Continue {
            return Ok(signal);
        }
        if cursor.current() == start {
            cursor.next()?;
        }
    }

    while !cursor.is_eof() {
        if grammar.single_line && cursor.line() != start_line {
            return Err(cursor.halt());
        }
        let start = cursor.current();
        let Some(rule) = grammar
            .rules
            .iter()
            .find(|rule| rule.matcher.matches(cursor.tokens(), start))
        else {
            return Err(cursor.halt());
        };
        let signal = (rule.handler)(parser, cursor)?;
        if signal != Signal::Continue {
            return Ok(signal);
        }
        if cursor.current() == start {
            cursor.next()?;
        }
    }

    Ok(Signal::Stop)
}
