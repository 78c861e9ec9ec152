use super::*;
use crate::java::constants::any;
use pbl_scanner::token_utils::is_word;
use pbl_scanner::{TokenId, TokenStream, tokenize};
use once_cell::sync::Lazy;

fn tokens(source: &str) -> TokenStream {
    tokenize(source).expect("tokenize")
}

fn parse<P: Parser>(source: &str) -> ParseResult<P::Output> {
    let stream = tokens(source);
    let mut cursor = Cursor::new(&stream);
    cursor.parse_with::<P>()
}

// =============================================================================
// Test grammars
// =============================================================================

/// A single word.
struct WordParser;

impl Parser for WordParser {
    type Output = String;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<WordParser>> = Lazy::new(|| Grammar::new("word").build());
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(is_word(cursor.tokens(), cursor.current()))?;
        Ok(Signal::Finish)
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<String> {
        let previous = cursor.previous().ok_or_else(|| cursor.halt())?;
        Ok(cursor.tokens().value(previous).to_string())
    }
}

/// `[ word, word, ... ]`
struct ListParser {
    items: Vec<String>,
}

impl ListParser {
    fn on_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.items = cursor
            .parse_sequence::<WordParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("]"))?;
        Ok(Signal::Continue)
    }

    fn on_close(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Finish)
    }
}

impl Parser for ListParser {
    type Output = Vec<String>;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ListParser>> = Lazy::new(|| {
            Grammar::new("list")
                .eat(TokenMatcher::Literal("["), ListParser::on_open)
                .eat(TokenMatcher::Literal("]"), ListParser::on_close)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self { items: Vec::new() }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Vec<String>> {
        Ok(self.items)
    }
}

/// Records which rule handled each token until `;`.
struct TraceParser {
    fired: Vec<&'static str>,
}

impl TraceParser {
    fn on_pattern(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.fired.push("pattern");
        Ok(Signal::Continue)
    }

    fn on_word(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.fired.push("predicate");
        Ok(Signal::Continue)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.fired.push("literal");
        Ok(Signal::Stop)
    }

    fn on_optional(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.fired.push("allow");
        Ok(Signal::Continue)
    }
}

impl Parser for TraceParser {
    type Output = Vec<&'static str>;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<TraceParser>> = Lazy::new(|| {
            Grammar::new("trace")
                .allow(TokenMatcher::Literal("maybe"), TraceParser::on_optional)
                .on(any(), TraceParser::on_pattern)
                .on(TokenMatcher::Predicate(is_word), TraceParser::on_word)
                .on(TokenMatcher::Literal(";"), TraceParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self { fired: Vec::new() }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Vec<&'static str>> {
        Ok(self.fired)
    }
}

/// Words on a single line, skipping `#` markers.
struct LineParser {
    words: Vec<String>,
}

fn skip_marker(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    cursor.next()
}

impl LineParser {
    fn on_word(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.words.push(cursor.value().to_string());
        Ok(Signal::Continue)
    }
}

impl Parser for LineParser {
    type Output = Vec<String>;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<LineParser>> = Lazy::new(|| {
            Grammar::new("line")
                .sanitizer(TokenMatcher::Literal("#"), skip_marker)
                .on(TokenMatcher::Predicate(is_word), LineParser::on_word)
                .single_line()
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self { words: Vec::new() }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Vec<String>> {
        Ok(self.words)
    }
}

/// Recurses without consuming anything.
struct BottomlessParser;

impl Parser for BottomlessParser {
    type Output = ();

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<BottomlessParser>> =
            Lazy::new(|| Grammar::new("bottomless").build());
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.parse_with::<BottomlessParser>()?;
        Ok(Signal::Stop)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<()> {
        Ok(())
    }
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_sequence_in_source_order() {
    let items = parse::<ListParser>("[a, b, c]").expect("list should parse");
    assert_eq!(items, vec!["a", "b", "c"]);
}

#[test]
fn test_sequence_with_immediate_terminator_is_empty() {
    let items = parse::<ListParser>("[]").expect("empty list should parse");
    assert!(items.is_empty(), "expected no items, got {items:?}");
}

#[test]
fn test_sequence_missing_delimiter_halts() {
    let error = parse::<ListParser>("[a b]").expect_err("missing ',' should halt");
    assert_eq!(error.message, "Unexpected word 'b'");
}

#[test]
fn test_sequence_at_eof_leaves_terminator_to_caller() {
    let error = parse::<ListParser>("[a, b").expect_err("missing ']' should halt");
    assert_eq!(error.message, "Unexpected end of input");
}

// =============================================================================
// Steps and rules
// =============================================================================

#[test]
fn test_eat_step_halts_when_unmatched() {
    let error = parse::<ListParser>("a]").expect_err("missing '[' should halt");
    assert_eq!(error.message, "Unexpected word 'a'");
    assert_eq!(error.line, 1);
}

#[test]
fn test_allow_step_is_optional() {
    let with = parse::<TraceParser>("maybe ;").expect("should parse");
    assert_eq!(with, vec!["allow", "literal"]);

    let without = parse::<TraceParser>(";").expect("should parse");
    assert_eq!(without, vec!["literal"]);
}

#[test]
fn test_rules_are_tried_by_specificity() {
    let fired = parse::<TraceParser>("x + ;").expect("should parse");
    assert_eq!(
        fired,
        vec!["predicate", "pattern", "literal"],
        "literal beats predicate beats pattern regardless of declaration order"
    );
}

#[test]
fn test_stop_leaves_cursor_on_terminator() {
    let stream = tokens("x ; y");
    let mut cursor = Cursor::new(&stream);
    cursor.parse_with::<TraceParser>().expect("should parse");
    assert_eq!(cursor.value(), ";");
}

#[test]
fn test_finish_steps_past_final_token() {
    let stream = tokens("[a] next");
    let mut cursor = Cursor::new(&stream);
    cursor.parse_with::<ListParser>().expect("should parse");
    assert_eq!(cursor.value(), "next");
}

#[test]
fn test_error_reports_line_of_offending_token() {
    let error = parse::<ListParser>("[a,\n b c]").expect_err("should halt");
    assert_eq!(error.line, 2);
    assert_eq!(error.to_string(), "Line 2: Unexpected word 'c'");
}

// =============================================================================
// Single line and sanitizers
// =============================================================================

#[test]
fn test_single_line_parser_halts_on_new_line() {
    let error = parse::<LineParser>("a b\nc").expect_err("crossing a line should halt");
    assert_eq!(error.line, 2);
}

#[test]
fn test_single_line_parser_ends_at_eof() {
    let words = parse::<LineParser>("a b").expect("should parse");
    assert_eq!(words, vec!["a", "b"]);
}

#[test]
fn test_sanitizer_skips_markers() {
    let words = parse::<LineParser>("# a # b #").expect("should parse");
    assert_eq!(words, vec!["a", "b"], "markers should never reach the rules");
}

// =============================================================================
// Depth
// =============================================================================

#[test]
fn test_runaway_recursion_is_an_error() {
    let error = parse::<BottomlessParser>("x").expect_err("recursion should be capped");
    assert_eq!(error.message, "Maximum parsing depth exceeded");
}
