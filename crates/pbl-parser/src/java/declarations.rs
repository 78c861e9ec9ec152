//! Packages, imports, annotations and comments.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::constants::any;
use crate::java::expressions::ReferenceParser;
use crate::java::statement::StatementParser;
use crate::syntax::{Annotation, Import, Package};
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;
use pbl_scanner::token_utils::{is_newline, is_word};

// =============================================================================
// Package
// =============================================================================

pub struct PackageParser {
    paths: Vec<String>,
    terminated: bool,
    token: TokenId,
}

impl PackageParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_path(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let follows_dot = cursor
            .previous()
            .is_some_and(|previous| tokens.value(previous) == ".");
        cursor.assert(self.paths.is_empty() || follows_dot)?;
        self.paths.push(cursor.value().to_string());
        Ok(Signal::Continue)
    }

    fn on_dot(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(!self.paths.is_empty() && is_word(cursor.tokens(), cursor.peek()))?;
        Ok(Signal::Continue)
    }

    fn on_end(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(!self.paths.is_empty())?;
        self.terminated = true;
        Ok(Signal::Finish)
    }
}

impl Parser for PackageParser {
    type Output = Package;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<PackageParser>> = Lazy::new(|| {
            Grammar::new("package")
                .eat(TokenMatcher::Literal("package"), PackageParser::on_keyword)
                .on(TokenMatcher::Literal("."), PackageParser::on_dot)
                .on(TokenMatcher::Literal(";"), PackageParser::on_end)
                .on(TokenMatcher::Predicate(is_word), PackageParser::on_path)
                .single_line()
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            paths: Vec::new(),
            terminated: false,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Package> {
        cursor.assert(self.terminated)?;
        Ok(Package {
            paths: self.paths,
            token: self.token,
        })
    }
}

// =============================================================================
// Import
// =============================================================================

pub struct ImportParser {
    paths: Vec<String>,
    part: String,
    non_default_imports: Vec<String>,
    is_static: bool,
    is_wildcard: bool,
    terminated: bool,
    token: TokenId,
}

impl ImportParser {
    fn save_part(&mut self) {
        if !self.part.is_empty() {
            self.paths.push(std::mem::take(&mut self.part));
        }
    }

    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_static(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.is_static = true;
        Ok(Signal::Continue)
    }

    fn on_word(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.non_default_imports.is_empty() && !self.is_wildcard)?;
        self.part.push_str(cursor.value());
        Ok(Signal::Continue)
    }

    fn on_dot(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let previous_is_dot = cursor
            .previous_raw()
            .is_some_and(|previous| tokens.value(previous) == ".");
        let next_is_dot = tokens.value(cursor.peek_raw()) == ".";
        cursor.assert(!self.part.is_empty() && !previous_is_dot && !next_is_dot)?;
        self.save_part();
        Ok(Signal::Continue)
    }

    fn on_group_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert_with(!self.is_static, || "Non-default imports cannot be static".to_string())?;
        cursor.assert(self.part.is_empty() && !self.paths.is_empty())?;
        cursor.next()?;
        self.non_default_imports = cursor
            .parse_sequence::<ReferenceParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("}"))?
            .into_iter()
            .map(|reference| reference.name)
            .collect();
        Ok(Signal::Continue)
    }

    fn on_group_close(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(!self.non_default_imports.is_empty())?;
        Ok(Signal::Continue)
    }

    fn on_wildcard(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let next = cursor.peek_raw();
        cursor.assert(
            self.part.is_empty()
                && self.non_default_imports.is_empty()
                && cursor.tokens().value(next) == ";",
        )?;
        self.is_wildcard = true;
        Ok(Signal::Continue)
    }

    fn on_end(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.save_part();
        cursor.assert(!self.paths.is_empty())?;
        self.terminated = true;
        Ok(Signal::Finish)
    }
}

impl Parser for ImportParser {
    type Output = Import;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ImportParser>> = Lazy::new(|| {
            Grammar::new("import")
                .eat(TokenMatcher::Literal("import"), ImportParser::on_keyword)
                .allow(TokenMatcher::Literal("static"), ImportParser::on_static)
                .eat(TokenMatcher::Predicate(is_word), ImportParser::on_word)
                .on(TokenMatcher::Literal("."), ImportParser::on_dot)
                .on(TokenMatcher::Literal("{"), ImportParser::on_group_open)
                .on(TokenMatcher::Literal("}"), ImportParser::on_group_close)
                .on(TokenMatcher::Literal("*"), ImportParser::on_wildcard)
                .on(TokenMatcher::Literal(";"), ImportParser::on_end)
                .on(TokenMatcher::Predicate(is_word), ImportParser::on_word)
                .single_line()
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            paths: Vec::new(),
            part: String::new(),
            non_default_imports: Vec::new(),
            is_static: false,
            is_wildcard: false,
            terminated: false,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Import> {
        cursor.assert(self.terminated)?;

        let has_default = self.non_default_imports.is_empty() && !self.is_wildcard;
        let default_import = if !has_default {
            None
        } else if self.is_static {
            // `import static a.B.member;` makes `B` available.
            self.paths.iter().rev().nth(1).cloned()
        } else {
            self.paths.last().cloned()
        };

        Ok(Import {
            paths: self.paths,
            default_import,
            non_default_imports: self.non_default_imports,
            is_wildcard: self.is_wildcard,
            is_static: self.is_static,
            token: self.token,
        })
    }
}

// =============================================================================
// Annotation
// =============================================================================

pub struct AnnotationParser {
    annotation: Annotation,
}

impl AnnotationParser {
    fn on_at(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.annotation.name = cursor.value().to_string();
        Ok(Signal::Continue)
    }

    fn on_arguments(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.annotation.arguments = cursor
            .parse_sequence::<StatementParser>(TokenMatcher::Literal(","), TokenMatcher::Literal(")"))?;
        cursor.assert(cursor.is(")"))?;
        Ok(Signal::Finish)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for AnnotationParser {
    type Output = Annotation;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<AnnotationParser>> = Lazy::new(|| {
            Grammar::new("annotation")
                .eat(TokenMatcher::Literal("@"), AnnotationParser::on_at)
                .eat(TokenMatcher::Predicate(is_word), AnnotationParser::on_name)
                .allow(TokenMatcher::Literal("("), AnnotationParser::on_arguments)
                .on(any(), AnnotationParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            annotation: Annotation {
                name: String::new(),
                arguments: Vec::new(),
                token,
            },
        }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Annotation> {
        Ok(self.annotation)
    }
}

// =============================================================================
// Comments
// =============================================================================

/// Skips a `//` line comment or a `/* */` block comment. Runs as a
/// sanitizer, so it never produces a node.
pub struct CommentParser;

impl CommentParser {
    fn skip_line(cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        while !cursor.is_eof() && !is_newline(cursor.tokens(), cursor.current()) {
            cursor.advance_raw();
        }
        cursor.next()?;
        Ok(Signal::Stop)
    }

    fn skip_block(cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.advance_raw();
        cursor.advance_raw();
        loop {
            if cursor.is_eof() {
                return Err(cursor.error("Unterminated block comment"));
            }
            let tokens = cursor.tokens();
            let next = cursor.peek_raw();
            if cursor.is("*") && tokens.value(next) == "/" && tokens.are_adjacent(cursor.current(), next) {
                cursor.advance_raw();
                cursor.next()?;
                return Ok(Signal::Stop);
            }
            cursor.advance_raw();
        }
    }
}

impl Parser for CommentParser {
    type Output = ();

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<CommentParser>> = Lazy::new(|| Grammar::new("comment").build());
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let marker = cursor.tokens().value(cursor.peek_raw());
        if marker == "/" {
            Self::skip_line(cursor)
        } else {
            Self::skip_block(cursor)
        }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<()> {
        Ok(())
    }
}

/// Sanitizer entry point for comments.
pub fn skip_comment(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    cursor.parse_with::<CommentParser>()
}
