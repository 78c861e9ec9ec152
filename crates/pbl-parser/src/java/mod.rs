//! Java grammar.
//!
//! One parser per construct, all composed through the engine. [`JavaParser`]
//! is the file-level entry: it owns the comment sanitizer, so comments are
//! skipped everywhere below it.

pub mod block;
pub mod constants;
pub mod control_flow;
pub mod declarations;
pub mod expressions;
pub mod objects;
pub mod operator;
pub mod statement;
pub mod types;
pub mod utils;

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::syntax::{Annotation, Package, TopLevelNode};
use declarations::{AnnotationParser, ImportParser, PackageParser, skip_comment};
use objects::{ClassParser, EnumParser, InterfaceParser};
use once_cell::sync::Lazy;
use pbl_scanner::{TokenId, TokenStream};
use utils::{is_any_modifier, is_comment};

/// The package and top-level nodes of a file, before the token stream is
/// attached.
#[derive(Debug)]
pub struct JavaFile {
    pub package: Option<Package>,
    pub nodes: Vec<TopLevelNode>,
}

/// `class`, `interface` or `enum`, possibly behind modifiers.
fn is_object_start(tokens: &TokenStream, id: TokenId) -> bool {
    let mut current = id;
    while is_any_modifier(tokens, current) {
        current = tokens.next_text(current);
    }
    matches!(tokens.value(current), "class" | "interface" | "enum")
}

pub struct JavaParser {
    file: JavaFile,
    annotations: Vec<Annotation>,
}

impl JavaParser {
    fn on_package(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.file.package = Some(cursor.parse_with::<PackageParser>()?);
        Ok(Signal::Continue)
    }

    fn on_import(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let import = cursor.parse_with::<ImportParser>()?;
        self.file.nodes.push(TopLevelNode::Import(import));
        Ok(Signal::Continue)
    }

    fn on_semicolon(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Continue)
    }

    fn on_annotation(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let annotation = cursor.parse_with::<AnnotationParser>()?;
        self.annotations.push(annotation);
        Ok(Signal::Continue)
    }

    fn on_object(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let mut keyword = cursor.current();
        while is_any_modifier(tokens, keyword) {
            keyword = tokens.next_text(keyword);
        }

        let annotations = std::mem::take(&mut self.annotations);
        let node = match tokens.value(keyword) {
            "interface" => {
                let mut interface = cursor.parse_with::<InterfaceParser>()?;
                interface.annotations = annotations;
                TopLevelNode::Interface(interface)
            }
            "enum" => {
                let mut class = cursor.parse_with::<EnumParser>()?;
                class.annotations = annotations;
                TopLevelNode::Class(class)
            }
            _ => {
                let mut class = cursor.parse_with::<ClassParser>()?;
                class.annotations = annotations;
                TopLevelNode::Class(class)
            }
        };
        self.file.nodes.push(node);
        Ok(Signal::Continue)
    }
}

impl Parser for JavaParser {
    type Output = JavaFile;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<JavaParser>> = Lazy::new(|| {
            Grammar::new("java file")
                .sanitizer(TokenMatcher::Predicate(is_comment), skip_comment)
                .allow(TokenMatcher::Literal("package"), JavaParser::on_package)
                .on(TokenMatcher::Literal("import"), JavaParser::on_import)
                .on(TokenMatcher::Literal(";"), JavaParser::on_semicolon)
                .on(TokenMatcher::Literal("@"), JavaParser::on_annotation)
                .on(TokenMatcher::Predicate(is_object_start), JavaParser::on_object)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self {
            file: JavaFile {
                package: None,
                nodes: Vec::new(),
            },
            annotations: Vec::new(),
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<JavaFile> {
        cursor.assert(self.annotations.is_empty())?;
        Ok(self.file)
    }
}

#[cfg(test)]
#[path = "../../tests/java_parser_tests.rs"]
mod java_parser_tests;

#[cfg(test)]
#[path = "../../tests/precedence_tests.rs"]
mod precedence_tests;
