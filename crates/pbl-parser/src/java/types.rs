//! Type references and generic parameters.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::constants::any;
use crate::syntax::JavaType;
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;
use pbl_scanner::token_utils::is_word;

/// Parses `a.b.C<D, E<F>>[][]`, diamond `<>` included.
pub struct TypeParser {
    ty: JavaType,
}

impl TypeParser {
    /// `?` and `? super T` read as `Object`; `? extends T` reads as `T`.
    fn parse_wildcard(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let token = cursor.current();
        cursor.next()?;
        if cursor.is("extends") {
            cursor.next()?;
            self.ty = cursor.parse_with::<TypeParser>()?;
        } else {
            if cursor.is("super") {
                cursor.next()?;
                cursor.parse_with::<TypeParser>()?;
            }
            self.ty = JavaType::named("Object", token);
        }
        Ok(Signal::Stop)
    }

    fn on_open_bracket(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let next = cursor.peek_raw();
        if cursor.tokens().value(next) != "]" {
            // `new T[n]`: the size belongs to the instantiation.
            return Ok(Signal::Stop);
        }
        Ok(Signal::Continue)
    }

    fn on_close_bracket(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.ty.array_dimensions += 1;
        Ok(Signal::Continue)
    }

    fn on_generic_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let ty = &self.ty;
        cursor.assert_with(!ty.is_array(), || format!("[] type '{}' cannot be generic", ty.name()))?;
        cursor.next()?;
        if cursor.is(">") {
            // Diamond: the generic types are inferred.
            cursor.next()?;
            return Ok(Signal::Continue);
        }

        self.ty.generic_types = cursor.parse_sequence::<TypeParser>(
            TokenMatcher::Literal(","),
            TokenMatcher::Literal(">"),
        )?;
        cursor.assert(cursor.is(">"))?;
        if cursor.tokens().value(cursor.peek_raw()) == "[" {
            return Ok(Signal::Continue);
        }
        Ok(Signal::Finish)
    }

    fn on_generic_close(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let has_dimensions_after =
            !self.ty.generic_types.is_empty() && cursor.tokens().value(cursor.peek_raw()) == "[";
        if has_dimensions_after {
            Ok(Signal::Continue)
        } else {
            Ok(Signal::Stop)
        }
    }

    fn on_other(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for TypeParser {
    type Output = JavaType;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<TypeParser>> = Lazy::new(|| {
            Grammar::new("type")
                .on(TokenMatcher::Literal("["), TypeParser::on_open_bracket)
                .on(TokenMatcher::Literal("]"), TypeParser::on_close_bracket)
                .on(TokenMatcher::Literal("<"), TypeParser::on_generic_open)
                .on(TokenMatcher::Literal(">"), TypeParser::on_generic_close)
                .on(any(), TypeParser::on_other)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            ty: JavaType {
                namespace_chain: Vec::new(),
                generic_types: Vec::new(),
                array_dimensions: 0,
                token,
            },
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        if cursor.is("?") {
            return self.parse_wildcard(cursor);
        }
        cursor.assert(is_word(tokens, cursor.current()))?;
        self.ty.namespace_chain.push(cursor.value().to_string());

        // Namespaces are read on the raw stream so `a . b` is not a type.
        loop {
            let dot = cursor.peek_raw();
            let segment = tokens.next(dot);
            if tokens.value(dot) != "." || !is_word(tokens, segment) {
                break;
            }
            cursor.advance_raw();
            cursor.advance_raw();
            self.ty.namespace_chain.push(cursor.value().to_string());
        }

        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<JavaType> {
        Ok(self.ty)
    }
}

/// A class or method type parameter, `T` or `T extends Bound`. The bound is
/// parsed but not kept.
pub struct GenericParameterParser {
    name: String,
}

impl GenericParameterParser {
    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.name = cursor.eat_word()?;
        Ok(Signal::Continue)
    }

    fn on_bound(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        cursor.parse_with::<TypeParser>()?;
        while cursor.is("&") {
            cursor.next()?;
            cursor.parse_with::<TypeParser>()?;
        }
        Ok(Signal::Stop)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for GenericParameterParser {
    type Output = String;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<GenericParameterParser>> = Lazy::new(|| {
            Grammar::new("generic parameter")
                .eat(TokenMatcher::Predicate(is_word), GenericParameterParser::on_name)
                .allow(TokenMatcher::Literal("extends"), GenericParameterParser::on_bound)
                .on(any(), GenericParameterParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self { name: String::new() }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<String> {
        Ok(self.name)
    }
}
