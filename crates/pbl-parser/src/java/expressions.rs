//! Value-producing constructs: references, literals, calls, property chains,
//! instantiations, lambdas, local declarations, instructions and assertions.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::block::BlockParser;
use crate::java::constants::{KEYWORD_LITERAL_MATCHERS, any, quote};
use crate::java::objects::ObjectBodyParser;
use crate::java::statement::StatementParser;
use crate::java::types::TypeParser;
use crate::java::utils::{is_function_call, is_lambda_arrow, is_type};
use crate::syntax::{
    Assertion, FunctionCall, Instantiation, Instruction, InstructionKind, JavaType, Lambda,
    LambdaBody, LambdaParameter, Literal, LiteralKind, ObjectBody, Property, PropertyChain, Reference,
    Statement, VariableDeclaration,
};
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;
use pbl_scanner::token_utils::{is_newline, is_number, is_word};

fn next_text_is(cursor: &Cursor<'_>, value: &str) -> bool {
    cursor.tokens().value(cursor.peek()) == value
}

// =============================================================================
// Reference
// =============================================================================

pub struct ReferenceParser {
    name: String,
    token: TokenId,
}

impl Parser for ReferenceParser {
    type Output = Reference;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ReferenceParser>> = Lazy::new(|| Grammar::new("reference").build());
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            name: String::new(),
            token,
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(is_word(cursor.tokens(), cursor.current()))?;
        self.name = cursor.value().to_string();
        Ok(Signal::Finish)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Reference> {
        Ok(Reference {
            name: self.name,
            token: self.token,
        })
    }
}

// =============================================================================
// Literal
// =============================================================================

/// `e10` in `1e10`.
fn is_exponent(word: &str) -> bool {
    word.len() > 1
        && word.starts_with(['e', 'E'])
        && word[1..].chars().all(|c| c.is_ascii_digit())
}

pub struct LiteralParser {
    literal: Literal,
}

impl LiteralParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.literal.kind = LiteralKind::Keyword;
        self.literal.value = cursor.value().to_string();
        Ok(Signal::Finish)
    }

    /// Hex prefixes and type suffixes arrive as adjacent word tokens:
    /// `0` `xFF`, `1.5` `f`. Suffixes are dropped.
    fn on_number(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        self.literal.kind = LiteralKind::Number;
        self.literal.value = cursor.value().to_string();

        let next = cursor.peek_raw();
        if !is_word(tokens, next) || !tokens.are_adjacent(cursor.current(), next) {
            return Ok(Signal::Finish);
        }
        let continuation = tokens.value(next);
        if self.literal.value == "0" && continuation.starts_with(['x', 'X']) {
            self.literal.value.push_str(continuation);
            cursor.advance_raw();
        } else if is_exponent(continuation) {
            self.literal.value.push_str(continuation);
            cursor.advance_raw();
        } else if matches!(continuation, "f" | "F" | "d" | "D" | "l" | "L") {
            cursor.advance_raw();
        } else {
            return Err(cursor.error("Invalid number literal"));
        }
        Ok(Signal::Finish)
    }

    /// Walks the raw stream to the matching unescaped quote, keeping the
    /// source text between the quotes verbatim.
    fn on_string(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let open = cursor.current();
        let quote = cursor.value();
        let mut escaped = false;

        loop {
            let next = cursor.peek_raw();
            if is_newline(tokens, next) {
                cursor.advance_raw();
                return Err(cursor.error("String literals must be single-line only"));
            }
            if tokens.is_eof(next) {
                cursor.advance_raw();
                return Err(cursor.halt());
            }
            cursor.advance_raw();
            if cursor.is(quote) && !escaped {
                break;
            }
            escaped = cursor.is("\\") && !escaped;
        }

        self.literal.kind = LiteralKind::String;
        self.literal.value = tokens.source_between(open, cursor.current()).to_string();
        Ok(Signal::Finish)
    }

    fn on_array(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.literal.kind = LiteralKind::Array;
        cursor.next()?;
        self.literal.elements = cursor
            .parse_sequence::<StatementParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("}"))?;
        cursor.assert(cursor.is("}"))?;
        Ok(Signal::Finish)
    }
}

impl Parser for LiteralParser {
    type Output = Literal;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<LiteralParser>> = Lazy::new(|| {
            Grammar::new("literal")
                .on(TokenMatcher::Literal("{"), LiteralParser::on_array)
                .on(TokenMatcher::AnyOf(KEYWORD_LITERAL_MATCHERS), LiteralParser::on_keyword)
                .on(TokenMatcher::Predicate(is_number), LiteralParser::on_number)
                .on(quote(), LiteralParser::on_string)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            literal: Literal {
                kind: LiteralKind::Keyword,
                value: String::new(),
                elements: Vec::new(),
                token,
            },
        }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Literal> {
        Ok(self.literal)
    }
}

// =============================================================================
// Function call
// =============================================================================

/// `name(args)`, `<T>name(args)`, or a nameless `(args)` continuing a chain.
pub struct FunctionCallParser {
    call: FunctionCall,
}

impl FunctionCallParser {
    fn on_generic_arguments(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.call.generic_arguments = cursor
            .parse_sequence::<TypeParser>(TokenMatcher::Literal(","), TokenMatcher::Literal(">"))?;
        cursor.eat(">")?;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.call.name = Some(cursor.value().to_string());
        Ok(Signal::Continue)
    }

    fn on_arguments(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.call.arguments = cursor
            .parse_sequence::<StatementParser>(TokenMatcher::Literal(","), TokenMatcher::Literal(")"))?;
        Ok(Signal::Continue)
    }

    fn on_close(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Finish)
    }
}

impl Parser for FunctionCallParser {
    type Output = FunctionCall;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<FunctionCallParser>> = Lazy::new(|| {
            Grammar::new("function call")
                .allow(TokenMatcher::Literal("<"), FunctionCallParser::on_generic_arguments)
                .allow(TokenMatcher::Predicate(is_word), FunctionCallParser::on_name)
                .eat(TokenMatcher::Literal("("), FunctionCallParser::on_arguments)
                .eat(TokenMatcher::Literal(")"), FunctionCallParser::on_close)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            call: FunctionCall {
                name: None,
                generic_arguments: Vec::new(),
                arguments: Vec::new(),
                token,
            },
        }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<FunctionCall> {
        Ok(self.call)
    }
}

// =============================================================================
// Property chain
// =============================================================================

/// `a.b().c[0].d`. A chain ending in a type (`a.b.C value`) is returned with
/// a final [`Property::Type`] so the statement can turn it into a
/// declaration.
pub struct PropertyChainParser {
    properties: Vec<Property>,
    token: TokenId,
}

impl PropertyChainParser {
    fn on_word(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let follows_dot = cursor
            .previous_raw()
            .is_some_and(|previous| tokens.value(previous) == ".");
        if !self.properties.is_empty() && !follows_dot {
            return Ok(Signal::Stop);
        }

        let current = cursor.current();
        if is_function_call(tokens, current) {
            let call = cursor.parse_with::<FunctionCallParser>()?;
            self.properties.push(Property::Call(call));
            return Ok(Signal::Continue);
        }

        if is_type(tokens, current) {
            let only_references = self
                .properties
                .iter()
                .all(|property| matches!(property, Property::Reference(_)));
            cursor.assert(only_references)?;
            let ty = cursor.parse_with::<TypeParser>()?;
            self.properties.push(Property::Type(ty));
            return Ok(Signal::Stop);
        }

        let reference = cursor.parse_with::<ReferenceParser>()?;
        self.properties.push(Property::Reference(reference));
        Ok(Signal::Continue)
    }

    fn on_dot(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let next = cursor.peek_raw();
        cursor.assert(tokens.kind(next).is_text() && !matches!(tokens.value(next), "." | "["))?;
        cursor.next()?;
        if cursor.is("<") {
            // `a.<T>b()`
            let call = cursor.parse_with::<FunctionCallParser>()?;
            self.properties.push(Property::Call(call));
        }
        Ok(Signal::Continue)
    }

    fn on_index_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        let index = cursor.parse_with::<StatementParser>()?;
        cursor.eat("]")?;
        self.properties.push(Property::Index(index));
        Ok(Signal::Continue)
    }

    /// `a[0](x)` and `f()(x)`.
    fn on_call(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let continues_call = cursor
            .previous()
            .is_some_and(|previous| matches!(tokens.value(previous), ")" | "]"));
        if !continues_call || self.properties.is_empty() {
            return Ok(Signal::Stop);
        }
        let call = cursor.parse_with::<FunctionCallParser>()?;
        self.properties.push(Property::Call(call));
        Ok(Signal::Continue)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for PropertyChainParser {
    type Output = PropertyChain;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<PropertyChainParser>> = Lazy::new(|| {
            Grammar::new("property chain")
                .on(TokenMatcher::Literal("."), PropertyChainParser::on_dot)
                .on(TokenMatcher::Literal("["), PropertyChainParser::on_index_open)
                .on(TokenMatcher::Literal("("), PropertyChainParser::on_call)
                .on(TokenMatcher::Predicate(is_word), PropertyChainParser::on_word)
                .on(any(), PropertyChainParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            properties: Vec::new(),
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<PropertyChain> {
        cursor.assert(!self.properties.is_empty())?;
        Ok(PropertyChain {
            properties: self.properties,
            token: self.token,
        })
    }
}

// =============================================================================
// Instantiation
// =============================================================================

/// `new T(args)`, `new T(args) { body }`, `new T[n]` and `new T[] { ... }`.
pub struct InstantiationParser {
    constructor: Option<JavaType>,
    arguments: Vec<Statement>,
    array_allocation_size: Option<Box<Statement>>,
    array_literal: Option<Literal>,
    anonymous_object_body: Option<ObjectBody>,
    is_object: bool,
    token: TokenId,
}

impl InstantiationParser {
    fn on_new(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_constructor(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.constructor = Some(cursor.parse_with::<TypeParser>()?);
        Ok(Signal::Continue)
    }

    fn on_size_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        let size = cursor.parse_with::<StatementParser>()?;
        cursor.assert(cursor.is("]"))?;
        self.array_allocation_size = Some(Box::new(size));
        Ok(Signal::Continue)
    }

    fn on_size_close(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        if next_text_is(cursor, "{") {
            return Ok(Signal::Continue);
        }
        Ok(Signal::Finish)
    }

    fn on_arguments_open(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.array_allocation_size.is_none())?;
        self.is_object = true;
        cursor.next()?;
        self.arguments = cursor
            .parse_sequence::<StatementParser>(TokenMatcher::Literal(","), TokenMatcher::Literal(")"))?;
        cursor.assert(cursor.is(")"))?;
        Ok(Signal::Continue)
    }

    fn on_arguments_close(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        if next_text_is(cursor, "{") {
            return Ok(Signal::Continue);
        }
        Ok(Signal::Finish)
    }

    fn on_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        if self.is_object {
            cursor.next()?;
            self.anonymous_object_body = Some(cursor.parse_with::<ObjectBodyParser>()?);
        } else {
            let is_array = self.constructor.as_ref().is_some_and(JavaType::is_array);
            cursor.assert(is_array && self.array_allocation_size.is_none())?;
            self.array_literal = Some(cursor.parse_with::<LiteralParser>()?);
        }
        Ok(Signal::Stop)
    }
}

impl Parser for InstantiationParser {
    type Output = Instantiation;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<InstantiationParser>> = Lazy::new(|| {
            Grammar::new("instantiation")
                .eat(TokenMatcher::Literal("new"), InstantiationParser::on_new)
                .eat(TokenMatcher::Predicate(is_word), InstantiationParser::on_constructor)
                .allow(TokenMatcher::Literal("["), InstantiationParser::on_size_open)
                .allow(TokenMatcher::Literal("]"), InstantiationParser::on_size_close)
                .allow(TokenMatcher::Literal("("), InstantiationParser::on_arguments_open)
                .allow(TokenMatcher::Literal(")"), InstantiationParser::on_arguments_close)
                .allow(TokenMatcher::Literal("{"), InstantiationParser::on_body)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            constructor: None,
            arguments: Vec::new(),
            array_allocation_size: None,
            array_literal: None,
            anonymous_object_body: None,
            is_object: false,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Instantiation> {
        let Some(constructor) = self.constructor else {
            return Err(cursor.halt());
        };
        let is_complete =
            self.is_object || self.array_allocation_size.is_some() || self.array_literal.is_some();
        cursor.assert(is_complete)?;
        Ok(Instantiation {
            constructor,
            arguments: self.arguments,
            array_allocation_size: self.array_allocation_size,
            array_literal: self.array_literal,
            anonymous_object_body: self.anonymous_object_body,
            token: self.token,
        })
    }
}

// =============================================================================
// Lambda
// =============================================================================

pub struct LambdaParser {
    parameters: Vec<LambdaParameter>,
    body: Option<LambdaBody>,
    token: TokenId,
}

impl LambdaParser {
    fn on_single_parameter(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let reference = cursor.parse_with::<ReferenceParser>()?;
        self.parameters.push(LambdaParameter::Untyped(reference));
        Ok(Signal::Continue)
    }

    fn on_parameter_list(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.parameters.is_empty())?;
        cursor.next()?;
        while !cursor.is(")") {
            let parameter = if is_type(cursor.tokens(), cursor.current()) {
                LambdaParameter::Typed(cursor.parse_with::<VariableDeclarationParser>()?)
            } else {
                LambdaParameter::Untyped(cursor.parse_with::<ReferenceParser>()?)
            };
            self.parameters.push(parameter);
            if !cursor.is(")") {
                cursor.eat(",")?;
            }
        }
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_arrow(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.advance_raw();
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_block_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.body = Some(LambdaBody::Block(cursor.parse_with::<BlockParser>()?));
        Ok(Signal::Stop)
    }

    fn on_statement_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let statement = cursor.parse_with::<StatementParser>()?;
        self.body = Some(LambdaBody::Statement(Box::new(statement)));
        Ok(Signal::Stop)
    }
}

impl Parser for LambdaParser {
    type Output = Lambda;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<LambdaParser>> = Lazy::new(|| {
            Grammar::new("lambda")
                .allow(TokenMatcher::Predicate(is_word), LambdaParser::on_single_parameter)
                .allow(TokenMatcher::Literal("("), LambdaParser::on_parameter_list)
                .eat(TokenMatcher::Predicate(is_lambda_arrow), LambdaParser::on_arrow)
                .allow(TokenMatcher::Literal("{"), LambdaParser::on_block_body)
                .eat(any(), LambdaParser::on_statement_body)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            parameters: Vec::new(),
            body: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Lambda> {
        let Some(body) = self.body else {
            return Err(cursor.halt());
        };
        Ok(Lambda {
            parameters: self.parameters,
            body,
            token: self.token,
        })
    }
}

// =============================================================================
// Variable declaration
// =============================================================================

/// `[final] Type [...] name`. Any initializer is left to the statement.
pub struct VariableDeclarationParser {
    is_final: bool,
    ty: Option<JavaType>,
    name: String,
    is_variadic: bool,
    token: TokenId,
}

impl VariableDeclarationParser {
    fn on_variadic(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(!self.is_variadic)?;
        for _ in 0..3 {
            cursor.eat(".")?;
        }
        self.is_variadic = true;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.name = cursor.value().to_string();
        Ok(Signal::Finish)
    }
}

impl Parser for VariableDeclarationParser {
    type Output = VariableDeclaration;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<VariableDeclarationParser>> = Lazy::new(|| {
            Grammar::new("variable declaration")
                .on(TokenMatcher::Literal("."), VariableDeclarationParser::on_variadic)
                .on(TokenMatcher::Predicate(is_word), VariableDeclarationParser::on_name)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            is_final: false,
            ty: None,
            name: String::new(),
            is_variadic: false,
            token,
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        if cursor.is("final") {
            self.is_final = true;
            cursor.next()?;
        }
        self.ty = Some(cursor.parse_with::<TypeParser>()?);
        Ok(Signal::Continue)
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<VariableDeclaration> {
        let Some(ty) = self.ty else {
            return Err(cursor.halt());
        };
        cursor.assert(!self.name.is_empty())?;
        Ok(VariableDeclaration {
            is_final: self.is_final,
            ty,
            name: self.name,
            is_variadic: self.is_variadic,
            token: self.token,
        })
    }
}

// =============================================================================
// Instructions and assertions
// =============================================================================

/// `return`, `throw`, `continue` and `break`, with an optional value. Stops
/// at the `;`.
pub struct InstructionParser {
    kind: Option<InstructionKind>,
    value: Option<Statement>,
    token: TokenId,
}

impl Parser for InstructionParser {
    type Output = Instruction;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<InstructionParser>> = Lazy::new(|| Grammar::new("instruction").build());
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            kind: None,
            value: None,
            token,
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let Some(kind) = InstructionKind::from_keyword(cursor.value()) else {
            return Err(cursor.halt());
        };
        self.kind = Some(kind);
        cursor.next()?;
        if !cursor.is(";") && !cursor.is("}") && !cursor.is_eof() {
            self.value = Some(cursor.parse_with::<StatementParser>()?);
        }
        Ok(Signal::Stop)
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Instruction> {
        let Some(kind) = self.kind else {
            return Err(cursor.halt());
        };
        Ok(Instruction {
            kind,
            value: self.value,
            token: self.token,
        })
    }
}

/// `assert condition;` or `assert condition : message;`
pub struct AssertionParser {
    condition: Option<Statement>,
    message: Option<Statement>,
    token: TokenId,
}

impl AssertionParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.condition = Some(cursor.parse_with::<StatementParser>()?);
        if !cursor.is(":") {
            return Ok(Signal::Stop);
        }
        cursor.next()?;
        self.message = Some(cursor.parse_with::<StatementParser>()?);
        Ok(Signal::Stop)
    }
}

impl Parser for AssertionParser {
    type Output = Assertion;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<AssertionParser>> = Lazy::new(|| {
            Grammar::new("assertion")
                .eat(TokenMatcher::Literal("assert"), AssertionParser::on_keyword)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            condition: None,
            message: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Assertion> {
        let Some(condition) = self.condition else {
            return Err(cursor.halt());
        };
        Ok(Assertion {
            condition,
            message: self.message,
            token: self.token,
        })
    }
}
