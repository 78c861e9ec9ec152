//! Statements and operator precedence.
//!
//! A statement starts with at most one leading construct (its left side),
//! then reads operators. Everything after a binary operator is parsed as a
//! nested statement and becomes the right side, so the raw result leans
//! right: `a * b + c` first reads as `a * (b + c)`. [`combine`] rotates
//! that shape as each operator is attached, which yields the usual Java
//! precedence with left associativity.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::constants::STATEMENT_END;
use crate::java::control_flow::{
    DoWhileLoopParser, ForLoopParser, IfElseParser, SwitchParser, TryCatchParser, WhileLoopParser,
};
use crate::java::declarations::AnnotationParser;
use crate::java::expressions::{
    AssertionParser, FunctionCallParser, InstantiationParser, InstructionParser, LambdaParser,
    LiteralParser, PropertyChainParser, ReferenceParser, VariableDeclarationParser,
};
use crate::java::objects::ClassParser;
use crate::java::operator::OperatorParser;
use crate::java::types::TypeParser;
use crate::java::utils::{
    is_cast, is_function_call, is_instruction, is_lambda, is_literal, is_operator,
    is_property_chain, is_reference, is_ternary, is_type,
};
use crate::syntax::{
    JavaType, LiteralKind, Operator, OperatorNode, Property, PropertyChain, Statement,
    StatementNode, Ternary, UNARY_PRECEDENCE, VariableDeclaration,
};
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;

pub struct StatementParser {
    statement: Statement,
}

impl StatementParser {
    fn left(&self) -> Option<&StatementNode> {
        self.statement.left_side.as_deref()
    }

    fn set_left(&mut self, node: StatementNode) {
        self.statement.left_side = Some(Box::new(node));
    }

    /// Parse the construct the statement starts with, if any. Returns
    /// whether that construct ends the statement on its own.
    fn parse_leading(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<bool> {
        let tokens = cursor.tokens();
        let current = cursor.current();

        let node = if is_instruction(tokens, current) {
            StatementNode::Instruction(cursor.parse_with::<InstructionParser>()?)
        } else if cursor.is("assert") {
            StatementNode::Assertion(cursor.parse_with::<AssertionParser>()?)
        } else if is_literal(tokens, current) {
            StatementNode::Literal(cursor.parse_with::<LiteralParser>()?)
        } else if is_lambda(tokens, current) {
            StatementNode::Lambda(cursor.parse_with::<LambdaParser>()?)
        } else if is_reference(tokens, current) {
            StatementNode::Reference(cursor.parse_with::<ReferenceParser>()?)
        } else if is_function_call(tokens, current) {
            StatementNode::FunctionCall(cursor.parse_with::<FunctionCallParser>()?)
        } else if cursor.is("new") {
            StatementNode::Instantiation(cursor.parse_with::<InstantiationParser>()?)
        } else if cursor.is("class") {
            StatementNode::Class(cursor.parse_with::<ClassParser>()?)
        } else if is_type(tokens, current) {
            StatementNode::VariableDeclaration(cursor.parse_with::<VariableDeclarationParser>()?)
        } else if cursor.is("if") {
            StatementNode::IfElse(cursor.parse_with::<IfElseParser>()?)
        } else if cursor.is("for") {
            StatementNode::ForLoop(cursor.parse_with::<ForLoopParser>()?)
        } else if cursor.is("while") {
            StatementNode::WhileLoop(cursor.parse_with::<WhileLoopParser>()?)
        } else if cursor.is("do") {
            StatementNode::DoWhileLoop(cursor.parse_with::<DoWhileLoopParser>()?)
        } else if cursor.is("switch") {
            StatementNode::Switch(cursor.parse_with::<SwitchParser>()?)
        } else if cursor.is("try") {
            StatementNode::TryCatch(cursor.parse_with::<TryCatchParser>()?)
        } else {
            return Ok(false);
        };

        let terminates = node.is_self_terminating();
        self.set_left(node);
        Ok(terminates)
    }

    /// `(` after a value continues it as a call; otherwise it opens a cast
    /// or a parenthesized statement.
    fn on_open_paren(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        if let Some(left) = self.statement.left_side.take() {
            cursor.assert(can_continue(&left))?;
            let call = cursor.parse_with::<FunctionCallParser>()?;
            let token = self.statement.token;
            self.set_left(StatementNode::PropertyChain(PropertyChain {
                properties: vec![head_property(*left), Property::Call(call)],
                token,
            }));
            return Ok(Signal::Continue);
        }
        cursor.assert(self.statement.operator.is_none())?;

        if is_cast(cursor.tokens(), cursor.current()) {
            cursor.next()?;
            let ty = cursor.parse_with::<TypeParser>()?;
            cursor.eat(")")?;
            let value = cursor.parse_with::<StatementParser>()?;
            let annotations = std::mem::take(&mut self.statement.annotations);
            self.statement = apply_cast(ty, value, self.statement.token);
            self.statement.annotations = annotations;
            return Ok(Signal::Continue);
        }

        cursor.next()?;
        let mut inner = cursor.parse_with::<StatementParser>()?;
        cursor.eat(")")?;
        inner.is_parenthetical = true;
        self.set_left(StatementNode::Statement(inner));
        Ok(Signal::Continue)
    }

    /// `.` or `[` directly after a call, instantiation, string or
    /// parenthesized value.
    fn on_chain_continuation(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let Some(left) = self.statement.left_side.take() else {
            return Err(cursor.halt());
        };
        cursor.assert(self.statement.operator.is_none() && can_continue(&left))?;
        let mut chain = cursor.parse_with::<PropertyChainParser>()?;
        chain.properties.insert(0, head_property(*left));
        chain.token = self.statement.token;
        self.set_left(StatementNode::PropertyChain(chain));
        Ok(Signal::Continue)
    }

    /// A chain starting with a name. A chain ending in a type is a
    /// declaration with a namespaced type: `a.b.C value`.
    fn on_property_chain(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.left().is_none() && self.statement.operator.is_none())?;
        let mut chain = cursor.parse_with::<PropertyChainParser>()?;

        if !matches!(chain.properties.last(), Some(Property::Type(_))) {
            self.set_left(StatementNode::PropertyChain(chain));
            return Ok(Signal::Continue);
        }
        let Some(Property::Type(mut ty)) = chain.properties.pop() else {
            return Err(cursor.halt());
        };

        let mut namespace_chain = Vec::with_capacity(chain.properties.len() + ty.namespace_chain.len());
        for property in chain.properties {
            if let Property::Reference(reference) = property {
                namespace_chain.push(reference.name);
            }
        }
        namespace_chain.append(&mut ty.namespace_chain);
        ty.namespace_chain = namespace_chain;
        ty.token = chain.token;

        let name = cursor.eat_word()?;
        self.set_left(StatementNode::VariableDeclaration(VariableDeclaration {
            is_final: false,
            ty,
            name,
            is_variadic: false,
            token: chain.token,
        }));
        Ok(Signal::Continue)
    }

    fn on_operator(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        match self.left() {
            Some(left) => cursor.assert(!matches!(left, StatementNode::Lambda(_)))?,
            None => cursor.assert(matches!(cursor.value(), "!" | "+" | "-" | "~"))?,
        }

        if is_ternary(cursor.tokens(), cursor.current()) {
            return self.parse_ternary(cursor);
        }

        let operator = cursor.parse_with::<OperatorParser>()?;
        let is_step = matches!(operator.operation, Operator::Increment | Operator::Decrement);
        if is_step && self.left().is_some() {
            self.attach_postfix(cursor, operator);
            return Ok(Signal::Continue);
        }

        let right = cursor.parse_with::<StatementParser>()?;
        let has_operand = right.left_side.is_some() || right.operator.is_some();
        cursor.assert_with(has_operand, || "Invalid operator placement".to_string())?;

        let left = self.statement.left_side.take();
        let token = self.statement.token;
        let combined = combine(left, operator, right, token);
        self.statement.left_side = combined.left_side;
        self.statement.operator = combined.operator;
        self.statement.right_side = combined.right_side;
        Ok(Signal::Continue)
    }

    /// `x++` ending the statement stays flat; followed by more operators
    /// it is grouped so the next operator applies to the whole increment.
    fn attach_postfix(&mut self, cursor: &Cursor<'_>, operator: OperatorNode) {
        let ends_statement = cursor.is_eof() || cursor.matches(&TokenMatcher::AnyOf(STATEMENT_END));
        if ends_statement {
            self.statement.operator = Some(operator);
            return;
        }
        let token = self.statement.token;
        let postfix = Statement {
            left_side: self.statement.left_side.take(),
            operator: Some(operator),
            ..Statement::new(token)
        };
        self.set_left(StatementNode::Statement(postfix));
    }

    /// `condition ? left : right`, where the condition is everything read
    /// so far.
    fn parse_ternary(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let token = self.statement.token;
        let annotations = std::mem::take(&mut self.statement.annotations);
        let condition = std::mem::replace(&mut self.statement, Statement::new(token));
        self.statement.annotations = annotations;

        cursor.eat("?")?;
        let left = cursor.parse_with::<StatementParser>()?;
        cursor.eat(":")?;
        let right = cursor.parse_with::<StatementParser>()?;

        self.set_left(StatementNode::Ternary(Ternary {
            condition,
            left,
            right,
            token,
        }));
        Ok(Signal::Continue)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for StatementParser {
    type Output = Statement;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<StatementParser>> = Lazy::new(|| {
            Grammar::new("statement")
                .on(TokenMatcher::Literal("("), StatementParser::on_open_paren)
                .on(TokenMatcher::Literal("."), StatementParser::on_chain_continuation)
                .on(TokenMatcher::Literal("["), StatementParser::on_chain_continuation)
                .on(TokenMatcher::AnyOf(STATEMENT_END), StatementParser::on_end)
                .on(TokenMatcher::Predicate(is_property_chain), StatementParser::on_property_chain)
                .on(TokenMatcher::Predicate(is_operator), StatementParser::on_operator)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            statement: Statement::new(token),
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        while cursor.is("@") {
            let annotation = cursor.parse_with::<AnnotationParser>()?;
            self.statement.annotations.push(annotation);
        }
        if self.parse_leading(cursor)? {
            return Ok(Signal::Stop);
        }
        Ok(Signal::Continue)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Statement> {
        Ok(self.statement)
    }
}

/// Values a `.`, `[` or `(` may directly continue.
fn can_continue(node: &StatementNode) -> bool {
    match node {
        StatementNode::Statement(statement) => statement.is_parenthetical,
        StatementNode::FunctionCall(_) | StatementNode::Reference(_) => true,
        StatementNode::Instantiation(instantiation) => {
            instantiation.anonymous_object_body.is_none()
                && instantiation.array_allocation_size.is_none()
                && instantiation.array_literal.is_none()
        }
        StatementNode::Literal(literal) => literal.kind == LiteralKind::String,
        _ => false,
    }
}

fn head_property(node: StatementNode) -> Property {
    match node {
        StatementNode::Reference(reference) => Property::Reference(reference),
        StatementNode::FunctionCall(call) => Property::Call(call),
        other => Property::Head(Box::new(other)),
    }
}

// =============================================================================
// Precedence
// =============================================================================

/// Binding strength of `operator` at the head of a statement; prefix
/// operators without a left operand bind like unary operators.
fn binding(operator: Operator, has_left: bool) -> u8 {
    if !has_left && operator.is_prefix() {
        UNARY_PRECEDENCE
    } else {
        operator.precedence()
    }
}

/// Whether a statement's grouping came from the source and must be kept.
fn is_grouped(statement: &Statement) -> bool {
    statement.is_parenthetical || statement.cast.is_some()
}

/// Unwrap a left side into a statement, flattening ungrouped nesting.
fn into_statement(node: StatementNode, token: TokenId) -> Statement {
    match node {
        StatementNode::Statement(statement) if !is_grouped(&statement) => statement,
        other => Statement::from_node(other, token),
    }
}

/// Attach `left operator right`, rotating when `right` is an ungrouped
/// binary statement whose operator binds no tighter than `operator`:
/// `a - {b + c}` becomes `{a - b} + c`. Assignments never rotate, so they
/// stay right-associative. A ternary on the right takes the operation into
/// its condition: `a == b ? x : y`.
pub fn combine(
    left: Option<Box<StatementNode>>,
    operator: OperatorNode,
    mut right: Statement,
    token: TokenId,
) -> Statement {
    let operation = operator.operation;
    if !operation.is_assignment() && !is_grouped(&right) {
        if right.operator.is_none() {
            if let Some(node) = right.left_side.take() {
                match *node {
                    StatementNode::Ternary(mut ternary) => {
                        let condition = std::mem::replace(&mut ternary.condition, Statement::new(token));
                        ternary.condition = combine(left, operator, condition, token);
                        ternary.token = token;
                        return Statement::from_node(StatementNode::Ternary(ternary), token);
                    }
                    other => right.left_side = Some(Box::new(other)),
                }
            }
        }

        let rotation = right.operator.filter(|right_operator| {
            right.left_side.is_some()
                && right.right_side.is_some()
                && binding(operation, left.is_some()) >= right_operator.operation.precedence()
        });
        if let Some(right_operator) = rotation {
            if let Some(right_left) = right.left_side.take() {
                let inner = combine(left, operator, into_statement(*right_left, right.token), token);
                return Statement {
                    left_side: Some(Box::new(StatementNode::Statement(inner))),
                    operator: Some(right_operator),
                    right_side: right.right_side.take(),
                    ..Statement::new(token)
                };
            }
        }
    }

    Statement {
        left_side: left,
        operator: Some(operator),
        right_side: Some(Box::new(right)),
        ..Statement::new(token)
    }
}

/// `(T) a + b` casts only `a`: push the cast down the leftmost operand of
/// an ungrouped binary statement.
fn apply_cast(ty: JavaType, mut value: Statement, token: TokenId) -> Statement {
    let is_binary = value.left_side.is_some() && value.right_side.is_some() && value.operator.is_some();
    let rotates = is_binary
        && !is_grouped(&value)
        && value.operation().is_some_and(|operation| !operation.is_assignment());
    if rotates {
        if let Some(left) = value.left_side.take() {
            let operand = into_statement(*left, value.token);
            let cast = apply_cast(ty, operand, token);
            value.left_side = Some(Box::new(StatementNode::Statement(cast)));
            value.token = token;
            return value;
        }
    }

    if value.is_simple() && !value.is_parenthetical {
        return Statement {
            left_side: value.left_side,
            cast: Some(ty),
            ..Statement::new(token)
        };
    }
    Statement {
        left_side: Some(Box::new(StatementNode::Statement(value))),
        cast: Some(ty),
        ..Statement::new(token)
    }
}
