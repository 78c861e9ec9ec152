//! `if`, loops, `switch` and `try`.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::block::BlockParser;
use crate::java::constants::any;
use crate::java::expressions::ReferenceParser;
use crate::java::statement::StatementParser;
use crate::java::types::TypeParser;
use crate::java::utils::is_before_close_paren;
use crate::syntax::{
    Block, DoWhileLoop, ForLoop, IfElse, JavaType, Reference, Statement, Switch, TryCatch,
    WhileLoop,
};
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;

/// A braced block, or a single statement with its optional `;`.
fn parse_body(cursor: &mut Cursor<'_>) -> ParseResult<Block> {
    if cursor.is("{") {
        return cursor.parse_with::<BlockParser>();
    }
    let token = cursor.current();
    let statement = cursor.parse_with::<StatementParser>()?;
    let is_empty = statement.left_side.is_none() && statement.operator.is_none();
    if cursor.is(";") {
        cursor.next()?;
    } else {
        cursor.assert(!is_empty)?;
    }
    Ok(if is_empty {
        Block::new(token)
    } else {
        Block::inline(statement)
    })
}

/// `( statement )`
fn parse_condition(cursor: &mut Cursor<'_>) -> ParseResult<Statement> {
    cursor.eat("(")?;
    let condition = cursor.parse_with::<StatementParser>()?;
    cursor.assert(condition.left_side.is_some() || condition.operator.is_some())?;
    cursor.eat(")")?;
    Ok(condition)
}

// =============================================================================
// If / else
// =============================================================================

pub struct IfElseParser {
    conditions: Vec<Statement>,
    blocks: Vec<Block>,
    token: TokenId,
}

impl IfElseParser {
    fn on_if(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.conditions.push(parse_condition(cursor)?);
        self.blocks.push(parse_body(cursor)?);
        Ok(Signal::Continue)
    }

    /// `else if` merges the nested chain into this one.
    fn on_else(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        if cursor.is("if") {
            let chained = cursor.parse_with::<IfElseParser>()?;
            self.conditions.extend(chained.conditions);
            self.blocks.extend(chained.blocks);
            return Ok(Signal::Stop);
        }
        self.blocks.push(parse_body(cursor)?);
        Ok(Signal::Stop)
    }

    fn on_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Stop)
    }
}

impl Parser for IfElseParser {
    type Output = IfElse;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<IfElseParser>> = Lazy::new(|| {
            Grammar::new("if/else")
                .eat(TokenMatcher::Literal("if"), IfElseParser::on_if)
                .allow(TokenMatcher::Literal("else"), IfElseParser::on_else)
                .on(any(), IfElseParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            conditions: Vec::new(),
            blocks: Vec::new(),
            token,
        }
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<IfElse> {
        Ok(IfElse {
            conditions: self.conditions,
            blocks: self.blocks,
            token: self.token,
        })
    }
}

// =============================================================================
// Loops
// =============================================================================

pub struct ForLoopParser {
    initialization: Option<Statement>,
    condition: Option<Statement>,
    increment: Option<Statement>,
    iterable: Option<Statement>,
    is_enhanced: bool,
    block: Option<Block>,
    token: TokenId,
}

impl ForLoopParser {
    /// `for (init; condition; increment)` or `for (T x : iterable)`.
    fn on_header(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        cursor.eat("(")?;
        if !cursor.is(";") {
            self.initialization = Some(cursor.parse_with::<StatementParser>()?);
        }

        if cursor.is(":") {
            cursor.assert(self.initialization.is_some())?;
            cursor.next()?;
            self.is_enhanced = true;
            self.iterable = Some(cursor.parse_with::<StatementParser>()?);
        } else {
            cursor.eat(";")?;
            if !cursor.is(";") {
                self.condition = Some(cursor.parse_with::<StatementParser>()?);
            }
            cursor.eat(";")?;
            if !cursor.is(")") {
                self.increment = Some(cursor.parse_with::<StatementParser>()?);
            }
        }

        cursor.eat(")")?;
        self.block = Some(parse_body(cursor)?);
        Ok(Signal::Stop)
    }
}

impl Parser for ForLoopParser {
    type Output = ForLoop;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ForLoopParser>> = Lazy::new(|| {
            Grammar::new("for loop")
                .eat(TokenMatcher::Literal("for"), ForLoopParser::on_header)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            initialization: None,
            condition: None,
            increment: None,
            iterable: None,
            is_enhanced: false,
            block: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<ForLoop> {
        let Some(block) = self.block else {
            return Err(cursor.halt());
        };
        Ok(ForLoop {
            initialization: self.initialization,
            condition: self.condition,
            increment: self.increment,
            iterable: self.iterable,
            is_enhanced: self.is_enhanced,
            block,
            token: self.token,
        })
    }
}

pub struct WhileLoopParser {
    condition: Option<Statement>,
    block: Option<Block>,
    token: TokenId,
}

impl WhileLoopParser {
    fn on_while(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.condition = Some(parse_condition(cursor)?);
        self.block = Some(parse_body(cursor)?);
        Ok(Signal::Stop)
    }
}

impl Parser for WhileLoopParser {
    type Output = WhileLoop;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<WhileLoopParser>> = Lazy::new(|| {
            Grammar::new("while loop")
                .eat(TokenMatcher::Literal("while"), WhileLoopParser::on_while)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            condition: None,
            block: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<WhileLoop> {
        let (Some(condition), Some(block)) = (self.condition, self.block) else {
            return Err(cursor.halt());
        };
        Ok(WhileLoop {
            condition,
            block,
            token: self.token,
        })
    }
}

/// `do { ... } while (condition)`; the statement's `;` is left to the
/// enclosing block.
pub struct DoWhileLoopParser {
    block: Option<Block>,
    condition: Option<Statement>,
    token: TokenId,
}

impl DoWhileLoopParser {
    fn on_do(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        cursor.assert(cursor.is("{"))?;
        self.block = Some(cursor.parse_with::<BlockParser>()?);
        Ok(Signal::Continue)
    }

    fn on_while(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.condition = Some(parse_condition(cursor)?);
        Ok(Signal::Stop)
    }
}

impl Parser for DoWhileLoopParser {
    type Output = DoWhileLoop;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<DoWhileLoopParser>> = Lazy::new(|| {
            Grammar::new("do/while loop")
                .eat(TokenMatcher::Literal("do"), DoWhileLoopParser::on_do)
                .eat(TokenMatcher::Literal("while"), DoWhileLoopParser::on_while)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            block: None,
            condition: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<DoWhileLoop> {
        let (Some(block), Some(condition)) = (self.block, self.condition) else {
            return Err(cursor.halt());
        };
        Ok(DoWhileLoop {
            block,
            condition,
            token: self.token,
        })
    }
}

// =============================================================================
// Switch
// =============================================================================

pub struct SwitchParser {
    value: Option<Statement>,
    cases: Vec<Statement>,
    blocks: Vec<Block>,
    default_block: Option<Block>,
    token: TokenId,
}

impl SwitchParser {
    fn on_switch(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.value = Some(parse_condition(cursor)?);
        cursor.eat("{")?;

        loop {
            if cursor.is("}") {
                return Ok(Signal::Finish);
            }
            if cursor.is("case") {
                cursor.next()?;
                cursor.assert(!cursor.is(":"))?;
                let case = cursor.parse_with::<StatementParser>()?;
                cursor.eat(":")?;
                self.cases.push(case);
                let block = parse_case_block(cursor)?;
                self.blocks.push(block);
            } else if cursor.is("default") {
                cursor.assert(self.default_block.is_none())?;
                cursor.next()?;
                cursor.eat(":")?;
                self.default_block = Some(parse_case_block(cursor)?);
            } else {
                return Err(cursor.halt());
            }
        }
    }
}

/// Statements up to the next `case`, `default` or closing `}`. A braced
/// group inside a case contributes its statements directly.
fn parse_case_block(cursor: &mut Cursor<'_>) -> ParseResult<Block> {
    let mut block = Block::new(cursor.current());
    loop {
        if cursor.is_eof() || cursor.is("case") || cursor.is("default") || cursor.is("}") {
            return Ok(block);
        }
        if cursor.is(";") {
            cursor.next()?;
            continue;
        }
        if cursor.is("{") {
            let group = cursor.parse_with::<BlockParser>()?;
            block.nodes.extend(group.nodes);
            continue;
        }
        let statement = cursor.parse_with::<StatementParser>()?;
        cursor.assert(statement.left_side.is_some() || statement.operator.is_some())?;
        block.nodes.push(statement);
    }
}

impl Parser for SwitchParser {
    type Output = Switch;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<SwitchParser>> = Lazy::new(|| {
            Grammar::new("switch")
                .eat(TokenMatcher::Literal("switch"), SwitchParser::on_switch)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            value: None,
            cases: Vec::new(),
            blocks: Vec::new(),
            default_block: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Switch> {
        let Some(value) = self.value else {
            return Err(cursor.halt());
        };
        Ok(Switch {
            value,
            cases: self.cases,
            blocks: self.blocks,
            default_block: self.default_block,
            token: self.token,
        })
    }
}

// =============================================================================
// Try / catch / finally
// =============================================================================

pub struct TryCatchParser {
    try_block: Option<Block>,
    exception_sets: Vec<Vec<JavaType>>,
    exception_references: Vec<Reference>,
    catch_blocks: Vec<Block>,
    finally_block: Option<Block>,
    token: TokenId,
}

impl TryCatchParser {
    fn has_handler(&self) -> bool {
        !self.catch_blocks.is_empty() || self.finally_block.is_some()
    }

    fn on_try(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        cursor.assert(cursor.is("{"))?;
        self.try_block = Some(cursor.parse_with::<BlockParser>()?);
        Ok(Signal::Continue)
    }

    /// `catch ([final] A | B e) { ... }`
    fn on_catch(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.finally_block.is_none())?;
        cursor.next()?;
        cursor.eat("(")?;
        cursor.allow("final")?;
        let exceptions = cursor.parse_sequence::<TypeParser>(
            TokenMatcher::Literal("|"),
            TokenMatcher::Predicate(is_before_close_paren),
        )?;
        cursor.assert(!exceptions.is_empty())?;
        let reference = cursor.parse_with::<ReferenceParser>()?;
        cursor.eat(")")?;
        cursor.assert(cursor.is("{"))?;
        let block = cursor.parse_with::<BlockParser>()?;

        self.exception_sets.push(exceptions);
        self.exception_references.push(reference);
        self.catch_blocks.push(block);
        Ok(Signal::Continue)
    }

    fn on_finally(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        cursor.assert(cursor.is("{"))?;
        self.finally_block = Some(cursor.parse_with::<BlockParser>()?);
        Ok(Signal::Stop)
    }

    fn on_end(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert_with(self.has_handler(), || "Invalid missing catch block".to_string())?;
        Ok(Signal::Stop)
    }
}

impl Parser for TryCatchParser {
    type Output = TryCatch;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<TryCatchParser>> = Lazy::new(|| {
            Grammar::new("try/catch")
                .eat(TokenMatcher::Literal("try"), TryCatchParser::on_try)
                .on(TokenMatcher::Literal("catch"), TryCatchParser::on_catch)
                .on(TokenMatcher::Literal("finally"), TryCatchParser::on_finally)
                .on(any(), TryCatchParser::on_end)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            try_block: None,
            exception_sets: Vec::new(),
            exception_references: Vec::new(),
            catch_blocks: Vec::new(),
            finally_block: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<TryCatch> {
        cursor.assert_with(self.has_handler(), || "Invalid missing catch block".to_string())?;
        let Some(try_block) = self.try_block else {
            return Err(cursor.halt());
        };
        Ok(TryCatch {
            try_block,
            exception_sets: self.exception_sets,
            exception_references: self.exception_references,
            catch_blocks: self.catch_blocks,
            finally_block: self.finally_block,
            token: self.token,
        })
    }
}
