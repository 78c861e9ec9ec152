use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::constants::any;
use crate::java::statement::StatementParser;
use crate::syntax::Block;
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;

/// `{ statement; ... }`
pub struct BlockParser {
    block: Block,
    is_braced: bool,
    is_closed: bool,
}

impl BlockParser {
    fn on_open(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.is_braced = true;
        Ok(Signal::Continue)
    }

    fn on_semicolon(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Continue)
    }

    fn on_close(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.is_closed = true;
        Ok(Signal::Finish)
    }

    fn on_statement(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let statement = cursor.parse_with::<StatementParser>()?;
        cursor.assert(statement.left_side.is_some() || statement.operator.is_some())?;
        self.block.nodes.push(statement);
        Ok(Signal::Continue)
    }
}

impl Parser for BlockParser {
    type Output = Block;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<BlockParser>> = Lazy::new(|| {
            Grammar::new("block")
                .allow(TokenMatcher::Literal("{"), BlockParser::on_open)
                .on(TokenMatcher::Literal(";"), BlockParser::on_semicolon)
                .on(TokenMatcher::Literal("}"), BlockParser::on_close)
                .on(any(), BlockParser::on_statement)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            block: Block::new(token),
            is_braced: false,
            is_closed: false,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<Block> {
        cursor.assert(!self.is_braced || self.is_closed)?;
        Ok(self.block)
    }
}
