//! Operator parser.
//!
//! Operators are tokenized one symbol at a time, so multi-character
//! operators are assembled here from adjacent symbols. Candidates for each
//! leading symbol are listed longest first.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal};
use crate::syntax::{Operator, OperatorNode};
use once_cell::sync::Lazy;
use pbl_scanner::{TokenId, TokenStream};

/// Continuations (symbols after the first) and the operator they form.
type Candidates = &'static [(&'static [&'static str], Operator)];

fn candidates(first: &str) -> Candidates {
    use Operator::*;
    match first {
        "=" => &[(&["="], EqualTo), (&[], Assign)],
        "+" => &[(&["+"], Increment), (&["="], AddAssign), (&[], Add)],
        "-" => &[(&["-"], Decrement), (&["="], SubtractAssign), (&[], Subtract)],
        "*" => &[(&["="], MultiplyAssign), (&[], Multiply)],
        "/" => &[(&["="], DivideAssign), (&[], Divide)],
        "%" => &[(&["="], RemainderAssign), (&[], Remainder)],
        "!" => &[(&["="], NotEqualTo), (&[], Negate)],
        "~" => &[(&[], BitwiseComplement)],
        "?" => &[(&[":"], Elvis)],
        "<" => &[
            (&["<", "="], LeftShiftAssign),
            (&["<"], LeftShift),
            (&["="], LessThanOrEqualTo),
            (&[], LessThan),
        ],
        ">" => &[
            (&[">", ">", "="], UnsignedRightShiftAssign),
            (&[">", ">"], UnsignedRightShift),
            (&[">", "="], RightShiftAssign),
            (&[">"], RightShift),
            (&["="], GreaterThanOrEqualTo),
            (&[], GreaterThan),
        ],
        "|" => &[(&["|"], ConditionalOr), (&["="], BitwiseOrAssign), (&[], BitwiseOr)],
        "&" => &[(&["&"], ConditionalAnd), (&["="], BitwiseAndAssign), (&[], BitwiseAnd)],
        "^" => &[(&["="], BitwiseXorAssign), (&[], BitwiseXor)],
        "instanceof" => &[(&[], Instanceof)],
        _ => &[],
    }
}

/// Whether `continuation` follows `first` symbol for symbol, with nothing in
/// between.
fn continues(tokens: &TokenStream, first: TokenId, continuation: &[&str]) -> bool {
    let mut previous = first;
    for expected in continuation {
        let next = tokens.next(previous);
        if tokens.value(next) != *expected || !tokens.are_adjacent(previous, next) {
            return false;
        }
        previous = next;
    }
    true
}

pub struct OperatorParser {
    operation: Option<Operator>,
    token: TokenId,
}

impl Parser for OperatorParser {
    type Output = OperatorNode;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<OperatorParser>> = Lazy::new(|| Grammar::new("operator").build());
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            operation: None,
            token,
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let tokens = cursor.tokens();
        let first = cursor.current();
        let matched = candidates(cursor.value())
            .iter()
            .find(|(continuation, _)| continues(tokens, first, continuation));

        let Some((continuation, operation)) = matched else {
            return Err(cursor.error("Invalid operator"));
        };
        for _ in continuation.iter() {
            cursor.advance_raw();
        }
        self.operation = Some(*operation);
        Ok(Signal::Finish)
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<OperatorNode> {
        let Some(operation) = self.operation else {
            return Err(cursor.error("Invalid operator"));
        };
        Ok(OperatorNode {
            operation,
            token: self.token,
        })
    }
}
