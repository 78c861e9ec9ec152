//! Delimited sequences.

use super::cursor::Cursor;
use super::grammar::{ParseResult, Parser};
use super::matcher::TokenMatcher;

/// Parse values with `V` until `terminator`, requiring `delimiter` between
/// consecutive values.
///
/// The cursor is left on the terminator. A terminator on the first token
/// yields an empty sequence; reaching EOF ends the sequence early and leaves
/// the caller to report the missing terminator.
pub fn parse_sequence<V: Parser>(
    cursor: &mut Cursor<'_>,
    delimiter: &TokenMatcher,
    terminator: &TokenMatcher,
) -> ParseResult<Vec<V::Output>> {
    let mut values = Vec::new();
    if cursor.matches(terminator) {
        return Ok(values);
    }

    while !cursor.is_eof() {
        values.push(cursor.parse_with::<V>()?);
        if cursor.matches(terminator) {
            break;
        }
        if !cursor.matches(delimiter) {
            return Err(cursor.halt());
        }
        cursor.next()?;
    }

    Ok(values)
}
