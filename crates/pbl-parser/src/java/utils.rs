//! Lookahead predicates for the Java grammar.
//!
//! Each predicate inspects a token in its stream and answers whether a
//! construct starts there. Most need one or two tokens of lookahead; generic
//! blocks, non-trivial casts and multi-parameter lambdas scan forward until
//! a qualifying or disqualifying token is found.

use super::constants::{
    ACCESS_MODIFIERS, CONTROL_KEYWORDS, INSTRUCTIONS, KEYWORD_LITERALS, MODIFIERS,
    OPERATOR_STARTS, REFERENCE_PRECEDING_WORDS, RESERVED_WORDS,
};
use pbl_scanner::token_utils::{TokenStep, is_number, is_start_of_line, is_word, search};
use pbl_scanner::{TokenId, TokenStream};
use std::cell::Cell;

#[inline]
fn value(tokens: &TokenStream, id: TokenId) -> &str {
    tokens.value(id)
}

#[inline]
fn next_text_value(tokens: &TokenStream, id: TokenId) -> &str {
    tokens.value(tokens.next_text(id))
}

#[inline]
fn next_raw_value(tokens: &TokenStream, id: TokenId) -> &str {
    tokens.value(tokens.next(id))
}

#[must_use]
pub fn is_access_modifier_keyword(word: &str) -> bool {
    ACCESS_MODIFIERS.contains(&word)
}

#[must_use]
pub fn is_modifier_keyword(word: &str) -> bool {
    MODIFIERS.contains(&word)
}

#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Access modifiers and `static`/`final`/`abstract`.
pub fn is_any_modifier(tokens: &TokenStream, id: TokenId) -> bool {
    let word = value(tokens, id);
    is_access_modifier_keyword(word) || is_modifier_keyword(word)
}

/// Tokens that can never appear inside a generic type argument list.
fn is_invalid_type_token(tokens: &TokenStream, id: TokenId) -> bool {
    is_number(tokens, id)
        || value(tokens, id).chars().any(|c| {
            !(c.is_alphanumeric() || matches!(c, '_' | '$' | '?' | '&' | '<' | '>' | ',' | '.' | '[' | ']'))
        })
}

/// Tokens that cannot follow the closing `)` of a cast.
fn is_invalid_cast_value(tokens: &TokenStream, id: TokenId) -> bool {
    let text = value(tokens, id);
    text == "instanceof"
        || text
            .chars()
            .any(|c| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '(' | '"' | '\'')))
}

/// Whether the `<` at `id` opens a generic block rather than a less-than
/// comparison: a `>` must be reached before any token that cannot appear
/// inside type arguments. `&` is only valid in an `extends` bound, so
/// `a < b && c > d` stays a comparison.
pub fn is_generic_block(tokens: &TokenStream, id: TokenId) -> bool {
    if value(tokens, id) != "<" {
        return false;
    }
    let in_bound = Cell::new(false);
    search(
        tokens,
        id,
        TokenStep::NextText,
        |tokens, candidate| value(tokens, candidate) == ">",
        |tokens, candidate| match value(tokens, candidate) {
            "extends" => {
                in_bound.set(true);
                false
            }
            "&" => !in_bound.get() || value(tokens, tokens.next(candidate)) == "&",
            _ => is_invalid_type_token(tokens, candidate),
        },
    )
    .is_some()
}

/// `->`
pub fn is_lambda_arrow(tokens: &TokenStream, id: TokenId) -> bool {
    let next = tokens.next(id);
    value(tokens, id) == "-" && value(tokens, next) == ">" && tokens.are_adjacent(id, next)
}

/// `SomeClass(` inside an object body.
pub fn is_constructor(tokens: &TokenStream, id: TokenId) -> bool {
    is_word(tokens, id) && !is_reserved_word(value(tokens, id)) && next_text_value(tokens, id) == "("
}

/// `{` or `static {` inside an object body.
pub fn is_initializer(tokens: &TokenStream, id: TokenId) -> bool {
    let text = value(tokens, id);
    text == "{" || (text == "static" && next_text_value(tokens, id) == "{")
}

/// A bare name standing alone as a value.
///
/// The name must be flanked: preceded by the start of a line, a symbol or one
/// of a few keywords, and followed by a symbol that does not continue it
/// (`.`, `(`, `[` or `{`) or by `instanceof`. A following `<` which opens a
/// generic block makes it a type instead.
pub fn is_reference(tokens: &TokenStream, id: TokenId) -> bool {
    if !is_word(tokens, id) {
        return false;
    }

    let flanked_before = is_start_of_line(tokens, id)
        || tokens.previous_text(id).is_none_or(|previous| {
            !is_word(tokens, previous) || REFERENCE_PRECEDING_WORDS.contains(&value(tokens, previous))
        });
    if !flanked_before {
        return false;
    }

    let next = tokens.next_text(id);
    let next_value = value(tokens, next);
    let flanked_after = next_value == "instanceof"
        || (!is_word(tokens, next)
            && !tokens.is_eof(next)
            && !matches!(next_value, "." | "(" | "[" | "{"));
    if !flanked_after {
        return false;
    }

    let raw_next = tokens.next(id);
    value(tokens, raw_next) != "<" || !is_generic_block(tokens, raw_next)
}

/// The start of a type: `Type name`, `Type[]` or `Type<...>`.
pub fn is_type(tokens: &TokenStream, id: TokenId) -> bool {
    if !is_word(tokens, id) {
        return false;
    }
    let next_text = tokens.next_text(id);
    if is_word(tokens, next_text) && value(tokens, next_text) != "instanceof" {
        return true;
    }
    let raw_next = tokens.next(id);
    match value(tokens, raw_next) {
        "[" => next_raw_value(tokens, raw_next) == "]",
        "<" => is_generic_block(tokens, raw_next),
        _ => false,
    }
}

/// `object.` or `object[`, excluding the `Type[]` form.
pub fn is_property_chain(tokens: &TokenStream, id: TokenId) -> bool {
    is_word(tokens, id)
        && matches!(next_text_value(tokens, id), "." | "[")
        && next_raw_value(tokens, tokens.next(id)) != "]"
}

/// `name(`. A `(` continuing a call or index (`)(`, `](`) is handled by the
/// statement once its left side exists.
pub fn is_function_call(tokens: &TokenStream, id: TokenId) -> bool {
    is_word(tokens, id)
        && !CONTROL_KEYWORDS.contains(&value(tokens, id))
        && next_text_value(tokens, id) == "("
}

/// Numbers, quotes, array braces and `true`/`false`/`null`.
pub fn is_literal(tokens: &TokenStream, id: TokenId) -> bool {
    let text = value(tokens, id);
    is_number(tokens, id) || matches!(text, "\"" | "'" | "{") || KEYWORD_LITERALS.contains(&text)
}

pub fn is_operator(tokens: &TokenStream, id: TokenId) -> bool {
    OPERATOR_STARTS.contains(&value(tokens, id))
}

pub fn is_instruction(tokens: &TokenStream, id: TokenId) -> bool {
    INSTRUCTIONS.contains(&value(tokens, id))
}

/// A `?` that is not the start of an Elvis `?:`.
pub fn is_ternary(tokens: &TokenStream, id: TokenId) -> bool {
    value(tokens, id) == "?" && next_text_value(tokens, id) != ":"
}

/// `x -> ...`, `() -> ...`, `(a, b) -> ...` or `(Type a) -> ...`.
pub fn is_lambda(tokens: &TokenStream, id: TokenId) -> bool {
    if is_word(tokens, id) {
        return is_lambda_arrow(tokens, tokens.next_text(id));
    }
    if value(tokens, id) != "(" {
        return false;
    }
    search(
        tokens,
        id,
        TokenStep::NextText,
        |tokens, candidate| {
            value(tokens, candidate) == ")" && is_lambda_arrow(tokens, tokens.next_text(candidate))
        },
        is_invalid_type_token,
    )
    .is_some()
}

/// `(Type) value`. Single-word casts are checked with fixed lookahead; casts
/// to generic, array or namespaced types scan for the closing `)`.
pub fn is_cast(tokens: &TokenStream, id: TokenId) -> bool {
    if value(tokens, id) != "(" {
        return false;
    }
    let start = tokens.next_text(id);
    if !is_word(tokens, start)
        || (is_reserved_word(value(tokens, start)) && !is_primitive(value(tokens, start)))
    {
        return false;
    }

    let after_start = tokens.next_text(start);
    if value(tokens, after_start) == ")" {
        return !is_invalid_cast_value(tokens, tokens.next_text(after_start));
    }

    search(
        tokens,
        id,
        TokenStep::NextText,
        |tokens, candidate| {
            value(tokens, candidate) == ")"
                && !is_invalid_cast_value(tokens, tokens.next_text(candidate))
        },
        is_invalid_type_token,
    )
    .is_some()
}

fn is_primitive(word: &str) -> bool {
    matches!(
        word,
        "byte" | "short" | "int" | "long" | "float" | "double" | "boolean" | "char"
    )
}

/// `//` or `/*`.
pub fn is_comment(tokens: &TokenStream, id: TokenId) -> bool {
    let next = tokens.next(id);
    value(tokens, id) == "/"
        && matches!(value(tokens, next), "/" | "*")
        && tokens.are_adjacent(id, next)
}

/// Terminator for `catch (A | B e)`: the token right before `)`.
pub fn is_before_close_paren(tokens: &TokenStream, id: TokenId) -> bool {
    next_text_value(tokens, id) == ")"
}
