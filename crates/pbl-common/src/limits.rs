//! Centralized limits and thresholds for the compiler.
//!
//! Recursive algorithms over user input (nested parsers, type resolution,
//! supertype walks) bail out at these depths instead of overflowing the stack.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of child parsers.
///
/// Every nested construct (block, statement, parenthetical, call argument)
/// spawns a child parser on the same cursor. Past this depth the parser halts
/// with an error instead of exhausting the stack.
pub const MAX_PARSER_DEPTH: u32 = 400;

/// Maximum depth for resolving deferred type references.
///
/// Unresolved references are resolved on first read; a reference whose
/// resolution needs another unresolved reference recurses. Exceeding this
/// depth yields the dynamic type.
pub const MAX_TYPE_RESOLUTION_DEPTH: u32 = 64;

/// Maximum depth when walking supertype chains.
///
/// Guards against cyclic `extends` clauses (`class A extends B`,
/// `class B extends A`) in addition to the visited-set check.
pub const MAX_SUPERTYPE_DEPTH: u32 = 128;

/// Maximum depth for recursive expression validation.
pub const MAX_EXPRESSION_DEPTH: u32 = 500;

// =============================================================================
// Reporting
// =============================================================================

/// Number of tokens shown on either side of the focused token in line previews.
pub const LINE_PREVIEW_RANGE: usize = 10;
