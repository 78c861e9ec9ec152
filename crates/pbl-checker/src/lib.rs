//! Validator for the polybabel compiler.
//!
//! Validation is a single recursive walk per file that derives expression
//! types while it checks them. The walk is organized as `impl` blocks on
//! [`ValidatorContext`] spread across modules:
//! - `context` - `ValidatorContext`, flags, halts and translator side tables
//! - `scope` - Block-scoped local references
//! - `visitor` - The stack of object types being validated and visibility rules
//! - `error_reporter` - `check`/`assert` style error recording
//! - `declarations` - Files, imports, classes, interfaces, methods and fields
//! - `statements` - Blocks, control flow and instructions
//! - `expr` - Operators, literals, casts, ternaries and lambdas
//! - `access` - References, calls, property chains and instantiation

pub mod context;
pub use context::{Resolutions, ValidationHalt, ValidationOutput, ValidationResult, ValidatorContext, ValidatorFlags};

pub mod scope;
pub use scope::{ScopeManager, ScopedReference};

pub mod visitor;
pub use visitor::ObjectVisitor;

pub mod error_reporter;

pub mod declarations;
pub mod statements;
pub mod expr;
pub mod access;

#[cfg(test)]
#[path = "../tests/support.rs"]
pub(crate) mod test_support;

use pbl_binder::{NativeTypes, SymbolDictionary};
use pbl_parser::JavaSyntaxTree;

/// Validate one resolved Java file against the shared dictionary.
#[tracing::instrument(level = "debug", skip(tree, dictionary, natives))]
pub fn validate_java(
    file: &str,
    tree: &JavaSyntaxTree,
    dictionary: &SymbolDictionary,
    natives: &NativeTypes,
) -> ValidationOutput {
    let mut context = ValidatorContext::new(file, tree, dictionary, natives);
    context.validate_file(tree);
    let output = context.finish();
    tracing::debug!(diagnostics = output.diagnostics.len(), "validated file");
    output
}
