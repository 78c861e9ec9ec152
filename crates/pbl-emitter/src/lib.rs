//! JavaScript translator for the polybabel compiler.
//!
//! This crate provides:
//! - `source_writer` - Indentation-aware output buffer
//! - `emitter` - The [`Printer`], one `impl` block per group of constructs
//! - `translate_java` - Translate a validated Java file
//!
//! Translation never fails: it runs only on files that validated without
//! errors, and reads the validator's [`Resolutions`] for everything the
//! syntax tree alone cannot tell it (chosen overloads, implicit `this.`
//! receivers, constructor indices).

pub mod source_writer;
pub use source_writer::SourceWriter;

pub mod emitter;
pub use emitter::Printer;

#[cfg(test)]
#[path = "../tests/support.rs"]
pub(crate) mod test_support;

use pbl_checker::Resolutions;
use pbl_parser::JavaSyntaxTree;

/// Translate one validated Java file to a CommonJS module.
#[tracing::instrument(level = "debug", skip(tree, resolutions))]
pub fn translate_java(file: &str, tree: &JavaSyntaxTree, resolutions: &Resolutions) -> String {
    let mut printer = Printer::new(resolutions);
    printer.emit_tree(tree);
    let output = printer.finish();
    tracing::debug!(bytes = output.len(), "translated file");
    output
}
