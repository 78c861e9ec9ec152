//! Java syntax tree to JavaScript printer.
//!
//! The printer is split across modules by construct:
//! - `helpers` - Output helpers and Java to JavaScript name mapping
//! - `module_emission` - Imports and the module export
//! - `declarations` - Classes, constructors, methods, fields and anonymous objects
//! - `statements` - Blocks, control flow and instructions
//! - `expressions` - Operators, variables, ternaries and lambdas
//! - `literals` - Literals and array allocation
//! - `property_access` - References, calls, property chains and instantiation

mod declarations;
mod expressions;
mod helpers;
mod literals;
mod module_emission;
mod property_access;
mod statements;

use crate::source_writer::SourceWriter;
use pbl_checker::Resolutions;
use pbl_parser::{JavaSyntaxTree, TopLevelNode};

pub use helpers::{default_value, host_type_name, type_reference};

pub struct Printer<'a> {
    pub(super) writer: SourceWriter,
    pub(super) resolutions: &'a Resolutions,
}

impl<'a> Printer<'a> {
    #[must_use]
    pub fn new(resolutions: &'a Resolutions) -> Self {
        Self {
            writer: SourceWriter::new(),
            resolutions,
        }
    }

    /// Emit every top-level node of `tree`, imports first and the module
    /// export last.
    pub fn emit_tree(&mut self, tree: &JavaSyntaxTree) {
        for import in tree.imports() {
            self.emit_import(import);
        }

        for node in &tree.nodes {
            match node {
                TopLevelNode::Class(class) => {
                    self.begin_unit();
                    self.emit_class(class);
                }
                // Interfaces only exist for the validator.
                TopLevelNode::Interface(_) | TopLevelNode::Import(_) => {}
            }
        }

        self.emit_export(tree);
    }

    #[must_use]
    pub fn finish(mut self) -> String {
        self.writer.ensure_line();
        self.writer.take_output()
    }
}
