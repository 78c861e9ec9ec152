use super::Printer;
use super::helpers::{is_catch_all, type_reference};
use pbl_parser::syntax::{
    Assertion, Block, DoWhileLoop, ForLoop, IfElse, Instruction, Statement, StatementNode, Switch, TryCatch,
    WhileLoop,
};

/// Whether `statement` is written with a trailing `;` inside a block.
fn needs_semicolon(statement: &Statement) -> bool {
    if statement.operator.is_some() {
        return true;
    }
    !matches!(
        statement.left(),
        Some(
            StatementNode::IfElse(_)
                | StatementNode::ForLoop(_)
                | StatementNode::WhileLoop(_)
                | StatementNode::Switch(_)
                | StatementNode::TryCatch(_)
                | StatementNode::Class(_)
        )
    )
}

impl Printer<'_> {
    // =========================================================================
    // Blocks
    // =========================================================================

    pub(super) fn emit_block(&mut self, block: &Block) {
        if !block.nodes.iter().any(|statement| self.is_emitted(statement)) {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_block_statements(block);
        self.decrease_indent();
        self.write("}");
    }

    /// One line per statement, without braces.
    pub(super) fn emit_block_statements(&mut self, block: &Block) {
        for statement in &block.nodes {
            if !self.is_emitted(statement) {
                continue;
            }
            self.emit_statement(statement);
            if needs_semicolon(statement) {
                self.write(";");
            }
            self.write_line();
        }
    }

    /// Empty statements and `super(...)` calls into classes without
    /// declared constructors produce no output.
    fn is_emitted(&self, statement: &Statement) -> bool {
        if statement.is_empty() {
            return false;
        }
        match statement.left() {
            Some(StatementNode::FunctionCall(call)) if statement.is_simple() => {
                call.name.as_deref() != Some("super") || self.resolutions.call_name(call.token).is_some()
            }
            _ => true,
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn emit_if_else(&mut self, if_else: &IfElse) {
        for (index, block) in if_else.blocks.iter().enumerate() {
            if index > 0 {
                self.write(" else ");
            }
            if let Some(condition) = if_else.conditions.get(index) {
                self.write("if (");
                self.emit_statement(condition);
                self.write(") ");
            }
            self.emit_block(block);
        }
    }

    pub(super) fn emit_for_loop(&mut self, for_loop: &ForLoop) {
        self.write("for (");
        if for_loop.is_enhanced {
            if let Some(initialization) = &for_loop.initialization {
                self.emit_statement(initialization);
            }
            self.write(" of ");
            if let Some(iterable) = &for_loop.iterable {
                self.emit_statement(iterable);
            }
        } else {
            if let Some(initialization) = &for_loop.initialization {
                self.emit_statement(initialization);
            }
            self.write(";");
            if let Some(condition) = &for_loop.condition {
                self.write(" ");
                self.emit_statement(condition);
            }
            self.write(";");
            if let Some(increment) = &for_loop.increment {
                self.write(" ");
                self.emit_statement(increment);
            }
        }
        self.write(") ");
        self.emit_block(&for_loop.block);
    }

    pub(super) fn emit_while_loop(&mut self, while_loop: &WhileLoop) {
        self.write("while (");
        self.emit_statement(&while_loop.condition);
        self.write(") ");
        self.emit_block(&while_loop.block);
    }

    pub(super) fn emit_do_while_loop(&mut self, do_while: &DoWhileLoop) {
        self.write("do ");
        self.emit_block(&do_while.block);
        self.write(" while (");
        self.emit_statement(&do_while.condition);
        self.write(")");
    }

    pub(super) fn emit_switch(&mut self, switch: &Switch) {
        self.write("switch (");
        self.emit_statement(&switch.value);
        self.write(") {");
        self.write_line();
        self.increase_indent();

        for (case, block) in switch.cases.iter().zip(&switch.blocks) {
            self.write("case ");
            self.emit_statement(case);
            self.write(":");
            self.write_line();
            self.increase_indent();
            self.emit_block_statements(block);
            self.decrease_indent();
        }
        if let Some(default) = &switch.default_block {
            self.write("default:");
            self.write_line();
            self.increase_indent();
            self.emit_block_statements(default);
            self.decrease_indent();
        }

        self.decrease_indent();
        self.write("}");
    }

    pub(super) fn emit_try_catch(&mut self, try_catch: &TryCatch) {
        self.write("try ");
        self.emit_block(&try_catch.try_block);

        match try_catch.catch_blocks.as_slice() {
            [] => {}
            [block] => {
                self.write(" catch (");
                self.write(exception_name(try_catch, 0));
                self.write(") ");
                self.emit_block(block);
            }
            _ => self.emit_catch_chain(try_catch),
        }

        if let Some(finally) = &try_catch.finally_block {
            self.write(" finally ");
            self.emit_block(finally);
        }
    }

    /// JavaScript has a single `catch`, so several clauses become an
    /// `instanceof` chain that rethrows what no clause catches.
    fn emit_catch_chain(&mut self, try_catch: &TryCatch) {
        self.write(" catch (error) {");
        self.write_line();
        self.increase_indent();

        let mut caught_all = false;
        for (index, block) in try_catch.catch_blocks.iter().enumerate() {
            let types = try_catch.exception_sets.get(index).map(Vec::as_slice).unwrap_or_default();
            let catches_all = types.is_empty() || types.iter().any(|ty| is_catch_all(ty.name()));

            if index > 0 {
                self.write(" else ");
            }
            if !catches_all {
                self.write("if (");
                for (type_index, ty) in types.iter().enumerate() {
                    if type_index > 0 {
                        self.write(" || ");
                    }
                    self.write("error instanceof ");
                    self.write(&type_reference(ty));
                }
                self.write(") ");
            }

            self.write("{");
            self.write_line();
            self.increase_indent();
            let name = exception_name(try_catch, index);
            if name != "error" {
                self.write(&format!("let {name} = error;"));
                self.write_line();
            }
            self.emit_block_statements(block);
            self.decrease_indent();
            self.write("}");

            if catches_all {
                caught_all = true;
                break;
            }
        }

        if !caught_all {
            self.write(" else {");
            self.write_line();
            self.increase_indent();
            self.write("throw error;");
            self.write_line();
            self.decrease_indent();
            self.write("}");
        }

        self.write_line();
        self.decrease_indent();
        self.write("}");
    }

    // =========================================================================
    // Instructions
    // =========================================================================

    pub(super) fn emit_instruction(&mut self, instruction: &Instruction) {
        self.write(instruction.kind.keyword());
        if let Some(value) = &instruction.value {
            self.write(" ");
            self.emit_statement(value);
        }
    }

    pub(super) fn emit_assertion(&mut self, assertion: &Assertion) {
        self.write("console.assert(");
        self.emit_statement(&assertion.condition);
        if let Some(message) = &assertion.message {
            self.write(", ");
            self.emit_statement(message);
        }
        self.write(")");
    }
}

fn exception_name(try_catch: &TryCatch, index: usize) -> &str {
    try_catch
        .exception_references
        .get(index)
        .map_or("error", |reference| reference.name.as_str())
}

#[cfg(test)]
#[path = "../../tests/statements_tests.rs"]
mod statements_tests;
