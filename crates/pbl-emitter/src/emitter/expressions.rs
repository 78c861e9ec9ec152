use super::Printer;
use pbl_parser::syntax::{Lambda, LambdaBody, Operator, Statement, StatementNode, Ternary, VariableDeclaration};

/// JavaScript spelling of `operator`. Equality is strict; casts are
/// dropped before operators are reached.
const fn operator_text(operator: Operator) -> &'static str {
    match operator {
        Operator::EqualTo => "===",
        Operator::NotEqualTo => "!==",
        Operator::Elvis => "||",
        other => other.symbol(),
    }
}

impl Printer<'_> {
    // =========================================================================
    // Statements
    // =========================================================================

    /// Emit a statement in expression position: its left side, operator and
    /// right side, in source order. Parenthesized groups keep their
    /// parentheses; casts are dropped.
    pub(super) fn emit_statement(&mut self, statement: &Statement) {
        if statement.is_parenthetical {
            self.write("(");
        }

        let operation = statement.operation();
        match (statement.left(), operation) {
            (Some(StatementNode::VariableDeclaration(declaration)), _) => {
                let is_initialized = operation == Some(Operator::Assign);
                self.emit_variable_declaration(declaration, is_initialized);
            }
            (Some(left), _) => self.emit_node(left),
            (None, _) => {}
        }

        match (statement.left().is_some(), operation, statement.right()) {
            (true, Some(operation), Some(right)) => {
                self.write(" ");
                self.write(operator_text(operation));
                self.write(" ");
                self.emit_statement(right);
            }
            // Postfix `x++`.
            (true, Some(operation), None) => self.write(operator_text(operation)),
            // Prefix `!x`, `-x`, `++x`.
            (false, Some(operation), right) => {
                self.write(operator_text(operation));
                if let Some(right) = right {
                    self.emit_statement(right);
                }
            }
            (_, None, Some(right)) => self.emit_statement(right),
            (_, None, None) => {}
        }

        if statement.is_parenthetical {
            self.write(")");
        }
    }

    pub(super) fn emit_node(&mut self, node: &StatementNode) {
        match node {
            StatementNode::Statement(statement) => self.emit_statement(statement),
            StatementNode::Instruction(instruction) => self.emit_instruction(instruction),
            StatementNode::Assertion(assertion) => self.emit_assertion(assertion),
            StatementNode::Literal(literal) => self.emit_literal(literal),
            StatementNode::Lambda(lambda) => self.emit_lambda(lambda),
            StatementNode::Reference(reference) => self.emit_reference(reference),
            StatementNode::FunctionCall(call) => self.emit_function_call(call),
            StatementNode::Instantiation(instantiation) => self.emit_instantiation(instantiation),
            StatementNode::Class(class) => self.emit_class(class),
            StatementNode::VariableDeclaration(declaration) => self.emit_variable_declaration(declaration, false),
            StatementNode::IfElse(if_else) => self.emit_if_else(if_else),
            StatementNode::ForLoop(for_loop) => self.emit_for_loop(for_loop),
            StatementNode::WhileLoop(while_loop) => self.emit_while_loop(while_loop),
            StatementNode::DoWhileLoop(do_while) => self.emit_do_while_loop(do_while),
            StatementNode::Switch(switch) => self.emit_switch(switch),
            StatementNode::TryCatch(try_catch) => self.emit_try_catch(try_catch),
            StatementNode::PropertyChain(chain) => self.emit_property_chain(chain),
            StatementNode::Ternary(ternary) => self.emit_ternary(ternary),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Final locals initialized where they are declared are `const`.
    fn emit_variable_declaration(&mut self, declaration: &VariableDeclaration, is_initialized: bool) {
        self.write(if declaration.is_final && is_initialized { "const " } else { "let " });
        self.write(&declaration.name);
    }

    fn emit_ternary(&mut self, ternary: &Ternary) {
        self.emit_statement(&ternary.condition);
        self.write(" ? ");
        self.emit_statement(&ternary.left);
        self.write(" : ");
        self.emit_statement(&ternary.right);
    }

    fn emit_lambda(&mut self, lambda: &Lambda) {
        self.write("(");
        self.emit_comma_separated(&lambda.parameters, |printer, parameter| printer.write(parameter.name()));
        self.write(") => ");
        match &lambda.body {
            LambdaBody::Block(block) => self.emit_block(block),
            LambdaBody::Statement(statement) => self.emit_statement(statement),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/expressions_tests.rs"]
mod expressions_tests;
