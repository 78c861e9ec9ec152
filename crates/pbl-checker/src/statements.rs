//! Block and control-flow validation.
//!
//! Each block runs in its own scope with the completion flags cleared, and
//! reports the way control left it so enclosing constructs can combine
//! branch results.

use crate::context::{ValidationResult, ValidatorContext, ValidatorFlags};
use crate::scope::ScopedReference;
use pbl_binder::{SimpleType, TypeConstraint};
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::format_message;
use pbl_parser::syntax::{
    Assertion, Block, DoWhileLoop, ForLoop, IfElse, Instruction, InstructionKind, Operator, Property, Statement,
    StatementNode, Switch, TryCatch, WhileLoop,
};

impl ValidatorContext<'_> {
    /// Validate every statement of `block` in a fresh scope. Returns the
    /// completion flags the block ended with.
    pub fn validate_block(&mut self, block: &Block) -> ValidatorFlags {
        let saved = self.flags;
        self.flags
            .remove(ValidatorFlags::COMPLETION | ValidatorFlags::REPORTED_UNREACHABLE);
        self.scope.enter();

        for statement in &block.nodes {
            if statement.is_empty() {
                continue;
            }
            if self.flags.contains(ValidatorFlags::DID_RETURN)
                && !self.flags.contains(ValidatorFlags::REPORTED_UNREACHABLE)
            {
                self.report(
                    statement.token,
                    diagnostic_codes::UNREACHABLE_CODE,
                    diagnostic_messages::UNREACHABLE_CODE.to_string(),
                );
                self.flags.insert(ValidatorFlags::REPORTED_UNREACHABLE);
            }
            self.validate_node_with(|ctx| ctx.validate_statement(statement));
        }

        let completion = self.flags & ValidatorFlags::COMPLETION;
        self.scope.exit();
        self.flags = saved;
        completion
    }

    fn validate_statement(&mut self, statement: &Statement) -> ValidationResult<()> {
        self.check(is_statement_expression(statement), statement.token, diagnostic_codes::INVALID_EXPRESSION, || {
            diagnostic_messages::INVALID_EXPRESSION.to_string()
        });
        self.statement_type(statement)?;
        Ok(())
    }

    /// Validate `condition` as a Boolean operand.
    pub(crate) fn validate_condition(&mut self, condition: &Statement) -> ValidationResult<()> {
        let constraint = self.statement_type(condition)?;
        let boolean = self.natives.boolean.clone();
        self.check_assignable(&constraint, &boolean, condition.token);
        Ok(())
    }

    // =========================================================================
    // Instructions
    // =========================================================================

    /// Control leaves the block even when the instruction's value is
    /// invalid.
    pub(crate) fn validate_instruction(&mut self, instruction: &Instruction) -> ValidationResult<()> {
        match instruction.kind {
            InstructionKind::Return => {
                self.flags
                    .insert(ValidatorFlags::DID_RETURN | ValidatorFlags::EXITS_METHOD);
                self.validate_return(instruction)?;
            }
            InstructionKind::Throw => {
                self.flags
                    .insert(ValidatorFlags::DID_RETURN | ValidatorFlags::EXITS_METHOD);
                if let Some(value) = &instruction.value {
                    self.statement_type(value)?;
                }
            }
            InstructionKind::Continue | InstructionKind::Break => {
                self.flags.insert(ValidatorFlags::DID_RETURN);
            }
        }
        Ok(())
    }

    fn validate_return(&mut self, instruction: &Instruction) -> ValidationResult<()> {
        let token = instruction.token;
        self.assert(self.flags.contains(ValidatorFlags::MAY_RETURN), token, diagnostic_codes::UNEXPECTED_RETURN, || {
            diagnostic_messages::UNEXPECTED_RETURN.to_string()
        })?;

        let value_type = match &instruction.value {
            Some(value) => Some(self.statement_type(value)?),
            None => None,
        };

        if self.flags.contains(ValidatorFlags::IN_CONSTRUCTOR) {
            self.check(value_type.is_none(), token, diagnostic_codes::CONSTRUCTORS_CANNOT_RETURN_VALUES, || {
                diagnostic_messages::CONSTRUCTORS_CANNOT_RETURN_VALUES.to_string()
            });
            return Ok(());
        }

        let expected = self
            .expected_returns
            .last()
            .cloned()
            .unwrap_or_else(|| self.natives.void.clone());
        let is_void = expected.is_simple(SimpleType::Void);
        let valid = match &value_type {
            _ if expected.is_dynamic() => true,
            Some(value_type) => !is_void && self.matches(value_type, &expected),
            None => is_void,
        };
        if !valid {
            let message = format_message(diagnostic_messages::EXPECTED_RETURN_TYPE, &[&self.type_name(&expected)]);
            self.report(token, diagnostic_codes::EXPECTED_RETURN_TYPE, message);
        }
        Ok(())
    }

    pub(crate) fn validate_assertion(&mut self, assertion: &Assertion) -> ValidationResult<()> {
        self.validate_condition(&assertion.condition)?;
        if let Some(message) = &assertion.message {
            self.statement_type(message)?;
        }
        Ok(())
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// Control leaves an `if` chain only when every branch, including a
    /// trailing `else`, leaves it.
    pub(crate) fn validate_if_else(&mut self, if_else: &IfElse) {
        for condition in &if_else.conditions {
            self.validate_node_with(|ctx| ctx.validate_condition(condition));
        }

        let mut completion = ValidatorFlags::COMPLETION;
        for block in &if_else.blocks {
            completion &= self.validate_block(block);
        }
        if if_else.else_block().is_some() {
            self.flags.insert(completion);
        }
    }

    pub(crate) fn validate_for_loop(&mut self, for_loop: &ForLoop) {
        self.with_scope(|ctx| {
            if for_loop.is_enhanced {
                ctx.validate_node_with(|ctx| ctx.bind_enhanced_for(for_loop));
            } else {
                if let Some(initialization) = &for_loop.initialization {
                    ctx.validate_node_with(|ctx| ctx.statement_type(initialization));
                }
                if let Some(condition) = &for_loop.condition {
                    ctx.validate_node_with(|ctx| ctx.validate_condition(condition));
                }
                if let Some(increment) = &for_loop.increment {
                    ctx.validate_node_with(|ctx| ctx.statement_type(increment));
                }
            }
            ctx.validate_block(&for_loop.block);
        });
    }

    /// `for (T x : xs)` binds `x` to the element type of `xs`.
    fn bind_enhanced_for(&mut self, for_loop: &ForLoop) -> ValidationResult<()> {
        let element = match &for_loop.iterable {
            Some(iterable) => {
                let iterable_type = self.statement_type(iterable)?;
                let resolved = self.dictionary.resolve(&iterable_type);
                match resolved.definition.as_array() {
                    Some(array) => self.dictionary.resolve(&array.element),
                    None => TypeConstraint::dynamic(),
                }
            }
            None => TypeConstraint::dynamic(),
        };

        let Some(StatementNode::VariableDeclaration(declaration)) =
            for_loop.initialization.as_ref().and_then(Statement::left)
        else {
            return Ok(());
        };
        let declared = self.resolve_type(&declaration.ty);
        self.check_assignable(&element, &declared, declaration.token);
        let reference = ScopedReference::new(&declaration.name, declared);
        self.scope.add_to_scope(if declaration.is_final { reference.constant() } else { reference });
        Ok(())
    }

    pub(crate) fn validate_while_loop(&mut self, while_loop: &WhileLoop) {
        self.validate_node_with(|ctx| ctx.validate_condition(&while_loop.condition));
        self.validate_block(&while_loop.block);
    }

    pub(crate) fn validate_do_while_loop(&mut self, do_while: &DoWhileLoop) {
        self.validate_block(&do_while.block);
        self.validate_node_with(|ctx| ctx.validate_condition(&do_while.condition));
    }

    /// A switch with a `default` leaves the method when every block that
    /// has statements does.
    pub(crate) fn validate_switch(&mut self, switch: &Switch) {
        let dictionary = self.dictionary;
        let discriminant = self
            .validate_node_with(|ctx| ctx.statement_type(&switch.value))
            .and_then(|constraint| dictionary.resolve(&constraint).definition.as_object());
        for case in &switch.cases {
            // Bare names may be enum constants of the discriminant's type.
            if let Some(StatementNode::Reference(reference)) = case.left()
                && case.is_simple()
            {
                if let Some(member) = discriminant
                    .and_then(|id| dictionary.object_member(id, &reference.name))
                    .filter(|member| member.is_static)
                {
                    self.record_qualifier(member, reference.token);
                }
                continue;
            }
            self.validate_node_with(|ctx| ctx.statement_type(case));
        }
        // Empty case blocks fall through to the next one.
        let mut exits = switch.default_block.as_ref().is_some_and(|block| !is_empty_block(block));
        for block in switch.blocks.iter().chain(&switch.default_block) {
            let completion = self.validate_block(block);
            if !is_empty_block(block) {
                exits &= completion.contains(ValidatorFlags::EXITS_METHOD);
            }
        }
        if exits {
            self.flags.insert(ValidatorFlags::COMPLETION);
        }
    }

    /// Control leaves a `try` when the try block and every catch block
    /// leave it, or when the `finally` block does.
    pub(crate) fn validate_try_catch(&mut self, try_catch: &TryCatch) {
        let mut completion = self.validate_block(&try_catch.try_block);

        for (index, block) in try_catch.catch_blocks.iter().enumerate() {
            let exception = try_catch.exception_references.get(index);
            completion &= self.with_scope(|ctx| {
                if let Some(exception) = exception {
                    ctx.scope
                        .add_to_scope(ScopedReference::new(&exception.name, TypeConstraint::dynamic()));
                }
                ctx.validate_block(block)
            });
        }

        if let Some(finally) = &try_catch.finally_block {
            completion |= self.validate_block(finally);
        }
        self.flags.insert(completion);
    }
}

fn is_empty_block(block: &Block) -> bool {
    block.nodes.iter().all(Statement::is_empty)
}

/// Whether `statement` may stand on its own, e.g. a call or an assignment
/// rather than a bare value.
fn is_statement_expression(statement: &Statement) -> bool {
    if let Some(operation) = statement.operation() {
        return operation.is_assignment() || matches!(operation, Operator::Increment | Operator::Decrement);
    }
    match statement.left() {
        None => true,
        Some(node) => match node {
            StatementNode::PropertyChain(chain) => matches!(chain.properties.last(), Some(Property::Call(_))),
            StatementNode::Statement(_)
            | StatementNode::Literal(_)
            | StatementNode::Lambda(_)
            | StatementNode::Reference(_)
            | StatementNode::Ternary(_) => false,
            _ => true,
        },
    }
}

#[cfg(test)]
#[path = "../tests/statements_tests.rs"]
mod statements_tests;
