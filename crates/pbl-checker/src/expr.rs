//! Expression typing.
//!
//! [`ValidatorContext::statement_type`] validates a statement tree and
//! returns the constraint it evaluates to. Operand errors are recorded in
//! place and fall back to the dynamic type so that one bad operand does
//! not hide errors in the rest of the expression.

use crate::context::{ValidationResult, ValidatorContext, ValidatorFlags};
use crate::scope::ScopedReference;
use pbl_binder::{ObjectMember as ResolvedMember, SimpleType, TypeConstraint};
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::format_message;
use pbl_parser::syntax::{
    JavaType, Lambda, LambdaBody, LambdaParameter, Literal, LiteralKind, Operator, OperatorNode, Property,
    Statement, StatementNode, Ternary, VariableDeclaration,
};
use pbl_scanner::TokenId;

impl<'a> ValidatorContext<'a> {
    /// Validate `statement` and return the type it evaluates to.
    pub fn statement_type(&mut self, statement: &Statement) -> ValidationResult<TypeConstraint> {
        let Some(operator) = statement.operator else {
            let Some(left) = statement.left() else {
                return Ok(self.natives.void.clone());
            };
            let constraint = self.node_type(left)?;
            return Ok(match &statement.cast {
                Some(ty) => self.cast_type(constraint, ty),
                None => constraint,
            });
        };

        let operation = operator.operation;
        if operation.is_assignment() {
            return self.assignment_type(statement, operator);
        }

        match (statement.left(), statement.right()) {
            (Some(target), None) if is_increment(operation) => self.increment_type(target, operator),
            (None, Some(operand)) => self.prefix_type(operator, operand),
            (Some(left), Some(right)) => {
                let left_type = self.node_type(left)?;
                if operation == Operator::Instanceof {
                    return Ok(self.natives.boolean.clone());
                }
                let right_type = self.statement_type(right)?;
                Ok(self.binary_type(operator, &left_type, &right_type))
            }
            _ => Err(self.halt(
                statement.token,
                diagnostic_codes::INVALID_EXPRESSION,
                diagnostic_messages::INVALID_EXPRESSION.to_string(),
            )),
        }
    }

    pub(crate) fn node_type(&mut self, node: &StatementNode) -> ValidationResult<TypeConstraint> {
        let void = self.natives.void.clone();
        match node {
            StatementNode::Statement(statement) => self.statement_type(statement),
            StatementNode::Literal(literal) => self.literal_type(literal),
            StatementNode::Lambda(lambda) => Ok(self.lambda_type(lambda)),
            StatementNode::Reference(reference) => self.reference_type(reference),
            StatementNode::FunctionCall(call) => self.function_call_type(call),
            StatementNode::Instantiation(instantiation) => self.instantiation_type(instantiation),
            StatementNode::PropertyChain(chain) => self.chain_type(chain),
            StatementNode::Ternary(ternary) => self.ternary_type(ternary),
            StatementNode::VariableDeclaration(declaration) => Ok(self.declare_variable(declaration, false)),
            StatementNode::Instruction(instruction) => self.validate_instruction(instruction).map(|()| void),
            StatementNode::Assertion(assertion) => self.validate_assertion(assertion).map(|()| void),
            StatementNode::IfElse(if_else) => {
                self.validate_if_else(if_else);
                Ok(void)
            }
            StatementNode::ForLoop(for_loop) => {
                self.validate_for_loop(for_loop);
                Ok(void)
            }
            StatementNode::WhileLoop(while_loop) => {
                self.validate_while_loop(while_loop);
                Ok(void)
            }
            StatementNode::DoWhileLoop(do_while) => {
                self.validate_do_while_loop(do_while);
                Ok(void)
            }
            StatementNode::Switch(switch) => {
                self.validate_switch(switch);
                Ok(void)
            }
            StatementNode::TryCatch(try_catch) => {
                self.validate_try_catch(try_catch);
                Ok(void)
            }
            StatementNode::Class(class) => {
                tracing::debug!(class = %class.name, "local class is not type checked");
                Ok(void)
            }
        }
    }

    /// Whether `constraint` resolves to exactly the simple type `simple`.
    pub(crate) fn is_exactly(&self, constraint: &TypeConstraint, simple: SimpleType) -> bool {
        self.dictionary.resolve(constraint).is_simple(simple)
    }

    fn declare_variable(&mut self, declaration: &VariableDeclaration, is_constant: bool) -> TypeConstraint {
        let constraint = self.resolve_type(&declaration.ty);
        let reference = ScopedReference::new(&declaration.name, constraint.clone());
        self.scope
            .add_to_scope(if is_constant { reference.constant() } else { reference });
        constraint
    }

    // =========================================================================
    // Casts and literals
    // =========================================================================

    /// A cast is valid between related types and between strings and
    /// numbers.
    fn cast_type(&mut self, source: TypeConstraint, ty: &JavaType) -> TypeConstraint {
        let target = self.resolve_type(ty);
        let related = self.matches(&source, &target) || self.matches(&target, &source);
        let textual = |ctx: &Self, constraint: &TypeConstraint| {
            ctx.is_exactly(constraint, SimpleType::String) || ctx.is_exactly(constraint, SimpleType::Number)
        };
        if !related && !(textual(self, &source) && textual(self, &target)) {
            let message = format_message(
                diagnostic_messages::CANNOT_CAST,
                &[&self.type_name(&source), &self.type_name(&target)],
            );
            self.report(ty.token, diagnostic_codes::CANNOT_CAST, message);
        }
        target
    }

    fn literal_type(&mut self, literal: &Literal) -> ValidationResult<TypeConstraint> {
        let natives = self.natives;
        Ok(match literal.kind {
            LiteralKind::Keyword => match literal.value.as_str() {
                "true" | "false" => natives.boolean.clone(),
                "null" => natives.null.clone(),
                _ => natives.dynamic.clone(),
            },
            LiteralKind::String => natives.string.clone(),
            LiteralKind::Number => natives.number.clone(),
            LiteralKind::Array => {
                let mut items = Vec::with_capacity(literal.elements.len());
                for item in &literal.elements {
                    items.push(self.statement_type(item)?);
                }
                match items.split_first() {
                    Some((first, rest)) if rest.iter().all(|item| self.matches(item, first)) => {
                        TypeConstraint::array_of(first.clone())
                    }
                    _ => TypeConstraint::array_of(TypeConstraint::dynamic()),
                }
            }
        })
    }

    /// Array literal elements checked against a known element type.
    pub(crate) fn check_array_elements(&mut self, literal: &Literal, element: &TypeConstraint) -> ValidationResult<()> {
        for item in &literal.elements {
            let item_type = self.statement_type(item)?;
            self.check_assignable(&item_type, element, item.token);
        }
        Ok(())
    }

    fn ternary_type(&mut self, ternary: &Ternary) -> ValidationResult<TypeConstraint> {
        self.validate_condition(&ternary.condition)?;
        let left = self.statement_type(&ternary.left)?;
        let right = self.statement_type(&ternary.right)?;
        Ok(if self.matches(&right, &left) {
            left
        } else if self.matches(&left, &right) {
            right
        } else {
            TypeConstraint::dynamic()
        })
    }

    /// Lambdas validate their body with a fresh return context and are
    /// otherwise untyped.
    fn lambda_type(&mut self, lambda: &Lambda) -> TypeConstraint {
        let clear = ValidatorFlags::all() - ValidatorFlags::ALLOW_INSTANCE_KEYWORDS;
        self.with_flags(ValidatorFlags::MAY_RETURN, clear, |ctx| {
            ctx.expecting_return(TypeConstraint::dynamic(), |ctx| {
                ctx.with_scope(|ctx| {
                    for parameter in &lambda.parameters {
                        let reference = match parameter {
                            LambdaParameter::Untyped(reference) => {
                                ScopedReference::new(&reference.name, TypeConstraint::dynamic())
                            }
                            LambdaParameter::Typed(declaration) => {
                                ScopedReference::new(&declaration.name, ctx.resolve_type(&declaration.ty))
                            }
                        };
                        ctx.scope.add_to_scope(reference);
                    }
                    match &lambda.body {
                        LambdaBody::Block(block) => {
                            ctx.validate_block(block);
                        }
                        LambdaBody::Statement(statement) => {
                            ctx.validate_node_with(|ctx| ctx.statement_type(statement));
                        }
                    }
                });
            });
        });
        TypeConstraint::dynamic()
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn prefix_type(&mut self, operator: OperatorNode, operand: &Statement) -> ValidationResult<TypeConstraint> {
        let natives = self.natives;
        match operator.operation {
            Operator::Increment | Operator::Decrement => match operand.left() {
                Some(target) if operand.is_simple() => self.increment_type(target, operator),
                _ => Err(self.invalid_assignment(operand.token)),
            },
            Operator::Negate => {
                let constraint = self.statement_type(operand)?;
                Ok(self.expect_operand(operator, &constraint, &natives.boolean))
            }
            Operator::BitwiseComplement | Operator::Add | Operator::Subtract => {
                let constraint = self.statement_type(operand)?;
                Ok(self.expect_operand(operator, &constraint, &natives.number))
            }
            _ => Err(self.halt(
                operator.token,
                diagnostic_codes::INVALID_EXPRESSION,
                diagnostic_messages::INVALID_EXPRESSION.to_string(),
            )),
        }
    }

    /// `x++`, `++x` and friends: the target must be an assignable number.
    fn increment_type(&mut self, target: &StatementNode, operator: OperatorNode) -> ValidationResult<TypeConstraint> {
        let constraint = self.assignment_target(target, false)?;
        let number = self.natives.number.clone();
        Ok(self.expect_operand(operator, &constraint, &number))
    }

    /// `expected` when `operand` matches it, dynamic after reporting an
    /// invalid operator otherwise.
    fn expect_operand(
        &mut self,
        operator: OperatorNode,
        operand: &TypeConstraint,
        expected: &TypeConstraint,
    ) -> TypeConstraint {
        if self.matches(operand, expected) {
            expected.clone()
        } else {
            self.invalid_operator(operator, operand)
        }
    }

    fn invalid_operator(&mut self, operator: OperatorNode, operand: &TypeConstraint) -> TypeConstraint {
        let message = format_message(
            diagnostic_messages::INVALID_OPERATOR,
            &[operator.operation.symbol(), &self.type_name(operand)],
        );
        self.report(operator.token, diagnostic_codes::INVALID_OPERATOR, message);
        TypeConstraint::dynamic()
    }

    fn binary_type(&mut self, operator: OperatorNode, left: &TypeConstraint, right: &TypeConstraint) -> TypeConstraint {
        let natives = self.natives;
        let operation = operator.operation;
        let both = |ctx: &Self, expected: &TypeConstraint| ctx.matches(left, expected) && ctx.matches(right, expected);
        let offending = |ctx: &Self, expected: &TypeConstraint| {
            if ctx.matches(left, expected) { right.clone() } else { left.clone() }
        };

        match operation {
            Operator::Add => {
                if self.is_exactly(left, SimpleType::String) || self.is_exactly(right, SimpleType::String) {
                    natives.string.clone()
                } else if both(self, &natives.number) {
                    if left.is_dynamic() || right.is_dynamic() {
                        TypeConstraint::dynamic()
                    } else {
                        natives.number.clone()
                    }
                } else {
                    let operand = offending(self, &natives.number);
                    self.invalid_operator(operator, &operand)
                }
            }
            Operator::BitwiseAnd | Operator::BitwiseOr | Operator::BitwiseXor => {
                if both(self, &natives.number) {
                    natives.number.clone()
                } else if both(self, &natives.boolean) {
                    natives.boolean.clone()
                } else {
                    let operand = offending(self, &natives.number);
                    self.invalid_operator(operator, &operand)
                }
            }
            Operator::EqualTo | Operator::NotEqualTo => natives.boolean.clone(),
            Operator::ConditionalAnd | Operator::ConditionalOr => {
                if both(self, &natives.boolean) {
                    natives.boolean.clone()
                } else {
                    let operand = offending(self, &natives.boolean);
                    self.invalid_operator(operator, &operand)
                }
            }
            Operator::Elvis => left.clone(),
            _ if operation.is_comparison() => {
                if both(self, &natives.number) {
                    natives.boolean.clone()
                } else {
                    let operand = offending(self, &natives.number);
                    self.invalid_operator(operator, &operand)
                }
            }
            Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Remainder
            | Operator::LeftShift
            | Operator::RightShift
            | Operator::UnsignedRightShift => {
                if both(self, &natives.number) {
                    natives.number.clone()
                } else {
                    let operand = offending(self, &natives.number);
                    self.invalid_operator(operator, &operand)
                }
            }
            _ => self.invalid_operator(operator, left),
        }
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    fn assignment_type(&mut self, statement: &Statement, operator: OperatorNode) -> ValidationResult<TypeConstraint> {
        let (Some(target), Some(value)) = (statement.left(), statement.right()) else {
            return Err(self.invalid_assignment(statement.token));
        };

        let value_type = self.statement_type(value)?;
        let target_type = self.assignment_target(target, true)?;

        match operator.operation.compound_operation() {
            None => {
                self.check_assignable(&value_type, &target_type, value.token);
            }
            Some(Operator::Add) if self.is_exactly(&target_type, SimpleType::String) => {}
            Some(operation) => {
                let applied = OperatorNode {
                    operation,
                    token: operator.token,
                };
                let result = self.binary_type(applied, &target_type, &value_type);
                self.check_assignable(&result, &target_type, value.token);
            }
        }
        Ok(target_type)
    }

    /// The type of an assignment target, declaring it first when the target
    /// is a declaration.
    pub(crate) fn assignment_target(
        &mut self,
        target: &StatementNode,
        is_assignment: bool,
    ) -> ValidationResult<TypeConstraint> {
        match target {
            StatementNode::VariableDeclaration(declaration) => {
                Ok(self.declare_variable(declaration, declaration.is_final && is_assignment))
            }
            StatementNode::Reference(reference) => {
                if let Some(scoped) = self.scope.get_scoped_reference(&reference.name) {
                    let constraint = scoped.constraint.clone();
                    self.assert(!scoped.is_constant, reference.token, diagnostic_codes::CANNOT_REASSIGN_FINAL_VALUE, || {
                        format_message(diagnostic_messages::CANNOT_REASSIGN_FINAL_VALUE, &[&reference.name])
                    })?;
                    return Ok(constraint);
                }
                if let Some((member, _)) = self.visible_member(&reference.name) {
                    self.check_final_member(member, reference.token)?;
                }
                self.reference_type(reference)
            }
            StatementNode::PropertyChain(chain) => {
                if matches!(chain.properties.last(), Some(Property::Call(_)) | None) {
                    return Err(self.invalid_assignment(chain.token));
                }
                let end = self.walk_chain(chain)?;
                if let Some(member) = end.member {
                    self.check_final_member(member, chain.token)?;
                }
                Ok(end.constraint)
            }
            StatementNode::Statement(inner) if inner.is_simple() => match inner.left() {
                Some(node) => self.assignment_target(node, is_assignment),
                None => Err(self.invalid_assignment(inner.token)),
            },
            _ => Err(self.invalid_assignment(self.node_token(target))),
        }
    }

    /// Final members may only be set from a constructor of their own class.
    fn check_final_member(&self, member: &ResolvedMember, token: TokenId) -> ValidationResult<()> {
        let initializing = self.flags.contains(ValidatorFlags::IN_CONSTRUCTOR)
            && self.objects.current() == Some(member.parent);
        self.assert(!member.is_constant || initializing, token, diagnostic_codes::CANNOT_REASSIGN_FINAL_MEMBER, || {
            let owner = &self.dictionary.object(member.parent).name;
            format_message(
                diagnostic_messages::CANNOT_REASSIGN_FINAL_MEMBER,
                &[&format!("{owner}.{}", member.name)],
            )
        })
    }

    fn invalid_assignment(&self, token: TokenId) -> crate::context::ValidationHalt {
        self.halt(
            token,
            diagnostic_codes::INVALID_ASSIGNMENT,
            diagnostic_messages::INVALID_ASSIGNMENT.to_string(),
        )
    }

    fn node_token(&self, node: &StatementNode) -> TokenId {
        match node {
            StatementNode::Statement(statement) => statement.token,
            StatementNode::Instruction(instruction) => instruction.token,
            StatementNode::Assertion(assertion) => assertion.token,
            StatementNode::Literal(literal) => literal.token,
            StatementNode::Lambda(lambda) => lambda.token,
            StatementNode::Reference(reference) => reference.token,
            StatementNode::FunctionCall(call) => call.token,
            StatementNode::Instantiation(instantiation) => instantiation.token,
            StatementNode::Class(class) => class.token,
            StatementNode::VariableDeclaration(declaration) => declaration.token,
            StatementNode::IfElse(if_else) => if_else.token,
            StatementNode::ForLoop(for_loop) => for_loop.token,
            StatementNode::WhileLoop(while_loop) => while_loop.token,
            StatementNode::DoWhileLoop(do_while) => do_while.token,
            StatementNode::Switch(switch) => switch.token,
            StatementNode::TryCatch(try_catch) => try_catch.token,
            StatementNode::PropertyChain(chain) => chain.token,
            StatementNode::Ternary(ternary) => ternary.token,
        }
    }
}

const fn is_increment(operation: Operator) -> bool {
    matches!(operation, Operator::Increment | Operator::Decrement)
}

#[cfg(test)]
#[path = "../tests/expr_tests.rs"]
mod expr_tests;
