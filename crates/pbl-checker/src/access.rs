//! Names, calls, property chains and instantiation.

use crate::context::{ValidationResult, ValidatorContext, ValidatorFlags};
use crate::error_reporter::quoted_list;
use crate::visitor::Access;
use pbl_binder::{ObjectId, ObjectMember as ResolvedMember, TypeConstraint, TypeDefinition, overload_name};
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::format_message;
use pbl_parser::syntax::{FunctionCall, Instantiation, Property, PropertyChain, Reference, Statement};
use pbl_scanner::TokenId;
use pbl_solver::MethodLookup;
use smallvec::SmallVec;

/// The value a property chain ends with, and the member it was read from
/// when the last hop was a member access.
pub(crate) struct ChainEnd<'a> {
    pub constraint: TypeConstraint,
    pub member: Option<&'a ResolvedMember>,
}

impl<'a> ValidatorContext<'a> {
    /// A member of an object on the visitor stack, innermost first, with the
    /// object it was found through.
    pub(crate) fn visible_member(&self, name: &str) -> Option<(&'a ResolvedMember, ObjectId)> {
        let dictionary = self.dictionary;
        self.objects
            .innermost_first()
            .find_map(|id| dictionary.object_member(id, name).map(|member| (member, id)))
    }

    fn argument_types(&mut self, arguments: &[Statement]) -> ValidationResult<Vec<TypeConstraint>> {
        arguments
            .iter()
            .map(|argument| self.statement_type(argument))
            .collect()
    }

    fn argument_names(&self, arguments: &[TypeConstraint]) -> String {
        let names: Vec<String> = arguments.iter().map(|argument| self.type_name(argument)).collect();
        quoted_list(&names)
    }

    fn check_access(&self, member: &ResolvedMember, token: TokenId) -> ValidationResult<()> {
        let (code, template) = match self.objects.access(&self.matcher(), member) {
            Access::Allowed => return Ok(()),
            Access::Private => (diagnostic_codes::PRIVATE_MEMBER_ACCESS, diagnostic_messages::PRIVATE_MEMBER_ACCESS),
            Access::Protected => (
                diagnostic_codes::PROTECTED_MEMBER_ACCESS,
                diagnostic_messages::PROTECTED_MEMBER_ACCESS,
            ),
        };
        let owner = &self.dictionary.object(member.parent).name;
        Err(self.halt(token, code, format_message(template, &[self.declared_name(member), owner])))
    }

    /// Instance members cannot be read through a class reference.
    fn check_instance_access(&self, member: &ResolvedMember, token: TokenId) -> ValidationResult<()> {
        let owner = &self.dictionary.object(member.parent).name;
        self.assert(member.is_static, token, diagnostic_codes::INSTANCE_MEMBER_ON_STATIC_CLASS, || {
            let qualified = format!("{owner}.{}", self.declared_name(member));
            format_message(diagnostic_messages::INSTANCE_MEMBER_ON_STATIC_CLASS, &[&qualified, owner])
        })
    }

    /// Record how the translator must qualify a bare member reference.
    pub(crate) fn record_qualifier(&mut self, member: &ResolvedMember, token: TokenId) {
        let qualifier = if member.is_static {
            self.dictionary.object(member.parent).name.clone()
        } else {
            "this".to_string()
        };
        self.resolutions.qualifiers.insert(token, qualifier);
    }

    // =========================================================================
    // Bare references
    // =========================================================================

    pub fn reference_type(&mut self, reference: &Reference) -> ValidationResult<TypeConstraint> {
        let token = reference.token;
        match reference.name.as_str() {
            "this" => return Ok(self.this_type(token)),
            "super" => return Ok(self.super_type(token)),
            _ => {}
        }

        if let Some(scoped) = self.scope.get_scoped_reference(&reference.name) {
            return Ok(scoped.constraint.clone());
        }

        if let Some((member, _)) = self.visible_member(&reference.name) {
            if !self.flags.contains(ValidatorFlags::ALLOW_INSTANCE_KEYWORDS) {
                self.check_instance_access(member, token)?;
            }
            self.check_access(member, token)?;
            self.record_qualifier(member, token);
            return Ok(self.dictionary.resolve(&member.constraint));
        }

        let dictionary = self.dictionary;
        let candidates = self
            .namespace
            .candidates(&self.namespace_stack, std::slice::from_ref(&reference.name));
        if let Some(symbol) = dictionary.lookup_first(&candidates) {
            return Ok(dictionary.resolve(&symbol.constraint));
        }
        if self.is_statically_imported(&reference.name) {
            return Ok(TypeConstraint::dynamic());
        }
        Ok(self.unknown_identifier(&reference.name, token))
    }

    fn is_statically_imported(&self, name: &str) -> bool {
        self.has_static_wildcard || self.static_imports.contains(name)
    }

    fn this_type(&mut self, token: TokenId) -> TypeConstraint {
        let allowed = self.check(
            self.flags.contains(ValidatorFlags::ALLOW_INSTANCE_KEYWORDS),
            token,
            diagnostic_codes::THIS_IN_STATIC_CONTEXT,
            || diagnostic_messages::THIS_IN_STATIC_CONTEXT.to_string(),
        );
        match self.objects.current() {
            Some(id) if allowed => TypeConstraint::new(TypeDefinition::Object(id)),
            _ => TypeConstraint::dynamic(),
        }
    }

    /// `super` is an instance of the nearest class supertype.
    fn super_type(&mut self, token: TokenId) -> TypeConstraint {
        let Some(current) = self.objects.current() else {
            return TypeConstraint::dynamic();
        };
        match self.class_supertype(current) {
            Some(Some(parent)) => TypeConstraint::new(TypeDefinition::Object(parent)),
            Some(None) => TypeConstraint::dynamic(),
            None => {
                let name = self.dictionary.object(current).name.clone();
                self.report(
                    token,
                    diagnostic_codes::NO_SUPERTYPES,
                    format_message(diagnostic_messages::NO_SUPERTYPES, &[&name]),
                );
                TypeConstraint::dynamic()
            }
        }
    }

    /// The class `id` extends: `None` without any supertype, `Some(None)`
    /// when the supertype is not a known class.
    fn class_supertype(&self, id: ObjectId) -> Option<Option<ObjectId>> {
        let dictionary = self.dictionary;
        let object = dictionary.object(id);
        if object.supertypes.is_empty() {
            return None;
        }
        let parent = object.supertypes.iter().find_map(|supertype| {
            let resolved = dictionary.resolve(supertype);
            match resolved.definition.as_object() {
                Some(parent) if dictionary.object(parent).is_class() => Some(Some(parent)),
                Some(_) => None,
                None => Some(None),
            }
        });
        match parent {
            Some(parent) => Some(parent),
            None if object.is_interface() => Some(None),
            None => None,
        }
    }

    // =========================================================================
    // Bare calls
    // =========================================================================

    pub fn function_call_type(&mut self, call: &FunctionCall) -> ValidationResult<TypeConstraint> {
        let arguments = self.argument_types(&call.arguments)?;
        let Some(name) = call.name.as_deref() else {
            return Err(self.halt(
                call.token,
                diagnostic_codes::INVALID_EXPRESSION,
                diagnostic_messages::INVALID_EXPRESSION.to_string(),
            ));
        };
        if matches!(name, "this" | "super") {
            self.constructor_call(name, call.token, &arguments)?;
            return Ok(self.natives.void.clone());
        }

        if let Some(scoped) = self.scope.get_scoped_reference(name) {
            let constraint = scoped.constraint.clone();
            return self.call_value(&constraint, name, &arguments, call.token);
        }

        let matcher = self.matcher();
        let objects: SmallVec<[ObjectId; 4]> = self.objects.innermost_first().collect();
        for id in objects {
            match matcher.matching_method(id, name, &arguments) {
                MethodLookup::Found(found) => {
                    if !self.flags.contains(ValidatorFlags::ALLOW_INSTANCE_KEYWORDS) {
                        self.assert(
                            found.member.is_static,
                            call.token,
                            diagnostic_codes::INSTANCE_METHOD_IN_STATIC_CONTEXT,
                            || diagnostic_messages::INSTANCE_METHOD_IN_STATIC_CONTEXT.to_string(),
                        )?;
                    }
                    self.check_access(found.member, call.token)?;
                    self.record_qualifier(found.member, call.token);
                    if found.name != name {
                        self.resolutions.call_names.insert(call.token, found.name);
                    }
                    return Ok(self.dictionary.resolve(&found.return_type));
                }
                MethodLookup::InvalidArguments => {
                    return Err(self.invalid_arguments(name, &arguments, call.token));
                }
                MethodLookup::NotAFunction(_) => return Err(self.not_a_function(name, call.token)),
                MethodLookup::Missing => {}
            }
        }

        if self.is_statically_imported(name) {
            return Ok(TypeConstraint::dynamic());
        }
        let dictionary = self.dictionary;
        let candidates = self
            .namespace
            .candidates(&self.namespace_stack, &[name.to_string()]);
        match dictionary.lookup_first(&candidates) {
            Some(symbol) => {
                let constraint = dictionary.resolve(&symbol.constraint);
                self.call_value(&constraint, name, &arguments, call.token)
            }
            None => Ok(self.unknown_identifier(name, call.token)),
        }
    }

    /// `this(...)` or `super(...)` inside a constructor.
    fn constructor_call(&mut self, name: &str, token: TokenId, arguments: &[TypeConstraint]) -> ValidationResult<()> {
        let Some(current) = self.objects.current() else {
            return Ok(());
        };
        let target = if name == "this" {
            current
        } else {
            match self.class_supertype(current) {
                Some(Some(parent)) => parent,
                Some(None) => return Ok(()),
                None if arguments.is_empty() => return Ok(()),
                None => {
                    let class_name = &self.dictionary.object(current).name;
                    return Err(self.halt(
                        token,
                        diagnostic_codes::NO_SUPERTYPES,
                        format_message(diagnostic_messages::NO_SUPERTYPES, &[class_name]),
                    ));
                }
            }
        };

        let dictionary = self.dictionary;
        let object = dictionary.object(target);
        if !object.has_constructors() {
            return self.assert(arguments.is_empty(), token, diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS, || {
                format_message(diagnostic_messages::INVALID_CONSTRUCTOR_ARGUMENTS, &[&self.argument_names(arguments)])
            });
        }
        match self.matcher().matching_constructor_index(target, arguments) {
            Some(index) => {
                self.resolutions
                    .call_names
                    .insert(token, overload_name(&object.name, index));
                Ok(())
            }
            None => Err(self.halt(
                token,
                diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
                format_message(diagnostic_messages::INVALID_CONSTRUCTOR_ARGUMENTS, &[&self.argument_names(arguments)]),
            )),
        }
    }

    /// Call a value of type `callee`.
    fn call_value(
        &self,
        callee: &TypeConstraint,
        name: &str,
        arguments: &[TypeConstraint],
        token: TokenId,
    ) -> ValidationResult<TypeConstraint> {
        let callee = self.dictionary.resolve(callee);
        if callee.is_dynamic() {
            return Ok(TypeConstraint::dynamic());
        }
        let Some(function) = callee.definition.as_function() else {
            return Err(self.not_a_function(name, token));
        };
        let function = self.dictionary.function(function);
        if !self.matcher().accepts_arguments(function, arguments) {
            return Err(self.invalid_arguments(name, arguments, token));
        }
        Ok(self.dictionary.resolve(&function.return_type))
    }

    fn invalid_arguments(&self, name: &str, arguments: &[TypeConstraint], token: TokenId) -> crate::context::ValidationHalt {
        self.halt(
            token,
            diagnostic_codes::INVALID_FUNCTION_ARGUMENTS,
            format_message(
                diagnostic_messages::INVALID_FUNCTION_ARGUMENTS,
                &[name, &self.argument_names(arguments)],
            ),
        )
    }

    fn not_a_function(&self, name: &str, token: TokenId) -> crate::context::ValidationHalt {
        self.halt(
            token,
            diagnostic_codes::NOT_A_FUNCTION,
            format_message(diagnostic_messages::NOT_A_FUNCTION, &[name]),
        )
    }

    // =========================================================================
    // Property chains
    // =========================================================================

    pub fn chain_type(&mut self, chain: &PropertyChain) -> ValidationResult<TypeConstraint> {
        self.walk_chain(chain).map(|end| end.constraint)
    }

    pub(crate) fn walk_chain(&mut self, chain: &PropertyChain) -> ValidationResult<ChainEnd<'a>> {
        let (mut constraint, consumed) = self.chain_head(chain)?;
        let mut member = None;

        for property in &chain.properties[consumed..] {
            member = None;
            if self.dictionary.resolve(&constraint).is_dynamic() {
                self.validate_dynamic_property(property)?;
                continue;
            }
            constraint = match property {
                Property::Reference(reference) => {
                    let found = self.member_hop(&constraint, &reference.name, reference.token)?;
                    member = found.member;
                    found.constraint
                }
                Property::Call(call) => {
                    let arguments = self.argument_types(&call.arguments)?;
                    match call.name.as_deref() {
                        Some(name) => self.method_hop(&constraint, name, &arguments, call.token)?,
                        None => self.call_value(&constraint, "<anonymous>", &arguments, call.token)?,
                    }
                }
                Property::Index(index) => self.index_type(&constraint, index)?,
                Property::Type(ty) => self.resolve_type(ty),
                Property::Head(node) => self.node_type(node)?,
            };
        }

        Ok(ChainEnd { constraint, member })
    }

    /// Arguments and indexes are still validated after the chain became
    /// dynamic.
    fn validate_dynamic_property(&mut self, property: &Property) -> ValidationResult<()> {
        match property {
            Property::Call(call) => {
                self.argument_types(&call.arguments)?;
            }
            Property::Index(index) => {
                self.statement_type(index)?;
            }
            Property::Reference(_) | Property::Type(_) | Property::Head(_) => {}
        }
        Ok(())
    }

    /// The value a chain starts from and how many properties it used. A
    /// run of unknown names is tried as a namespaced type, longest first.
    fn chain_head(&mut self, chain: &PropertyChain) -> ValidationResult<(TypeConstraint, usize)> {
        let Some(first) = chain.properties.first() else {
            return Err(self.halt(
                chain.token,
                diagnostic_codes::INVALID_EXPRESSION,
                diagnostic_messages::INVALID_EXPRESSION.to_string(),
            ));
        };

        let reference = match first {
            Property::Reference(reference) => reference,
            Property::Call(call) => return Ok((self.function_call_type(call)?, 1)),
            Property::Head(node) => return Ok((self.node_type(node)?, 1)),
            Property::Type(ty) => return Ok((self.resolve_type(ty), 1)),
            Property::Index(index) => {
                return Err(self.halt(
                    index.token,
                    diagnostic_codes::INVALID_EXPRESSION,
                    diagnostic_messages::INVALID_EXPRESSION.to_string(),
                ));
            }
        };

        let is_value = matches!(reference.name.as_str(), "this" | "super")
            || self.scope.get_scoped_reference(&reference.name).is_some()
            || self.visible_member(&reference.name).is_some();
        if is_value {
            return Ok((self.reference_type(reference)?, 1));
        }

        let names: Vec<String> = chain
            .properties
            .iter()
            .map_while(|property| match property {
                Property::Reference(reference) => Some(reference.name.clone()),
                _ => None,
            })
            .collect();
        let dictionary = self.dictionary;
        for length in (1..=names.len()).rev() {
            let candidates = self.namespace.candidates(&self.namespace_stack, &names[..length]);
            if let Some(symbol) = dictionary.lookup_first(&candidates) {
                return Ok((dictionary.resolve(&symbol.constraint), length));
            }
        }

        if self.is_statically_imported(&reference.name) {
            return Ok((TypeConstraint::dynamic(), 1));
        }
        Ok((self.unknown_identifier(&reference.name, reference.token), 1))
    }

    /// The object whose members a value of type `receiver` exposes.
    fn receiver_object(&self, receiver: &TypeConstraint, name: &str, token: TokenId) -> ValidationResult<ObjectId> {
        let object = match &receiver.definition {
            TypeDefinition::Object(id) => Some(*id),
            TypeDefinition::Simple(simple) => self.natives.boxed_object(*simple),
            TypeDefinition::Array(_) => {
                return Err(self.halt(
                    token,
                    diagnostic_codes::MEMBER_NOT_FOUND,
                    format_message(diagnostic_messages::MEMBER_NOT_FOUND, &[name, &self.type_name(receiver)]),
                ));
            }
            TypeDefinition::Function(_) | TypeDefinition::Unresolved(_) => None,
        };
        object.ok_or_else(|| {
            self.halt(
                token,
                diagnostic_codes::TYPE_HAS_NO_PROPERTIES,
                format_message(diagnostic_messages::TYPE_HAS_NO_PROPERTIES, &[&self.type_name(receiver)]),
            )
        })
    }

    fn member_hop(&mut self, receiver: &TypeConstraint, name: &str, token: TokenId) -> ValidationResult<ChainEnd<'a>> {
        let receiver = self.dictionary.resolve(receiver);
        if receiver.definition.as_array().is_some() && name == "length" {
            return Ok(ChainEnd {
                constraint: self.natives.number.clone(),
                member: None,
            });
        }
        let object = self.receiver_object(&receiver, name, token)?;
        let dictionary = self.dictionary;
        let Some(member) = dictionary.object_member(object, name) else {
            return Err(self.halt(
                token,
                diagnostic_codes::MEMBER_NOT_FOUND,
                format_message(diagnostic_messages::MEMBER_NOT_FOUND, &[name, &self.type_name(&receiver)]),
            ));
        };
        self.check_access(member, token)?;
        if receiver.is_original {
            self.check_instance_access(member, token)?;
        }
        Ok(ChainEnd {
            constraint: dictionary.resolve(&member.constraint),
            member: Some(member),
        })
    }

    fn method_hop(
        &mut self,
        receiver: &TypeConstraint,
        name: &str,
        arguments: &[TypeConstraint],
        token: TokenId,
    ) -> ValidationResult<TypeConstraint> {
        let receiver = self.dictionary.resolve(receiver);
        let object = self.receiver_object(&receiver, name, token)?;
        match self.matcher().matching_method(object, name, arguments) {
            MethodLookup::Found(found) => {
                self.check_access(found.member, token)?;
                if receiver.is_original {
                    self.check_instance_access(found.member, token)?;
                }
                if found.name != name {
                    self.resolutions.call_names.insert(token, found.name);
                }
                Ok(self.dictionary.resolve(&found.return_type))
            }
            MethodLookup::InvalidArguments => Err(self.invalid_arguments(name, arguments, token)),
            MethodLookup::NotAFunction(_) => Err(self.not_a_function(name, token)),
            MethodLookup::Missing => Err(self.halt(
                token,
                diagnostic_codes::MEMBER_NOT_FOUND,
                format_message(diagnostic_messages::MEMBER_NOT_FOUND, &[name, &self.type_name(&receiver)]),
            )),
        }
    }

    fn index_type(&mut self, receiver: &TypeConstraint, index: &Statement) -> ValidationResult<TypeConstraint> {
        let index_type = self.statement_type(index)?;
        let number = self.natives.number.clone();
        self.assert(self.matches(&index_type, &number), index.token, diagnostic_codes::INVALID_ARRAY_INDEX_TYPE, || {
            format_message(diagnostic_messages::INVALID_ARRAY_INDEX_TYPE, &[&self.type_name(&index_type)])
        })?;

        let receiver = self.dictionary.resolve(receiver);
        match receiver.definition.as_array() {
            Some(array) => Ok(self.dictionary.resolve(&array.element)),
            None => Err(self.halt(
                index.token,
                diagnostic_codes::INVALID_EXPRESSION,
                diagnostic_messages::INVALID_EXPRESSION.to_string(),
            )),
        }
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    pub fn instantiation_type(&mut self, instantiation: &Instantiation) -> ValidationResult<TypeConstraint> {
        let token = instantiation.token;
        let constructed = self.resolve_type(&instantiation.constructor);

        if let Some(size) = &instantiation.array_allocation_size {
            let size_type = self.statement_type(size)?;
            let number = self.natives.number.clone();
            self.check_assignable(&size_type, &number, size.token);
            return Ok(TypeConstraint::array_of(constructed));
        }

        if let Some(literal) = &instantiation.array_literal {
            let element = match constructed.definition.as_array() {
                Some(array) => self.dictionary.resolve(&array.element),
                None => TypeConstraint::dynamic(),
            };
            self.check_array_elements(literal, &element)?;
            return Ok(constructed);
        }

        let arguments = self.argument_types(&instantiation.arguments)?;
        let Some(id) = constructed.definition.as_object() else {
            if let Some(body) = &instantiation.anonymous_object_body {
                let name = instantiation.constructor.name().to_string();
                self.validate_object_body(body, None, &name);
            }
            return Ok(constructed);
        };

        let dictionary = self.dictionary;
        let object = dictionary.object(id);
        let is_anonymous = instantiation.anonymous_object_body.is_some();
        let is_own_constant = self.objects.is_inside(id) && !object.requires_implementation;
        self.assert(
            object.is_constructable || is_anonymous || is_own_constant,
            token,
            diagnostic_codes::NOT_CONSTRUCTABLE,
            || format_message(diagnostic_messages::NOT_CONSTRUCTABLE, &[&object.name]),
        )?;

        if object.has_constructors() {
            match self.matcher().matching_constructor_index(id, &arguments) {
                Some(index) => {
                    self.resolutions.constructor_indices.insert(token, index);
                }
                None => {
                    return Err(self.halt(
                        token,
                        diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
                        format_message(
                            diagnostic_messages::INVALID_CONSTRUCTOR_ARGUMENTS,
                            &[&self.argument_names(&arguments)],
                        ),
                    ));
                }
            }
        } else {
            self.assert(arguments.is_empty(), token, diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS, || {
                format_message(diagnostic_messages::INVALID_CONSTRUCTOR_ARGUMENTS, &[&self.argument_names(&arguments)])
            })?;
        }

        if let Some(body) = &instantiation.anonymous_object_body {
            self.validate_object_body(body, Some(id), &object.name);
        }
        Ok(TypeConstraint::new(TypeDefinition::Object(id)))
    }
}

#[cfg(test)]
#[path = "../tests/access_tests.rs"]
mod access_tests;
