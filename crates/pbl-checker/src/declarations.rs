//! File-level and declaration validators: imports, classes, interfaces,
//! methods and fields.

use crate::context::{ValidationResult, ValidatorContext, ValidatorFlags};
use crate::scope::ScopedReference;
use pbl_binder::{ObjectId, ObjectMember as ResolvedMember, SimpleType, TypeConstraint, TypeDefinition};
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::format_message;
use pbl_parser::JavaSyntaxTree;
use pbl_parser::syntax::{
    Block, Class, Field, Import, InstructionKind, Interface, Method, ObjectBody, ObjectMember, StatementNode,
    TopLevelNode,
};
use rustc_hash::FxHashSet;

/// The object whose members are being validated.
#[derive(Clone, Copy, Debug)]
pub struct Owner<'n> {
    pub name: &'n str,
    pub is_abstract: bool,
    pub is_interface: bool,
}

impl ValidatorContext<'_> {
    pub fn validate_file(&mut self, tree: &JavaSyntaxTree) {
        if tree.package.is_none() {
            self.report_file(
                diagnostic_codes::MISSING_PACKAGE,
                diagnostic_messages::MISSING_PACKAGE.to_string(),
            );
        }

        for node in &tree.nodes {
            match node {
                TopLevelNode::Import(import) => {
                    self.validate_node_with(|ctx| ctx.validate_import(import));
                }
                TopLevelNode::Class(class) => self.validate_class(class),
                TopLevelNode::Interface(interface) => self.validate_interface(interface),
            }
        }
    }

    /// Imported names must name types.
    fn validate_import(&mut self, import: &Import) -> ValidationResult<()> {
        for name in import.default_import.iter().chain(&import.non_default_imports) {
            let is_type_name = name.chars().next().is_some_and(|first| first.is_ascii_uppercase());
            self.assert(is_type_name, import.token, diagnostic_codes::INVALID_IMPORT_NAME, || {
                format_message(diagnostic_messages::INVALID_IMPORT_NAME, &[name])
            })?;
        }
        Ok(())
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn validate_class(&mut self, class: &Class) {
        let Some(id) = self.declared_object(&class.name) else {
            tracing::debug!(class = %class.name, "skipping undeclared class");
            return;
        };

        self.within_object(id, &class.name, &class.generic_parameters, |ctx| {
            ctx.validate_supertypes(class);
            if !class.modifiers.is_abstract {
                ctx.validate_abstract_members(class, id);
            }

            let owner = Owner {
                name: &class.name,
                is_abstract: class.modifiers.is_abstract,
                is_interface: false,
            };
            for constructor in &class.constructors {
                ctx.validate_node_with(|ctx| ctx.validate_method(constructor, owner));
            }
            ctx.validate_members(&class.members, owner);
            for block in &class.instance_initializers {
                ctx.validate_initializer(block, false);
            }
            for block in &class.static_initializers {
                ctx.validate_initializer(block, true);
            }
        });
    }

    fn validate_supertypes(&mut self, class: &Class) {
        let dictionary = self.dictionary;
        for ty in &class.extended {
            let supertype = self.resolve_type(ty);
            if supertype.is_dynamic() {
                continue;
            }
            let parent = supertype.definition.as_object().map(|id| dictionary.object(id));
            match parent {
                Some(parent) if parent.is_class() => {
                    let parent_name = parent.name.clone();
                    self.check(parent.is_extensible, ty.token, diagnostic_codes::CLASS_CANNOT_BE_EXTENDED, || {
                        format_message(diagnostic_messages::CLASS_CANNOT_BE_EXTENDED, &[&parent_name, &class.name])
                    });
                }
                _ => self.report(
                    ty.token,
                    diagnostic_codes::CLASS_CANNOT_EXTEND_NON_CLASS,
                    format_message(diagnostic_messages::CLASS_CANNOT_EXTEND_NON_CLASS, &[&class.name, &ty.to_string()]),
                ),
            }
        }

        for ty in &class.implemented {
            let interface = self.resolve_type(ty);
            if interface.is_dynamic() {
                continue;
            }
            let is_interface = interface
                .definition
                .as_object()
                .is_some_and(|id| dictionary.object(id).is_interface());
            self.check(is_interface, ty.token, diagnostic_codes::CLASS_CANNOT_IMPLEMENT_NON_INTERFACE, || {
                format_message(
                    diagnostic_messages::CLASS_CANNOT_IMPLEMENT_NON_INTERFACE,
                    &[&class.name, &ty.to_string()],
                )
            });
        }
    }

    /// Every inherited member requiring implementation must be implemented
    /// by `id` or one of its supertypes.
    fn validate_abstract_members(&mut self, class: &Class, id: ObjectId) {
        let dictionary = self.dictionary;
        let mut seen = FxHashSet::default();
        for supertype in dictionary.all_supertypes(id) {
            let parent = dictionary.object(supertype);
            for member in parent.own_members().filter(|member| member.requires_implementation) {
                if !seen.insert(member.name.as_str()) {
                    continue;
                }
                let implemented = dictionary
                    .object_member(id, &member.name)
                    .is_some_and(|found| !found.requires_implementation);
                if !implemented {
                    let qualified = format!("{}.{}", parent.name, self.declared_name(member));
                    self.report(
                        class.token,
                        diagnostic_codes::CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER,
                        format_message(diagnostic_messages::CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER, &[&class.name, &qualified]),
                    );
                }
            }
        }
    }

    /// A member's name as written, before overload mangling.
    pub(crate) fn declared_name<'m>(&'m self, member: &'m ResolvedMember) -> &'m str {
        match &member.constraint.definition {
            TypeDefinition::Function(function) => &self.dictionary.function(*function).name,
            _ => &member.name,
        }
    }

    fn validate_members(&mut self, members: &[ObjectMember], owner: Owner<'_>) {
        for member in members {
            match member {
                ObjectMember::Field(field) => {
                    self.validate_node_with(|ctx| ctx.validate_field(field, owner));
                }
                ObjectMember::Method(method) => {
                    self.validate_node_with(|ctx| ctx.validate_method(method, owner));
                }
                ObjectMember::Class(class) => self.validate_class(class),
                ObjectMember::Interface(interface) => self.validate_interface(interface),
            }
        }
    }

    fn validate_initializer(&mut self, block: &Block, is_static: bool) {
        let set = if is_static {
            ValidatorFlags::empty()
        } else {
            ValidatorFlags::ALLOW_INSTANCE_KEYWORDS
        };
        self.with_flags(set, ValidatorFlags::all(), |ctx| ctx.validate_block(block));
    }

    /// The body of an anonymous object, validated as members of the type
    /// it instantiates.
    pub(crate) fn validate_object_body(&mut self, body: &ObjectBody, base: Option<ObjectId>, name: &str) {
        let owner = Owner {
            name,
            is_abstract: false,
            is_interface: false,
        };
        let validate = |ctx: &mut Self| {
            ctx.validate_members(&body.members, owner);
            for block in &body.instance_initializers {
                ctx.validate_initializer(block, false);
            }
        };
        match base {
            Some(id) => {
                self.objects.visit(id);
                self.with_scope(validate);
                self.objects.leave();
            }
            None => self.with_scope(validate),
        }
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    pub fn validate_interface(&mut self, interface: &Interface) {
        let Some(id) = self.declared_object(&interface.name) else {
            return;
        };
        self.within_object(id, &interface.name, &interface.generic_parameters, |ctx| {
            let owner = Owner {
                name: &interface.name,
                is_abstract: true,
                is_interface: true,
            };
            ctx.validate_members(&interface.members, owner);
        });
    }

    // =========================================================================
    // Methods
    // =========================================================================

    fn validate_method(&mut self, method: &Method, owner: Owner<'_>) -> ValidationResult<()> {
        let token = method.token;
        let name = method.name.as_str();

        if method.is_constructor {
            self.check(name == owner.name, token, diagnostic_codes::CONSTRUCTOR_NAME_MISMATCH, || {
                format_message(diagnostic_messages::CONSTRUCTOR_NAME_MISMATCH, &[name, owner.name])
            });
        }

        let is_abstract = method.modifiers.is_abstract;
        if owner.is_interface {
            self.check(!is_abstract, token, diagnostic_codes::INTERFACE_METHOD_CANNOT_BE_ABSTRACT, || {
                format_message(diagnostic_messages::INTERFACE_METHOD_CANNOT_BE_ABSTRACT, &[name])
            });
        } else if is_abstract {
            self.check(owner.is_abstract, token, diagnostic_codes::ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS, || {
                diagnostic_messages::ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS.to_string()
            });
            self.check(
                method.block.is_none(),
                token,
                diagnostic_codes::ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION,
                || format_message(diagnostic_messages::ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION, &[name]),
            );
        } else {
            self.check(method.block.is_some(), token, diagnostic_codes::METHOD_MUST_HAVE_IMPLEMENTATION, || {
                format_message(diagnostic_messages::METHOD_MUST_HAVE_IMPLEMENTATION, &[name])
            });
        }

        if let Some(block) = &method.block {
            self.validate_method_body(method, block, owner);
        }
        Ok(())
    }

    fn validate_method_body(&mut self, method: &Method, block: &Block, owner: Owner<'_>) {
        let generics_len = self.generics.len();
        self.generics
            .extend(method.generic_parameters.iter().map(|ty| ty.name().to_string()));

        let return_type = match &method.ty {
            Some(ty) if !method.is_constructor => self.resolve_type(ty),
            _ => self.natives.void.clone(),
        };
        let must_return = !return_type.is_simple(SimpleType::Void);

        let mut set = ValidatorFlags::MAY_RETURN;
        set.set(ValidatorFlags::ALLOW_INSTANCE_KEYWORDS, !method.modifiers.is_static);
        set.set(ValidatorFlags::IN_CONSTRUCTOR, method.is_constructor);
        set.set(ValidatorFlags::MUST_RETURN_VALUE, must_return);

        if method.is_constructor {
            self.check_constructor_returns(block);
        }

        let parameters: Vec<ScopedReference> = method
            .parameters
            .iter()
            .map(|parameter| {
                let mut constraint = self.resolve_type(&parameter.ty);
                if parameter.is_variadic {
                    constraint = TypeConstraint::array_of(constraint);
                }
                let reference = ScopedReference::new(&parameter.name, constraint);
                if parameter.is_final { reference.constant() } else { reference }
            })
            .collect();

        let completion = self.with_flags(set, ValidatorFlags::all(), |ctx| {
            ctx.expecting_return(return_type.clone(), |ctx| {
                ctx.with_scope(|ctx| {
                    for parameter in parameters {
                        ctx.scope.add_to_scope(parameter);
                    }
                    ctx.validate_block(block)
                })
            })
        });
        self.generics.truncate(generics_len);

        if must_return && !completion.contains(ValidatorFlags::EXITS_METHOD) {
            let qualified = format!("{}.{}", owner.name, method.name);
            let type_name = self.type_name(&return_type);
            self.report(
                method.token,
                diagnostic_codes::METHOD_MUST_RETURN_VALUE,
                format_message(diagnostic_messages::METHOD_MUST_RETURN_VALUE, &[&qualified, &type_name]),
            );
        }
    }

    /// A constructor's own block may not `return`. A returned value is
    /// reported as such when the instruction is validated.
    fn check_constructor_returns(&mut self, block: &Block) {
        for statement in &block.nodes {
            if let Some(StatementNode::Instruction(instruction)) = statement.left() {
                if instruction.kind == InstructionKind::Return && instruction.value.is_none() {
                    self.report(
                        instruction.token,
                        diagnostic_codes::CONSTRUCTOR_TOP_LEVEL_RETURN,
                        diagnostic_messages::CONSTRUCTOR_TOP_LEVEL_RETURN.to_string(),
                    );
                }
            }
        }
    }

    // =========================================================================
    // Fields
    // =========================================================================

    fn validate_field(&mut self, field: &Field, owner: Owner<'_>) -> ValidationResult<()> {
        if field.modifiers.is_abstract {
            self.check(
                owner.is_abstract && !owner.is_interface,
                field.token,
                diagnostic_codes::ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS,
                || diagnostic_messages::ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS.to_string(),
            );
            self.check(field.value.is_none(), field.token, diagnostic_codes::ABSTRACT_FIELD_CANNOT_HAVE_VALUE, || {
                diagnostic_messages::ABSTRACT_FIELD_CANNOT_HAVE_VALUE.to_string()
            });
        }

        let Some(value) = &field.value else {
            return Ok(());
        };
        let declared = self.resolve_type(&field.ty);
        let set = if field.modifiers.is_static || owner.is_interface {
            ValidatorFlags::empty()
        } else {
            ValidatorFlags::ALLOW_INSTANCE_KEYWORDS
        };
        let value_type = self.with_flags(set, ValidatorFlags::all(), |ctx| ctx.statement_type(value))?;
        self.check_assignable(&value_type, &declared, value.token);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/declarations_tests.rs"]
mod declarations_tests;
