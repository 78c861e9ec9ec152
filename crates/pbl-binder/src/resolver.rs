//! Java symbol resolution.
//!
//! Walks the declarations of one file and registers an object type per
//! class and interface, nested ones included. Type references are not
//! looked up here: each becomes a candidate list (see
//! [`FileNamespace::candidates`]) that the dictionary resolves when it is
//! first read, so the order in which files and declarations are resolved
//! does not matter.

use crate::dictionary::{Symbol, SymbolDictionary};
use crate::namespace::FileNamespace;
use crate::native::NativeTypes;
use crate::types::{
    FunctionType, ObjectCategory, ObjectId, ObjectMember, ObjectType, TypeConstraint,
    TypeDefinition, Visibility, overload_name,
};
use pbl_parser::syntax::{
    AccessModifier, Class, Interface, JavaSyntaxTree, JavaType, Method, Modifiers,
    ObjectMember as SyntaxMember, TopLevelNode,
};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Resolve every declaration in `tree` into `dictionary`, returning the
/// symbols defined.
#[tracing::instrument(level = "debug", skip_all, fields(file = %namespace.file()))]
pub fn resolve_java(
    tree: &JavaSyntaxTree,
    namespace: FileNamespace,
    dictionary: &mut SymbolDictionary,
    natives: &NativeTypes,
) -> Vec<Symbol> {
    let mut resolver = JavaResolver::new(dictionary, natives, namespace);
    for node in &tree.nodes {
        match node {
            TopLevelNode::Class(class) => {
                resolver.resolve_class(class);
            }
            TopLevelNode::Interface(interface) => {
                resolver.resolve_interface(interface);
            }
            TopLevelNode::Import(_) => {}
        }
    }
    debug!(symbols = resolver.defined.len(), "resolved file");
    resolver.defined
}

/// The constraint a type reference written inside `enclosing` denotes.
///
/// Built-in names map to native constraints and generic parameters to
/// dynamic; anything else is deferred as a candidate list.
#[must_use]
pub fn resolve_java_type(
    natives: &NativeTypes,
    namespace: &FileNamespace,
    enclosing: &[String],
    generics: &[String],
    ty: &JavaType,
) -> TypeConstraint {
    let name = ty.name();
    let base = if ty.is_namespaced() {
        TypeConstraint::unresolved(namespace.candidates(enclosing, &ty.namespace_chain))
    } else if generics.iter().any(|generic| generic == name) {
        natives.dynamic.clone()
    } else if let Some(native) = natives.java_type(name) {
        native
    } else {
        TypeConstraint::unresolved(namespace.candidates(enclosing, &ty.namespace_chain))
    };

    (0..ty.array_dimensions).fold(base, |element, _| TypeConstraint::array_of(element))
}

/// Storage names of `methods`, in order: the plain name, or
/// [`overload_name`] when several methods share it.
#[must_use]
pub fn stored_method_names<'m>(methods: impl IntoIterator<Item = &'m Method> + Clone) -> Vec<String> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for method in methods.clone() {
        *counts.entry(method.name.as_str()).or_default() += 1;
    }

    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    methods
        .into_iter()
        .map(|method| {
            let name = method.name.as_str();
            if counts.get(name).copied().unwrap_or_default() < 2 {
                return name.to_string();
            }
            let index = seen.entry(name).or_default();
            let stored = overload_name(name, *index);
            *index += 1;
            stored
        })
        .collect()
}

#[must_use]
pub const fn visibility_of(access: AccessModifier) -> Visibility {
    match access {
        AccessModifier::Public | AccessModifier::Package => Visibility::All,
        AccessModifier::Protected => Visibility::Derived,
        AccessModifier::Private => Visibility::SelfOnly,
    }
}

pub struct JavaResolver<'a> {
    dictionary: &'a mut SymbolDictionary,
    natives: &'a NativeTypes,
    namespace: FileNamespace,
    namespace_stack: Vec<String>,
    generics: Vec<String>,
    defined: Vec<Symbol>,
}

impl<'a> JavaResolver<'a> {
    pub fn new(dictionary: &'a mut SymbolDictionary, natives: &'a NativeTypes, namespace: FileNamespace) -> Self {
        Self {
            dictionary,
            natives,
            namespace,
            namespace_stack: Vec::new(),
            generics: Vec::new(),
            defined: Vec::new(),
        }
    }

    fn define(&mut self, name: &str, id: ObjectId) {
        let identifier = self.namespace.identifier(&self.namespace_stack, name);
        let symbol = Symbol::new(identifier, name, TypeConstraint::original(TypeDefinition::Object(id)));
        self.dictionary.add_symbol(symbol.clone());
        self.defined.push(symbol);
    }

    fn type_constraint(&self, ty: &JavaType) -> TypeConstraint {
        resolve_java_type(self.natives, &self.namespace, &self.namespace_stack, &self.generics, ty)
    }

    pub fn resolve_class(&mut self, class: &Class) -> ObjectId {
        let mut object = ObjectType::new(&class.name, ObjectCategory::Class);
        object.is_extensible = !class.modifiers.is_final && !class.is_enum;
        object.requires_implementation = class.modifiers.is_abstract;
        object.is_constructable = !class.modifiers.is_abstract && !class.is_enum;
        object.generic_parameters.clone_from(&class.generic_parameters);
        let id = self.dictionary.add_object(object);
        self.define(&class.name, id);

        let generics_len = self.generics.len();
        self.generics.extend(class.generic_parameters.iter().cloned());
        self.namespace_stack.push(class.name.clone());

        for ty in class.extended.iter().chain(&class.implemented) {
            let supertype = self.type_constraint(ty);
            self.dictionary.object_mut(id).add_supertype(supertype);
        }

        let instance = TypeConstraint::new(TypeDefinition::Object(id));
        for constructor in &class.constructors {
            let function = self.function_type(constructor, instance.clone());
            let function = self.dictionary.add_function(function);
            self.dictionary.object_mut(id).add_constructor(function);
        }

        self.resolve_members(id, &class.members, false);

        self.namespace_stack.pop();
        self.generics.truncate(generics_len);
        id
    }

    pub fn resolve_interface(&mut self, interface: &Interface) -> ObjectId {
        let mut object = ObjectType::new(&interface.name, ObjectCategory::Interface);
        object.generic_parameters.clone_from(&interface.generic_parameters);
        let id = self.dictionary.add_object(object);
        self.define(&interface.name, id);

        let generics_len = self.generics.len();
        self.generics.extend(interface.generic_parameters.iter().cloned());
        self.namespace_stack.push(interface.name.clone());

        for ty in &interface.extended {
            let supertype = self.type_constraint(ty);
            self.dictionary.object_mut(id).add_supertype(supertype);
        }
        self.resolve_members(id, &interface.members, true);

        self.namespace_stack.pop();
        self.generics.truncate(generics_len);
        id
    }

    fn resolve_members(&mut self, id: ObjectId, members: &[SyntaxMember], in_interface: bool) {
        for member in members {
            match member {
                SyntaxMember::Field(field) => {
                    let constraint = self.type_constraint(&field.ty);
                    let mut resolved = ObjectMember::new(&field.name, constraint, id);
                    apply_modifiers(&mut resolved, &field.modifiers);
                    if in_interface {
                        resolved.is_static = true;
                        resolved.is_constant = true;
                    }
                    self.dictionary.object_mut(id).add_member(resolved);
                }
                SyntaxMember::Method(method) => {
                    let generics_len = self.generics.len();
                    self.generics
                        .extend(method.generic_parameters.iter().map(|ty| ty.name().to_string()));
                    let return_type = method
                        .ty
                        .as_ref()
                        .map_or_else(|| self.natives.void.clone(), |ty| self.type_constraint(ty));
                    let function = self.function_type(method, return_type);
                    self.generics.truncate(generics_len);

                    let function = self.dictionary.add_function(function);
                    let constraint = TypeConstraint::new(TypeDefinition::Function(function));
                    let mut resolved = ObjectMember::new(&method.name, constraint, id);
                    apply_modifiers(&mut resolved, &method.modifiers);
                    resolved.requires_implementation =
                        method.modifiers.is_abstract || (in_interface && method.block.is_none());
                    self.dictionary.object_mut(id).add_method(resolved);
                }
                SyntaxMember::Class(class) => {
                    let nested = self.resolve_class(class);
                    self.add_nested(id, &class.name, nested, &class.modifiers);
                }
                SyntaxMember::Interface(interface) => {
                    let nested = self.resolve_interface(interface);
                    self.add_nested(id, &interface.name, nested, &interface.modifiers);
                }
            }
        }
    }

    /// Nested objects are static members of their enclosing object.
    fn add_nested(&mut self, parent: ObjectId, name: &str, nested: ObjectId, modifiers: &Modifiers) {
        let constraint = TypeConstraint::original(TypeDefinition::Object(nested));
        let mut member = ObjectMember::new(name, constraint, parent);
        member.visibility = visibility_of(modifiers.access);
        member.is_static = true;
        member.is_constant = true;
        self.dictionary.object_mut(parent).add_member(member);
    }

    fn function_type(&self, method: &Method, return_type: TypeConstraint) -> FunctionType {
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| {
                let constraint = self.type_constraint(&parameter.ty);
                if parameter.is_variadic {
                    TypeConstraint::array_of(constraint)
                } else {
                    constraint
                }
            })
            .collect();

        FunctionType {
            name: method.name.clone(),
            generic_parameters: method
                .generic_parameters
                .iter()
                .map(|ty| ty.name().to_string())
                .collect(),
            parameters,
            return_type,
            is_variadic: method.parameters.last().is_some_and(|parameter| parameter.is_variadic),
        }
    }
}

fn apply_modifiers(member: &mut ObjectMember, modifiers: &Modifiers) {
    member.visibility = visibility_of(modifiers.access);
    member.is_static = modifiers.is_static;
    member.is_constant = modifiers.is_final;
    member.requires_implementation = modifiers.is_abstract;
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
