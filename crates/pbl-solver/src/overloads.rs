//! Overload and constructor selection.
//!
//! Candidates are tried in declaration order and the first whose
//! parameters accept the arguments is chosen.

use crate::relations::TypeMatcher;
use pbl_binder::{FunctionType, ObjectId, ObjectMember, TypeConstraint, TypeDefinition};

/// A method chosen for a call.
#[derive(Clone, Debug)]
pub struct MethodMatch<'d> {
    /// The name the method is stored under, `name_N` for overloads.
    pub name: String,
    pub member: &'d ObjectMember,
    pub return_type: TypeConstraint,
}

#[derive(Clone, Debug)]
pub enum MethodLookup<'d> {
    Found(MethodMatch<'d>),
    /// A method of that name exists but no signature accepts the arguments.
    InvalidArguments,
    /// A member of that name exists but cannot be called.
    NotAFunction(&'d ObjectMember),
    Missing,
}

impl<'d> TypeMatcher<'d> {
    /// Whether `function` can be called with `arguments`. A variadic
    /// function also takes its trailing arguments one element at a time.
    #[must_use]
    pub fn accepts_arguments(&self, function: &FunctionType, arguments: &[TypeConstraint]) -> bool {
        if !function.is_variadic {
            return self.all_match(arguments, &function.parameters);
        }
        let Some((rest, fixed)) = function.parameters.split_last() else {
            return arguments.is_empty();
        };
        if arguments.len() < fixed.len() || !self.all_match(&arguments[..fixed.len()], fixed) {
            return false;
        }

        let trailing = &arguments[fixed.len()..];
        if trailing.len() == 1 && self.type_constraint_matches(&trailing[0], rest) {
            return true;
        }
        let resolved = self.dictionary().resolve(rest);
        let element = resolved
            .definition
            .as_array()
            .map_or(resolved.clone(), |array| array.element.clone());
        trailing
            .iter()
            .all(|argument| self.type_constraint_matches(argument, &element))
    }

    /// The method `name` of `object` (or its supertypes) to call with
    /// `arguments`.
    #[must_use]
    pub fn matching_method(&self, object: ObjectId, name: &str, arguments: &[TypeConstraint]) -> MethodLookup<'d> {
        let dictionary = self.dictionary();

        if let Some(overloads) = dictionary.object_overloads(object, name) {
            for stored in overloads {
                let Some(member) = dictionary.object_member(object, stored) else {
                    continue;
                };
                if let Some(found) = self.call_member(stored, member, arguments) {
                    return MethodLookup::Found(found);
                }
            }
            return MethodLookup::InvalidArguments;
        }

        let Some(member) = dictionary.object_member(object, name) else {
            return MethodLookup::Missing;
        };
        match self.call_member(name, member, arguments) {
            Some(found) => MethodLookup::Found(found),
            None if member.is_method() => MethodLookup::InvalidArguments,
            None => MethodLookup::NotAFunction(member),
        }
    }

    /// `member` called with `arguments`, if the call is valid.
    fn call_member(&self, name: &str, member: &'d ObjectMember, arguments: &[TypeConstraint]) -> Option<MethodMatch<'d>> {
        let constraint = self.dictionary().resolve(&member.constraint);
        let return_type = match &constraint.definition {
            TypeDefinition::Function(id) => {
                let function = self.dictionary().function(*id);
                if !self.accepts_arguments(function, arguments) {
                    return None;
                }
                function.return_type.clone()
            }
            _ if constraint.is_dynamic() => TypeConstraint::dynamic(),
            _ => return None,
        };
        Some(MethodMatch {
            name: name.to_string(),
            member,
            return_type,
        })
    }

    /// Index of the first constructor of `object` accepting `arguments`.
    #[must_use]
    pub fn matching_constructor_index(&self, object: ObjectId, arguments: &[TypeConstraint]) -> Option<usize> {
        let dictionary = self.dictionary();
        dictionary
            .object(object)
            .constructors
            .iter()
            .position(|constructor| self.accepts_arguments(dictionary.function(*constructor), arguments))
    }
}

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod overload_tests;
