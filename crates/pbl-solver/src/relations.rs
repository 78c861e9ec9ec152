//! Type matching.
//!
//! Matching is one-way substitutability: a source matches a comparison when
//! a value of the source type may stand where the comparison type is
//! expected. Rules, tried in order:
//!
//! 1. identical constraints match, as does a value of the same definition
//! 2. a dynamic comparison or source matches anything
//! 3. `null` matches any type that is not a primitive or void
//! 4. simple types match when their tags are equal
//! 5. different kinds of definitions, or an original source against a
//!    value comparison, never match
//! 6. objects match when the source subtypes the comparison
//! 7. functions match on return type and pairwise parameters
//! 8. arrays match when their elements match

use pbl_binder::{
    FunctionId, ObjectId, SimpleType, SymbolDictionary, TypeConstraint, TypeDefinition,
};
use tracing::trace;

#[derive(Clone, Copy)]
pub struct TypeMatcher<'d> {
    dictionary: &'d SymbolDictionary,
}

impl<'d> TypeMatcher<'d> {
    #[must_use]
    pub const fn new(dictionary: &'d SymbolDictionary) -> Self {
        Self { dictionary }
    }

    #[must_use]
    pub const fn dictionary(&self) -> &'d SymbolDictionary {
        self.dictionary
    }

    /// Whether `source` may be used where `comparison` is expected.
    #[must_use]
    pub fn type_constraint_matches(&self, source: &TypeConstraint, comparison: &TypeConstraint) -> bool {
        let source = self.dictionary.resolve(source);
        let comparison = self.dictionary.resolve(comparison);
        let matches = self.resolved_matches(&source, &comparison);
        trace!(
            source = %self.dictionary.type_name(&source),
            comparison = %self.dictionary.type_name(&comparison),
            matches,
            "type match"
        );
        matches
    }

    fn resolved_matches(&self, source: &TypeConstraint, comparison: &TypeConstraint) -> bool {
        if source.definition == comparison.definition {
            return !source.is_original || comparison.is_original;
        }

        if comparison.is_dynamic() || source.is_dynamic() {
            return true;
        }

        if source.is_simple(SimpleType::Null) {
            return !matches!(
                comparison.definition,
                TypeDefinition::Simple(SimpleType::Number | SimpleType::Boolean | SimpleType::Void)
            );
        }

        if let (TypeDefinition::Simple(left), TypeDefinition::Simple(right)) =
            (&source.definition, &comparison.definition)
        {
            return left == right;
        }

        if !source.definition.same_class(&comparison.definition)
            || (source.is_original && !comparison.is_original)
        {
            return false;
        }

        match (&source.definition, &comparison.definition) {
            (TypeDefinition::Object(source), TypeDefinition::Object(comparison)) => {
                self.is_subtype_of(*source, *comparison)
            }
            (TypeDefinition::Function(source), TypeDefinition::Function(comparison)) => {
                self.function_matches(*source, *comparison)
            }
            (TypeDefinition::Array(source), TypeDefinition::Array(comparison)) => {
                self.type_constraint_matches(&source.element, &comparison.element)
            }
            _ => false,
        }
    }

    /// Pairwise match of equally long lists.
    #[must_use]
    pub fn all_match(&self, sources: &[TypeConstraint], comparisons: &[TypeConstraint]) -> bool {
        sources.len() == comparisons.len()
            && sources
                .iter()
                .zip(comparisons)
                .all(|(source, comparison)| self.type_constraint_matches(source, comparison))
    }

    #[must_use]
    pub fn function_matches(&self, source: FunctionId, comparison: FunctionId) -> bool {
        let source = self.dictionary.function(source);
        let comparison = self.dictionary.function(comparison);
        self.type_constraint_matches(&source.return_type, &comparison.return_type)
            && self.all_match(&source.parameters, &comparison.parameters)
    }

    /// Whether `source` is `comparison` or has it among its transitive
    /// supertypes.
    #[must_use]
    pub fn is_subtype_of(&self, source: ObjectId, comparison: ObjectId) -> bool {
        source == comparison || self.dictionary.all_supertypes(source).contains(&comparison)
    }
}

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod relations_tests;
