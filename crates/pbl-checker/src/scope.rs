//! Block-scoped local references.

use pbl_binder::TypeConstraint;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A local variable, parameter or caught exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedReference {
    pub name: String,
    pub constraint: TypeConstraint,
    /// Declared `final` with a value; assigning again is an error.
    pub is_constant: bool,
}

impl ScopedReference {
    #[must_use]
    pub fn new(name: impl Into<String>, constraint: TypeConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            is_constant: false,
        }
    }

    #[must_use]
    pub const fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }
}

/// A stack of scopes. Lookups walk from the innermost scope outward; an
/// exited scope is dropped entirely.
#[derive(Clone, Debug, Default)]
pub struct ScopeManager {
    scopes: SmallVec<[FxHashMap<String, ScopedReference>; 8]>,
}

impl ScopeManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn exit(&mut self) {
        self.scopes.pop();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Add `reference` to the innermost scope, shadowing outer ones. Does
    /// nothing outside of any scope.
    pub fn add_to_scope(&mut self, reference: ScopedReference) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(reference.name.clone(), reference);
        }
    }

    #[must_use]
    pub fn get_scoped_reference(&self, name: &str) -> Option<&ScopedReference> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
