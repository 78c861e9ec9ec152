//! Symbol dictionary.
//!
//! One dictionary is shared by every file of a compilation. It owns the
//! object and function arenas and maps symbol identifiers to symbols.
//! Symbols are only ever added. Deferred references resolve to the first
//! defined candidate, or to the dynamic type when none is defined, so
//! forward references and out-of-project imports never fail resolution.

use crate::types::{
    FunctionId, FunctionType, ObjectId, ObjectMember, ObjectType, SimpleType, TypeConstraint,
    TypeDefinition,
};
use pbl_common::limits::{MAX_SUPERTYPE_DEPTH, MAX_TYPE_RESOLUTION_DEPTH};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use tracing::trace;

/// A named, typed entity addressable by a namespaced identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// `file:Outer.Inner`, or a bare name for host globals.
    pub identifier: String,
    pub name: String,
    pub constraint: TypeConstraint,
}

impl Symbol {
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, constraint: TypeConstraint) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            constraint,
        }
    }
}

#[derive(Debug)]
pub struct SymbolDictionary {
    symbols: FxHashMap<String, Symbol>,
    objects: Vec<ObjectType>,
    functions: Vec<FunctionType>,
    dynamic_symbol: Symbol,
    /// Candidate lists already resolved. Cleared whenever a symbol is
    /// added, since a new symbol can change the first defined candidate.
    resolutions: RefCell<FxHashMap<Vec<String>, TypeDefinition>>,
}

impl Default for SymbolDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: FxHashMap::default(),
            objects: Vec::new(),
            functions: Vec::new(),
            dynamic_symbol: Symbol::new("", "dynamic", TypeConstraint::dynamic()),
            resolutions: RefCell::new(FxHashMap::default()),
        }
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    pub fn add_symbol(&mut self, symbol: Symbol) {
        trace!(identifier = %symbol.identifier, "add symbol");
        self.resolutions.get_mut().clear();
        self.symbols.insert(symbol.identifier.clone(), symbol);
    }

    #[must_use]
    pub fn get_symbol(&self, identifier: &str) -> Option<&Symbol> {
        self.symbols.get(identifier)
    }

    #[must_use]
    pub fn has_symbol(&self, identifier: &str) -> bool {
        self.symbols.contains_key(identifier)
    }

    /// The first candidate that names a defined symbol.
    #[must_use]
    pub fn lookup_first(&self, candidates: &[String]) -> Option<&Symbol> {
        candidates.iter().find_map(|identifier| self.symbols.get(identifier))
    }

    /// Like [`lookup_first`](Self::lookup_first), falling back to a dynamic
    /// symbol.
    #[must_use]
    pub fn get_first_defined_symbol(&self, candidates: &[String]) -> &Symbol {
        self.lookup_first(candidates).unwrap_or(&self.dynamic_symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    // =========================================================================
    // Arenas
    // =========================================================================

    pub fn add_object(&mut self, object: ObjectType) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> &ObjectType {
        &self.objects[id.0 as usize]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut ObjectType {
        &mut self.objects[id.0 as usize]
    }

    pub fn add_function(&mut self, function: FunctionType) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    #[must_use]
    pub fn function(&self, id: FunctionId) -> &FunctionType {
        &self.functions[id.0 as usize]
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The constraint with any deferred reference replaced by what it
    /// currently resolves to. Unresolvable references become dynamic.
    #[must_use]
    pub fn resolve(&self, constraint: &TypeConstraint) -> TypeConstraint {
        match &constraint.definition {
            TypeDefinition::Unresolved(candidates) => TypeConstraint {
                definition: self.resolve_candidates(candidates),
                is_original: constraint.is_original,
            },
            _ => constraint.clone(),
        }
    }

    fn resolve_candidates(&self, candidates: &[String]) -> TypeDefinition {
        if let Some(definition) = self.resolutions.borrow().get(candidates) {
            return definition.clone();
        }
        let definition = self.resolve_candidates_at(candidates, 0);
        self.resolutions
            .borrow_mut()
            .insert(candidates.to_vec(), definition.clone());
        definition
    }

    fn resolve_candidates_at(&self, candidates: &[String], depth: u32) -> TypeDefinition {
        if depth >= MAX_TYPE_RESOLUTION_DEPTH {
            return TypeDefinition::Simple(SimpleType::Dynamic);
        }
        match self.lookup_first(candidates) {
            Some(symbol) => match &symbol.constraint.definition {
                TypeDefinition::Unresolved(next) => self.resolve_candidates_at(next, depth + 1),
                definition => definition.clone(),
            },
            None => {
                trace!(?candidates, "no candidate defined, using dynamic");
                TypeDefinition::Simple(SimpleType::Dynamic)
            }
        }
    }

    /// Directly declared supertypes of an object which resolve to objects.
    #[must_use]
    pub fn object_supertypes(&self, id: ObjectId) -> Vec<ObjectId> {
        self.object(id)
            .supertypes
            .iter()
            .filter_map(|supertype| self.resolve(supertype).definition.as_object())
            .collect()
    }

    /// Every supertype reachable from `id`, nearest first, without `id`.
    #[must_use]
    pub fn all_supertypes(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut visited = FxHashSet::default();
        visited.insert(id);
        let mut ordered = Vec::new();
        let mut frontier = vec![id];

        for _ in 0..MAX_SUPERTYPE_DEPTH {
            let mut next = Vec::new();
            for current in frontier {
                for supertype in self.object_supertypes(current) {
                    if visited.insert(supertype) {
                        ordered.push(supertype);
                        next.push(supertype);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        ordered
    }

    /// A member of `id` or of the nearest supertype declaring it.
    #[must_use]
    pub fn object_member(&self, id: ObjectId, name: &str) -> Option<&ObjectMember> {
        self.object(id).own_member(name).or_else(|| {
            self.all_supertypes(id)
                .into_iter()
                .find_map(|supertype| self.object(supertype).own_member(name))
        })
    }

    /// The object declaring overloads of `name`, searching `id` then its
    /// supertypes, with the overloads' stored names.
    #[must_use]
    pub fn object_overloads(&self, id: ObjectId, name: &str) -> Option<&[String]> {
        std::iter::once(id)
            .chain(self.all_supertypes(id))
            .find_map(|object| self.object(object).overloads(name))
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Human-readable name of a constraint, as used in messages.
    #[must_use]
    pub fn type_name(&self, constraint: &TypeConstraint) -> String {
        self.definition_name(&self.resolve(constraint).definition)
    }

    fn definition_name(&self, definition: &TypeDefinition) -> String {
        match definition {
            TypeDefinition::Simple(simple) => simple.name().to_string(),
            TypeDefinition::Object(id) => self.object(*id).name.clone(),
            TypeDefinition::Array(array) => format!("{}[]", self.type_name(&array.element)),
            TypeDefinition::Function(id) => {
                let function = self.function(*id);
                let parameters: Vec<String> = function
                    .parameters
                    .iter()
                    .map(|parameter| self.type_name(parameter))
                    .collect();
                format!("({}) => {}", parameters.join(", "), self.type_name(&function.return_type))
            }
            TypeDefinition::Unresolved(candidates) => {
                self.definition_name(&self.resolve_candidates(candidates))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/dictionary_tests.rs"]
mod dictionary_tests;
