//! Per-file validation state.
//!
//! One [`ValidatorContext`] is created for each file and threaded by `&mut`
//! through every validator. It owns the scope manager, the object-visitor
//! stack, the expected-return stack, the namespace stack and the collected
//! diagnostics, and borrows the shared dictionary read-only.

use crate::scope::ScopeManager;
use crate::visitor::ObjectVisitor;
use bitflags::bitflags;
use pbl_binder::{FileNamespace, NativeTypes, ObjectId, SymbolDictionary, TypeConstraint, resolve_java_type};
use pbl_common::Diagnostic;
use pbl_parser::JavaSyntaxTree;
use pbl_parser::syntax::JavaType;
use pbl_scanner::{TokenId, TokenStream};
use pbl_solver::TypeMatcher;
use rustc_hash::{FxHashMap, FxHashSet};

bitflags! {
    /// Control-flow state of the construct being validated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ValidatorFlags: u8 {
        /// `return` is allowed here.
        const MAY_RETURN = 1 << 0;
        /// The enclosing method has a non-void return type.
        const MUST_RETURN_VALUE = 1 << 1;
        /// Control has left the current block (`return`, `throw`, `break`,
        /// `continue`).
        const DID_RETURN = 1 << 2;
        /// Unreachable code was already reported in the current block.
        const REPORTED_UNREACHABLE = 1 << 3;
        /// `this` and instance members are available.
        const ALLOW_INSTANCE_KEYWORDS = 1 << 4;
        /// Validating a constructor body.
        const IN_CONSTRUCTOR = 1 << 5;
        /// Control has left the enclosing method (`return` or `throw`).
        const EXITS_METHOD = 1 << 6;
    }
}

impl ValidatorFlags {
    /// Flags describing how control left a block.
    pub const COMPLETION: Self = Self::DID_RETURN.union(Self::EXITS_METHOD);
}

/// An `assert`-style failure. It unwinds to the nearest
/// [`ValidatorContext::validate_node_with`], which records it once.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationHalt {
    pub message: String,
    pub code: u32,
    pub token: Option<TokenId>,
}

pub type ValidationResult<T> = Result<T, ValidationHalt>;

/// Facts the translator needs that are only known after validation, keyed
/// by the token of the node they belong to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolutions {
    /// Stored names of calls that differ from the written name, i.e. chosen
    /// overloads and `this(...)`/`super(...)` constructor calls.
    pub call_names: FxHashMap<TokenId, String>,
    /// Receivers for bare member references: `this` or an object name.
    pub qualifiers: FxHashMap<TokenId, String>,
    /// Selected constructor overload per instantiation.
    pub constructor_indices: FxHashMap<TokenId, usize>,
}

impl Resolutions {
    #[must_use]
    pub fn call_name(&self, token: TokenId) -> Option<&str> {
        self.call_names.get(&token).map(String::as_str)
    }

    #[must_use]
    pub fn qualifier(&self, token: TokenId) -> Option<&str> {
        self.qualifiers.get(&token).map(String::as_str)
    }

    #[must_use]
    pub fn constructor_index(&self, token: TokenId) -> Option<usize> {
        self.constructor_indices.get(&token).copied()
    }
}

/// Result of validating one file.
#[derive(Clone, Debug, Default)]
pub struct ValidationOutput {
    pub diagnostics: Vec<Diagnostic>,
    pub resolutions: Resolutions,
}

impl ValidationOutput {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_error())
    }
}

pub struct ValidatorContext<'a> {
    pub(crate) file: String,
    pub(crate) tokens: &'a TokenStream,
    pub(crate) dictionary: &'a SymbolDictionary,
    pub(crate) natives: &'a NativeTypes,
    pub(crate) namespace: FileNamespace,
    pub scope: ScopeManager,
    pub objects: ObjectVisitor,
    /// Expected return types, innermost last.
    pub(crate) expected_returns: Vec<TypeConstraint>,
    pub(crate) namespace_stack: Vec<String>,
    pub(crate) generics: Vec<String>,
    /// Members brought in with `import static a.b.C.m;`.
    pub(crate) static_imports: FxHashSet<String>,
    pub(crate) has_static_wildcard: bool,
    pub flags: ValidatorFlags,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) resolutions: Resolutions,
}

impl<'a> ValidatorContext<'a> {
    #[must_use]
    pub fn new(file: &str, tree: &'a JavaSyntaxTree, dictionary: &'a SymbolDictionary, natives: &'a NativeTypes) -> Self {
        let mut static_imports = FxHashSet::default();
        let mut has_static_wildcard = false;
        for import in tree.imports().filter(|import| import.is_static) {
            if import.is_wildcard {
                has_static_wildcard = true;
            } else if let Some(member) = import.paths.last() {
                static_imports.insert(member.clone());
            }
        }

        Self {
            file: file.to_string(),
            tokens: &tree.tokens,
            dictionary,
            natives,
            namespace: FileNamespace::for_tree(file, tree),
            scope: ScopeManager::new(),
            objects: ObjectVisitor::new(),
            expected_returns: Vec::new(),
            namespace_stack: Vec::new(),
            generics: Vec::new(),
            static_imports,
            has_static_wildcard,
            flags: ValidatorFlags::empty(),
            diagnostics: Vec::new(),
            resolutions: Resolutions::default(),
        }
    }

    #[must_use]
    pub fn finish(self) -> ValidationOutput {
        ValidationOutput {
            diagnostics: self.diagnostics,
            resolutions: self.resolutions,
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub const fn matcher(&self) -> TypeMatcher<'a> {
        TypeMatcher::new(self.dictionary)
    }

    #[must_use]
    pub fn matches(&self, source: &TypeConstraint, comparison: &TypeConstraint) -> bool {
        self.matcher().type_constraint_matches(source, comparison)
    }

    #[must_use]
    pub fn type_name(&self, constraint: &TypeConstraint) -> String {
        self.dictionary.type_name(constraint)
    }

    /// The resolved constraint a type reference denotes at the current
    /// position.
    #[must_use]
    pub fn resolve_type(&self, ty: &JavaType) -> TypeConstraint {
        let constraint = resolve_java_type(self.natives, &self.namespace, &self.namespace_stack, &self.generics, ty);
        self.dictionary.resolve(&constraint)
    }

    /// The object type declared as `name` in the current namespace.
    pub(crate) fn declared_object(&self, name: &str) -> Option<ObjectId> {
        let identifier = self.namespace.identifier(&self.namespace_stack, name);
        self.dictionary
            .get_symbol(&identifier)
            .and_then(|symbol| symbol.constraint.definition.as_object())
    }

    // =========================================================================
    // Scoped state
    // =========================================================================

    /// Run `f` with `clear` removed from and then `set` added to the flags,
    /// restoring them afterwards.
    pub fn with_flags<T>(
        &mut self,
        set: ValidatorFlags,
        clear: ValidatorFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.flags;
        self.flags.remove(clear);
        self.flags.insert(set);
        let result = f(self);
        self.flags = saved;
        result
    }

    /// Run `f` inside a fresh scope.
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scope.enter();
        let result = f(self);
        self.scope.exit();
        result
    }

    /// Run `f` while validating the object `id`, declared as `name`.
    pub(crate) fn within_object<T>(
        &mut self,
        id: ObjectId,
        name: &str,
        generics: &[String],
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let generics_len = self.generics.len();
        self.generics.extend(generics.iter().cloned());
        self.namespace_stack.push(name.to_string());
        self.objects.visit(id);

        let result = self.with_scope(f);

        self.objects.leave();
        self.namespace_stack.pop();
        self.generics.truncate(generics_len);
        result
    }

    /// Run `f` with `expected` as the type `return` statements must produce.
    pub(crate) fn expecting_return<T>(&mut self, expected: TypeConstraint, f: impl FnOnce(&mut Self) -> T) -> T {
        self.expected_returns.push(expected);
        let result = f(self);
        self.expected_returns.pop();
        result
    }

    /// Run `f`, recording a halt as one error and returning `None` so the
    /// caller continues with the next sibling.
    pub fn validate_node_with<T>(&mut self, f: impl FnOnce(&mut Self) -> ValidationResult<T>) -> Option<T> {
        match f(self) {
            Ok(value) => Some(value),
            Err(halt) => {
                tracing::trace!(message = %halt.message, "validation halted");
                self.record_halt(halt);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;
