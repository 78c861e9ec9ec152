//! Symbol identifiers and candidate lists for one source file.
//!
//! A symbol declared as `Inner` inside `Outer` in `a/b/C.java` has the
//! identifier `a/b/C.java:Outer.Inner`. A reference to a name is turned into
//! every identifier it could denote, most specific first:
//!
//! 1. the name in each enclosing namespace, innermost first, then at file
//!    scope
//! 2. an explicit import of the name
//! 3. the name in each wildcard-imported package
//! 4. the name in a file of the same directory
//! 5. the bare name, for host globals

use pbl_parser::syntax::{Import, JavaSyntaxTree};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct FileNamespace {
    file: String,
    directory: String,
    /// Imported name to symbol identifier.
    imports: FxHashMap<String, String>,
    /// Package directories imported with `.*`.
    wildcards: Vec<String>,
}

impl FileNamespace {
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        let file = file.into();
        let directory = file
            .rsplit_once('/')
            .map(|(directory, _)| directory.to_string())
            .unwrap_or_default();
        Self {
            file,
            directory,
            imports: FxHashMap::default(),
            wildcards: Vec::new(),
        }
    }

    /// A namespace with every import of `tree` registered.
    #[must_use]
    pub fn for_tree(file: impl Into<String>, tree: &JavaSyntaxTree) -> Self {
        let mut namespace = Self::new(file);
        for import in tree.imports() {
            namespace.add_import(import);
        }
        namespace
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn add_import(&mut self, import: &Import) {
        if import.is_wildcard {
            self.wildcards.push(import.paths.join("/"));
            return;
        }

        if let Some(name) = &import.default_import {
            // `import static a.b.C.m` names the member after its class.
            let package_len = if import.is_static {
                import.paths.len().saturating_sub(2)
            } else {
                import.paths.len().saturating_sub(1)
            };
            let package = import.paths[..package_len].join("/");
            self.imports.insert(name.clone(), source_identifier(&package, name));
        }

        let package = import.paths.join("/");
        for name in &import.non_default_imports {
            self.imports.insert(name.clone(), source_identifier(&package, name));
        }
    }

    /// The symbol identifier a declaration gets in this file.
    #[must_use]
    pub fn identifier(&self, namespace: &[String], name: &str) -> String {
        let mut identifier = format!("{}:", self.file);
        for segment in namespace {
            identifier.push_str(segment);
            identifier.push('.');
        }
        identifier.push_str(name);
        identifier
    }

    /// Identifiers a reference to `chain` (`X` or `p.q.X`) made inside
    /// `namespace` may denote, most specific first.
    #[must_use]
    pub fn candidates(&self, namespace: &[String], chain: &[String]) -> Vec<String> {
        let Some((head, rest)) = chain.split_first() else {
            return Vec::new();
        };
        let dotted = chain.join(".");
        let mut candidates = Vec::with_capacity(namespace.len() + 4 + self.wildcards.len());

        for depth in (0..=namespace.len()).rev() {
            candidates.push(self.identifier(&namespace[..depth], &dotted));
        }

        let suffix: String = rest.iter().map(|segment| format!(".{segment}")).collect();
        if let Some(imported) = self.imports.get(head) {
            candidates.push(format!("{imported}{suffix}"));
        }

        if rest.is_empty() {
            for package in &self.wildcards {
                candidates.push(source_identifier(package, head));
            }
            candidates.push(source_identifier(&self.directory, head));
            candidates.push(head.clone());
        } else if let Some((name, packages)) = chain.split_last() {
            candidates.push(source_identifier(&packages.join("/"), name));
        }

        candidates
    }
}

/// Identifier of the top-level type `name` declared in `package/name.java`.
#[must_use]
pub fn source_identifier(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!("{name}.java:{name}")
    } else {
        format!("{package}/{name}.java:{name}")
    }
}

#[cfg(test)]
#[path = "../tests/namespace_tests.rs"]
mod namespace_tests;
