use super::Printer;
use pbl_parser::syntax::{AccessModifier, Import};
use pbl_parser::{JavaSyntaxTree, TopLevelNode};

impl Printer<'_> {
    // =========================================================================
    // Imports
    // =========================================================================

    /// `import a.b.C;` becomes `const C = require('./a/b/C');`. Static
    /// imports destructure the member from its class module. Wildcard
    /// package imports and `java.*` library imports have no module to load.
    pub(super) fn emit_import(&mut self, import: &Import) {
        if is_library_import(import) {
            return;
        }

        if !import.non_default_imports.is_empty() {
            for name in &import.non_default_imports {
                let mut paths = import.paths.clone();
                paths.push(name.clone());
                self.emit_require(name, &paths);
            }
            return;
        }

        let Some(class_name) = import.default_import.as_deref() else {
            return;
        };
        let Some(class_index) = import.paths.iter().rposition(|path| path == class_name) else {
            return;
        };
        let module = &import.paths[..=class_index];

        match import.paths.get(class_index + 1) {
            Some(member) if import.is_static && !import.is_wildcard => {
                self.emit_require(&format!("{{ {member} }}"), module);
            }
            _ => self.emit_require(class_name, module),
        }
    }

    fn emit_require(&mut self, binding: &str, paths: &[String]) {
        self.write(&format!("const {binding} = require('./{}');", paths.join("/")));
        self.write_line();
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// The module exports its public top-level class, or its first class
    /// when none is public.
    pub(super) fn emit_export(&mut self, tree: &JavaSyntaxTree) {
        let classes = || {
            tree.nodes.iter().filter_map(|node| match node {
                TopLevelNode::Class(class) => Some(class),
                _ => None,
            })
        };
        let exported = classes()
            .find(|class| class.modifiers.access == AccessModifier::Public)
            .or_else(|| classes().next());
        let Some(class) = exported else {
            return;
        };

        self.begin_unit();
        self.write(&format!("module.exports = {};", class.name));
    }
}

fn is_library_import(import: &Import) -> bool {
    matches!(import.paths.first().map(String::as_str), Some("java" | "javax"))
}

#[cfg(test)]
#[path = "../../tests/module_emission_tests.rs"]
mod module_emission_tests;
