//! Fixtures shared by the validator tests.

use crate::{ValidationOutput, validate_java};
use pbl_binder::{FileNamespace, NativeTypes, SymbolDictionary, install_native_types, resolve_java};
use pbl_common::Diagnostic;
use pbl_parser::{JavaSyntaxTree, parse_java};

pub const FILE: &str = "Main.java";

/// A parsed file resolved into a fresh dictionary.
pub struct Resolved {
    pub tree: JavaSyntaxTree,
    pub dictionary: SymbolDictionary,
    pub natives: NativeTypes,
}

pub fn resolve(source: &str) -> Resolved {
    let tree = parse_java(source).unwrap_or_else(|error| panic!("parse failed: {error}\n{source}"));
    let mut dictionary = SymbolDictionary::new();
    let natives = install_native_types(&mut dictionary);
    resolve_java(&tree, FileNamespace::for_tree(FILE, &tree), &mut dictionary, &natives);
    Resolved {
        tree,
        dictionary,
        natives,
    }
}

pub fn validate(source: &str) -> ValidationOutput {
    let resolved = resolve(source);
    validate_java(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives)
}

/// Codes of the errors (not warnings) in `output`.
pub fn error_codes(output: &ValidationOutput) -> Vec<u32> {
    output.errors().map(|diagnostic| diagnostic.code).collect()
}

pub fn describe(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| format!("{} ({})", diagnostic.message_text, diagnostic.code))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn assert_valid(source: &str) -> ValidationOutput {
    let output = validate(source);
    assert!(
        !output.has_errors(),
        "expected no errors, got:\n{}",
        describe(&output.diagnostics)
    );
    output
}

/// Validate `source`, expecting exactly one error with `code`.
pub fn single_error(source: &str, code: u32) -> Diagnostic {
    let output = validate(source);
    let errors: Vec<&Diagnostic> = output.errors().collect();
    assert!(
        errors.len() == 1 && errors[0].code == code,
        "expected exactly one error {code}, got:\n{}",
        describe(&output.diagnostics)
    );
    errors[0].clone()
}

/// A class `A` in package `app` whose body is `members`.
pub fn in_class(members: &str) -> String {
    format!("package app;\nclass A {{\n{members}\n}}\n")
}
