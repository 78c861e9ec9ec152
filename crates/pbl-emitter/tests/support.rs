//! Fixtures shared by the translator tests.

use crate::translate_java;
use pbl_binder::{FileNamespace, SymbolDictionary, install_native_types, resolve_java};
use pbl_checker::validate_java;
use pbl_parser::parse_java;

pub const FILE: &str = "app/Main.java";

/// Parse, resolve and validate `source`, then translate it. Panics when the
/// source does not validate.
pub fn translate(source: &str) -> String {
    let tree = parse_java(source).unwrap_or_else(|error| panic!("parse failed: {error}\n{source}"));
    let mut dictionary = SymbolDictionary::new();
    let natives = install_native_types(&mut dictionary);
    resolve_java(&tree, FileNamespace::for_tree(FILE, &tree), &mut dictionary, &natives);

    let output = validate_java(FILE, &tree, &dictionary, &natives);
    let errors: Vec<String> = output
        .errors()
        .map(|diagnostic| diagnostic.message_text.clone())
        .collect();
    assert!(errors.is_empty(), "expected no errors, got: {errors:?}\n{source}");

    translate_java(FILE, &tree, &output.resolutions)
}

/// Translate a class `A` in package `app` whose body is `members`.
pub fn translate_class(members: &str) -> String {
    translate(&format!("package app;\nclass A {{\n{members}\n}}\n"))
}

/// Translate `body` as the body of `void f()` in class `A`.
pub fn translate_method(body: &str) -> String {
    translate_class(&format!("void f() {{\n{body}\n}}"))
}

/// Assert that `output` contains `expected`, printing both on failure.
pub fn assert_emits(output: &str, expected: &str) {
    assert!(
        output.contains(expected),
        "expected output to contain:\n{expected}\n--- output ---\n{output}"
    );
}
