use crate::test_support::{assert_valid, error_codes, in_class, single_error, validate};
use pbl_common::diagnostics::diagnostic_codes;

const PRINTER: &str = "class Printer {\n\
      Printer(int size) { }\n\
      Printer(String name) { }\n\
      String print(int value) { return \"\"; }\n\
      int print(String value) { return 0; }\n\
    }\n";

fn with_printer(source: &str) -> String {
    format!("package app;\n{PRINTER}{source}\n")
}

fn has_value<'a>(mut values: impl Iterator<Item = &'a String>, expected: &str) -> bool {
    values.any(|value| value == expected)
}

// =============================================================================
// Bare references and calls
// =============================================================================

#[test]
fn test_unknown_identifier() {
    let diagnostic = single_error(&in_class("int f() { return missing; }"), diagnostic_codes::UNKNOWN_IDENTIFIER);
    assert_eq!(diagnostic.message_text, "Unknown identifier 'missing'");
    single_error(&in_class("void f() { missing(); }"), diagnostic_codes::UNKNOWN_IDENTIFIER);
}

#[test]
fn test_host_globals_are_dynamic() {
    assert_valid(&in_class("void f() { System.out.println(\"hi\"); console.log(1); }"));
}

#[test]
fn test_static_imports_are_dynamic() {
    assert_valid(
        "package app;\n\
         import static java.lang.Math.max;\n\
         class A { int f() { return max(1, 2); } }\n",
    );
}

#[test]
fn test_bare_members_record_qualifiers() {
    let output = assert_valid(&in_class(
        "int count;\nstatic int total;\nvoid f() { count = 1; total = 2; }",
    ));
    let qualifiers = &output.resolutions.qualifiers;
    assert!(has_value(qualifiers.values(), "this"), "{qualifiers:?}");
    assert!(has_value(qualifiers.values(), "A"), "{qualifiers:?}");
}

#[test]
fn test_bare_call_selects_overload() {
    let output = assert_valid(&in_class(
        "void print(int value) { }\nvoid print(String value) { }\nvoid f() { print(\"s\"); }",
    ));
    assert!(has_value(output.resolutions.call_names.values(), "print_1"));
}

#[test]
fn test_invalid_arguments() {
    let diagnostic = single_error(
        &in_class("void g(int n) { }\nvoid f() { g(\"x\"); }"),
        diagnostic_codes::INVALID_FUNCTION_ARGUMENTS,
    );
    assert_eq!(diagnostic.message_text, "Invalid arguments for function 'g': 'String'");
}

#[test]
fn test_calling_a_field() {
    let diagnostic = single_error(&in_class("int width;\nvoid f() { width(); }"), diagnostic_codes::NOT_A_FUNCTION);
    assert_eq!(diagnostic.message_text, "'width' is not a function");
}

// =============================================================================
// Static context
// =============================================================================

#[test]
fn test_instance_field_in_static_method() {
    let diagnostic = single_error(
        &in_class("int count;\nstatic void f() { count = 1; }"),
        diagnostic_codes::INSTANCE_MEMBER_ON_STATIC_CLASS,
    );
    assert_eq!(
        diagnostic.message_text,
        "Instance member 'A.count' cannot be accessed on static class 'A'"
    );
}

#[test]
fn test_instance_method_in_static_method() {
    single_error(
        &in_class("void g() { }\nstatic void f() { g(); }"),
        diagnostic_codes::INSTANCE_METHOD_IN_STATIC_CONTEXT,
    );
}

#[test]
fn test_this_in_static_method() {
    single_error(&in_class("static void f() { Object o = this; }"), diagnostic_codes::THIS_IN_STATIC_CONTEXT);
}

#[test]
fn test_static_members_in_static_method() {
    assert_valid(&in_class("static int total;\nstatic void g() { }\nstatic void f() { total = 1; g(); }"));
}

#[test]
fn test_static_field_initializer_has_no_instance() {
    single_error(
        &in_class("int count = 1;\nstatic int copy = count;"),
        diagnostic_codes::INSTANCE_MEMBER_ON_STATIC_CLASS,
    );
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn test_private_member_access() {
    let diagnostic = single_error(
        "package app;\n\
         class P { private int secret; }\n\
         class A { int f(P p) { return p.secret; } }\n",
        diagnostic_codes::PRIVATE_MEMBER_ACCESS,
    );
    assert_eq!(diagnostic.message_text, "Private member 'secret' is only accessible inside 'P'");
}

#[test]
fn test_private_member_inside_declaring_class() {
    assert_valid(&in_class("private int secret;\nint f(A other) { return other.secret + secret; }"));
}

#[test]
fn test_protected_member_access() {
    let output = validate(
        "package app;\n\
         class P { protected int shared; }\n\
         class Q extends P { int f() { return shared; } }\n\
         class A { int f(P p) { return p.shared; } }\n",
    );
    assert_eq!(error_codes(&output), vec![diagnostic_codes::PROTECTED_MEMBER_ACCESS]);
}

#[test]
fn test_members_through_class_reference() {
    let source = "package app;\n\
                  class P { int x; static int y; }\n\
                  class A { void f() { int a = P.x; } }\n";
    single_error(source, diagnostic_codes::INSTANCE_MEMBER_ON_STATIC_CLASS);
    assert_valid(
        "package app;\n\
         class P { int x; static int y; }\n\
         class A { void f() { int b = P.y; } }\n",
    );
}

// =============================================================================
// Property chains
// =============================================================================

#[test]
fn test_missing_member() {
    let diagnostic = single_error(
        "package app;\nclass P { int x; }\nclass A { void f(P p) { int y = p.z; } }\n",
        diagnostic_codes::MEMBER_NOT_FOUND,
    );
    assert_eq!(diagnostic.message_text, "Member 'z' not found on 'P'");
}

#[test]
fn test_chain_method_selects_overload() {
    let output = assert_valid(&with_printer(
        "class A { void f(Printer p) { int n = p.print(\"s\"); String s = p.print(1); } }",
    ));
    let call_names = &output.resolutions.call_names;
    assert!(has_value(call_names.values(), "print_0"), "{call_names:?}");
    assert!(has_value(call_names.values(), "print_1"), "{call_names:?}");
}

#[test]
fn test_string_members() {
    assert_valid(&in_class("int f(String s) { return s.length(); }"));
    single_error(&in_class("void f(String s) { s.missing(); }"), diagnostic_codes::MEMBER_NOT_FOUND);
}

#[test]
fn test_array_indexing() {
    assert_valid(&in_class("int f(int[] xs) { return xs[0] + xs.length; }"));
    let diagnostic = single_error(
        &in_class("int f(int[] xs) { return xs[\"a\"]; }"),
        diagnostic_codes::INVALID_ARRAY_INDEX_TYPE,
    );
    assert_eq!(diagnostic.message_text, "Invalid array index type 'String'");
}

#[test]
fn test_simple_values_without_members() {
    single_error(&in_class("int f(boolean b) { return b.x; }"), diagnostic_codes::TYPE_HAS_NO_PROPERTIES);
}

#[test]
fn test_final_member_through_chain() {
    single_error(
        "package app;\nclass P { final int x; }\nclass A { void f(P p) { p.x = 1; } }\n",
        diagnostic_codes::CANNOT_REASSIGN_FINAL_MEMBER,
    );
}

// =============================================================================
// Constructors and instantiation
// =============================================================================

#[test]
fn test_constructor_overload_is_recorded() {
    let output = assert_valid(&with_printer("class A { Printer make() { return new Printer(\"name\"); } }"));
    assert!(output.resolutions.constructor_indices.values().any(|index| *index == 1));
}

#[test]
fn test_invalid_constructor_arguments() {
    let diagnostic = single_error(
        &with_printer("class A { void f() { Printer p = new Printer(true); } }"),
        diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
    );
    assert_eq!(diagnostic.message_text, "Invalid constructor arguments 'Boolean'");
}

#[test]
fn test_default_constructor_takes_no_arguments() {
    assert_valid("package app;\nclass P { }\nclass A { P make() { return new P(); } }\n");
    single_error(
        "package app;\nclass P { }\nclass A { P make() { return new P(1); } }\n",
        diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
    );
}

#[test]
fn test_abstract_class_is_not_constructable() {
    let diagnostic = single_error(
        "package app;\nabstract class S { }\nclass A { void f() { Object s = new S(); } }\n",
        diagnostic_codes::NOT_CONSTRUCTABLE,
    );
    assert_eq!(diagnostic.message_text, "'S' is not constructable");
}

#[test]
fn test_anonymous_implementation() {
    assert_valid(
        "package app;\n\
         interface Runner { void run(); }\n\
         class A { Runner make() { return new Runner() { public void run() { } }; } }\n",
    );
}

#[test]
fn test_nested_class_instantiation() {
    assert_valid(
        "package app;\n\
         class Outer {\n\
           static class Inner { }\n\
           Inner make() { return new Inner(); }\n\
         }\n",
    );
}

#[test]
fn test_super_constructor_call() {
    let output = assert_valid(
        "package app;\n\
         class P { P(int n) { } }\n\
         class Q extends P { Q() { super(1); } }\n",
    );
    assert!(has_value(output.resolutions.call_names.values(), "P_0"));

    single_error(
        "package app;\nclass P { P(int n) { } }\nclass Q extends P { Q() { super(\"x\"); } }\n",
        diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
    );
}

#[test]
fn test_this_constructor_call() {
    let output = assert_valid("package app;\nclass P { P() { this(1); } P(int n) { } }\n");
    assert!(has_value(output.resolutions.call_names.values(), "P_1"));
}

#[test]
fn test_super_without_supertypes() {
    assert_valid("package app;\nclass P { P() { super(); } }\n");
    single_error(
        "package app;\nclass P { P() { super(1); } }\n",
        diagnostic_codes::NO_SUPERTYPES,
    );
}

#[test]
fn test_super_of_unknown_class_is_dynamic() {
    assert_valid("package app;\nclass Failure extends Exception { Failure(String message) { super(message); } }\n");
}
