use crate::test_support::{assert_valid, error_codes, in_class, single_error, validate};
use pbl_common::diagnostics::diagnostic_codes;

// =============================================================================
// Reachability
// =============================================================================

#[test]
fn test_unreachable_code_is_reported_once() {
    let source = "package app;\n\
                  class A {\n\
                    int f() {\n\
                      return 1;\n\
                      int x = 2;\n\
                      int y = 3;\n\
                    }\n\
                  }\n";
    let output = validate(source);
    assert_eq!(error_codes(&output), vec![diagnostic_codes::UNREACHABLE_CODE]);
    let diagnostic = output.errors().next().unwrap_or_else(|| panic!("no diagnostics"));
    assert_eq!(diagnostic.line, Some(5));
}

#[test]
fn test_break_only_leaves_the_loop() {
    assert_valid(&in_class("void f() { while (true) { break; } int x = 1; }"));
}

#[test]
fn test_code_after_break_is_unreachable() {
    single_error(
        &in_class("void f() { while (true) { break; int x = 1; } }"),
        diagnostic_codes::UNREACHABLE_CODE,
    );
}

#[test]
fn test_if_without_else_does_not_complete() {
    assert_valid(&in_class("int f(boolean b) { if (b) { return 1; } return 2; }"));
}

#[test]
fn test_if_else_branches_complete_together() {
    single_error(
        &in_class("int f(boolean b) { if (b) { return 1; } else { return 2; } return 3; }"),
        diagnostic_codes::UNREACHABLE_CODE,
    );
}

#[test]
fn test_try_and_catch_both_returning_complete() {
    assert_valid(&in_class(
        "int f() { try { return 1; } catch (Exception error) { return 2; } }",
    ));
}

#[test]
fn test_finally_returning_completes() {
    assert_valid(&in_class(
        "int f() { try { work(); } catch (Exception error) { } finally { return 0; } }\nvoid work() { }",
    ));
}

// =============================================================================
// Conditions and loops
// =============================================================================

#[test]
fn test_condition_must_be_boolean() {
    single_error(&in_class("void f() { if (1) { } }"), diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE);
    single_error(&in_class("void f() { while (\"yes\") { } }"), diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE);
}

#[test]
fn test_classic_for_loop() {
    assert_valid(&in_class(
        "int sum(int n) { int total = 0; for (int i = 0; i < n; i++) { total += i; } return total; }",
    ));
}

#[test]
fn test_loop_variable_is_scoped_to_the_loop() {
    single_error(
        &in_class("void f() { for (int i = 0; i < 3; i++) { } i = 4; }"),
        diagnostic_codes::UNKNOWN_IDENTIFIER,
    );
}

#[test]
fn test_enhanced_for_binds_element_type() {
    assert_valid(&in_class(
        "int sum() { int[] xs = new int[3]; int total = 0; for (int x : xs) { total += x; } return total; }",
    ));
    single_error(
        &in_class("void f() { int[] xs = new int[3]; for (String s : xs) { } }"),
        diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
    );
}

#[test]
fn test_do_while_condition_is_checked() {
    single_error(
        &in_class("void f() { do { } while (2); }"),
        diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
    );
}

#[test]
fn test_switch_over_enum_constants() {
    assert_valid(
        "package app;\n\
         enum Day { MON, TUE }\n\
         class Calendar {\n\
           int code(Day day) {\n\
             switch (day) {\n\
               case MON: return 1;\n\
               case TUE: return 2;\n\
             }\n\
             return 0;\n\
           }\n\
         }\n",
    );
}

#[test]
fn test_switch_with_default_that_always_returns_completes() {
    assert_valid(&in_class(
        "int f(int x) { switch (x) { case 1: return 1; case 2: case 3: return 3; default: return 2; } }",
    ));
}

#[test]
fn test_switch_with_breaking_case_needs_a_return() {
    single_error(
        &in_class("int f(int x) { switch (x) { case 1: break; default: return 2; } }"),
        diagnostic_codes::METHOD_MUST_RETURN_VALUE,
    );
    single_error(
        &in_class("int f(int x) { switch (x) { case 1: return 1; } }"),
        diagnostic_codes::METHOD_MUST_RETURN_VALUE,
    );
}

#[test]
fn test_enum_case_labels_are_qualified() {
    let output = assert_valid(
        "package app;\n\
         enum Day { MON, TUE }\n\
         class Calendar {\n\
           int code(Day day) {\n\
             switch (day) {\n\
               case TUE: return 2;\n\
             }\n\
             return 0;\n\
           }\n\
         }\n",
    );
    let qualifiers: Vec<&String> = output.resolutions.qualifiers.values().collect();
    assert_eq!(qualifiers, vec!["Day"]);
}

// =============================================================================
// Returns
// =============================================================================

#[test]
fn test_return_value_must_match() {
    let diagnostic = single_error(&in_class("String f() { return 1; }"), diagnostic_codes::EXPECTED_RETURN_TYPE);
    assert_eq!(diagnostic.message_text, "Expected a return type of 'String'");
}

#[test]
fn test_void_method_cannot_return_value() {
    single_error(&in_class("void f() { return 1; }"), diagnostic_codes::EXPECTED_RETURN_TYPE);
    assert_valid(&in_class("void f() { return; }"));
}

#[test]
fn test_return_outside_method() {
    single_error(&in_class("static { return; }"), diagnostic_codes::UNEXPECTED_RETURN);
}

#[test]
fn test_constructor_cannot_return_value() {
    single_error(
        &in_class("A() { if (true) { return 1; } }"),
        diagnostic_codes::CONSTRUCTORS_CANNOT_RETURN_VALUES,
    );
}

#[test]
fn test_constructor_top_level_return() {
    single_error(&in_class("A() { return; }"), diagnostic_codes::CONSTRUCTOR_TOP_LEVEL_RETURN);
}

#[test]
fn test_constructor_top_level_return_value_is_reported_once() {
    single_error(&in_class("A() { return 1; }"), diagnostic_codes::CONSTRUCTORS_CANNOT_RETURN_VALUES);
}

#[test]
fn test_constructor_name_must_match_class() {
    let diagnostic = single_error(
        "package app;\nclass A { }\nclass B { A() { } }\n",
        diagnostic_codes::CONSTRUCTOR_NAME_MISMATCH,
    );
    assert_eq!(diagnostic.message_text, "Constructor 'A' must match the name of its class, 'B'");
}

#[test]
fn test_lambda_returns_do_not_affect_method() {
    assert_valid(&in_class("void f() { Object run = () -> { return 1; }; }"));
}

// =============================================================================
// Statement forms
// =============================================================================

#[test]
fn test_bare_value_is_not_a_statement() {
    single_error(&in_class("void f() { 1 + 2; }"), diagnostic_codes::INVALID_EXPRESSION);
}

#[test]
fn test_assert_condition_is_checked() {
    assert_valid(&in_class("void f(int n) { assert n > 0 : \"positive\"; }"));
    single_error(
        &in_class("void f(int n) { assert n; }"),
        diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
    );
}

#[test]
fn test_errors_in_one_statement_do_not_stop_the_block() {
    let output = validate(&in_class("void f() { int a = missing; boolean b = 3; }"));
    assert_eq!(
        error_codes(&output),
        vec![diagnostic_codes::UNKNOWN_IDENTIFIER, diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]
    );
}
