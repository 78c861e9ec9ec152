//! Compiler facade tests: file bookkeeping, error aggregation and
//! cross-file compilation.

use polybabel::common::diagnostics::diagnostic_codes;
use polybabel::parser::parse_java;
use polybabel::{Compiler, Diagnostic, DiagnosticCategory, Language, LanguageBundle};

const MAIN: &str = "package app;\n\
    import app.util.Helper;\n\
    public class Main {\n\
      int run() { return new Helper().size(); }\n\
    }\n";

const HELPER: &str = "package app.util;\n\
    public class Helper {\n\
      public int size() { return 1; }\n\
    }\n";

fn error_messages(compiler: &Compiler) -> Vec<String> {
    let mut messages = Vec::new();
    compiler.for_each_error(|file, diagnostic| messages.push(format!("{file}: {}", diagnostic.message_text)));
    messages
}

#[test]
fn test_bundle_dispatch_by_extension() {
    let bundle = LanguageBundle::for_path("src/app/Main.java").expect("java is registered");
    assert_eq!(bundle.language, Language::Java);
    assert!(LanguageBundle::for_path("src/app/main.kt").is_none());
    assert!(LanguageBundle::for_path("Makefile").is_none());
}

#[test]
fn test_compile_all_translates_every_file() {
    let mut compiler = Compiler::new();
    assert!(compiler.add_source("app/Main.java", MAIN));
    assert!(compiler.add_source("app/util/Helper.java", HELPER));
    compiler.compile_all();

    assert!(!compiler.has_errors(), "{:?}", error_messages(&compiler));
    let main = compiler.get_compiled_code("app/Main.java").expect("main is compiled");
    assert!(main.contains("return new Helper().size();"), "{main}");
    let helper = compiler.get_compiled_code("app/util/Helper.java").expect("helper is compiled");
    assert!(helper.contains("module.exports = Helper;"), "{helper}");
}

#[test]
fn test_files_may_reference_files_added_later() {
    let mut compiler = Compiler::new();
    compiler.add_source("app/Main.java", MAIN);
    compiler.add_source("app/util/Helper.java", HELPER);
    compiler.validate_all();
    assert!(!compiler.has_errors(), "{:?}", error_messages(&compiler));
}

#[test]
fn test_add_takes_a_parsed_tree() {
    let mut compiler = Compiler::new();
    let tree = parse_java("package app;\nclass Main { }\n").expect("parses");
    compiler.add("app/Main.java", tree);

    assert!(compiler.tree("app/Main.java").is_some());
    let code = compiler.compile_file("app/Main.java").expect("compiles");
    assert!(code.contains("class Main {"), "{code}");
    assert_eq!(compiler.files().collect::<Vec<_>>(), vec!["app/Main.java"]);
}

#[test]
fn test_parse_failure_is_recorded_as_error() {
    let mut compiler = Compiler::new();
    assert!(!compiler.add_source("app/Main.java", "package app;\nclass Main {\n"));

    assert!(compiler.has_errors());
    assert!(compiler.tree("app/Main.java").is_none());
    let errors: Vec<&Diagnostic> = compiler.errors_for("app/Main.java").collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, diagnostic_codes::UNEXPECTED_TOKEN);
    assert!(compiler.compile_file("app/Main.java").is_none());
}

#[test]
fn test_files_with_errors_are_not_translated() {
    let mut compiler = Compiler::new();
    compiler.add_source("app/Main.java", "package app;\nclass Main { int f() { return foo; } }\n");
    compiler.add_source("app/Other.java", "package app;\nclass Other { }\n");
    compiler.compile_all();

    assert_eq!(compiler.error_count(), 1);
    assert_eq!(error_messages(&compiler), vec!["app/Main.java: Unknown identifier 'foo'"]);
    assert!(compiler.get_compiled_code("app/Main.java").is_none());
    assert!(compiler.get_compiled_code("app/Other.java").is_some());
}

#[test]
fn test_add_error_records_against_new_files() {
    let mut compiler = Compiler::new();
    compiler.add_error(
        "app/Missing.java",
        Diagnostic::without_span("app/Missing.java", "Cannot read file", diagnostic_codes::CANNOT_READ_FILE),
    );
    assert!(compiler.has_errors());
    assert_eq!(compiler.errors_for("app/Missing.java").count(), 1);
    assert_eq!(compiler.errors_for("app/Other.java").count(), 0);
}

#[test]
fn test_missing_package_is_only_a_warning() {
    let mut compiler = Compiler::new();
    compiler.add_source("Main.java", "class Main { }\n");
    compiler.compile_all();

    assert!(!compiler.has_errors(), "{:?}", error_messages(&compiler));
    let diagnostics = compiler.diagnostics_for("Main.java");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
    assert_eq!(diagnostics[0].code, diagnostic_codes::MISSING_PACKAGE);
    assert!(compiler.get_compiled_code("Main.java").is_some());
}

#[test]
fn test_reset_forgets_everything() {
    let mut compiler = Compiler::new();
    compiler.add_source("app/Main.java", "package app;\nclass Main { int f() { return foo; } }\n");
    compiler.compile_all();
    assert!(compiler.has_errors());

    compiler.reset();
    assert!(!compiler.has_errors());
    assert_eq!(compiler.files().count(), 0);
    assert!(compiler.dictionary().get_symbol("app/Main.java:Main").is_none());
}
