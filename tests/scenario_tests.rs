//! End-to-end scenarios, from source text through validation.

use polybabel::Compiler;
use polybabel::binder::ObjectId;
use polybabel::common::diagnostics::diagnostic_codes;
use polybabel::solver::TypeMatcher;
use polybabel::{Diagnostic, LanguageBundle};
use std::process::Command;

const FILE: &str = "Main.java";

fn compile(source: &str) -> Compiler {
    let mut compiler = Compiler::new();
    compiler.add_source(FILE, source);
    compiler.compile_all();
    compiler
}

fn errors(compiler: &Compiler) -> Vec<&Diagnostic> {
    compiler.errors_for(FILE).collect()
}

fn object(compiler: &Compiler, name: &str) -> ObjectId {
    compiler
        .dictionary()
        .get_symbol(&format!("{FILE}:{name}"))
        .and_then(|symbol| symbol.constraint.definition.as_object())
        .unwrap_or_else(|| panic!("no object '{name}'"))
}

#[test]
fn test_class_hierarchy_validates() {
    let compiler = compile("class A { } class B extends A { } interface I { } class C extends B implements I { }");
    assert!(errors(&compiler).is_empty(), "{:?}", errors(&compiler));

    let matcher = TypeMatcher::new(compiler.dictionary());
    let (a, b, c) = (object(&compiler, "A"), object(&compiler, "B"), object(&compiler, "C"));
    assert!(matcher.is_subtype_of(c, a));
    assert!(matcher.is_subtype_of(c, b));
    assert!(!matcher.is_subtype_of(a, c));
}

#[test]
fn test_class_cannot_extend_interface() {
    let compiler = compile("interface I {} class X extends I {}");
    let errors = errors(&compiler);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].code, diagnostic_codes::CLASS_CANNOT_EXTEND_NON_CLASS);
    assert_eq!(errors[0].message_text, "Class 'X' cannot extend non-class 'I'");
}

#[test]
fn test_unreachable_code_is_reported_once() {
    let compiler = compile(
        "class A {\n\
           int f() {\n\
             return 1;\n\
             int x = 2;\n\
             int y = 3;\n\
           }\n\
         }\n",
    );
    let errors = errors(&compiler);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].code, diagnostic_codes::UNREACHABLE_CODE);
    assert_eq!(errors[0].line, Some(4));
}

#[test]
fn test_unknown_identifier_does_not_cascade() {
    let compiler = compile("class A {\n  void f() {\n    String s = foo;\n  }\n}\n");
    let errors = errors(&compiler);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].code, diagnostic_codes::UNKNOWN_IDENTIFIER);
    assert_eq!(errors[0].message_text, "Unknown identifier 'foo'");
}

#[test]
fn test_tokenizer_failure_cites_the_line() {
    let mut compiler = Compiler::new();
    assert!(!compiler.add_source(FILE, "class A {\n  int x;\n  \u{0007}\n}\n"));

    let errors = errors(&compiler);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].code, diagnostic_codes::UNEXPECTED_CHARACTER);
    assert_eq!(errors[0].line, Some(3));
}

#[test]
fn test_numeric_argument_selects_numeric_overload() {
    let compiler = compile(
        "package app;\n\
         class Printer {\n\
           Printer(int width) { }\n\
           Printer(String name) { }\n\
         }\n\
         class Main {\n\
           Printer make() { return new Printer(80); }\n\
         }\n",
    );
    assert!(errors(&compiler).is_empty(), "{:?}", errors(&compiler));
    let code = compiler.get_compiled_code(FILE).expect("compiled");
    assert!(code.contains("return new Printer(0, 80);"), "{code}");
}

#[test]
fn test_casts_and_comparisons_compile_cleanly() {
    let compiler = compile(
        "package app;\n\
         class Maths {\n\
           int twice(double a) { return (int) (a * 2); }\n\
           boolean ordered(int a, int b, int c, int d) { return a < b && c > d; }\n\
         }\n",
    );
    assert!(errors(&compiler).is_empty(), "{:?}", errors(&compiler));
    let code = compiler.get_compiled_code(FILE).expect("compiled");
    assert!(code.contains("return (a * 2);"), "{code}");
    assert!(code.contains("return a < b && c > d;"), "{code}");
}

#[test]
fn test_parsing_twice_gives_identical_trees() {
    let source = "package app;\nclass A { int f(int n) { return n > 0 ? n : -n; } }\n";
    let first = (LanguageBundle::JAVA.parse)(source).expect("parses");
    let second = (LanguageBundle::JAVA.parse)(source).expect("parses");
    assert_eq!(format!("{:?}", first.nodes), format!("{:?}", second.nodes));
}

// =============================================================================
// Command line
// =============================================================================

fn pbl(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pbl"))
        .args(args)
        .current_dir(dir)
        .env_remove("PBL_LOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run pbl")
}

fn write(dir: &std::path::Path, relative: &str, text: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    std::fs::write(path, text).expect("write");
}

#[test]
fn test_cli_compiles_the_default_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "src/app/Main.java", "package app;\npublic class Main { }\n");

    let output = pbl(dir.path(), &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Compiled in "));
    assert!(dir.path().join("dist/app/Main.js").is_file());
}

#[test]
fn test_cli_reads_the_project_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "polybabel.json", r#"{ "in": "java", "out": "js" }"#);
    write(dir.path(), "java/app/Main.java", "package app;\npublic class Main { }\n");

    let output = pbl(dir.path(), &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("js/app/Main.js").is_file());
}

#[test]
fn test_cli_reports_errors_and_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "in/app/Main.java", "package app;\nclass Main {\n  int f() { return foo; }\n}\n");

    let output = pbl(dir.path(), &["--in", "in", "--out", "out"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("app/Main.java(3): error PBL2001: Unknown identifier 'foo'"),
        "{stderr}"
    );
    assert!(stderr.contains("Compilation failed with 1 error(s)."), "{stderr}");
    assert!(!dir.path().join("out").exists());
}
