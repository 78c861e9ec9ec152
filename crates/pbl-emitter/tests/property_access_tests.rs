use crate::test_support::{assert_emits, translate, translate_class, translate_method};

const PRINTER: &str = "package app;\n\
    class Printer {\n\
      Printer(int width) { }\n\
      Printer(String name) { }\n\
      String print(int value) { return \"n\"; }\n\
      int print(String value) { return 1; }\n\
    }\n";

fn with_printer(body: &str) -> String {
    translate(&format!("{PRINTER}class Main {{\nvoid f() {{\n{body}\n}}\n}}\n"))
}

#[test]
fn test_members_are_qualified_with_this() {
    let output = translate_class("int count;\nint next() { count++; return count; }");
    assert_emits(&output, "    this.count++;\n    return this.count;\n");
}

#[test]
fn test_static_members_are_qualified_with_their_class() {
    let output = translate_class("static int count;\nstatic int next() { return count + twice(); }\nstatic int twice() { return 2; }");
    assert_emits(&output, "return A.count + A.twice();");
}

#[test]
fn test_constructor_index_is_passed_to_new() {
    let output = with_printer("Printer byName = new Printer(\"wide\");\nPrinter byWidth = new Printer(2);");
    assert_emits(&output, "let byName = new Printer(1, \"wide\");");
    assert_emits(&output, "let byWidth = new Printer(0, 2);");
}

#[test]
fn test_chained_calls_use_stored_overload_names() {
    let output = with_printer(
        "Printer p = new Printer(1);\n\
         String s = p.print(1);\n\
         int n = new Printer(2).print(\"x\");",
    );
    assert_emits(&output, "let s = p.print_0(1);");
    assert_emits(&output, "let n = new Printer(0, 2).print_1(\"x\");");
}

#[test]
fn test_this_constructor_call() {
    let output = translate_class("int x;\nA() { this(1); }\nA(int x) { this.x = x; }");
    assert_emits(&output, "  A_0 () {\n    this.A_1(1);\n  }");
    assert_emits(&output, "  A_1 (x) {\n    this.x = x;\n  }");
}

#[test]
fn test_console_output() {
    let output = translate_method("System.out.println(\"hi\");\nSystem.err.print(\"oops\");");
    assert_emits(&output, "    console.log(\"hi\");\n    console.error(\"oops\");\n");
}

#[test]
fn test_array_index_and_length() {
    let output = translate_class("int f(int[] xs) { return xs[0] + xs.length; }");
    assert_emits(&output, "return xs[0] + xs.length;");
}
