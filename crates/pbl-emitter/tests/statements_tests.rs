use crate::test_support::{assert_emits, translate, translate_class, translate_method};

#[test]
fn test_if_else_chain() {
    let output = translate_method(
        "int x = 1;\n\
         if (x > 0) { x = 2; } else if (x == 0) { x = 3; } else { x = 4; }",
    );
    assert_emits(
        &output,
        "    if (x > 0) {\n      \
               x = 2;\n    \
             } else if (x === 0) {\n      \
               x = 3;\n    \
             } else {\n      \
               x = 4;\n    \
             }\n",
    );
}

#[test]
fn test_local_declarations() {
    let output = translate_method("final int a = 1;\nint b;\nb = a;");
    assert_emits(&output, "    const a = 1;\n    let b;\n    b = a;\n");
}

#[test]
fn test_classic_for_loop() {
    let output = translate_class(
        "int sum(int n) {\n\
           int total = 0;\n\
           for (int i = 0; i < n; i++) { total += i; }\n\
           return total;\n\
         }",
    );
    assert_emits(&output, "    for (let i = 0; i < n; i++) {\n      total += i;\n    }\n    return total;");
}

#[test]
fn test_enhanced_for_loop() {
    let output = translate_class(
        "int sum() {\n\
           int[] xs = new int[3];\n\
           int total = 0;\n\
           for (int x : xs) { total += x; }\n\
           return total;\n\
         }",
    );
    assert_emits(&output, "let xs = new Array(3).fill(0);");
    assert_emits(&output, "for (let x of xs) {\n      total += x;\n    }");
}

#[test]
fn test_while_and_do_while() {
    let output = translate_method(
        "int n = 0;\n\
         while (n < 3) { n++; }\n\
         do { n--; } while (n > 0);",
    );
    assert_emits(&output, "    while (n < 3) {\n      n++;\n    }\n");
    assert_emits(&output, "    do {\n      n--;\n    } while (n > 0);\n");
}

#[test]
fn test_break_in_loop() {
    let output = translate_method("while (true) { break; }");
    assert_emits(&output, "while (true) {\n      break;\n    }");
}

#[test]
fn test_switch_on_enum_qualifies_case_labels() {
    let output = translate(
        "package app;\n\
         enum Day { MON, TUE }\n\
         class Calendar {\n\
           int code(Day day) {\n\
             switch (day) {\n\
               case MON: return 1;\n\
               case TUE: return 2;\n\
               default: break;\n\
             }\n\
             return 0;\n\
           }\n\
         }\n",
    );
    assert_emits(
        &output,
        "    switch (day) {\n      \
               case Day.MON:\n        \
                 return 1;\n      \
               case Day.TUE:\n        \
                 return 2;\n      \
               default:\n        \
                 break;\n    \
             }\n    \
             return 0;\n",
    );
}

#[test]
fn test_single_catch_and_finally() {
    let output = translate_class(
        "int f() {\n\
           try { return 1; } catch (Exception error) { return 2; } finally { work(); }\n\
         }\n\
         void work() { }",
    );
    assert_emits(
        &output,
        "    try {\n      \
               return 1;\n    \
             } catch (error) {\n      \
               return 2;\n    \
             } finally {\n      \
               this.work();\n    \
             }\n",
    );
}

#[test]
fn test_multiple_catches_become_an_instanceof_chain() {
    let output = translate(
        "package app;\n\
         class Failure extends Exception { }\n\
         class A {\n\
           void f() {\n\
             try { work(); } catch (Failure e) { log(); } catch (Exception e) { }\n\
           }\n\
           void work() { }\n\
           void log() { }\n\
         }\n",
    );
    assert_emits(&output, "class Failure extends Error {\n}");
    assert_emits(
        &output,
        "    } catch (error) {\n      \
               if (error instanceof Failure) {\n        \
                 let e = error;\n        \
                 this.log();\n      \
               } else {\n        \
                 let e = error;\n      \
               }\n    \
             }\n",
    );
}

#[test]
fn test_unmatched_exceptions_are_rethrown() {
    let output = translate(
        "package app;\n\
         class Failure extends Exception { }\n\
         class Timeout extends Exception { }\n\
         class A {\n\
           void f() {\n\
             try { } catch (Failure e) { } catch (Timeout e) { }\n\
           }\n\
         }\n",
    );
    assert_emits(&output, "} else if (error instanceof Timeout) {");
    assert_emits(&output, "} else {\n        throw error;\n      }");
}

#[test]
fn test_assertion() {
    let output = translate_class("void f(int n) { assert n > 0 : \"positive\"; }");
    assert_emits(&output, "console.assert(n > 0, \"positive\");");
}
