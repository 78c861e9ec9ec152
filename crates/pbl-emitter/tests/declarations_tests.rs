use crate::test_support::{assert_emits, translate, translate_class};

#[test]
fn test_class_with_constructor() {
    let output = translate(
        "package app;\n\
         public class Point {\n\
           int x;\n\
           int y = 2;\n\
           Point(int x) { this.x = x; }\n\
           int getX() { return x; }\n\
         }\n",
    );

    assert_emits(
        &output,
        "class Point {\n  \
           constructor (overloadIndex, ...args) {\n    \
             this.x = 0;\n    \
             this.y = 2;\n    \
             switch (overloadIndex) {\n      \
               case 0:\n        \
                 this.Point_0(...args);\n        \
                 break;\n    \
             }\n  \
           }\n",
    );
    assert_emits(&output, "  Point_0 (x) {\n    this.x = x;\n  }\n");
    assert_emits(&output, "  getX () {\n    return this.x;\n  }\n");
    assert!(output.ends_with("module.exports = Point;\n"), "{output}");
}

#[test]
fn test_class_without_state_has_no_js_constructor() {
    let output = translate_class("int one() { return 1; }");
    assert!(!output.contains("constructor"), "{output}");
    assert_emits(&output, "class A {\n  one () {\n    return 1;\n  }\n}");
}

#[test]
fn test_overloads_use_stored_names() {
    let output = translate_class(
        "int print(int value) { return 1; }\n\
         int print(String value) { return 2; }\n\
         int both() { return print(1) + print(\"s\"); }",
    );
    assert_emits(&output, "print_0 (value) {");
    assert_emits(&output, "print_1 (value) {");
    assert_emits(&output, "return this.print_0(1) + this.print_1(\"s\");");
}

#[test]
fn test_static_members_follow_the_class() {
    let output = translate(
        "package app;\n\
         class Counter {\n\
           static int count;\n\
           static final String NAME = \"c\";\n\
           static { count = 10; }\n\
           static void next() { count++; }\n\
         }\n",
    );

    assert_emits(
        &output,
        "}\n\
         Counter.next = function () {\n  \
           Counter.count++;\n\
         };\n\
         Counter.count = 0;\n\
         Counter.NAME = \"c\";\n\
         (function () {\n  \
           Counter.count = 10;\n\
         })();\n",
    );
}

#[test]
fn test_subclass_calls_parent_constructor() {
    let output = translate(
        "package app;\n\
         class Animal {\n\
           String name;\n\
           Animal(String name) { this.name = name; }\n\
         }\n\
         class Dog extends Animal {\n\
           Dog(String name) { super(name); }\n\
         }\n",
    );
    assert_emits(&output, "class Dog extends Animal {");
    assert_emits(&output, "    super();\n");
    assert_emits(&output, "  Dog_0 (name) {\n    super.Animal_0(name);\n  }");
}

#[test]
fn test_super_call_into_implicit_constructor_is_dropped() {
    let output = translate(
        "package app;\n\
         class Base { }\n\
         class Child extends Base {\n\
           Child() { super(); }\n\
         }\n",
    );
    assert_emits(&output, "  Child_0 () {}\n");
}

#[test]
fn test_nested_classes_are_attached_to_their_outer_class() {
    let output = translate(
        "package app;\n\
         class Outer {\n\
           static class Inner { }\n\
           Inner make() { return new Inner(); }\n\
         }\n",
    );
    let inner = output.find("class Inner {").unwrap_or(usize::MAX);
    let outer = output.find("class Outer {").unwrap_or(usize::MAX);
    assert!(inner < outer, "nested classes come first:\n{output}");
    assert_emits(&output, "return new Inner();");
    assert_emits(&output, "Outer.Inner = Inner;");
}

#[test]
fn test_enum_constants_are_static_instances() {
    let output = translate("package app;\nenum Color { RED, GREEN }\n");
    assert_emits(&output, "Color.RED = new Color();\nColor.GREEN = new Color();");
}

#[test]
fn test_abstract_methods_are_not_emitted() {
    let output = translate(
        "package app;\n\
         abstract class Shape {\n\
           abstract int area();\n\
           int doubled() { return area() * 2; }\n\
         }\n",
    );
    assert!(!output.contains("area ()"), "{output}");
    assert_emits(&output, "return this.area() * 2;");
}

#[test]
fn test_anonymous_object() {
    let output = translate(
        "package app;\n\
         interface Runner { void run(); }\n\
         class A {\n\
           Runner make() {\n\
             return new Runner() {\n\
               public void run() { }\n\
             };\n\
           }\n\
         }\n",
    );
    assert_emits(&output, "return (function (instance) {\n");
    assert_emits(&output, "instance.run = function () {};\n");
    assert_emits(&output, "return instance;\n");
    assert_emits(&output, "})(typeof Runner === 'function' ? new Runner() : {});");
}

#[test]
fn test_interfaces_emit_nothing() {
    let output = translate("package app;\ninterface Shape { int area(); }\n");
    assert_eq!(output, "");
}
