use crate::parse_java;
use crate::syntax::*;

fn parse(source: &str) -> JavaSyntaxTree {
    parse_java(source).unwrap_or_else(|error| panic!("parse failed: {error}\n{source}"))
}

fn parse_error(source: &str) -> String {
    match parse_java(source) {
        Ok(tree) => panic!("expected a parse error, got {:?}", tree.nodes),
        Err(error) => error.to_string(),
    }
}

fn class(tree: &JavaSyntaxTree, index: usize) -> &Class {
    let classes: Vec<&Class> = tree
        .nodes
        .iter()
        .filter_map(|node| match node {
            TopLevelNode::Class(class) => Some(class),
            _ => None,
        })
        .collect();
    classes[index]
}

fn member<'a>(class: &'a Class, name: &str) -> &'a ObjectMember {
    class
        .members
        .iter()
        .find(|member| member.name() == name)
        .unwrap_or_else(|| panic!("no member '{name}' on '{}'", class.name))
}

/// The statements of `m` in `class T { void m() { <body> } }`.
fn method_body(body: &str) -> Vec<Statement> {
    let source = format!("package p;\nclass T {{\n  void m() {{\n{body}\n  }}\n}}\n");
    let tree = parse(&source);
    match member(class(&tree, 0), "m") {
        ObjectMember::Method(method) => method.block.clone().expect("method body").nodes,
        other => panic!("expected a method, got {other:?}"),
    }
}

fn first_statement(body: &str) -> Statement {
    method_body(body).into_iter().next().expect("at least one statement")
}

// =============================================================================
// Files, packages and imports
// =============================================================================

#[test]
fn test_package_and_imports() {
    let tree = parse(
        "package com.example.app;\n\
         import java.util.List;\n\
         import static java.lang.Math.max;\n\
         import java.io.*;\n\
         import a.b.{ C, D };\n",
    );

    let package = tree.package.as_ref().expect("package");
    assert_eq!(package.path(), "com.example.app");

    let imports: Vec<&Import> = tree.imports().collect();
    assert_eq!(imports.len(), 4);

    assert_eq!(imports[0].paths, vec!["java", "util", "List"]);
    assert_eq!(imports[0].default_import.as_deref(), Some("List"));

    assert!(imports[1].is_static);
    assert_eq!(
        imports[1].default_import.as_deref(),
        Some("Math"),
        "a static import makes its class available"
    );

    assert!(imports[2].is_wildcard);
    assert_eq!(imports[2].paths, vec!["java", "io"]);
    assert_eq!(imports[2].default_import, None);

    assert_eq!(imports[3].non_default_imports, vec!["C", "D"]);
    assert_eq!(imports[3].default_import, None);
}

#[test]
fn test_static_non_default_import_is_rejected() {
    let error = parse_error("import static a.b.{ C };");
    assert!(error.contains("Non-default imports cannot be static"), "{error}");
}

#[test]
fn test_package_must_be_terminated_on_its_line() {
    let error = parse_error("package a.b\nclass X {}");
    assert!(error.starts_with("Line 2"), "{error}");
}

#[test]
fn test_empty_file() {
    let tree = parse("");
    assert!(tree.package.is_none());
    assert!(tree.nodes.is_empty());
}

#[test]
fn test_comments_are_skipped_everywhere() {
    let tree = parse(
        "// leading\n\
         package p; /* trailing */\n\
         /**\n * Docs\n */\n\
         class A {\n\
           // field\n\
           int x = 1; // after\n\
           void m() { /* inline */ x = 2; }\n\
         }\n",
    );
    let class = class(&tree, 0);
    assert_eq!(class.members.len(), 2);
}

#[test]
fn test_unterminated_block_comment() {
    let error = parse_error("package p;\n/* never closed\nclass A {}");
    assert!(error.contains("Unterminated block comment"), "{error}");
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn test_class_structure() {
    let tree = parse(
        "package p;\n\
         public abstract class Shape<T> extends Base implements Comparable<Shape>, Named {\n\
           private static int count = 0;\n\
           protected final String name;\n\
           public Shape(String name) { this.name = name; }\n\
           public abstract double area();\n\
           static { count = 1; }\n\
           { count++; }\n\
           public <R> R map(Function<T, R> f) { return null; }\n\
         }\n",
    );
    let shape = class(&tree, 0);

    assert_eq!(shape.name, "Shape");
    assert_eq!(shape.generic_parameters, vec!["T"]);
    assert_eq!(shape.modifiers.access, AccessModifier::Public);
    assert!(shape.modifiers.is_abstract);
    assert_eq!(shape.extended.len(), 1);
    assert_eq!(shape.extended[0].name(), "Base");

    let implemented: Vec<&str> = shape.implemented.iter().map(JavaType::name).collect();
    assert_eq!(implemented, vec!["Comparable", "Named"]);
    assert_eq!(shape.implemented[0].generic_types[0].name(), "Shape");

    assert_eq!(shape.constructors.len(), 1);
    let constructor = &shape.constructors[0];
    assert!(constructor.is_constructor);
    assert!(constructor.ty.is_none(), "constructors have no return type");
    assert_eq!(constructor.parameters[0].name, "name");

    match member(shape, "count") {
        ObjectMember::Field(field) => {
            assert_eq!(field.modifiers.access, AccessModifier::Private);
            assert!(field.modifiers.is_static);
            assert!(field.value.is_some());
        }
        other => panic!("expected a field, got {other:?}"),
    }
    match member(shape, "name") {
        ObjectMember::Field(field) => {
            assert_eq!(field.modifiers.access, AccessModifier::Protected);
            assert!(field.modifiers.is_final);
            assert!(field.value.is_none());
        }
        other => panic!("expected a field, got {other:?}"),
    }
    match member(shape, "area") {
        ObjectMember::Method(method) => {
            assert!(method.modifiers.is_abstract);
            assert!(method.block.is_none(), "abstract methods have no body");
        }
        other => panic!("expected a method, got {other:?}"),
    }
    match member(shape, "map") {
        ObjectMember::Method(method) => {
            assert_eq!(method.generic_parameters.len(), 1);
            assert_eq!(method.ty.as_ref().map(JavaType::name), Some("R"));
            assert_eq!(method.parameters[0].ty.generic_types.len(), 2);
        }
        other => panic!("expected a method, got {other:?}"),
    }

    assert_eq!(shape.static_initializers.len(), 1);
    assert_eq!(shape.instance_initializers.len(), 1);
}

#[test]
fn test_class_cannot_extend_two_classes() {
    let error = parse_error("class A extends B, C {}");
    assert!(
        error.contains("Derived class 'A' cannot extend 2 base classes"),
        "{error}"
    );
}

#[test]
fn test_interface() {
    let tree = parse(
        "package p;\n\
         @Deprecated\n\
         public interface Shape extends Named, Sized {\n\
           double area();\n\
           String NAME = \"shape\";\n\
         }\n",
    );
    let TopLevelNode::Interface(interface) = &tree.nodes[0] else {
        panic!("expected an interface, got {:?}", tree.nodes[0]);
    };
    assert_eq!(interface.name, "Shape");
    assert_eq!(interface.extended.len(), 2);
    assert_eq!(interface.members.len(), 2);
    assert_eq!(interface.annotations.len(), 1);
    assert_eq!(interface.annotations[0].name, "Deprecated");
}

#[test]
fn test_interface_cannot_have_constructors() {
    let error = parse_error("interface I { I() {} }");
    assert!(
        error.contains("Interface 'I' cannot have constructors or initializers"),
        "{error}"
    );
}

#[test]
fn test_enum_constants_become_static_fields() {
    let tree = parse("package p;\nenum Color { RED, GREEN(2); private int shade; }");
    let color = class(&tree, 0);
    assert!(color.is_enum);
    assert_eq!(color.members.len(), 3);

    let ObjectMember::Field(green) = member(color, "GREEN") else {
        panic!("expected GREEN to be a field");
    };
    assert!(green.modifiers.is_static && green.modifiers.is_final);
    assert_eq!(green.modifiers.access, AccessModifier::Public);
    assert_eq!(green.ty.name(), "Color");
    let value = green.value.as_ref().expect("constant value");
    let Some(StatementNode::Instantiation(instantiation)) = value.left() else {
        panic!("expected an instantiation, got {value:?}");
    };
    assert_eq!(instantiation.constructor.name(), "Color");
    assert_eq!(instantiation.arguments.len(), 1);
}

#[test]
fn test_enum_trailing_comma() {
    let tree = parse("enum Day { MON, TUE, }");
    assert_eq!(class(&tree, 0).members.len(), 2);
}

#[test]
fn test_nested_class_and_annotations() {
    let tree = parse(
        "class Outer {\n\
           @Override\n\
           public String toString() { return \"outer\"; }\n\
           static class Inner { int x; }\n\
         }\n",
    );
    let outer = class(&tree, 0);
    let ObjectMember::Method(to_string) = member(outer, "toString") else {
        panic!("expected toString to be a method");
    };
    assert_eq!(to_string.annotations.len(), 1);
    let ObjectMember::Class(inner) = member(outer, "Inner") else {
        panic!("expected Inner to be a class");
    };
    assert!(inner.modifiers.is_static);
    assert_eq!(inner.members.len(), 1);
}

#[test]
fn test_method_throws_and_varargs() {
    let tree = parse("class A { void run(String... args) throws IOException, Error { } }");
    let ObjectMember::Method(run) = member(class(&tree, 0), "run") else {
        panic!("expected run to be a method");
    };
    assert!(run.parameters[0].is_variadic);
    assert_eq!(run.throws.len(), 2);
}

#[test]
fn test_initializer_cannot_be_annotated() {
    let error = parse_error("class A { @Foo { } }");
    assert!(error.contains("Initializer blocks cannot have annotations"), "{error}");
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_local_declarations() {
    let statements = method_body(
        "    int count = 0;\n\
             List<String> names = null;\n\
             int[] values = new int[] { 1, 2 };\n\
             java.util.Map<String, Integer> map = null;",
    );
    assert_eq!(statements.len(), 4);

    let declaration = |statement: &Statement| match statement.left() {
        Some(StatementNode::VariableDeclaration(declaration)) => declaration.clone(),
        other => panic!("expected a declaration, got {other:?}"),
    };

    assert_eq!(declaration(&statements[0]).name, "count");
    assert_eq!(statements[0].operation(), Some(Operator::Assign));

    let names = declaration(&statements[1]);
    assert_eq!(names.ty.generic_types[0].name(), "String");

    let values = declaration(&statements[2]);
    assert_eq!(values.ty.array_dimensions, 1);
    let Some(StatementNode::Instantiation(allocation)) = statements[2].right().and_then(Statement::left)
    else {
        panic!("expected an instantiation");
    };
    assert_eq!(
        allocation.array_literal.as_ref().map(|literal| literal.elements.len()),
        Some(2)
    );

    let map = declaration(&statements[3]);
    assert_eq!(map.ty.namespace_chain, vec!["java", "util", "Map"]);
    assert_eq!(map.ty.generic_types.len(), 2);
    assert_eq!(map.name, "map");
}

#[test]
fn test_property_chain() {
    let statement = first_statement("items[0].run(a, b).name;");
    let Some(StatementNode::PropertyChain(chain)) = statement.left() else {
        panic!("expected a property chain, got {statement:?}");
    };
    assert_eq!(chain.properties.len(), 4);
    assert!(matches!(&chain.properties[0], Property::Reference(r) if r.name == "items"));
    assert!(matches!(&chain.properties[1], Property::Index(_)));
    assert!(matches!(&chain.properties[2], Property::Call(call) if call.arguments.len() == 2));
    assert!(matches!(&chain.properties[3], Property::Reference(r) if r.name == "name"));
}

#[test]
fn test_chained_calls_on_results() {
    let statement = first_statement("make()();");
    let Some(StatementNode::PropertyChain(chain)) = statement.left() else {
        panic!("expected a property chain, got {statement:?}");
    };
    assert_eq!(chain.properties.len(), 2);
    assert!(matches!(&chain.properties[1], Property::Call(call) if call.name.is_none()));
}

#[test]
fn test_instantiation_forms() {
    let statements = method_body(
        "    new Point(1, 2);\n\
             new int[5];\n\
             new Runnable() { public void run() {} };",
    );
    let instantiation = |statement: &Statement| match statement.left() {
        Some(StatementNode::Instantiation(instantiation)) => instantiation.clone(),
        other => panic!("expected an instantiation, got {other:?}"),
    };
    assert_eq!(instantiation(&statements[0]).arguments.len(), 2);
    assert!(instantiation(&statements[1]).array_allocation_size.is_some());
    let body = instantiation(&statements[2])
        .anonymous_object_body
        .expect("anonymous body");
    assert_eq!(body.members.len(), 1);
}

#[test]
fn test_lambdas() {
    let statements = method_body(
        "    run(() -> done());\n\
             f = (a, b) -> a + b;\n\
             g = x -> { return x; };",
    );
    assert_eq!(statements.len(), 3);

    let Some(StatementNode::Lambda(pair)) = statements[1].right().and_then(Statement::left) else {
        panic!("expected a lambda, got {:?}", statements[1]);
    };
    assert_eq!(pair.parameters.len(), 2);
    assert!(matches!(pair.body, LambdaBody::Statement(_)));

    let Some(StatementNode::Lambda(single)) = statements[2].right().and_then(Statement::left) else {
        panic!("expected a lambda, got {:?}", statements[2]);
    };
    assert_eq!(single.parameters[0].name(), "x");
    assert!(matches!(single.body, LambdaBody::Block(_)));
}

#[test]
fn test_literals() {
    let statements = method_body(
        "    a = 0xFF;\n\
             b = 1.5f;\n\
             c = \"say \\\"hi\\\"\";\n\
             d = 'x';\n\
             e = true;",
    );
    let literal = |statement: &Statement| match statement.right().and_then(Statement::left) {
        Some(StatementNode::Literal(literal)) => literal.clone(),
        other => panic!("expected a literal, got {other:?}"),
    };
    assert_eq!(literal(&statements[0]).value, "0xFF");
    assert_eq!(literal(&statements[1]).value, "1.5", "type suffixes are dropped");
    assert_eq!(literal(&statements[2]).kind, LiteralKind::String);
    assert_eq!(literal(&statements[2]).value, "\"say \\\"hi\\\"\"");
    assert_eq!(literal(&statements[3]).value, "'x'");
    assert_eq!(literal(&statements[4]).kind, LiteralKind::Keyword);
}

#[test]
fn test_multiline_string_is_rejected() {
    let error = parse_error("class A { void m() { s = \"open\n\"; } }");
    assert!(error.contains("String literals must be single-line only"), "{error}");
}

#[test]
fn test_invalid_number_suffix() {
    let error = parse_error("class A { void m() { n = 12abc; } }");
    assert!(error.contains("Invalid number literal"), "{error}");
}

#[test]
fn test_instructions_and_assertions() {
    let statements = method_body(
        "    assert ready : \"not ready\";\n\
             throw new Error();\n\
             return;",
    );
    let Some(StatementNode::Assertion(assertion)) = statements[0].left() else {
        panic!("expected an assertion, got {:?}", statements[0]);
    };
    assert!(assertion.message.is_some());

    let Some(StatementNode::Instruction(throw)) = statements[1].left() else {
        panic!("expected an instruction");
    };
    assert_eq!(throw.kind, InstructionKind::Throw);
    assert!(throw.value.is_some());

    let Some(StatementNode::Instruction(ret)) = statements[2].left() else {
        panic!("expected an instruction");
    };
    assert_eq!(ret.kind, InstructionKind::Return);
    assert!(ret.value.is_none());
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_if_else_chain() {
    let statement = first_statement(
        "    if (a) { x(); } else if (b) y(); else { z(); }",
    );
    let Some(StatementNode::IfElse(if_else)) = statement.left() else {
        panic!("expected if/else, got {statement:?}");
    };
    assert_eq!(if_else.conditions.len(), 2);
    assert_eq!(if_else.blocks.len(), 3);
    assert!(if_else.else_block().is_some());
}

#[test]
fn test_for_loops() {
    let statements = method_body(
        "    for (int i = 0; i < n; i++) { sum += i; }\n\
             for (String s : names) print(s);\n\
             for (;;) { break; }",
    );
    assert_eq!(statements.len(), 3);

    let Some(StatementNode::ForLoop(classic)) = statements[0].left() else {
        panic!("expected a for loop");
    };
    assert!(!classic.is_enhanced);
    assert!(classic.initialization.is_some() && classic.condition.is_some() && classic.increment.is_some());

    let Some(StatementNode::ForLoop(enhanced)) = statements[1].left() else {
        panic!("expected a for loop");
    };
    assert!(enhanced.is_enhanced);
    assert!(enhanced.iterable.is_some());
    assert_eq!(enhanced.block.nodes.len(), 1);

    let Some(StatementNode::ForLoop(forever)) = statements[2].left() else {
        panic!("expected a for loop");
    };
    assert!(forever.initialization.is_none() && forever.condition.is_none());
}

#[test]
fn test_while_and_do_while() {
    let statements = method_body(
        "    while (running) { step(); }\n\
             do { step(); } while (running);",
    );
    assert!(matches!(statements[0].left(), Some(StatementNode::WhileLoop(_))));
    assert!(matches!(statements[1].left(), Some(StatementNode::DoWhileLoop(_))));
}

#[test]
fn test_switch() {
    let statement = first_statement(
        "    switch (day) {\n\
               case 1:\n\
               case 2: work(); break;\n\
               case 3: { rest(); }\n\
               default: sleep();\n\
             }",
    );
    let Some(StatementNode::Switch(switch)) = statement.left() else {
        panic!("expected a switch, got {statement:?}");
    };
    assert_eq!(switch.cases.len(), 3);
    assert!(switch.blocks[0].nodes.is_empty(), "case 1 falls through");
    assert_eq!(switch.blocks[1].nodes.len(), 2);
    assert_eq!(switch.blocks[2].nodes.len(), 1, "braced groups are flattened");
    assert!(switch.default_block.is_some());
}

#[test]
fn test_try_catch_finally() {
    let statement = first_statement(
        "    try { open(); } catch (IOException | RuntimeException e) { log(e); } finally { close(); }",
    );
    let Some(StatementNode::TryCatch(try_catch)) = statement.left() else {
        panic!("expected try/catch, got {statement:?}");
    };
    assert_eq!(try_catch.exception_sets[0].len(), 2);
    assert_eq!(try_catch.exception_references[0].name, "e");
    assert!(try_catch.finally_block.is_some());
}

#[test]
fn test_try_requires_handler() {
    let error = parse_error("class A { void m() { try { x(); } y(); } }");
    assert!(error.contains("Invalid missing catch block"), "{error}");
}

// =============================================================================
// Errors and determinism
// =============================================================================

#[test]
fn test_error_reports_line() {
    let error = parse_error("package p;\n\nclass A {\n  int x = ;\n}");
    assert!(error.starts_with("Line 4"), "{error}");
}

#[test]
fn test_tokenize_error_surfaces() {
    let error = parse_java("class A {}\n\u{0}").expect_err("NUL is not a token");
    assert!(matches!(error, crate::SourceError::Tokenize(_)));
    assert_eq!(error.line(), 2);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "package p;\nclass A extends B {\n  int f(int x) { return x * 2 + 1; }\n}\n";
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first.package, second.package);
    assert_eq!(first.nodes, second.nodes);
}
