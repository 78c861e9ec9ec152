use super::*;
use crate::test_support::{FILE, resolve};
use crate::validate_java;
use pbl_common::diagnostics::diagnostic_codes;
use pbl_parser::TopLevelNode;
use pbl_parser::syntax::{ObjectMember, Statement};

fn first_field_value(tree: &JavaSyntaxTree) -> &Statement {
    let Some(TopLevelNode::Class(class)) = tree.nodes.first() else {
        panic!("expected a class");
    };
    let Some(ObjectMember::Field(field)) = class.members.first() else {
        panic!("expected a field");
    };
    field.value.as_ref().unwrap_or_else(|| panic!("field without value"))
}

#[test]
fn test_unknown_reference_falls_back_to_dynamic() {
    let resolved = resolve("package app;\nclass A { int y = foo; }\n");
    let mut context = ValidatorContext::new(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);

    let value = first_field_value(&resolved.tree);
    let constraint = context
        .statement_type(value)
        .unwrap_or_else(|halt| panic!("unexpected halt: {halt}"));

    assert!(constraint.is_dynamic());
    let diagnostics = context.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::UNKNOWN_IDENTIFIER);
    assert_eq!(diagnostics[0].file, FILE);
    assert_eq!(diagnostics[0].line, Some(2));
}

#[test]
fn test_with_flags_restores_previous_flags() {
    let resolved = resolve("package app;\nclass A { }\n");
    let mut context = ValidatorContext::new(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);
    context.flags = ValidatorFlags::ALLOW_INSTANCE_KEYWORDS;

    let inside = context.with_flags(ValidatorFlags::MAY_RETURN, ValidatorFlags::all(), |ctx| ctx.flags);
    assert_eq!(inside, ValidatorFlags::MAY_RETURN);
    assert_eq!(context.flags, ValidatorFlags::ALLOW_INSTANCE_KEYWORDS);
}

#[test]
fn test_with_scope_discards_locals() {
    let resolved = resolve("package app;\nclass A { }\n");
    let mut context = ValidatorContext::new(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);

    let depth = context.scope.depth();
    context.with_scope(|ctx| {
        ctx.scope
            .add_to_scope(crate::ScopedReference::new("local", resolved.natives.number.clone()));
        assert!(ctx.scope.get_scoped_reference("local").is_some());
    });
    assert_eq!(context.scope.depth(), depth);
    assert!(context.scope.get_scoped_reference("local").is_none());
}

#[test]
fn test_halt_is_recorded_once() {
    let resolved = resolve("package app;\nclass A { }\n");
    let mut context = ValidatorContext::new(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);
    let token = resolved.tree.tokens.first_text();

    let result: Option<()> = context.validate_node_with(|ctx| {
        Err(ctx.halt(token, diagnostic_codes::INVALID_EXPRESSION, "Invalid expression".to_string()))
    });

    assert!(result.is_none());
    assert_eq!(context.diagnostics().len(), 1);
    assert_eq!(context.diagnostics()[0].code, diagnostic_codes::INVALID_EXPRESSION);
}

#[test]
fn test_declared_object_uses_namespace() {
    let resolved = resolve("package app;\nclass Outer { static class Inner { } }\n");
    let mut context = ValidatorContext::new(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);

    let outer = context
        .declared_object("Outer")
        .unwrap_or_else(|| panic!("Outer is declared"));
    assert!(context.declared_object("Inner").is_none(), "Inner is only visible inside Outer");
    let inner = context.within_object(outer, "Outer", &[], |ctx| ctx.declared_object("Inner"));
    assert!(inner.is_some());
    assert!(context.objects.current().is_none());
}

#[test]
fn test_resolution_getters() {
    let resolved = resolve(
        "package app;\nclass P { P(int n) { } }\nclass A { P make() { return new P(1); } }\n",
    );
    let output = validate_java(FILE, &resolved.tree, &resolved.dictionary, &resolved.natives);
    assert!(!output.has_errors());

    let (token, index) = output
        .resolutions
        .constructor_indices
        .iter()
        .next()
        .map(|(token, index)| (*token, *index))
        .unwrap_or_else(|| panic!("no constructor recorded"));
    assert_eq!(index, 0);
    assert_eq!(output.resolutions.constructor_index(token), Some(0));
    assert_eq!(output.resolutions.call_name(token), None);
    assert_eq!(output.resolutions.qualifier(token), None);
}
