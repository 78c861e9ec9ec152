use super::*;

#[test]
fn test_lookup_walks_outward() {
    let mut scopes = ScopeManager::new();
    scopes.enter();
    scopes.add_to_scope(ScopedReference::new("outer", TypeConstraint::dynamic()));
    scopes.enter();
    scopes.add_to_scope(ScopedReference::new("inner", TypeConstraint::dynamic()));

    assert!(scopes.get_scoped_reference("outer").is_some());
    assert!(scopes.get_scoped_reference("inner").is_some());
    assert_eq!(scopes.depth(), 2);
}

#[test]
fn test_exited_scope_is_discarded() {
    let mut scopes = ScopeManager::new();
    scopes.enter();
    scopes.enter();
    scopes.add_to_scope(ScopedReference::new("temporary", TypeConstraint::dynamic()));
    scopes.exit();

    assert!(scopes.get_scoped_reference("temporary").is_none());
    scopes.enter();
    assert!(
        scopes.get_scoped_reference("temporary").is_none(),
        "re-entering must not revive old references"
    );
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let mut scopes = ScopeManager::new();
    scopes.enter();
    scopes.add_to_scope(ScopedReference::new("value", TypeConstraint::dynamic()).constant());
    scopes.enter();
    scopes.add_to_scope(ScopedReference::new("value", TypeConstraint::dynamic()));

    let found = scopes.get_scoped_reference("value").map(|reference| reference.is_constant);
    assert_eq!(found, Some(false));
    scopes.exit();
    let found = scopes.get_scoped_reference("value").map(|reference| reference.is_constant);
    assert_eq!(found, Some(true));
}

#[test]
fn test_add_outside_any_scope_is_ignored() {
    let mut scopes = ScopeManager::new();
    scopes.add_to_scope(ScopedReference::new("lost", TypeConstraint::dynamic()));
    assert!(scopes.get_scoped_reference("lost").is_none());
}
