use super::*;
use pbl_binder::{ObjectCategory, ObjectType, SymbolDictionary, TypeConstraint};

struct Fixture {
    dictionary: SymbolDictionary,
    base: ObjectId,
    derived: ObjectId,
    other: ObjectId,
}

fn fixture() -> Fixture {
    let mut dictionary = SymbolDictionary::new();
    let base = dictionary.add_object(ObjectType::new("Base", ObjectCategory::Class));
    let mut derived = ObjectType::new("Derived", ObjectCategory::Class);
    derived.add_supertype(TypeConstraint::new(pbl_binder::TypeDefinition::Object(base)));
    let derived = dictionary.add_object(derived);
    let other = dictionary.add_object(ObjectType::new("Other", ObjectCategory::Class));
    Fixture {
        dictionary,
        base,
        derived,
        other,
    }
}

fn member(visibility: Visibility, parent: ObjectId) -> ObjectMember {
    let mut member = ObjectMember::new("secret", TypeConstraint::dynamic(), parent);
    member.visibility = visibility;
    member
}

#[test]
fn test_public_members_are_always_accessible() {
    let fixture = fixture();
    let matcher = TypeMatcher::new(&fixture.dictionary);
    let visitor = ObjectVisitor::new();
    assert_eq!(visitor.access(&matcher, &member(Visibility::All, fixture.base)), Access::Allowed);
}

#[test]
fn test_private_members_need_the_declaring_type() {
    let fixture = fixture();
    let matcher = TypeMatcher::new(&fixture.dictionary);
    let private = member(Visibility::SelfOnly, fixture.base);

    let mut visitor = ObjectVisitor::new();
    visitor.visit(fixture.derived);
    assert_eq!(visitor.access(&matcher, &private), Access::Private, "subtypes do not see private members");

    visitor.visit(fixture.base);
    assert_eq!(visitor.access(&matcher, &private), Access::Allowed);
}

#[test]
fn test_protected_members_need_a_subtype() {
    let fixture = fixture();
    let matcher = TypeMatcher::new(&fixture.dictionary);
    let protected = member(Visibility::Derived, fixture.base);

    let mut visitor = ObjectVisitor::new();
    visitor.visit(fixture.other);
    assert_eq!(visitor.access(&matcher, &protected), Access::Protected);

    visitor.leave();
    visitor.visit(fixture.derived);
    assert_eq!(visitor.access(&matcher, &protected), Access::Allowed);
}

#[test]
fn test_stack_order() {
    let fixture = fixture();
    let mut visitor = ObjectVisitor::new();
    assert_eq!(visitor.current(), None);
    visitor.visit(fixture.base);
    visitor.visit(fixture.other);
    assert_eq!(visitor.current(), Some(fixture.other));
    assert_eq!(visitor.innermost_first().collect::<Vec<_>>(), vec![fixture.other, fixture.base]);
    visitor.leave();
    assert_eq!(visitor.current(), Some(fixture.base));
    assert!(!visitor.is_inside(fixture.other));
}
