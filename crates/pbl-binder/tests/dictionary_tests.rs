use super::*;
use crate::native::install_native_types;
use crate::types::{ObjectCategory, ObjectMember, Visibility};

fn object_symbol(dictionary: &mut SymbolDictionary, identifier: &str, name: &str) -> ObjectId {
    let id = dictionary.add_object(ObjectType::new(name, ObjectCategory::Class));
    dictionary.add_symbol(Symbol::new(identifier, name, TypeConstraint::original(TypeDefinition::Object(id))));
    id
}

fn candidates(identifiers: &[&str]) -> Vec<String> {
    identifiers.iter().map(|identifier| identifier.to_string()).collect()
}

#[test]
fn test_first_defined_candidate_wins() {
    let mut dictionary = SymbolDictionary::new();
    let outer = object_symbol(&mut dictionary, "f:X", "X");
    let inner = object_symbol(&mut dictionary, "f:A.X", "X");

    let symbol = dictionary.get_first_defined_symbol(&candidates(&["f:A.B.X", "f:A.X", "f:X"]));
    assert_eq!(symbol.identifier, "f:A.X");
    assert_eq!(symbol.constraint.definition, TypeDefinition::Object(inner));
    assert_ne!(inner, outer);
}

#[test]
fn test_undefined_candidates_fall_back_to_dynamic() {
    let dictionary = SymbolDictionary::new();
    let symbol = dictionary.get_first_defined_symbol(&candidates(&["f:Missing"]));
    assert!(symbol.constraint.is_dynamic());
    assert!(dictionary.lookup_first(&candidates(&["f:Missing"])).is_none());

    let resolved = dictionary.resolve(&TypeConstraint::unresolved(candidates(&["f:Missing"])));
    assert!(resolved.is_dynamic());
}

#[test]
fn test_resolution_sees_symbols_added_later() {
    let mut dictionary = SymbolDictionary::new();
    let reference = TypeConstraint::unresolved(candidates(&["f:Later"]));
    assert!(dictionary.resolve(&reference).is_dynamic(), "not defined yet");

    let id = object_symbol(&mut dictionary, "f:Later", "Later");
    let resolved = dictionary.resolve(&reference);
    assert_eq!(resolved.definition, TypeDefinition::Object(id));
    assert!(!resolved.is_original, "a reference stands for a value of the type");
}

#[test]
fn test_resolution_follows_aliases() {
    let mut dictionary = SymbolDictionary::new();
    let id = object_symbol(&mut dictionary, "f:Target", "Target");
    dictionary.add_symbol(Symbol::new("g:Alias", "Alias", TypeConstraint::unresolved(candidates(&["f:Target"]))));

    let resolved = dictionary.resolve(&TypeConstraint::unresolved(candidates(&["g:Alias"])));
    assert_eq!(resolved.definition, TypeDefinition::Object(id));
}

#[test]
fn test_self_referencing_alias_gives_up() {
    let mut dictionary = SymbolDictionary::new();
    dictionary.add_symbol(Symbol::new("f:Loop", "Loop", TypeConstraint::unresolved(candidates(&["f:Loop"]))));
    let resolved = dictionary.resolve(&TypeConstraint::unresolved(candidates(&["f:Loop"])));
    assert!(resolved.is_dynamic());
}

#[test]
fn test_members_are_found_on_supertypes() {
    let mut dictionary = SymbolDictionary::new();
    let base = object_symbol(&mut dictionary, "f:Base", "Base");
    let derived = object_symbol(&mut dictionary, "f:Derived", "Derived");
    let mut member = ObjectMember::new("count", TypeConstraint::simple(SimpleType::Number), base);
    member.visibility = Visibility::Derived;
    dictionary.object_mut(base).add_member(member);
    dictionary
        .object_mut(derived)
        .add_supertype(TypeConstraint::unresolved(candidates(&["f:Base"])));

    let found = dictionary.object_member(derived, "count").expect("inherited member");
    assert_eq!(found.parent, base);
    assert!(dictionary.object_member(derived, "missing").is_none());
    assert_eq!(dictionary.all_supertypes(derived), vec![base]);
}

#[test]
fn test_cyclic_supertypes_terminate() {
    let mut dictionary = SymbolDictionary::new();
    let a = object_symbol(&mut dictionary, "f:A", "A");
    let b = object_symbol(&mut dictionary, "f:B", "B");
    dictionary.object_mut(a).add_supertype(TypeConstraint::unresolved(candidates(&["f:B"])));
    dictionary.object_mut(b).add_supertype(TypeConstraint::unresolved(candidates(&["f:A"])));

    assert_eq!(dictionary.all_supertypes(a), vec![b]);
    assert!(dictionary.object_member(a, "nothing").is_none());
}

#[test]
fn test_type_names() {
    let mut dictionary = SymbolDictionary::new();
    let natives = install_native_types(&mut dictionary);
    let point = object_symbol(&mut dictionary, "f:Point", "Point");

    assert_eq!(dictionary.type_name(&natives.number), "Number");
    assert_eq!(dictionary.type_name(&natives.dynamic), "dynamic");
    assert_eq!(
        dictionary.type_name(&TypeConstraint::array_of(TypeConstraint::new(TypeDefinition::Object(point)))),
        "Point[]"
    );
    assert_eq!(
        dictionary.type_name(&TypeConstraint::unresolved(candidates(&["f:Point"]))),
        "Point"
    );

    let char_at = dictionary
        .object(natives.string_object)
        .own_member("charAt")
        .expect("charAt")
        .constraint
        .clone();
    assert_eq!(dictionary.type_name(&char_at), "(Number) => String");
}

#[test]
fn test_native_globals_are_dynamic() {
    let mut dictionary = SymbolDictionary::new();
    let natives = install_native_types(&mut dictionary);
    for global in ["console", "window", "System", "Math"] {
        let symbol = dictionary.get_symbol(global).expect("global installed");
        assert!(symbol.constraint.is_dynamic(), "{global} should be dynamic");
    }
    assert_eq!(natives.java_type("int"), Some(natives.number.clone()));
    assert_eq!(natives.java_type("char"), Some(natives.string.clone()));
    assert_eq!(natives.java_type("Object"), Some(natives.dynamic.clone()));
    assert_eq!(natives.java_type("Point"), None);
    assert_eq!(natives.boxed_object(SimpleType::String), Some(natives.string_object));
    assert_eq!(natives.boxed_object(SimpleType::Boolean), None);
}
