//! Native types.
//!
//! [`install_native_types`] registers the built-in object types and host
//! globals in a dictionary and returns the handles later phases need. It is
//! called once per dictionary; nothing here relies on static state.

use crate::dictionary::{Symbol, SymbolDictionary};
use crate::types::{
    FunctionId, FunctionType, ObjectCategory, ObjectId, ObjectMember, ObjectType, SimpleType, TypeConstraint,
    TypeDefinition,
};

/// Names resolving to the dynamic type wherever a value is expected.
pub const DYNAMIC_GLOBALS: &[&str] = &[
    "console",
    "document",
    "window",
    "global",
    "System",
    "Math",
    "Integer",
    "Double",
    "Long",
    "Boolean",
    "Character",
    "String",
    "Object",
    "Exception",
    "RuntimeException",
    "Thread",
];

#[derive(Clone, Debug)]
pub struct NativeTypes {
    pub string: TypeConstraint,
    pub number: TypeConstraint,
    pub boolean: TypeConstraint,
    pub object: TypeConstraint,
    pub null: TypeConstraint,
    pub dynamic: TypeConstraint,
    pub void: TypeConstraint,
    /// Members available on string values.
    pub string_object: ObjectId,
    /// Members available on number values.
    pub number_object: ObjectId,
}

impl NativeTypes {
    /// The constraint for a built-in Java type name.
    #[must_use]
    pub fn java_type(&self, name: &str) -> Option<TypeConstraint> {
        let constraint = match name {
            "String" | "char" | "Character" => &self.string,
            "int" | "Integer" | "Number" | "float" | "Float" | "double" | "Double" | "long" | "Long"
            | "short" | "Short" | "byte" | "Byte" => &self.number,
            "boolean" | "Boolean" => &self.boolean,
            "Object" => &self.dynamic,
            "void" => &self.void,
            _ => return None,
        };
        Some(constraint.clone())
    }

    /// The object type whose members a simple value exposes, if any.
    #[must_use]
    pub const fn boxed_object(&self, simple: SimpleType) -> Option<ObjectId> {
        match simple {
            SimpleType::String => Some(self.string_object),
            SimpleType::Number => Some(self.number_object),
            _ => None,
        }
    }
}

/// Register native object types and host globals in `dictionary`.
pub fn install_native_types(dictionary: &mut SymbolDictionary) -> NativeTypes {
    let string = TypeConstraint::simple(SimpleType::String);
    let number = TypeConstraint::simple(SimpleType::Number);

    let string_object = dictionary.add_object(ObjectType::new("String", ObjectCategory::Class));
    let string_constructor = dictionary.add_function(FunctionType::new("String", vec![string.clone()], string.clone()));
    let length = dictionary.add_function(FunctionType::new("length", Vec::new(), number.clone()));
    let char_at = dictionary.add_function(FunctionType::new("charAt", vec![number.clone()], string.clone()));
    {
        let object = dictionary.object_mut(string_object);
        object.is_extensible = false;
        object.add_constructor(string_constructor);
        object.add_member(method("length", length, string_object));
        object.add_member(method("charAt", char_at, string_object));
    }

    let number_object = dictionary.add_object(ObjectType::new("Number", ObjectCategory::Class));
    let number_constructor = dictionary.add_function(FunctionType::new("Number", vec![number.clone()], number.clone()));
    let to_string = dictionary.add_function(FunctionType::new("toString", Vec::new(), string.clone()));
    {
        let object = dictionary.object_mut(number_object);
        object.is_extensible = false;
        object.add_constructor(number_constructor);
        object.add_member(method("toString", to_string, number_object));
    }

    for global in DYNAMIC_GLOBALS {
        dictionary.add_symbol(Symbol::new(*global, *global, TypeConstraint::dynamic()));
    }

    NativeTypes {
        string,
        number,
        boolean: TypeConstraint::simple(SimpleType::Boolean),
        object: TypeConstraint::simple(SimpleType::Object),
        null: TypeConstraint::simple(SimpleType::Null),
        dynamic: TypeConstraint::dynamic(),
        void: TypeConstraint::simple(SimpleType::Void),
        string_object,
        number_object,
    }
}

fn method(name: &str, function: FunctionId, parent: ObjectId) -> ObjectMember {
    ObjectMember::new(name, TypeConstraint::new(TypeDefinition::Function(function)), parent)
}
