//! Symbol resolution for the polybabel compiler.
//!
//! This crate provides:
//! - `types` - Type constraints, object/function/array definitions and members
//! - `SymbolDictionary` - Identifier to symbol map owning the type arenas
//! - `install_native_types` - Built-in object types and host globals
//! - `FileNamespace` - Per-file symbol identifiers and candidate lists
//! - `resolve_java` - Registers the declarations of a Java syntax tree

pub mod types;
pub use types::{
    ArrayType, FunctionId, FunctionType, ObjectCategory, ObjectId, ObjectMember, ObjectType,
    SimpleType, TypeConstraint, TypeDefinition, Visibility, overload_name,
};

pub mod dictionary;
pub use dictionary::{Symbol, SymbolDictionary};

pub mod native;
pub use native::{NativeTypes, install_native_types};

pub mod namespace;
pub use namespace::FileNamespace;

pub mod resolver;
pub use resolver::{JavaResolver, resolve_java, resolve_java_type, stored_method_names, visibility_of};
