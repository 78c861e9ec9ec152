//! Type model.
//!
//! Object and function types live in arenas owned by the
//! [`SymbolDictionary`](crate::SymbolDictionary) and are referred to by ID,
//! so type graphs (a class whose method returns the class itself, mutual
//! supertypes across files) never need back-pointers. Arrays are structural
//! and stored inline.
//!
//! References to types that may not exist yet are kept as
//! [`TypeDefinition::Unresolved`]: an ordered list of candidate symbol
//! identifiers that the dictionary resolves on first read.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

// =============================================================================
// IDs
// =============================================================================

/// Index of an [`ObjectType`] in its dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Index of a [`FunctionType`] in its dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

// =============================================================================
// Definitions and constraints
// =============================================================================

/// Primitive, dynamic and void tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleType {
    String,
    Number,
    Boolean,
    Object,
    Null,
    /// Matches anything; used for host globals and anything unresolvable.
    Dynamic,
    Void,
}

impl SimpleType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Object => "Object",
            Self::Null => "null",
            Self::Dynamic => "dynamic",
            Self::Void => "void",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub element: TypeConstraint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDefinition {
    Simple(SimpleType),
    Object(ObjectId),
    Function(FunctionId),
    Array(Box<ArrayType>),
    /// Candidate symbol identifiers, most specific first.
    Unresolved(Vec<String>),
}

impl TypeDefinition {
    #[must_use]
    pub const fn is_simple(&self, simple: SimpleType) -> bool {
        matches!(self, Self::Simple(tag) if *tag as u8 == simple as u8)
    }

    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.is_simple(SimpleType::Dynamic)
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_function(&self) -> Option<FunctionId> {
        match self {
            Self::Function(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Whether two definitions are the same kind of definition.
    #[must_use]
    pub fn same_class(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A type definition plus whether it stands for the definition itself
/// (`is_original`, e.g. the class `A`) or for a value of it (an `A`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeConstraint {
    pub definition: TypeDefinition,
    pub is_original: bool,
}

impl TypeConstraint {
    /// A value of `definition`.
    #[must_use]
    pub const fn new(definition: TypeDefinition) -> Self {
        Self {
            definition,
            is_original: false,
        }
    }

    /// The definition itself.
    #[must_use]
    pub const fn original(definition: TypeDefinition) -> Self {
        Self {
            definition,
            is_original: true,
        }
    }

    #[must_use]
    pub const fn simple(simple: SimpleType) -> Self {
        Self::new(TypeDefinition::Simple(simple))
    }

    #[must_use]
    pub const fn dynamic() -> Self {
        Self::simple(SimpleType::Dynamic)
    }

    #[must_use]
    pub const fn unresolved(candidates: Vec<String>) -> Self {
        Self::new(TypeDefinition::Unresolved(candidates))
    }

    #[must_use]
    pub fn array_of(element: TypeConstraint) -> Self {
        Self::new(TypeDefinition::Array(Box::new(ArrayType { element })))
    }

    /// A value of this constraint's definition.
    #[must_use]
    pub fn instance(&self) -> Self {
        Self::new(self.definition.clone())
    }

    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.definition.is_dynamic()
    }

    #[must_use]
    pub const fn is_simple(&self, simple: SimpleType) -> bool {
        self.definition.is_simple(simple)
    }
}

// =============================================================================
// Functions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionType {
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub parameters: Vec<TypeConstraint>,
    pub return_type: TypeConstraint,
    /// The last parameter is an array that also accepts trailing elements.
    pub is_variadic: bool,
}

impl FunctionType {
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<TypeConstraint>, return_type: TypeConstraint) -> Self {
        Self {
            name: name.into(),
            generic_parameters: Vec::new(),
            parameters,
            return_type,
            is_variadic: false,
        }
    }
}

// =============================================================================
// Objects
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Class,
    Interface,
}

/// Where a member may be accessed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Anywhere.
    #[default]
    All,
    /// Inside the declaring type and its subtypes.
    Derived,
    /// Only inside the declaring type.
    SelfOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMember {
    pub name: String,
    pub constraint: TypeConstraint,
    pub visibility: Visibility,
    pub is_static: bool,
    /// `final`
    pub is_constant: bool,
    /// `abstract`
    pub requires_implementation: bool,
    /// The declaring object.
    pub parent: ObjectId,
}

impl ObjectMember {
    #[must_use]
    pub fn new(name: impl Into<String>, constraint: TypeConstraint, parent: ObjectId) -> Self {
        Self {
            name: name.into(),
            constraint,
            visibility: Visibility::All,
            is_static: false,
            is_constant: false,
            requires_implementation: false,
            parent,
        }
    }

    #[must_use]
    pub const fn is_method(&self) -> bool {
        matches!(self.constraint.definition, TypeDefinition::Function(_))
    }
}

/// A class or interface.
///
/// Built up by the resolver, then only read. Members are kept in
/// declaration order; overloaded methods are stored under
/// [`overload_name`]s and listed per base name.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub category: ObjectCategory,
    pub is_constructable: bool,
    /// Not `final`.
    pub is_extensible: bool,
    /// `abstract` classes and interfaces.
    pub requires_implementation: bool,
    pub generic_parameters: Vec<String>,
    pub constructors: Vec<FunctionId>,
    pub supertypes: Vec<TypeConstraint>,
    members: IndexMap<String, ObjectMember>,
    overloads: FxHashMap<String, Vec<String>>,
}

impl ObjectType {
    #[must_use]
    pub fn new(name: impl Into<String>, category: ObjectCategory) -> Self {
        let is_class = category == ObjectCategory::Class;
        Self {
            name: name.into(),
            category,
            is_constructable: is_class,
            is_extensible: true,
            requires_implementation: !is_class,
            generic_parameters: Vec::new(),
            constructors: Vec::new(),
            supertypes: Vec::new(),
            members: IndexMap::new(),
            overloads: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.category == ObjectCategory::Interface
    }

    #[must_use]
    pub fn is_class(&self) -> bool {
        self.category == ObjectCategory::Class
    }

    pub fn add_member(&mut self, member: ObjectMember) {
        self.members.insert(member.name.clone(), member);
    }

    /// Add a method, renaming it and any earlier method of the same name
    /// once the name is overloaded. Returns the name it was stored under.
    pub fn add_method(&mut self, mut member: ObjectMember) -> String {
        let name = member.name.clone();
        let existing_method = self.members.get(&name).is_some_and(ObjectMember::is_method);

        if !self.overloads.contains_key(&name) && !existing_method {
            self.members.insert(name.clone(), member);
            return name;
        }

        if existing_method {
            if let Some(mut first) = self.members.shift_remove(&name) {
                let first_name = overload_name(&name, 0);
                first.name.clone_from(&first_name);
                self.members.insert(first_name.clone(), first);
                self.overloads.insert(name.clone(), vec![first_name]);
            }
        }

        let overloads = self.overloads.entry(name.clone()).or_default();
        let stored = overload_name(&name, overloads.len());
        overloads.push(stored.clone());
        member.name.clone_from(&stored);
        self.members.insert(stored.clone(), member);
        stored
    }

    pub fn add_constructor(&mut self, constructor: FunctionId) {
        self.constructors.push(constructor);
    }

    pub fn add_supertype(&mut self, supertype: TypeConstraint) {
        self.supertypes.push(supertype);
    }

    #[must_use]
    pub fn has_constructors(&self) -> bool {
        !self.constructors.is_empty()
    }

    /// A member declared on this object, by stored name.
    #[must_use]
    pub fn own_member(&self, name: &str) -> Option<&ObjectMember> {
        self.members.get(name)
    }

    pub fn own_members(&self) -> impl Iterator<Item = &ObjectMember> {
        self.members.values()
    }

    /// Stored names of the overloads of `name`, in declaration order.
    #[must_use]
    pub fn overloads(&self, name: &str) -> Option<&[String]> {
        self.overloads.get(name).map(Vec::as_slice)
    }
}

/// Storage name of the `index`th overload of `name`.
#[must_use]
pub fn overload_name(name: &str, index: usize) -> String {
    format!("{name}_{index}")
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
