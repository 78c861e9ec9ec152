//! Classes, interfaces and their members.

use super::declarations::{Annotation, JavaType, Modifiers};
use super::statements::{Block, Statement, VariableDeclaration};
use pbl_scanner::TokenId;

/// A class declaration. Enums are parsed as classes with `is_enum` set and
/// one public static final field per constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub modifiers: Modifiers,
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub extended: Vec<JavaType>,
    pub implemented: Vec<JavaType>,
    pub constructors: Vec<Method>,
    pub members: Vec<ObjectMember>,
    pub instance_initializers: Vec<Block>,
    pub static_initializers: Vec<Block>,
    pub annotations: Vec<Annotation>,
    pub is_enum: bool,
    pub token: TokenId,
}

impl Class {
    #[must_use]
    pub fn new(token: TokenId) -> Self {
        Self {
            modifiers: Modifiers::default(),
            name: String::new(),
            generic_parameters: Vec::new(),
            extended: Vec::new(),
            implemented: Vec::new(),
            constructors: Vec::new(),
            members: Vec::new(),
            instance_initializers: Vec::new(),
            static_initializers: Vec::new(),
            annotations: Vec::new(),
            is_enum: false,
            token,
        }
    }

    pub(crate) fn absorb_body(&mut self, body: ObjectBody) {
        self.constructors.extend(body.constructors);
        self.members.extend(body.members);
        self.instance_initializers.extend(body.instance_initializers);
        self.static_initializers.extend(body.static_initializers);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    pub modifiers: Modifiers,
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub extended: Vec<JavaType>,
    pub members: Vec<ObjectMember>,
    pub annotations: Vec<Annotation>,
    pub token: TokenId,
}

/// The contents between an object's braces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectBody {
    pub constructors: Vec<Method>,
    pub members: Vec<ObjectMember>,
    pub instance_initializers: Vec<Block>,
    pub static_initializers: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectMember {
    Field(Field),
    Method(Method),
    Class(Class),
    Interface(Interface),
}

impl ObjectMember {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Method(method) => &method.name,
            Self::Class(class) => &class.name,
            Self::Interface(interface) => &interface.name,
        }
    }

    #[must_use]
    pub fn modifiers(&self) -> &Modifiers {
        match self {
            Self::Field(field) => &field.modifiers,
            Self::Method(method) => &method.modifiers,
            Self::Class(class) => &class.modifiers,
            Self::Interface(interface) => &interface.modifiers,
        }
    }

    #[must_use]
    pub fn token(&self) -> TokenId {
        match self {
            Self::Field(field) => field.token,
            Self::Method(method) => method.token,
            Self::Class(class) => class.token,
            Self::Interface(interface) => interface.token,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub modifiers: Modifiers,
    pub ty: JavaType,
    pub name: String,
    pub value: Option<Statement>,
    pub annotations: Vec<Annotation>,
    pub token: TokenId,
}

/// A method or constructor. Constructors have no return type and are
/// named after their class; abstract and interface methods have no block.
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    pub modifiers: Modifiers,
    pub generic_parameters: Vec<JavaType>,
    pub ty: Option<JavaType>,
    pub name: String,
    pub parameters: Vec<VariableDeclaration>,
    pub throws: Vec<JavaType>,
    pub block: Option<Block>,
    pub annotations: Vec<Annotation>,
    pub is_constructor: bool,
    pub token: TokenId,
}
