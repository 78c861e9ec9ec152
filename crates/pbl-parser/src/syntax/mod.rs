//! Java syntax tree.
//!
//! Every node owns its children; the tree carries the token stream it was
//! parsed from so later phases can map a node's `token` back to a source
//! position.

pub mod declarations;
pub mod objects;
pub mod operator;
pub mod statements;

pub use declarations::{AccessModifier, Annotation, Import, JavaType, Modifiers, Package};
pub use objects::{Class, Field, Interface, Method, ObjectBody, ObjectMember};
pub use operator::{Operator, UNARY_PRECEDENCE};
pub use statements::{
    Assertion, Block, DoWhileLoop, ForLoop, FunctionCall, IfElse, Instantiation, Instruction,
    InstructionKind, Lambda, LambdaBody, LambdaParameter, Literal, LiteralKind, OperatorNode,
    Property, PropertyChain, Reference, Statement, StatementNode, Switch, Ternary, TryCatch,
    VariableDeclaration, WhileLoop,
};

use pbl_scanner::TokenStream;

#[derive(Clone, Debug, PartialEq)]
pub enum TopLevelNode {
    Import(Import),
    Class(Class),
    Interface(Interface),
}

/// A parsed Java source file.
#[derive(Clone, Debug)]
pub struct JavaSyntaxTree {
    pub package: Option<Package>,
    pub nodes: Vec<TopLevelNode>,
    pub tokens: TokenStream,
}

impl JavaSyntaxTree {
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.nodes.iter().filter_map(|node| match node {
            TopLevelNode::Import(import) => Some(import),
            _ => None,
        })
    }
}
