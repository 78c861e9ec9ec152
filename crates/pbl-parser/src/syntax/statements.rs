//! Blocks, statements and expression nodes.
//!
//! A [`Statement`] is a binary shape: an optional left side, an optional
//! operator, and an optional right side that is itself a statement. Prefix
//! operations have no left side (`!x` is `{ op: !, right: x }`); postfix
//! increments have no right side. Parenthesized statements and casts keep
//! their grouping so precedence survives into later phases.

use super::declarations::{Annotation, JavaType};
use super::objects::{Class, ObjectBody};
use super::operator::Operator;
use pbl_scanner::TokenId;

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub nodes: Vec<Statement>,
    pub token: TokenId,
}

impl Block {
    #[must_use]
    pub const fn new(token: TokenId) -> Self {
        Self {
            nodes: Vec::new(),
            token,
        }
    }

    /// Wrap a single unbraced statement, as in `if (x) y();`.
    #[must_use]
    pub fn inline(statement: Statement) -> Self {
        let token = statement.token;
        Self {
            nodes: vec![statement],
            token,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorNode {
    pub operation: Operator,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub left_side: Option<Box<StatementNode>>,
    pub operator: Option<OperatorNode>,
    pub right_side: Option<Box<Statement>>,
    pub is_parenthetical: bool,
    /// Present when the left side is preceded by `(Type)`.
    pub cast: Option<JavaType>,
    /// Annotations preceding a local declaration.
    pub annotations: Vec<Annotation>,
    pub token: TokenId,
}

impl Statement {
    #[must_use]
    pub const fn new(token: TokenId) -> Self {
        Self {
            left_side: None,
            operator: None,
            right_side: None,
            is_parenthetical: false,
            cast: None,
            annotations: Vec::new(),
            token,
        }
    }

    #[must_use]
    pub fn from_node(node: StatementNode, token: TokenId) -> Self {
        Self {
            left_side: Some(Box::new(node)),
            ..Self::new(token)
        }
    }

    #[must_use]
    pub fn left(&self) -> Option<&StatementNode> {
        self.left_side.as_deref()
    }

    #[must_use]
    pub fn right(&self) -> Option<&Statement> {
        self.right_side.as_deref()
    }

    #[must_use]
    pub fn operation(&self) -> Option<Operator> {
        self.operator.map(|operator| operator.operation)
    }

    /// Whether nothing was parsed at all, as in a bare `;`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left_side.is_none() && self.operator.is_none() && self.right_side.is_none()
    }

    /// Whether this statement is nothing but its left side.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.operator.is_none() && self.right_side.is_none() && self.cast.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementNode {
    Statement(Statement),
    Instruction(Instruction),
    Assertion(Assertion),
    Literal(Literal),
    Lambda(Lambda),
    Reference(Reference),
    FunctionCall(FunctionCall),
    Instantiation(Instantiation),
    Class(Class),
    VariableDeclaration(VariableDeclaration),
    IfElse(IfElse),
    ForLoop(ForLoop),
    WhileLoop(WhileLoop),
    DoWhileLoop(DoWhileLoop),
    Switch(Switch),
    TryCatch(TryCatch),
    PropertyChain(PropertyChain),
    Ternary(Ternary),
}

impl StatementNode {
    /// Human-readable node kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Statement(_) => "statement",
            Self::Instruction(_) => "instruction",
            Self::Assertion(_) => "assertion",
            Self::Literal(_) => "literal",
            Self::Lambda(_) => "lambda",
            Self::Reference(_) => "reference",
            Self::FunctionCall(_) => "function call",
            Self::Instantiation(_) => "instantiation",
            Self::Class(_) => "class",
            Self::VariableDeclaration(_) => "variable declaration",
            Self::IfElse(_) => "if/else",
            Self::ForLoop(_) => "for loop",
            Self::WhileLoop(_) => "while loop",
            Self::DoWhileLoop(_) => "do/while loop",
            Self::Switch(_) => "switch",
            Self::TryCatch(_) => "try/catch",
            Self::PropertyChain(_) => "property chain",
            Self::Ternary(_) => "ternary",
        }
    }

    /// Control-flow constructs that end their statement without a `;`.
    #[must_use]
    pub const fn is_self_terminating(&self) -> bool {
        matches!(
            self,
            Self::Assertion(_)
                | Self::Class(_)
                | Self::IfElse(_)
                | Self::ForLoop(_)
                | Self::WhileLoop(_)
                | Self::Switch(_)
                | Self::TryCatch(_)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionKind {
    Return,
    Throw,
    Continue,
    Break,
}

impl InstructionKind {
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "return" => Some(Self::Return),
            "throw" => Some(Self::Throw),
            "continue" => Some(Self::Continue),
            "break" => Some(Self::Break),
            _ => None,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Return => "return",
            Self::Throw => "throw",
            Self::Continue => "continue",
            Self::Break => "break",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub value: Option<Statement>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assertion {
    pub condition: Statement,
    pub message: Option<Statement>,
    pub token: TokenId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    /// `true`, `false` or `null`.
    Keyword,
    String,
    Number,
    /// `{ a, b, c }`
    Array,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text of the literal; empty for arrays.
    pub value: String,
    pub elements: Vec<Statement>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LambdaParameter {
    Untyped(Reference),
    Typed(VariableDeclaration),
}

impl LambdaParameter {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Untyped(reference) => &reference.name,
            Self::Typed(declaration) => &declaration.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LambdaBody {
    Block(Block),
    Statement(Box<Statement>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    pub parameters: Vec<LambdaParameter>,
    pub body: LambdaBody,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    pub name: String,
    pub token: TokenId,
}

/// A call. Calls continuing a chain (`f()()`, `a[0]()`) have no name.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: Option<String>,
    pub generic_arguments: Vec<JavaType>,
    pub arguments: Vec<Statement>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instantiation {
    pub constructor: JavaType,
    pub arguments: Vec<Statement>,
    /// `n` in `new T[n]`.
    pub array_allocation_size: Option<Box<Statement>>,
    /// `{...}` in `new T[] {...}`.
    pub array_literal: Option<Literal>,
    pub anonymous_object_body: Option<ObjectBody>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub is_final: bool,
    pub ty: JavaType,
    pub name: String,
    pub is_variadic: bool,
    pub token: TokenId,
}

/// `if`/`else if`/`else`. `blocks` has one more entry than `conditions`
/// when a trailing `else` is present.
#[derive(Clone, Debug, PartialEq)]
pub struct IfElse {
    pub conditions: Vec<Statement>,
    pub blocks: Vec<Block>,
    pub token: TokenId,
}

impl IfElse {
    #[must_use]
    pub fn else_block(&self) -> Option<&Block> {
        if self.blocks.len() > self.conditions.len() {
            self.blocks.last()
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForLoop {
    pub initialization: Option<Statement>,
    pub condition: Option<Statement>,
    pub increment: Option<Statement>,
    /// The collection of an enhanced `for (T x : xs)` loop.
    pub iterable: Option<Statement>,
    pub is_enhanced: bool,
    pub block: Block,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileLoop {
    pub condition: Statement,
    pub block: Block,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoWhileLoop {
    pub block: Block,
    pub condition: Statement,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Switch {
    pub value: Statement,
    pub cases: Vec<Statement>,
    /// One block per case, in order.
    pub blocks: Vec<Block>,
    pub default_block: Option<Block>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryCatch {
    pub try_block: Block,
    /// Exception types per catch clause (`catch (A | B e)`).
    pub exception_sets: Vec<Vec<JavaType>>,
    pub exception_references: Vec<Reference>,
    pub catch_blocks: Vec<Block>,
    pub finally_block: Option<Block>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    Reference(Reference),
    Call(FunctionCall),
    /// A namespaced or generic type ending a chain, e.g. `a.b.C` in
    /// `a.b.C value`.
    Type(JavaType),
    /// `[index]`
    Index(Statement),
    /// A leading value that is not a name or call, such as `new T()` in
    /// `new T().m()` or `(x)` in `(x).y`.
    Head(Box<StatementNode>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChain {
    pub properties: Vec<Property>,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ternary {
    pub condition: Statement,
    pub left: Statement,
    pub right: Statement,
    pub token: TokenId,
}
