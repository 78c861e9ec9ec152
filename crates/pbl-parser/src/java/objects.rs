//! Classes, interfaces, enums and their bodies.

use crate::engine::{Cursor, Grammar, ParseResult, Parser, Signal, TokenMatcher};
use crate::java::block::BlockParser;
use crate::java::constants::{EXTENDS_CLAUSE_END, THROWS_CLAUSE_END, any};
use crate::java::declarations::AnnotationParser;
use crate::java::expressions::VariableDeclarationParser;
use crate::java::statement::StatementParser;
use crate::java::types::{GenericParameterParser, TypeParser};
use crate::java::utils::{is_any_modifier, is_constructor, is_initializer};
use crate::syntax::{
    AccessModifier, Annotation, Block, Class, Field, Instantiation, Interface, JavaType, Method,
    Modifiers, ObjectBody, ObjectMember, Statement, StatementNode, VariableDeclaration,
};
use once_cell::sync::Lazy;
use pbl_scanner::TokenId;
use pbl_scanner::token_utils::is_word;

/// Read any run of access and modifier keywords.
fn parse_modifiers(cursor: &mut Cursor<'_>) -> ParseResult<Modifiers> {
    let mut modifiers = Modifiers::default();
    while modifiers.apply(cursor.value()) {
        cursor.next()?;
    }
    Ok(modifiers)
}

/// `<T, U extends V>`
fn parse_generic_parameters(cursor: &mut Cursor<'_>) -> ParseResult<Vec<String>> {
    cursor.eat("<")?;
    let parameters = cursor.parse_sequence::<GenericParameterParser>(
        TokenMatcher::Literal(","),
        TokenMatcher::Literal(">"),
    )?;
    cursor.eat(">")?;
    Ok(parameters)
}

// =============================================================================
// Class
// =============================================================================

pub struct ClassParser {
    class: Class,
}

impl ClassParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.class.name = cursor.eat_word()?;
        Ok(Signal::Continue)
    }

    fn on_generic_parameters(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.class.generic_parameters = parse_generic_parameters(cursor)?;
        Ok(Signal::Continue)
    }

    fn on_extends(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        let extended = cursor.parse_sequence::<TypeParser>(
            TokenMatcher::Literal(","),
            TokenMatcher::AnyOf(EXTENDS_CLAUSE_END),
        )?;
        let class = &self.class;
        cursor.assert_with(extended.len() == 1, || {
            format!("Derived class '{}' cannot extend {} base classes", class.name, extended.len())
        })?;
        self.class.extended = extended;
        Ok(Signal::Continue)
    }

    fn on_implements(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.class.implemented = cursor
            .parse_sequence::<TypeParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("{"))?;
        Ok(Signal::Continue)
    }

    fn on_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        let body = cursor.parse_with::<ObjectBodyParser>()?;
        self.class.absorb_body(body);
        Ok(Signal::Stop)
    }
}

impl Parser for ClassParser {
    type Output = Class;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ClassParser>> = Lazy::new(|| {
            Grammar::new("class")
                .eat(TokenMatcher::Literal("class"), ClassParser::on_keyword)
                .eat(TokenMatcher::Predicate(is_word), ClassParser::on_name)
                .allow(TokenMatcher::Literal("<"), ClassParser::on_generic_parameters)
                .allow(TokenMatcher::Literal("extends"), ClassParser::on_extends)
                .allow(TokenMatcher::Literal("implements"), ClassParser::on_implements)
                .eat(TokenMatcher::Literal("{"), ClassParser::on_body)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            class: Class::new(token),
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.class.modifiers = parse_modifiers(cursor)?;
        Ok(Signal::Continue)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Class> {
        Ok(self.class)
    }
}

// =============================================================================
// Interface
// =============================================================================

pub struct InterfaceParser {
    interface: Interface,
}

impl InterfaceParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.interface.name = cursor.eat_word()?;
        Ok(Signal::Continue)
    }

    fn on_generic_parameters(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.interface.generic_parameters = parse_generic_parameters(cursor)?;
        Ok(Signal::Continue)
    }

    fn on_extends(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.interface.extended = cursor
            .parse_sequence::<TypeParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("{"))?;
        Ok(Signal::Continue)
    }

    fn on_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        let body = cursor.parse_with::<ObjectBodyParser>()?;
        let name = &self.interface.name;
        let has_code = !body.constructors.is_empty()
            || !body.instance_initializers.is_empty()
            || !body.static_initializers.is_empty();
        cursor.assert_with(!has_code, || {
            format!("Interface '{name}' cannot have constructors or initializers")
        })?;
        self.interface.members = body.members;
        Ok(Signal::Stop)
    }
}

impl Parser for InterfaceParser {
    type Output = Interface;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<InterfaceParser>> = Lazy::new(|| {
            Grammar::new("interface")
                .eat(TokenMatcher::Literal("interface"), InterfaceParser::on_keyword)
                .eat(TokenMatcher::Predicate(is_word), InterfaceParser::on_name)
                .allow(TokenMatcher::Literal("<"), InterfaceParser::on_generic_parameters)
                .allow(TokenMatcher::Literal("extends"), InterfaceParser::on_extends)
                .eat(TokenMatcher::Literal("{"), InterfaceParser::on_body)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            interface: Interface {
                modifiers: Modifiers::default(),
                name: String::new(),
                generic_parameters: Vec::new(),
                extended: Vec::new(),
                members: Vec::new(),
                annotations: Vec::new(),
                token,
            },
        }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.interface.modifiers = parse_modifiers(cursor)?;
        Ok(Signal::Continue)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Interface> {
        Ok(self.interface)
    }
}

// =============================================================================
// Enum
// =============================================================================

/// Enums become classes. Each constant is a public static final field of
/// the enum's own type, initialized by instantiating the enum with the
/// constant's arguments.
pub struct EnumParser {
    class: Class,
}

impl EnumParser {
    fn on_keyword(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        Ok(Signal::Continue)
    }

    fn on_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.class.name = cursor.eat_word()?;
        Ok(Signal::Continue)
    }

    fn on_implements(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.class.implemented = cursor
            .parse_sequence::<TypeParser>(TokenMatcher::Literal(","), TokenMatcher::Literal("{"))?;
        Ok(Signal::Continue)
    }

    fn on_body(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        loop {
            if cursor.is("}") {
                return Ok(Signal::Finish);
            }
            if cursor.is(";") {
                break;
            }
            self.parse_constant(cursor)?;
            if cursor.is(",") {
                cursor.next()?;
            } else {
                cursor.assert(cursor.is("}") || cursor.is(";"))?;
            }
        }

        cursor.next()?;
        let body = cursor.parse_with::<ObjectBodyParser>()?;
        self.class.absorb_body(body);
        Ok(Signal::Stop)
    }

    fn parse_constant(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        let token = cursor.current();
        let name = cursor.eat_word()?;
        let mut arguments = Vec::new();
        if cursor.is("(") {
            cursor.next()?;
            arguments = cursor.parse_sequence::<StatementParser>(
                TokenMatcher::Literal(","),
                TokenMatcher::Literal(")"),
            )?;
            cursor.eat(")")?;
        }

        let ty = JavaType::named(self.class.name.clone(), token);
        let instantiation = Instantiation {
            constructor: ty.clone(),
            arguments,
            array_allocation_size: None,
            array_literal: None,
            anonymous_object_body: None,
            token,
        };
        self.class.members.push(ObjectMember::Field(Field {
            modifiers: Modifiers {
                access: AccessModifier::Public,
                is_static: true,
                is_final: true,
                is_abstract: false,
            },
            ty,
            name,
            value: Some(Statement::from_node(StatementNode::Instantiation(instantiation), token)),
            annotations: Vec::new(),
            token,
        }));
        Ok(())
    }
}

impl Parser for EnumParser {
    type Output = Class;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<EnumParser>> = Lazy::new(|| {
            Grammar::new("enum")
                .eat(TokenMatcher::Literal("enum"), EnumParser::on_keyword)
                .eat(TokenMatcher::Predicate(is_word), EnumParser::on_name)
                .allow(TokenMatcher::Literal("implements"), EnumParser::on_implements)
                .eat(TokenMatcher::Literal("{"), EnumParser::on_body)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        let mut class = Class::new(token);
        class.is_enum = true;
        Self { class }
    }

    fn on_first_token(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.class.modifiers = parse_modifiers(cursor)?;
        Ok(Signal::Continue)
    }

    fn complete(self, _cursor: &Cursor<'_>) -> ParseResult<Class> {
        Ok(self.class)
    }
}

// =============================================================================
// Object body
// =============================================================================

/// Everything between an object's braces, starting after the `{` and
/// finishing past the `}`. Modifiers and annotations are collected here
/// and attached to the member that follows them.
pub struct ObjectBodyParser {
    body: ObjectBody,
    modifiers: Modifiers,
    annotations: Vec<Annotation>,
    is_closed: bool,
}

impl ObjectBodyParser {
    fn take_pending(&mut self) -> (Modifiers, Vec<Annotation>) {
        (
            std::mem::take(&mut self.modifiers),
            std::mem::take(&mut self.annotations),
        )
    }

    fn on_annotation(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let annotation = cursor.parse_with::<AnnotationParser>()?;
        self.annotations.push(annotation);
        Ok(Signal::Continue)
    }

    fn on_close(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.is_closed = true;
        Ok(Signal::Finish)
    }

    fn on_semicolon(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Continue)
    }

    fn on_constructor(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let token = cursor.current();
        let name = cursor.eat_word()?;
        let signature = cursor.parse_with::<MethodParser>()?;
        cursor.assert(signature.block.is_some())?;
        let (modifiers, annotations) = self.take_pending();
        self.body.constructors.push(signature.into_method(MethodHeader {
            modifiers,
            annotations,
            generic_parameters: Vec::new(),
            ty: None,
            name,
            is_constructor: true,
            token,
        }));
        Ok(Signal::Continue)
    }

    fn on_initializer(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert_with(self.annotations.is_empty(), || {
            "Initializer blocks cannot have annotations".to_string()
        })?;
        let (modifiers, _) = self.take_pending();
        let is_static = modifiers.is_static || cursor.is("static");
        if cursor.is("static") {
            cursor.next()?;
        }
        let block = cursor.parse_with::<BlockParser>()?;
        if is_static {
            self.body.static_initializers.push(block);
        } else {
            self.body.instance_initializers.push(block);
        }
        Ok(Signal::Continue)
    }

    fn on_modifier(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.modifiers.apply(cursor.value());
        Ok(Signal::Continue)
    }

    fn on_member(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let mut member = cursor.parse_with::<MemberParser>()?;
        let (modifiers, annotations) = self.take_pending();
        match &mut member {
            ObjectMember::Field(field) => {
                field.modifiers = modifiers;
                field.annotations = annotations;
            }
            ObjectMember::Method(method) => {
                method.modifiers = modifiers;
                method.annotations = annotations;
            }
            ObjectMember::Class(class) => {
                class.modifiers = modifiers;
                class.annotations = annotations;
            }
            ObjectMember::Interface(interface) => {
                interface.modifiers = modifiers;
                interface.annotations = annotations;
            }
        }
        self.body.members.push(member);
        Ok(Signal::Continue)
    }
}

impl Parser for ObjectBodyParser {
    type Output = ObjectBody;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<ObjectBodyParser>> = Lazy::new(|| {
            Grammar::new("object body")
                .on(TokenMatcher::Literal("@"), ObjectBodyParser::on_annotation)
                .on(TokenMatcher::Literal("}"), ObjectBodyParser::on_close)
                .on(TokenMatcher::Literal(";"), ObjectBodyParser::on_semicolon)
                .on(TokenMatcher::Predicate(is_constructor), ObjectBodyParser::on_constructor)
                .on(TokenMatcher::Predicate(is_initializer), ObjectBodyParser::on_initializer)
                .on(TokenMatcher::Predicate(is_any_modifier), ObjectBodyParser::on_modifier)
                .on(any(), ObjectBodyParser::on_member)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self {
            body: ObjectBody::default(),
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            is_closed: false,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<ObjectBody> {
        cursor.assert(self.is_closed)?;
        Ok(self.body)
    }
}

// =============================================================================
// Members
// =============================================================================

/// A field, method or nested type. Modifiers and annotations are applied by
/// the enclosing body.
pub struct MemberParser {
    generic_parameters: Vec<JavaType>,
    declaration: Option<VariableDeclaration>,
    member: Option<ObjectMember>,
    token: TokenId,
}

impl MemberParser {
    fn on_class(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.member = Some(ObjectMember::Class(cursor.parse_with::<ClassParser>()?));
        Ok(Signal::Stop)
    }

    fn on_interface(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.member = Some(ObjectMember::Interface(cursor.parse_with::<InterfaceParser>()?));
        Ok(Signal::Stop)
    }

    fn on_enum(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.member = Some(ObjectMember::Class(cursor.parse_with::<EnumParser>()?));
        Ok(Signal::Stop)
    }

    fn on_generic_parameters(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.generic_parameters = cursor
            .parse_sequence::<TypeParser>(TokenMatcher::Literal(","), TokenMatcher::Literal(">"))?;
        cursor.eat(">")?;
        Ok(Signal::Continue)
    }

    fn on_declaration(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let declaration = cursor.parse_with::<VariableDeclarationParser>()?;
        cursor.assert(matches!(cursor.value(), "=" | ";" | "("))?;
        self.declaration = Some(declaration);
        Ok(Signal::Continue)
    }

    fn field(&mut self, cursor: &Cursor<'_>, value: Option<Statement>) -> ParseResult<()> {
        let Some(declaration) = self.declaration.take() else {
            return Err(cursor.halt());
        };
        cursor.assert(self.generic_parameters.is_empty())?;
        self.member = Some(ObjectMember::Field(Field {
            modifiers: Modifiers::default(),
            ty: declaration.ty,
            name: declaration.name,
            value,
            annotations: Vec::new(),
            token: self.token,
        }));
        Ok(())
    }

    fn on_value(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.assert(self.declaration.is_some())?;
        cursor.next()?;
        let value = cursor.parse_with::<StatementParser>()?;
        cursor.assert(cursor.is(";") && !value.is_empty())?;
        self.field(cursor, Some(value))?;
        Ok(Signal::Finish)
    }

    fn on_semicolon(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.field(cursor, None)?;
        Ok(Signal::Finish)
    }

    fn on_method(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        let Some(declaration) = self.declaration.take() else {
            return Err(cursor.halt());
        };
        let signature = cursor.parse_with::<MethodParser>()?;
        self.member = Some(ObjectMember::Method(signature.into_method(MethodHeader {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            generic_parameters: std::mem::take(&mut self.generic_parameters),
            ty: Some(declaration.ty),
            name: declaration.name,
            is_constructor: false,
            token: self.token,
        })));
        Ok(Signal::Stop)
    }
}

impl Parser for MemberParser {
    type Output = ObjectMember;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<MemberParser>> = Lazy::new(|| {
            Grammar::new("member")
                .allow(TokenMatcher::Literal("class"), MemberParser::on_class)
                .allow(TokenMatcher::Literal("interface"), MemberParser::on_interface)
                .allow(TokenMatcher::Literal("enum"), MemberParser::on_enum)
                .allow(TokenMatcher::Literal("<"), MemberParser::on_generic_parameters)
                .eat(TokenMatcher::Predicate(is_word), MemberParser::on_declaration)
                .allow(TokenMatcher::Literal("="), MemberParser::on_value)
                .allow(TokenMatcher::Literal(";"), MemberParser::on_semicolon)
                .allow(TokenMatcher::Literal("("), MemberParser::on_method)
                .build()
        });
        &GRAMMAR
    }

    fn begin(token: TokenId) -> Self {
        Self {
            generic_parameters: Vec::new(),
            declaration: None,
            member: None,
            token,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<ObjectMember> {
        let Some(member) = self.member else {
            return Err(cursor.halt());
        };
        Ok(member)
    }
}

// =============================================================================
// Methods
// =============================================================================

/// What precedes a method's parameter list.
struct MethodHeader {
    modifiers: Modifiers,
    annotations: Vec<Annotation>,
    generic_parameters: Vec<JavaType>,
    ty: Option<JavaType>,
    name: String,
    is_constructor: bool,
    token: TokenId,
}

/// Parameters, `throws` clause and body, starting at `(`. A `;` in place
/// of the body declares an abstract or interface method.
pub struct MethodParser {
    parameters: Vec<VariableDeclaration>,
    throws: Vec<JavaType>,
    block: Option<Block>,
    is_terminated: bool,
}

pub struct MethodSignature {
    parameters: Vec<VariableDeclaration>,
    throws: Vec<JavaType>,
    block: Option<Block>,
}

impl MethodSignature {
    fn into_method(self, header: MethodHeader) -> Method {
        Method {
            modifiers: header.modifiers,
            generic_parameters: header.generic_parameters,
            ty: header.ty,
            name: header.name,
            parameters: self.parameters,
            throws: self.throws,
            block: self.block,
            annotations: header.annotations,
            is_constructor: header.is_constructor,
            token: header.token,
        }
    }
}

impl MethodParser {
    fn on_parameters(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.parameters = cursor.parse_sequence::<VariableDeclarationParser>(
            TokenMatcher::Literal(","),
            TokenMatcher::Literal(")"),
        )?;
        Ok(Signal::Continue)
    }

    fn on_parameters_end(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        Ok(Signal::Continue)
    }

    fn on_throws(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        cursor.next()?;
        self.throws = cursor.parse_sequence::<TypeParser>(
            TokenMatcher::Literal(","),
            TokenMatcher::AnyOf(THROWS_CLAUSE_END),
        )?;
        Ok(Signal::Continue)
    }

    fn on_block(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.block = Some(cursor.parse_with::<BlockParser>()?);
        self.is_terminated = true;
        Ok(Signal::Stop)
    }

    fn on_semicolon(&mut self, _cursor: &mut Cursor<'_>) -> ParseResult<Signal> {
        self.is_terminated = true;
        Ok(Signal::Finish)
    }
}

impl Parser for MethodParser {
    type Output = MethodSignature;

    fn grammar() -> &'static Grammar<Self> {
        static GRAMMAR: Lazy<Grammar<MethodParser>> = Lazy::new(|| {
            Grammar::new("method")
                .eat(TokenMatcher::Literal("("), MethodParser::on_parameters)
                .eat(TokenMatcher::Literal(")"), MethodParser::on_parameters_end)
                .allow(TokenMatcher::Literal("throws"), MethodParser::on_throws)
                .allow(TokenMatcher::Literal("{"), MethodParser::on_block)
                .allow(TokenMatcher::Literal(";"), MethodParser::on_semicolon)
                .build()
        });
        &GRAMMAR
    }

    fn begin(_token: TokenId) -> Self {
        Self {
            parameters: Vec::new(),
            throws: Vec::new(),
            block: None,
            is_terminated: false,
        }
    }

    fn complete(self, cursor: &Cursor<'_>) -> ParseResult<MethodSignature> {
        cursor.assert(self.is_terminated)?;
        Ok(MethodSignature {
            parameters: self.parameters,
            throws: self.throws,
            block: self.block,
        })
    }
}
