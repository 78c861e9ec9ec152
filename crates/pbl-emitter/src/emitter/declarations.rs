use super::Printer;
use super::helpers::{default_value, type_reference};
use pbl_binder::{overload_name, stored_method_names};
use pbl_parser::syntax::{Class, Field, Instantiation, Method, ObjectBody, ObjectMember};

/// Methods paired with the names the resolver stored them under.
fn named_methods(members: &[ObjectMember]) -> Vec<(&Method, String)> {
    let methods: Vec<&Method> = members
        .iter()
        .filter_map(|member| match member {
            ObjectMember::Method(method) => Some(method),
            _ => None,
        })
        .collect();
    let names = stored_method_names(methods.iter().copied());
    methods.into_iter().zip(names).collect()
}

fn fields(members: &[ObjectMember]) -> impl Iterator<Item = &Field> {
    members.iter().filter_map(|member| match member {
        ObjectMember::Field(field) => Some(field),
        _ => None,
    })
}

fn nested_classes(members: &[ObjectMember]) -> impl Iterator<Item = &Class> {
    members.iter().filter_map(|member| match member {
        ObjectMember::Class(class) => Some(class),
        _ => None,
    })
}

impl Printer<'_> {
    // =========================================================================
    // Classes
    // =========================================================================

    /// Emit `class` and everything hanging off it.
    ///
    /// Nested classes are declared first, as siblings, and attached to the
    /// class afterwards. Constructors become instance methods named
    /// `Class_N`, dispatched on the overload index passed to `new`. Static
    /// members are assigned after the class body, followed by the static
    /// initializers.
    pub(super) fn emit_class(&mut self, class: &Class) {
        for nested in nested_classes(&class.members) {
            self.emit_class(nested);
            self.write_line();
            self.write_line();
        }

        self.write("class ");
        self.write(&class.name);
        if let Some(parent) = class.extended.first() {
            self.write(" extends ");
            self.write(&type_reference(parent));
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        self.emit_instance_side(class);
        self.decrease_indent();
        self.write("}");

        self.emit_static_side(class);
    }

    fn emit_instance_side(&mut self, class: &Class) {
        let mut is_first = true;
        let has_instance_fields = fields(&class.members).any(|field| !field.modifiers.is_static);
        if has_instance_fields || !class.instance_initializers.is_empty() || !class.constructors.is_empty() {
            self.emit_js_constructor(class);
            is_first = false;
        }

        for (index, constructor) in class.constructors.iter().enumerate() {
            self.member_separator(&mut is_first);
            self.emit_method(&overload_name(&class.name, index), constructor);
        }

        for (method, name) in named_methods(&class.members) {
            if method.modifiers.is_static || method.block.is_none() {
                continue;
            }
            self.member_separator(&mut is_first);
            self.emit_method(&name, method);
        }
    }

    fn member_separator(&mut self, is_first: &mut bool) {
        if !*is_first {
            self.write_line();
        }
        *is_first = false;
    }

    fn emit_js_constructor(&mut self, class: &Class) {
        self.write("constructor (overloadIndex, ...args) {");
        self.write_line();
        self.increase_indent();

        if !class.extended.is_empty() {
            self.write("super();");
            self.write_line();
        }

        for field in fields(&class.members).filter(|field| !field.modifiers.is_static) {
            self.write("this.");
            self.emit_field_assignment(field);
            self.write_line();
        }

        for initializer in &class.instance_initializers {
            self.emit_block(initializer);
            self.write_line();
        }

        if !class.constructors.is_empty() {
            self.write("switch (overloadIndex) {");
            self.write_line();
            self.increase_indent();
            for index in 0..class.constructors.len() {
                self.write(&format!("case {index}:"));
                self.write_line();
                self.increase_indent();
                self.write(&format!("this.{}(...args);", overload_name(&class.name, index)));
                self.write_line();
                self.write("break;");
                self.write_line();
                self.decrease_indent();
            }
            self.decrease_indent();
            self.write("}");
            self.write_line();
        }

        self.decrease_indent();
        self.write("}");
        self.write_line();
    }

    /// `name (params) { ... }`, followed by a newline.
    fn emit_method(&mut self, name: &str, method: &Method) {
        self.write(name);
        self.write(" ");
        self.emit_parameters(&method.parameters);
        self.write(" ");
        match &method.block {
            Some(block) => self.emit_block(block),
            None => self.write("{}"),
        }
        self.write_line();
    }

    /// `name = value;`, defaulting the value from the field's type.
    fn emit_field_assignment(&mut self, field: &Field) {
        self.write(&field.name);
        self.write(" = ");
        match &field.value {
            Some(value) => self.emit_statement(value),
            None => self.write(default_value(&field.ty)),
        }
        self.write(";");
    }

    fn emit_static_side(&mut self, class: &Class) {
        let name = &class.name;

        for (method, stored) in named_methods(&class.members) {
            let Some(block) = &method.block else {
                continue;
            };
            if !method.modifiers.is_static {
                continue;
            }
            self.write_line();
            self.write(&format!("{name}.{stored} = function "));
            self.emit_parameters(&method.parameters);
            self.write(" ");
            self.emit_block(block);
            self.write(";");
        }

        for nested in nested_classes(&class.members) {
            self.write_line();
            self.write(&format!("{name}.{0} = {0};", nested.name));
        }

        for field in fields(&class.members).filter(|field| field.modifiers.is_static) {
            self.write_line();
            self.write(&format!("{name}."));
            self.emit_field_assignment(field);
        }

        for initializer in &class.static_initializers {
            self.write_line();
            self.write("(function () ");
            self.emit_block(initializer);
            self.write(")();");
        }
    }

    // =========================================================================
    // Anonymous objects
    // =========================================================================

    /// `new T() { ... }` builds an instance of `T` when it is a class, or a
    /// plain object for interfaces, then assigns the body's members to it.
    pub(super) fn emit_anonymous_object(&mut self, instantiation: &Instantiation, body: &ObjectBody) {
        self.write("(function (instance) {");
        self.write_line();
        self.increase_indent();

        for field in fields(&body.members) {
            self.write("instance.");
            self.emit_field_assignment(field);
            self.write_line();
        }

        for (method, name) in named_methods(&body.members) {
            let Some(block) = &method.block else {
                continue;
            };
            self.write(&format!("instance.{name} = function "));
            self.emit_parameters(&method.parameters);
            self.write(" ");
            self.emit_block(block);
            self.write(";");
            self.write_line();
        }

        for initializer in &body.instance_initializers {
            self.write("(function () ");
            self.emit_block(initializer);
            self.write(").call(instance);");
            self.write_line();
        }

        self.write("return instance;");
        self.write_line();
        self.decrease_indent();

        let constructor = type_reference(&instantiation.constructor);
        self.write(&format!("}})(typeof {constructor} === 'function' ? "));
        self.emit_constructor_call(instantiation);
        self.write(" : {})");
    }
}

#[cfg(test)]
#[path = "../../tests/declarations_tests.rs"]
mod declarations_tests;
