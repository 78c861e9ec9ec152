use super::Printer;
use super::helpers::type_reference;
use pbl_parser::syntax::{FunctionCall, Instantiation, Property, PropertyChain, Reference};

impl Printer<'_> {
    // =========================================================================
    // References and calls
    // =========================================================================

    /// A bare name, qualified with `this.` or its class when it names a
    /// member.
    pub(super) fn emit_reference(&mut self, reference: &Reference) {
        let resolutions = self.resolutions;
        if let Some(qualifier) = resolutions.qualifier(reference.token) {
            self.write(qualifier);
            self.write(".");
        }
        self.write(&reference.name);
    }

    /// A call that starts an expression. `this(...)` and `super(...)` call
    /// the selected constructor method directly.
    pub(super) fn emit_function_call(&mut self, call: &FunctionCall) {
        let resolutions = self.resolutions;
        let stored = resolutions.call_name(call.token);
        match call.name.as_deref() {
            Some(keyword @ ("this" | "super")) => {
                self.write(keyword);
                if let Some(stored) = stored {
                    self.write(".");
                    self.write(stored);
                }
            }
            Some(name) => {
                if let Some(qualifier) = resolutions.qualifier(call.token) {
                    self.write(qualifier);
                    self.write(".");
                }
                self.write(stored.unwrap_or(name));
            }
            None => {}
        }
        self.emit_arguments(&call.arguments);
    }

    // =========================================================================
    // Property chains
    // =========================================================================

    pub(super) fn emit_property_chain(&mut self, chain: &PropertyChain) {
        if self.emit_console_call(chain) {
            return;
        }

        let resolutions = self.resolutions;
        for (index, property) in chain.properties.iter().enumerate() {
            let is_head = index == 0;
            match property {
                Property::Reference(reference) if is_head => self.emit_reference(reference),
                Property::Reference(reference) => {
                    self.write(".");
                    self.write(&reference.name);
                }
                Property::Call(call) if is_head => self.emit_function_call(call),
                Property::Call(call) => {
                    if let Some(name) = call.name.as_deref() {
                        self.write(".");
                        self.write(resolutions.call_name(call.token).unwrap_or(name));
                    }
                    self.emit_arguments(&call.arguments);
                }
                Property::Index(value) => {
                    self.write("[");
                    self.emit_statement(value);
                    self.write("]");
                }
                Property::Type(ty) => {
                    if !is_head {
                        self.write(".");
                    }
                    self.write(&ty.namespace_chain.join("."));
                }
                Property::Head(node) => self.emit_node(node),
            }
        }
    }

    /// `System.out.println(x)` prints with `console.log(x)`.
    fn emit_console_call(&mut self, chain: &PropertyChain) -> bool {
        let [Property::Reference(system), Property::Reference(stream), Property::Call(call)] =
            chain.properties.as_slice()
        else {
            return false;
        };
        if system.name != "System" {
            return false;
        }
        let function = match (stream.name.as_str(), call.name.as_deref()) {
            ("out", Some("println" | "print")) => "console.log",
            ("err", Some("println" | "print")) => "console.error",
            _ => return false,
        };
        self.write(function);
        self.emit_arguments(&call.arguments);
        true
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    pub(super) fn emit_instantiation(&mut self, instantiation: &Instantiation) {
        if let Some(size) = &instantiation.array_allocation_size {
            self.emit_array_allocation(&instantiation.constructor, size);
        } else if let Some(literal) = &instantiation.array_literal {
            self.emit_literal(literal);
        } else if let Some(body) = &instantiation.anonymous_object_body {
            self.emit_anonymous_object(instantiation, body);
        } else {
            self.emit_constructor_call(instantiation);
        }
    }

    /// `new T(N, args)`, where `N` is the constructor overload the validator
    /// selected. Classes without declared constructors take no index.
    pub(super) fn emit_constructor_call(&mut self, instantiation: &Instantiation) {
        self.write("new ");
        self.write(&type_reference(&instantiation.constructor));
        self.write("(");
        if let Some(index) = self.resolutions.constructor_index(instantiation.token) {
            self.write(&index.to_string());
            if !instantiation.arguments.is_empty() {
                self.write(", ");
            }
        }
        self.emit_comma_separated(&instantiation.arguments, |printer, argument| printer.emit_statement(argument));
        self.write(")");
    }
}

#[cfg(test)]
#[path = "../../tests/property_access_tests.rs"]
mod property_access_tests;
