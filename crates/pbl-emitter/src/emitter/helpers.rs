use super::Printer;
use pbl_parser::syntax::{JavaType, Statement, VariableDeclaration};

impl Printer<'_> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) const fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) const fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Start a top-level unit, separated from the previous one by a blank
    /// line.
    pub(super) fn begin_unit(&mut self) {
        if self.writer.is_empty() {
            return;
        }
        self.writer.ensure_line();
        self.writer.write_line();
    }

    /// Write `item` for each entry of `items`, separated by `, `.
    pub(super) fn emit_comma_separated<T>(&mut self, items: &[T], mut emit: impl FnMut(&mut Self, &T)) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            emit(self, item);
        }
    }

    /// `(a, b)` call arguments.
    pub(super) fn emit_arguments(&mut self, arguments: &[Statement]) {
        self.write("(");
        self.emit_comma_separated(arguments, |printer, argument| printer.emit_statement(argument));
        self.write(")");
    }

    /// `(a, ...rest)` parameter list.
    pub(super) fn emit_parameters(&mut self, parameters: &[VariableDeclaration]) {
        self.write("(");
        self.emit_comma_separated(parameters, |printer, parameter| {
            if parameter.is_variadic {
                printer.write("...");
            }
            printer.write(&parameter.name);
        });
        self.write(")");
    }
}

// =============================================================================
// Name mapping
// =============================================================================

/// The JavaScript global standing in for a `java.lang` type, or `name`
/// itself.
#[must_use]
pub fn host_type_name(name: &str) -> &str {
    match name {
        "Exception" | "RuntimeException" | "Throwable" | "Error" | "IllegalArgumentException"
        | "IllegalStateException" => "Error",
        "Integer" | "Long" | "Short" | "Byte" | "Double" | "Float" => "Number",
        "Character" => "String",
        _ => name,
    }
}

/// Whether a `catch` of `name` catches every thrown value.
pub(super) fn is_catch_all(name: &str) -> bool {
    matches!(name, "Exception" | "Throwable" | "RuntimeException" | "Error")
}

/// The expression naming a type: package-qualified names keep only the
/// type name, nested names keep their enclosing chain.
#[must_use]
pub fn type_reference(ty: &JavaType) -> String {
    let chain = &ty.namespace_chain;
    let first_type = chain
        .iter()
        .position(|segment| segment.starts_with(|c: char| c.is_ascii_uppercase()))
        .unwrap_or(0);
    match &chain[first_type..] {
        [single] => host_type_name(single).to_string(),
        segments => segments.join("."),
    }
}

/// The value a field or array slot of type `ty` holds before its first
/// assignment.
#[must_use]
pub fn default_value(ty: &JavaType) -> &'static str {
    if ty.is_array() {
        return "null";
    }
    match ty.name() {
        "byte" | "short" | "int" | "long" | "float" | "double" => "0",
        "boolean" => "false",
        _ => "null",
    }
}
