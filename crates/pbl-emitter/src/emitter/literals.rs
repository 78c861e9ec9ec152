use super::Printer;
use super::helpers::default_value;
use pbl_parser::syntax::{JavaType, Literal, LiteralKind, Statement};

impl Printer<'_> {
    // =========================================================================
    // Literals
    // =========================================================================

    /// Keyword, number and string literals are valid JavaScript as written;
    /// character literals become one-character strings.
    pub(super) fn emit_literal(&mut self, literal: &Literal) {
        match literal.kind {
            LiteralKind::Array => {
                self.write("[");
                self.emit_comma_separated(&literal.elements, |printer, element| printer.emit_statement(element));
                self.write("]");
            }
            LiteralKind::Keyword | LiteralKind::Number | LiteralKind::String => self.write(&literal.value),
        }
    }

    /// `new T[n]` becomes an array of `n` default values of `T`.
    pub(super) fn emit_array_allocation(&mut self, element: &JavaType, size: &Statement) {
        self.write("new Array(");
        self.emit_statement(size);
        self.write(&format!(").fill({})", default_value(element)));
    }
}
