//! Error recording.
//!
//! `check`-style helpers record an error and let validation continue in
//! place. `assert`-style helpers return a [`ValidationHalt`] that unwinds
//! to the nearest [`ValidatorContext::validate_node_with`].

use crate::context::{ValidationHalt, ValidationResult, ValidatorContext};
use pbl_binder::TypeConstraint;
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages, get_diagnostic_category};
use pbl_common::{Diagnostic, DiagnosticCategory, format_message};
use pbl_scanner::TokenId;

impl ValidatorContext<'_> {
    fn diagnostic_at(&self, token: Option<TokenId>, message: String, code: u32) -> Diagnostic {
        let Some(token) = token else {
            return Diagnostic::without_span(self.file.clone(), message, code);
        };
        let token = self.tokens.get(token);
        let length = u32::try_from(token.value.len()).unwrap_or(u32::MAX);
        let diagnostic = if get_diagnostic_category(code) == Some(DiagnosticCategory::Warning) {
            Diagnostic::warning(self.file.clone(), token.start, length, message, code)
        } else {
            Diagnostic::error(self.file.clone(), token.start, length, message, code)
        };
        diagnostic.with_line(token.line)
    }

    // =========================================================================
    // Check style
    // =========================================================================

    /// Record an error at `token`.
    pub fn report(&mut self, token: TokenId, code: u32, message: String) {
        tracing::trace!(code, %message, "validation error");
        let diagnostic = self.diagnostic_at(Some(token), message, code);
        self.diagnostics.push(diagnostic);
    }

    /// Record a diagnostic that is not tied to a token.
    pub fn report_file(&mut self, code: u32, message: String) {
        let diagnostic = self.diagnostic_at(None, message, code);
        self.diagnostics.push(diagnostic);
    }

    /// Record an error unless `condition` holds. Returns `condition`.
    pub fn check(&mut self, condition: bool, token: TokenId, code: u32, message: impl FnOnce() -> String) -> bool {
        if !condition {
            self.report(token, code, message());
        }
        condition
    }

    /// Check that `source` may be used where `target` is expected.
    pub fn check_assignable(&mut self, source: &TypeConstraint, target: &TypeConstraint, token: TokenId) -> bool {
        if self.matches(source, target) {
            return true;
        }
        let message = format_message(
            diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &[&self.type_name(source), &self.type_name(target)],
        );
        self.report(token, diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE, message);
        false
    }

    /// Report `name` as unknown and fall back to the dynamic type.
    pub fn unknown_identifier(&mut self, name: &str, token: TokenId) -> TypeConstraint {
        let message = format_message(diagnostic_messages::UNKNOWN_IDENTIFIER, &[name]);
        self.report(token, diagnostic_codes::UNKNOWN_IDENTIFIER, message);
        TypeConstraint::dynamic()
    }

    // =========================================================================
    // Assert style
    // =========================================================================

    #[must_use]
    pub fn halt(&self, token: TokenId, code: u32, message: String) -> ValidationHalt {
        ValidationHalt {
            message,
            code,
            token: Some(token),
        }
    }

    /// Halt the current node unless `condition` holds.
    pub fn assert(
        &self,
        condition: bool,
        token: TokenId,
        code: u32,
        message: impl FnOnce() -> String,
    ) -> ValidationResult<()> {
        if condition {
            Ok(())
        } else {
            Err(self.halt(token, code, message()))
        }
    }

    pub(crate) fn record_halt(&mut self, halt: ValidationHalt) {
        let diagnostic = self.diagnostic_at(halt.token, halt.message, halt.code);
        self.diagnostics.push(diagnostic);
    }
}

/// `'A', 'B'` for an argument list.
#[must_use]
pub fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
