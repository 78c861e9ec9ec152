//! Indentation-aware text buffer.
//!
//! Indentation is written lazily: a line's indent is emitted with its first
//! piece of text, so blank lines never carry trailing whitespace.

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    at_line_start: bool,
}

impl SourceWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Start a new line unless the writer is already at the start of one.
    pub fn ensure_line(&mut self) {
        if !self.at_line_start {
            self.write_line();
        }
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.output.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    #[must_use]
    pub const fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    #[must_use]
    pub fn get_output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn take_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "../tests/source_writer_tests.rs"]
mod source_writer_tests;
