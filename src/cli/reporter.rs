use colored::Colorize;
use pbl_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;

/// Renders diagnostics as `file(line): error PBLcode: message`, followed by
/// the offending source line and a `~` underline when the token is known.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Color unless `NO_COLOR` is set or stdout is not a terminal.
    #[must_use]
    pub fn color_from_env(is_terminal: bool) -> bool {
        is_terminal && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
    }

    /// Register the text of `file` for source snippets.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        let text = text.into();
        self.line_maps.insert(file.clone(), LineMap::build(&text));
        self.sources.insert(file, text);
    }

    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    #[must_use]
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        let file = if diagnostic.file.is_empty() { "<unknown>" } else { &diagnostic.file };
        let location = match self.line_of(diagnostic) {
            Some(line) => format!("{file}({line})"),
            None => file.to_string(),
        };
        output.push_str(&if self.color { location.cyan().to_string() } else { location });

        output.push_str(": ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) = self.format_snippet(diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// The diagnostic's own line, or the line its token starts on.
    fn line_of(&self, diagnostic: &Diagnostic) -> Option<u32> {
        diagnostic.line.or_else(|| {
            let line_map = self.line_maps.get(&diagnostic.file)?;
            diagnostic.has_span().then(|| line_map.line_of(diagnostic.start))
        })
    }

    /// ```text
    ///     3   int x = "a";
    ///                 ~~~
    /// ```
    fn format_snippet(&self, diagnostic: &Diagnostic) -> Option<String> {
        if !diagnostic.has_span() {
            return None;
        }
        let source = self.sources.get(&diagnostic.file)?;
        let line_map = self.line_maps.get(&diagnostic.file)?;
        let line = line_map.line_of(diagnostic.start);
        let line_start = line_map.line_start(line)?;
        let line_text = line_map.line_text(source, line)?;

        let column = diagnostic.start.saturating_sub(line_start) as usize;
        let mut underline = String::new();
        let mut width = 0;
        for (offset, ch) in line_text.char_indices() {
            if offset < column {
                underline.push(if ch == '\t' { '\t' } else { ' ' });
            } else if offset < column + diagnostic.length as usize {
                underline.push('~');
                width += 1;
            } else {
                break;
            }
        }
        if width == 0 {
            underline.push('~');
        }

        let underline = if self.color { underline.red().to_string() } else { underline };
        Some(format!("\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.label();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("PBL{code}");
        if self.color { label.bright_blue().to_string() } else { label }
    }
}
