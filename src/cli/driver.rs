use anyhow::{Context, Result};
use pbl_common::Diagnostic;
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::format_message;
use std::path::PathBuf;
use tracing::{debug, info};

use super::config::CompilerOptions;
use super::files::{output_path, relative_file_name, resolve_files_deep};
use crate::compiler::Compiler;

/// What one run read, reported and wrote.
#[derive(Debug, Default)]
pub struct CompilationResult {
    /// Every diagnostic, grouped by file in the order the files were read.
    pub diagnostics: Vec<Diagnostic>,
    pub emitted_files: Vec<PathBuf>,
    pub files_read: Vec<PathBuf>,
    /// Source text by file name, for rendering snippets.
    pub sources: Vec<(String, String)>,
}

impl CompilationResult {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_error()).count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Compile every source file under the input directory.
///
/// Output is written only when the whole run is free of errors, to
/// `<output_dir>/<relative path>.js`.
pub fn compile(options: &CompilerOptions) -> Result<CompilationResult> {
    let paths = resolve_files_deep(&options.input_dir)?;
    info!(files = paths.len(), input = %options.input_dir.display(), "compiling");

    let mut compiler = Compiler::new();
    let mut result = CompilationResult::default();
    for path in paths {
        let file = relative_file_name(&options.input_dir, &path);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                compiler.add_source(file.clone(), &text);
                result.sources.push((file, text));
            }
            Err(error) => {
                let message = format_message(
                    diagnostic_messages::CANNOT_READ_FILE,
                    &[&path.display().to_string(), &error.to_string()],
                );
                compiler.add_error(
                    file.clone(),
                    Diagnostic::without_span(file, message, diagnostic_codes::CANNOT_READ_FILE),
                );
            }
        }
        result.files_read.push(path);
    }

    compiler.compile_all();

    let files: Vec<String> = compiler.files().map(str::to_string).collect();
    for file in &files {
        result.diagnostics.extend(compiler.diagnostics_for(file).iter().cloned());
    }
    if compiler.has_errors() {
        debug!(errors = compiler.error_count(), "skipping output");
        return Ok(result);
    }

    for file in &files {
        let Some(code) = compiler.get_compiled_code(file) else {
            continue;
        };
        let path = output_path(&options.output_dir, file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {}", parent.display()))?;
        }
        std::fs::write(&path, code).with_context(|| {
            format_message(diagnostic_messages::CANNOT_WRITE_FILE, &[&path.display().to_string(), "write failed"])
        })?;
        debug!(file = %path.display(), "wrote output");
        result.emitted_files.push(path);
    }

    Ok(result)
}
