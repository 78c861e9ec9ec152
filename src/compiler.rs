//! The compiler facade.
//!
//! A [`Compiler`] collects the files of one run. Each added file is
//! resolved into the shared [`SymbolDictionary`] straight away; forward and
//! cross-file references are stored as candidate lists, so the order files
//! are added in does not matter. Validation and translation run once every
//! file is known.

use indexmap::IndexMap;
use pbl_binder::{FileNamespace, NativeTypes, Symbol, SymbolDictionary, install_native_types, resolve_java};
use pbl_checker::{Resolutions, ValidationOutput, validate_java};
use pbl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use pbl_common::{Diagnostic, Language, format_message};
use pbl_emitter::translate_java;
use pbl_parser::{JavaSyntaxTree, SourceError, parse_java};
use pbl_scanner::TokenizeError;
use std::path::Path;
use tracing::{debug, info_span};

// =============================================================================
// Language bundles
// =============================================================================

pub type ParseFn = fn(&str) -> Result<JavaSyntaxTree, SourceError>;
pub type ResolveFn = fn(&str, &JavaSyntaxTree, &mut SymbolDictionary, &NativeTypes) -> Vec<Symbol>;
pub type ValidateFn = fn(&str, &JavaSyntaxTree, &SymbolDictionary, &NativeTypes) -> ValidationOutput;
pub type TranslateFn = fn(&str, &JavaSyntaxTree, &Resolutions) -> String;

/// The four pipeline stages of one source language.
#[derive(Clone, Copy)]
pub struct LanguageBundle {
    pub language: Language,
    pub parse: ParseFn,
    pub resolve: ResolveFn,
    pub validate: ValidateFn,
    pub translate: TranslateFn,
}

impl LanguageBundle {
    pub const JAVA: Self = Self {
        language: Language::Java,
        parse: parse_java,
        resolve: resolve_java_file,
        validate: validate_java,
        translate: translate_java,
    };

    #[must_use]
    pub const fn for_language(language: Language) -> Self {
        match language {
            Language::Java => Self::JAVA,
        }
    }

    /// The bundle for `path`'s extension, if the language is known.
    #[must_use]
    pub fn for_path(path: impl AsRef<Path>) -> Option<Self> {
        Language::from_path(path).map(Self::for_language)
    }
}

impl std::fmt::Debug for LanguageBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageBundle").field("language", &self.language).finish()
    }
}

fn resolve_java_file(
    file: &str,
    tree: &JavaSyntaxTree,
    dictionary: &mut SymbolDictionary,
    natives: &NativeTypes,
) -> Vec<Symbol> {
    resolve_java(tree, FileNamespace::for_tree(file, tree), dictionary, natives)
}

/// The diagnostic for a file that failed to tokenize or parse.
#[must_use]
pub fn source_error_diagnostic(file: &str, error: &SourceError) -> Diagnostic {
    match error {
        SourceError::Tokenize(TokenizeError::UnexpectedCharacter { character, line, offset }) => {
            let message = format_message(
                diagnostic_messages::UNEXPECTED_CHARACTER,
                &[&character.escape_debug().to_string()],
            );
            Diagnostic::error(
                file.to_string(),
                *offset,
                character.len_utf8() as u32,
                message,
                diagnostic_codes::UNEXPECTED_CHARACTER,
            )
            .with_line(*line)
        }
        SourceError::Parse(error) => Diagnostic::error(
            file.to_string(),
            error.start,
            error.length,
            error.message.clone(),
            diagnostic_codes::UNEXPECTED_TOKEN,
        )
        .with_line(error.line),
    }
}

// =============================================================================
// Compiler
// =============================================================================

#[derive(Debug)]
struct FileUnit {
    bundle: LanguageBundle,
    /// `None` when the file failed to read, tokenize or parse.
    tree: Option<JavaSyntaxTree>,
    diagnostics: Vec<Diagnostic>,
    resolutions: Option<Resolutions>,
    output: Option<String>,
}

impl FileUnit {
    fn new(bundle: LanguageBundle) -> Self {
        Self {
            bundle,
            tree: None,
            diagnostics: Vec::new(),
            resolutions: None,
            output: None,
        }
    }

    fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Per-file trees, diagnostics and output of one compilation run, plus the
/// symbol dictionary every file resolves into.
pub struct Compiler {
    files: IndexMap<String, FileUnit>,
    dictionary: SymbolDictionary,
    natives: NativeTypes,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        let mut dictionary = SymbolDictionary::new();
        let natives = install_native_types(&mut dictionary);
        Self {
            files: IndexMap::new(),
            dictionary,
            natives,
        }
    }

    /// Add a parsed `tree` and resolve its declarations. Adding a file again
    /// replaces its tree; symbols it defined earlier stay in the dictionary.
    pub fn add(&mut self, file: impl Into<String>, tree: JavaSyntaxTree) {
        let file = file.into();
        let bundle = LanguageBundle::for_path(&file).unwrap_or(LanguageBundle::JAVA);
        let symbols = (bundle.resolve)(&file, &tree, &mut self.dictionary, &self.natives);
        debug!(file = %file, symbols = symbols.len(), "added file");

        let mut unit = FileUnit::new(bundle);
        unit.tree = Some(tree);
        self.files.insert(file, unit);
    }

    /// Tokenize and parse `text` with the bundle of `file`'s language, then
    /// [`add`](Self::add) it. A failure is recorded as the file's error.
    /// Returns whether the file was added.
    pub fn add_source(&mut self, file: impl Into<String>, text: &str) -> bool {
        let file = file.into();
        let Some(bundle) = LanguageBundle::for_path(&file) else {
            tracing::warn!(file = %file, "no language for file extension");
            return false;
        };

        match (bundle.parse)(text) {
            Ok(tree) => {
                self.add(file, tree);
                true
            }
            Err(error) => {
                debug!(file = %file, %error, "file failed to parse");
                let diagnostic = source_error_diagnostic(&file, &error);
                self.add_error(file, diagnostic);
                false
            }
        }
    }

    /// Record a diagnostic against `file`, adding the file if it is new.
    pub fn add_error(&mut self, file: impl Into<String>, diagnostic: Diagnostic) {
        let file = file.into();
        let bundle = LanguageBundle::for_path(&file).unwrap_or(LanguageBundle::JAVA);
        self.files
            .entry(file)
            .or_insert_with(|| FileUnit::new(bundle))
            .diagnostics
            .push(diagnostic);
    }

    /// Validate every added file that has not been validated yet, in the
    /// order the files were added.
    pub fn validate_all(&mut self) {
        let dictionary = &self.dictionary;
        let natives = &self.natives;
        for (file, unit) in &mut self.files {
            validate_unit(file, unit, dictionary, natives);
        }
    }

    /// Validate every file, then translate each one without errors.
    pub fn compile_all(&mut self) {
        let _span = info_span!("compile_all", files = self.files.len()).entered();
        self.validate_all();
        let files: Vec<String> = self.files.keys().cloned().collect();
        for file in files {
            self.compile_file(&file);
        }
    }

    /// Translate `file`, validating it first when needed. Returns the
    /// translated code, or `None` when the file is unknown or has errors.
    pub fn compile_file(&mut self, file: &str) -> Option<&str> {
        let dictionary = &self.dictionary;
        let natives = &self.natives;
        let unit = self.files.get_mut(file)?;
        validate_unit(file, unit, dictionary, natives);
        if unit.has_errors() {
            return None;
        }

        if unit.output.is_none() {
            let tree = unit.tree.as_ref()?;
            let resolutions = unit.resolutions.as_ref()?;
            unit.output = Some((unit.bundle.translate)(file, tree, resolutions));
        }
        unit.output.as_deref()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files.values().any(FileUnit::has_errors)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.files
            .values()
            .map(|unit| unit.diagnostics.iter().filter(|diagnostic| diagnostic.is_error()).count())
            .sum()
    }

    /// Call `f` with every error, grouped by file in insertion order.
    pub fn for_each_error(&self, mut f: impl FnMut(&str, &Diagnostic)) {
        for (file, unit) in &self.files {
            for diagnostic in unit.diagnostics.iter().filter(|diagnostic| diagnostic.is_error()) {
                f(file, diagnostic);
            }
        }
    }

    pub fn errors_for<'c>(&'c self, file: &str) -> impl Iterator<Item = &'c Diagnostic> + use<'c> {
        self.diagnostics_for(file).iter().filter(|diagnostic| diagnostic.is_error())
    }

    /// Every diagnostic of `file`, warnings included.
    #[must_use]
    pub fn diagnostics_for(&self, file: &str) -> &[Diagnostic] {
        self.files.get(file).map_or(&[], |unit| unit.diagnostics.as_slice())
    }

    #[must_use]
    pub fn get_compiled_code(&self, file: &str) -> Option<&str> {
        self.files.get(file)?.output.as_deref()
    }

    #[must_use]
    pub fn tree(&self, file: &str) -> Option<&JavaSyntaxTree> {
        self.files.get(file)?.tree.as_ref()
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn dictionary(&self) -> &SymbolDictionary {
        &self.dictionary
    }

    #[must_use]
    pub const fn natives(&self) -> &NativeTypes {
        &self.natives
    }

    /// Forget every file and start over with a fresh dictionary.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn validate_unit(file: &str, unit: &mut FileUnit, dictionary: &SymbolDictionary, natives: &NativeTypes) {
    if unit.resolutions.is_some() {
        return;
    }
    let Some(tree) = &unit.tree else {
        return;
    };
    let output = (unit.bundle.validate)(file, tree, dictionary, natives);
    unit.diagnostics.extend(output.diagnostics);
    unit.resolutions = Some(output.resolutions);
}
