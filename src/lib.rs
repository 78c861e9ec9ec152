//! Polybabel: a source-to-source compiler from Java to JavaScript.
//!
//! The pipeline lives in the member crates and is re-exported here:
//! - `scanner` - Source text to token stream
//! - `parser` - Streaming parser engine and the Java grammar
//! - `binder` - Type model, symbol dictionary and symbol resolution
//! - `solver` - Type matching and overload selection
//! - `checker` - Validation
//! - `emitter` - Translation to JavaScript
//!
//! [`Compiler`] drives them over a set of files; the `cli` module and the
//! `pbl` binary wrap it for the command line.

pub use pbl_binder as binder;
pub use pbl_checker as checker;
pub use pbl_common as common;
pub use pbl_emitter as emitter;
pub use pbl_parser as parser;
pub use pbl_scanner as scanner;
pub use pbl_solver as solver;

pub use pbl_common::{Diagnostic, DiagnosticCategory, Language};

// Compiler facade and language dispatch
pub mod compiler;
pub use compiler::{Compiler, LanguageBundle, source_error_diagnostic};

// Tracing subscriber setup for the binary
pub mod tracing_config;

// Command line support
#[cfg(feature = "cli")]
pub mod cli;
