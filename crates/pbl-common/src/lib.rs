//! Common types and utilities for the polybabel compiler.
//!
//! This crate provides foundational types used across all pbl crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Source languages (`Language`) keyed by file extension
//! - Line/offset mapping for error reporting (`LineMap`)
//! - Compiler limits and thresholds

// Diagnostic model and message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Source languages known to the compiler
pub mod language;
pub use language::Language;

// Centralized limits and thresholds
pub mod limits;

// Line/offset mapping for source locations
pub mod position;
pub use position::LineMap;
