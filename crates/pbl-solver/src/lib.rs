//! Type relations for the polybabel compiler.
//!
//! This crate provides:
//! - `TypeMatcher` - One-way type matching and subtype queries over a
//!   `SymbolDictionary`
//! - Overload and constructor selection by argument types

pub mod relations;
pub use relations::TypeMatcher;

pub mod overloads;
pub use overloads::{MethodLookup, MethodMatch};
