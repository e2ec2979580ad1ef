//! Shared primitive types for the SPIP scanner and parser
//!
//! Dependency-light source location types used by both the character
//! classifier and the grammar layer.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
