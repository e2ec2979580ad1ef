//! AST node definitions for parsed SPIP templates

pub mod nodes;

pub use nodes::*;
