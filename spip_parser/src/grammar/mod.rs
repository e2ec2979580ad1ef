//! Grammar definitions and construct builders for SPIP templates

pub mod ast;
pub mod builders;

// Re-export AST types
pub use ast::nodes::*;

// Re-export builders
pub use builders::*;
