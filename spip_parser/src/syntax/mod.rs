//! Syntax analysis: the concrete template parser and its errors

pub mod error;
pub mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{parse_template, TemplateParser};
