//! Hard parse errors with diagnostic code mapping
//!
//! Grammar-level construct failures never surface here; they backtrack
//! to literal text inside the parser. A `SyntaxError` means the parse
//! as a whole was abandoned, which only happens on input or resource
//! limits, or on a violated internal invariant.

use crate::logging::{codes, Code};
use crate::utils::Position;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("Template too large: {size} bytes exceeds the {limit} byte limit")]
    TemplateTooLarge { size: usize, limit: usize },

    #[error("Maximum parse depth {limit} exceeded in {context} at {position}")]
    MaxParseDepth {
        limit: usize,
        context: &'static str,
        position: Position,
    },

    #[error("Node limit exceeded: template produced more than {limit} nodes")]
    NodeLimitExceeded { limit: usize },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    pub fn template_too_large(size: usize, limit: usize) -> Self {
        Self::TemplateTooLarge { size, limit }
    }

    pub fn max_parse_depth(limit: usize, context: &'static str, position: Position) -> Self {
        Self::MaxParseDepth {
            limit,
            context,
            position,
        }
    }

    pub fn node_limit_exceeded(limit: usize) -> Self {
        Self::NodeLimitExceeded { limit }
    }

    pub fn internal_parser_error(message: impl Into<String>) -> Self {
        Self::InternalParserError {
            message: message.into(),
        }
    }

    /// Get the diagnostic code for global logging
    pub fn error_code(&self) -> Code {
        match self {
            Self::TemplateTooLarge { .. } => codes::template::TEMPLATE_TOO_LARGE,
            Self::MaxParseDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::NodeLimitExceeded { .. } => codes::syntax::NODE_LIMIT_EXCEEDED,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let error = SyntaxError::template_too_large(20_000_000, 10_485_760);
        assert_eq!(error.error_code().as_str(), "E005");

        let error = SyntaxError::max_parse_depth(100, "bracket", Position::start());
        assert_eq!(error.error_code().as_str(), "E087");

        let error = SyntaxError::node_limit_exceeded(1_000_000);
        assert_eq!(error.error_code().as_str(), "E045");
    }

    #[test]
    fn test_error_display() {
        let error = SyntaxError::max_parse_depth(100, "loop body", Position::start());
        let rendered = error.to_string();
        assert!(rendered.contains("100"));
        assert!(rendered.contains("loop body"));
    }
}
