//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for all diagnostic codes, their metadata, and
//! classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a diagnostic code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Template input error codes
pub mod template {
    use super::Code;

    pub const TEMPLATE_TOO_LARGE: Code = Code::new("E005");
    pub const EMPTY_TEMPLATE: Code = Code::new("E006");
}

/// Scanner error codes
pub mod scanner {
    use super::Code;

    pub const WHITESPACE_RUN_TOO_LONG: Code = Code::new("E020");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNCLOSED_LOOP: Code = Code::new("E040");
    pub const MISMATCHED_LOOP_NAME: Code = Code::new("E041");
    pub const UNTERMINATED_PARAMETER_BLOCK: Code = Code::new("E042");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E043");
    pub const FILTER_CHAIN_TOO_LONG: Code = Code::new("E044");
    pub const NODE_LIMIT_EXCEEDED: Code = Code::new("E045");
    pub const UNMATCHED_BRACKET: Code = Code::new("E046");
    pub const GRAMMAR_VIOLATION: Code = Code::new("E047");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // Scanner success codes
    pub const SCAN_COMPLETE: Code = Code::new("I020");

    // Syntax success codes
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                "Critical internal system error",
                "File a bug report with the offending template",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                "System initialization failure",
                "Check logging configuration and environment variables",
            ),
        );

        // Template input errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "Template",
                Severity::Medium,
                false,
                "Template exceeds maximum size limit",
                "Split the template or raise the size limit",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "Template",
                Severity::Low,
                true,
                "Template is empty",
                "Provide template content",
            ),
        );

        // Scanner errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Scanner",
                Severity::Medium,
                true,
                "Whitespace run inside a construct exceeds the scan limit",
                "Reduce whitespace inside tag and loop constructs",
            ),
        );

        // Syntax errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                true,
                "Loop opened without a matching close tag",
                "Add the matching </BOUCLE_name> or </B_name> close tag",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::High,
                true,
                "Loop close tag name does not match the open tag",
                "Make the close tag name match the loop name",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                "Parameter block opened without a closing brace",
                "Add the closing brace or balance nested braces",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Low,
                true,
                "Tag or loop identifier exceeds maximum length",
                "Shorten the identifier",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::Medium,
                true,
                "Filter chain exceeds the maximum number of filters",
                "Reduce the number of chained filters",
            ),
        );
        registry.insert(
            "E045",
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                "Template produced too many nodes",
                "Reduce template complexity or raise the node limit",
            ),
        );
        registry.insert(
            "E046",
            ErrorMetadata::new(
                "E046",
                "Syntax",
                Severity::Medium,
                true,
                "Conditional bracket opened without a matching close",
                "Add the closing bracket",
            ),
        );
        registry.insert(
            "E047",
            ErrorMetadata::new(
                "E047",
                "Syntax",
                Severity::Low,
                true,
                "Template construct does not match the grammar",
                "Check the construct against the template syntax",
            ),
        );
        registry.insert(
            "E086",
            ErrorMetadata::new(
                "E086",
                "Syntax",
                Severity::Critical,
                false,
                "Internal parser invariant violated",
                "File a bug report with the offending template",
            ),
        );
        registry.insert(
            "E087",
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                "Maximum parser recursion depth exceeded",
                "Reduce construct nesting in the template",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get severity for a diagnostic code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|meta| meta.severity)
        .unwrap_or(Severity::Medium)
}

/// Get category for a diagnostic code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|meta| meta.category)
        .unwrap_or("Unknown")
}

/// Get description for a diagnostic code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|meta| meta.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a diagnostic code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|meta| meta.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check if an error with this code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|meta| meta.recoverable)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_error_constants() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            template::TEMPLATE_TOO_LARGE,
            template::EMPTY_TEMPLATE,
            scanner::WHITESPACE_RUN_TOO_LONG,
            syntax::UNCLOSED_LOOP,
            syntax::MISMATCHED_LOOP_NAME,
            syntax::UNTERMINATED_PARAMETER_BLOCK,
            syntax::IDENTIFIER_TOO_LONG,
            syntax::FILTER_CHAIN_TOO_LONG,
            syntax::NODE_LIMIT_EXCEEDED,
            syntax::UNMATCHED_BRACKET,
            syntax::GRAMMAR_VIOLATION,
            syntax::INTERNAL_PARSER_ERROR,
            syntax::MAX_RECURSION_DEPTH,
        ];

        for code in codes {
            assert_ne!(
                get_description(code.as_str()),
                "Unknown error",
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert_eq!(get_severity("E040"), Severity::High);
        assert_eq!(get_severity("E006"), Severity::Low);
    }

    #[test]
    fn test_recoverability() {
        assert!(!is_recoverable("ERR001"));
        assert!(is_recoverable("E041"));
        assert!(!is_recoverable("E087"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Medium);
    }
}
