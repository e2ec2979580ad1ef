//! The `Parser` trait, builder errors, and atomic name builders
//!
//! The trait is the seam between the grammar and the concrete parser.
//! Scan requests go through the character classifier one capability at
//! a time; the raw navigation methods are for literal construct text
//! that the classifier never sees (keywords, delimiters, names).

use std::fmt;

use crate::config::compile_time::grammar::MAX_IDENTIFIER_LENGTH;
use crate::logging::{codes, Code};
use crate::scanner::ConstructOpener;
use crate::utils::{Position, Span};

/// A failed construct parse, carrying its diagnostic code
///
/// Builder failures are recoverable: the caller backtracks and emits
/// literal text instead. The code survives into the parser's error
/// history for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub code: Code,
    pub message: String,
}

impl BuildError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A generic grammar mismatch with no more specific code
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::new(codes::syntax::GRAMMAR_VIOLATION, message)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

pub type BuildResult<T> = Result<T, BuildError>;

/// A restore point for backtracking a failed construct
///
/// Captures the cursor position and the length of the emitted token
/// ledger; restoring rolls both back so a retried parse observes the
/// exact pre-attempt state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCheckpoint {
    pub position: Position,
    pub emitted_len: usize,
}

/// Parser interface that builders expect
pub trait Parser {
    // === CLASSIFIER REQUESTS ===

    /// Request one content character; None when the classifier declines
    fn scan_content_char(&mut self) -> Option<char>;
    /// Request a structural whitespace run; None when the run is refused
    fn scan_structural_ws(&mut self) -> Option<Span>;
    /// Request a gated parameter-opening brace
    fn scan_param_open(&mut self) -> Option<Span>;

    // === RAW NAVIGATION ===

    fn peek_char(&self) -> Option<char>;
    fn peek_char_at(&self, n: usize) -> Option<char>;
    fn next_char(&mut self) -> Option<char>;
    fn at_str(&self, prefix: &str) -> bool;
    fn is_eof(&self) -> bool;

    // === POSITION AND LOOKAHEAD ===

    fn current_position(&self) -> Position;
    fn current_opener(&self) -> Option<ConstructOpener>;

    // === EXPECTATION METHODS ===

    fn expect_char(&mut self, expected: char) -> BuildResult<()>;
    fn expect_str(&mut self, expected: &str) -> BuildResult<()>;

    // === BACKTRACKING ===

    fn checkpoint(&self) -> ParseCheckpoint;
    fn restore(&mut self, checkpoint: ParseCheckpoint);
    /// Record a recovered construct failure for diagnostics
    fn note_fallback(&mut self, error: &BuildError);

    // === RECURSION AND RESOURCE GUARDS ===

    /// Enter a nested construct; fails when the depth limit is reached
    fn enter_context(&mut self, context: &'static str) -> BuildResult<()>;
    fn exit_context(&mut self);
    /// Count one produced node against the node budget
    fn note_node(&mut self) -> BuildResult<()>;
    /// True once a resource limit tripped; poisoned failures never
    /// backtrack to literal text
    fn is_poisoned(&self) -> bool;
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn too_long(what: &str) -> BuildError {
    BuildError::new(
        codes::syntax::IDENTIFIER_TOO_LONG,
        format!("{} longer than {} bytes", what, MAX_IDENTIFIER_LENGTH),
    )
}

/// Parse a tag name: an uppercase letter followed by `[A-Z0-9_]*`
pub fn parse_tag_name(parser: &mut dyn Parser) -> BuildResult<String> {
    let mut name = String::new();
    match parser.peek_char() {
        Some(c) if c.is_ascii_uppercase() => {
            name.push(c);
            parser.next_char();
        }
        found => {
            return Err(BuildError::grammar(format!(
                "expected uppercase tag name, found {:?}",
                found
            )))
        }
    }
    while let Some(c) = parser.peek_char() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' {
            name.push(c);
            parser.next_char();
        } else {
            break;
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(too_long("tag name"));
        }
    }
    Ok(name)
}

/// Parse a loop name, leading underscore included (`_articles`)
pub fn parse_loop_name(parser: &mut dyn Parser) -> BuildResult<String> {
    let mut name = String::new();
    while let Some(c) = parser.peek_char() {
        if is_ident_char(c) {
            name.push(c);
            parser.next_char();
        } else {
            break;
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(too_long("loop name"));
        }
    }
    if name.is_empty() {
        return Err(BuildError::grammar(format!(
            "expected loop name, found {:?}",
            parser.peek_char()
        )));
    }
    Ok(name)
}

/// Parse a filter name: a lowercase letter or underscore, then
/// `[a-z0-9_]*`
pub fn parse_filter_name(parser: &mut dyn Parser) -> BuildResult<String> {
    let mut name = String::new();
    match parser.peek_char() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {
            name.push(c);
            parser.next_char();
        }
        found => {
            return Err(BuildError::grammar(format!(
                "expected filter name, found {:?}",
                found
            )))
        }
    }
    while let Some(c) = parser.peek_char() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            name.push(c);
            parser.next_char();
        } else {
            break;
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(too_long("filter name"));
        }
    }
    Ok(name)
}

/// Parse the lowercase qualifier of a `#_loop:TAG` reference
pub fn parse_loop_qualifier(parser: &mut dyn Parser) -> BuildResult<String> {
    let mut name = String::new();
    while let Some(c) = parser.peek_char() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            name.push(c);
            parser.next_char();
        } else {
            break;
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(too_long("loop qualifier"));
        }
    }
    if name.is_empty() {
        return Err(BuildError::grammar("expected loop qualifier after '#_'"));
    }
    Ok(name)
}
