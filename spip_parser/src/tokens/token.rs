//! Scanner token system for SPIP templates
//!
//! The scanner produces exactly three token kinds. Everything else in a
//! template (tag names, braces, loop keywords) is recognized by the grammar
//! layer, which consumes these tokens one decision at a time.

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three token kinds the scanner can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A single character of plain template text
    ContentChar,
    /// A run of whitespace inside a construct, followed by a construct
    /// continuation character
    StructuralWhitespace,
    /// An opening brace that starts an abbreviated parameter block
    ParamOpen,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::ContentChar => "content_char",
            TokenKind::StructuralWhitespace => "structural_whitespace",
            TokenKind::ParamOpen => "param_open",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which token kinds the caller is prepared to accept
///
/// Supplied fresh on every scan request; this is the only context channel
/// between the grammar layer and the scanner. A request with every flag
/// off always declines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub content_char: bool,
    pub structural_ws: bool,
    pub param_open: bool,
}

impl Capabilities {
    /// Accept every token kind
    pub fn all() -> Self {
        Self {
            content_char: true,
            structural_ws: true,
            param_open: true,
        }
    }

    /// Accept nothing (the scanner always declines)
    pub fn none() -> Self {
        Self::default()
    }

    /// Accept only plain content characters
    pub fn content_only() -> Self {
        Self {
            content_char: true,
            ..Self::default()
        }
    }

    /// Accept only structural whitespace, as between construct sub-elements
    pub fn whitespace_only() -> Self {
        Self {
            structural_ws: true,
            ..Self::default()
        }
    }

    /// Accept only a parameter-block opening brace
    pub fn param_open_only() -> Self {
        Self {
            param_open: true,
            ..Self::default()
        }
    }

    /// Check whether a given kind is accepted
    pub fn accepts(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::ContentChar => self.content_char,
            TokenKind::StructuralWhitespace => self.structural_ws,
            TokenKind::ParamOpen => self.param_open,
        }
    }

    /// Check whether no kind is accepted
    pub fn is_empty(&self) -> bool {
        !self.content_char && !self.structural_ws && !self.param_open
    }
}

/// A token the scanner has committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub span: Span,
}

impl ScannedToken {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Byte length of the consumed text
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

impl fmt::Display for ScannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.span)
    }
}

/// Outcome of one scan request
///
/// Accept always covers at least one character. Decline guarantees the
/// cursor was not moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Accept(ScannedToken),
    Decline,
}

impl Scan {
    pub fn is_accept(&self) -> bool {
        matches!(self, Scan::Accept(_))
    }

    pub fn is_decline(&self) -> bool {
        matches!(self, Scan::Decline)
    }

    /// Get the accepted token, if any
    pub fn token(&self) -> Option<ScannedToken> {
        match self {
            Scan::Accept(token) => Some(*token),
            Scan::Decline => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_capabilities_accepts() {
        let caps = Capabilities::content_only();
        assert!(caps.accepts(TokenKind::ContentChar));
        assert!(!caps.accepts(TokenKind::StructuralWhitespace));
        assert!(!caps.accepts(TokenKind::ParamOpen));
    }

    #[test]
    fn test_empty_capabilities() {
        assert!(Capabilities::none().is_empty());
        assert!(!Capabilities::all().is_empty());
    }

    #[test]
    fn test_single_kind_constructors() {
        assert!(Capabilities::whitespace_only().accepts(TokenKind::StructuralWhitespace));
        assert!(!Capabilities::whitespace_only().accepts(TokenKind::ContentChar));
        assert!(Capabilities::param_open_only().accepts(TokenKind::ParamOpen));
    }

    #[test]
    fn test_scan_accessors() {
        let span = Span::new(Position::start(), Position::new(1, 1, 2));
        let scan = Scan::Accept(ScannedToken::new(TokenKind::ContentChar, span));

        assert!(scan.is_accept());
        assert_eq!(scan.token().unwrap().len(), 1);
        assert!(Scan::Decline.is_decline());
        assert_eq!(Scan::Decline.token(), None);
    }
}
