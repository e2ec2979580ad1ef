//! Cursor over template source text
//!
//! Peek primitives never move the cursor; only `advance` commits a
//! character. Decline-without-consumption falls out of this split: a
//! classification that never calls `advance` cannot move the cursor.

use crate::utils::{Position, Span};

/// A position-tracking cursor over template text
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the input
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: Position::start(),
        }
    }

    /// The full input text
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Check whether the cursor is at end of input
    pub fn is_eof(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    /// Text not yet consumed
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos.offset..]
    }

    /// Peek at the current character without moving
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek at the nth character ahead without moving (0 = current)
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Check whether the remaining input starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Consume and return one character
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    /// Consume n characters (stops early at end of input)
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Take a checkpoint for later restore
    pub fn checkpoint(&self) -> Position {
        self.pos
    }

    /// Restore a previously taken checkpoint
    pub fn restore(&mut self, checkpoint: Position) {
        debug_assert!(checkpoint.offset <= self.input.len());
        self.pos = checkpoint;
    }

    /// Span from a checkpoint to the current position
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_move() {
        let cursor = Cursor::new("#TITRE");
        assert_eq!(cursor.peek(), Some('#'));
        assert_eq!(cursor.peek(), Some('#'));
        assert_eq!(cursor.position().offset, 0);
    }

    #[test]
    fn test_peek_at() {
        let cursor = Cursor::new("<BOUCLE");
        assert_eq!(cursor.peek_at(0), Some('<'));
        assert_eq!(cursor.peek_at(1), Some('B'));
        assert_eq!(cursor.peek_at(2), Some('O'));
        assert_eq!(cursor.peek_at(7), None);
    }

    #[test]
    fn test_advance_tracks_position() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut cursor = Cursor::new("#TITRE");
        let cp = cursor.checkpoint();
        cursor.advance_by(3);
        assert_eq!(cursor.position().offset, 3);
        cursor.restore(cp);
        assert_eq!(cursor.position().offset, 0);
        assert_eq!(cursor.peek(), Some('#'));
    }

    #[test]
    fn test_span_from() {
        let mut cursor = Cursor::new("abc def");
        let start = cursor.checkpoint();
        cursor.advance_by(3);
        let span = cursor.span_from(start);
        assert_eq!(span.slice(cursor.input()), "abc");
    }

    #[test]
    fn test_eof() {
        let mut cursor = Cursor::new("x");
        assert!(!cursor.is_eof());
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_multibyte_advance() {
        let mut cursor = Cursor::new("é#");
        cursor.advance();
        assert_eq!(cursor.position().offset, 2);
        assert_eq!(cursor.peek(), Some('#'));
    }
}
