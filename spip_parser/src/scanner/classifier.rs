//! The character classifier
//!
//! One decision per call: EOF declines, then the parameter-brace gate,
//! then structural whitespace, then single-character content. The caller
//! gates every branch through `Capabilities`, so the classifier itself
//! stays stateless.

use super::cursor::Cursor;
use super::openers::opening_construct;
use crate::config::compile_time::scanner::MAX_WHITESPACE_RUN;
use crate::log_warning;
use crate::logging::codes;
use crate::tokens::{Capabilities, Scan, ScannedToken, TokenKind};

fn is_construct_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

/// Characters that may legally follow whitespace inside a construct
fn continues_construct(c: char) -> bool {
    matches!(c, '{' | '|' | ')' | '*' | '>' | '/')
}

/// Classify the text at the cursor into at most one token
///
/// Accept consumes at least one character; Decline leaves the cursor
/// untouched. The outcome depends only on the cursor position and the
/// capability set.
pub fn classify(cursor: &mut Cursor<'_>, caps: Capabilities) -> Scan {
    if cursor.is_eof() {
        return Scan::Decline;
    }

    // Parameter gate: '{' opens a parameter block only where the grammar
    // expects one, directly after an abbreviated tag name.
    if caps.param_open && cursor.peek() == Some('{') {
        let start = cursor.checkpoint();
        cursor.advance();
        return Scan::Accept(ScannedToken::new(
            TokenKind::ParamOpen,
            cursor.span_from(start),
        ));
    }

    // Structural whitespace: a maximal run is committed only when the
    // character behind it continues the surrounding construct. Anything
    // else declines the whole run.
    if caps.structural_ws {
        if let Some(first) = cursor.peek() {
            if is_construct_ws(first) {
                let mut run = 1;
                loop {
                    match cursor.peek_at(run) {
                        Some(c) if is_construct_ws(c) => run += 1,
                        _ => break,
                    }
                }
                if run > MAX_WHITESPACE_RUN {
                    log_warning!("Whitespace run inside a construct is unusually long",
                        "code" => codes::scanner::WHITESPACE_RUN_TOO_LONG,
                        "length" => run
                    );
                }

                let follows = cursor.peek_at(run);
                if follows.map(continues_construct).unwrap_or(false) {
                    let start = cursor.checkpoint();
                    cursor.advance_by(run);
                    return Scan::Accept(ScannedToken::new(
                        TokenKind::StructuralWhitespace,
                        cursor.span_from(start),
                    ));
                }

                return Scan::Decline;
            }
        }
    }

    // Content: one character at a time, never across a construct opener.
    if !caps.content_char {
        return Scan::Decline;
    }
    if opening_construct(cursor).is_some() {
        return Scan::Decline;
    }

    let start = cursor.checkpoint();
    cursor.advance();
    Scan::Accept(ScannedToken::new(
        TokenKind::ContentChar,
        cursor.span_from(start),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn scan(input: &str, caps: Capabilities) -> (Scan, usize) {
        let mut cursor = Cursor::new(input);
        let scan = classify(&mut cursor, caps);
        (scan, cursor.position().offset)
    }

    #[test]
    fn test_eof_always_declines() {
        let (scan, moved) = scan("", Capabilities::all());
        assert_matches!(scan, Scan::Decline);
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_content_char_consumes_exactly_one() {
        let (scan, moved) = scan("hello", Capabilities::content_only());
        let token = scan.token().unwrap();
        assert_eq!(token.kind, TokenKind::ContentChar);
        assert_eq!(token.len(), 1);
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_content_declines_on_openers() {
        for input in [
            "#TITRE", "(#TITRE)", "#_a:B", "<BOUCLE_a(X)>", "<B_a>", "</B_a>", "<//B_a>",
            "<INCLURE(f)>", "<multi>", "</multi>", "<:cle:>", "[", "]",
        ] {
            let (scan, moved) = scan(input, Capabilities::content_only());
            assert_matches!(scan, Scan::Decline, "expected decline at {:?}", input);
            assert_eq!(moved, 0, "decline must not consume at {:?}", input);
        }
    }

    #[test]
    fn test_opener_lookalikes_are_content() {
        for input in ["#titre", "(x", "<p>", "</p>", "<ins>", "<mx", "{", "|", "*"] {
            let (scan, _) = scan(input, Capabilities::content_only());
            assert_matches!(scan, Scan::Accept(t) if t.kind == TokenKind::ContentChar,
                "expected content at {:?}", input);
        }
    }

    #[test]
    fn test_param_gate_takes_priority() {
        let (scan, moved) = scan("{id_article}", Capabilities::all());
        let token = scan.token().unwrap();
        assert_eq!(token.kind, TokenKind::ParamOpen);
        assert_eq!(token.len(), 1);
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_brace_without_gate_is_content() {
        let (scan, _) = scan("{x}", Capabilities::content_only());
        assert_matches!(scan, Scan::Accept(t) if t.kind == TokenKind::ContentChar);
    }

    #[test]
    fn test_whitespace_run_committed_before_continuation() {
        for (input, len) in [(" |", 1), ("  )", 2), (" \t\n{", 3), (" *", 1), (" >", 1), (" /", 1)]
        {
            let (scan, moved) = scan(input, Capabilities::whitespace_only());
            let token = scan.token().unwrap();
            assert_eq!(token.kind, TokenKind::StructuralWhitespace, "at {:?}", input);
            assert_eq!(token.len(), len, "at {:?}", input);
            assert_eq!(moved, len);
        }
    }

    #[test]
    fn test_whitespace_declines_without_continuation() {
        for input in [" x", "  #TITRE", " (", " [", " ", " \t\r\n"] {
            let (scan, moved) = scan(input, Capabilities::whitespace_only());
            assert_matches!(scan, Scan::Decline, "at {:?}", input);
            assert_eq!(moved, 0, "rollback must be exact at {:?}", input);
        }
    }

    #[test]
    fn test_overlong_whitespace_run_stays_maximal() {
        // The warning threshold must not truncate the run; a capped peek
        // would see whitespace as the follower and wrongly decline
        let input = format!("{})", " ".repeat(MAX_WHITESPACE_RUN + 5));
        let (scan, moved) = scan(&input, Capabilities::whitespace_only());
        let token = scan.token().unwrap();
        assert_eq!(token.kind, TokenKind::StructuralWhitespace);
        assert_eq!(token.len(), MAX_WHITESPACE_RUN + 5);
        assert_eq!(moved, MAX_WHITESPACE_RUN + 5);
    }

    #[test]
    fn test_whitespace_decline_does_not_fall_through_to_content() {
        // A declined run stays unconsumed even when content is also legal
        let caps = Capabilities {
            content_char: true,
            structural_ws: true,
            param_open: false,
        };
        let (scan, moved) = scan(" x", caps);
        assert_matches!(scan, Scan::Decline);
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_whitespace_not_requested_scans_as_content() {
        let (scan, _) = scan(" |", Capabilities::content_only());
        assert_matches!(scan, Scan::Accept(t) if t.kind == TokenKind::ContentChar);
    }

    #[test]
    fn test_empty_capabilities_decline() {
        let (scan, moved) = scan("anything", Capabilities::none());
        assert_matches!(scan, Scan::Decline);
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut a = Cursor::new("  )");
        let mut b = Cursor::new("  )");
        assert_eq!(
            classify(&mut a, Capabilities::whitespace_only()),
            classify(&mut b, Capabilities::whitespace_only())
        );
    }

    #[test]
    fn test_termination_over_arbitrary_input() {
        // Repeated content scanning always makes progress until EOF
        let input = "a#x<p>]#TITRE";
        let mut cursor = Cursor::new(input);
        let mut consumed = 0;
        loop {
            match classify(&mut cursor, Capabilities::content_only()) {
                Scan::Accept(token) => consumed += token.len(),
                Scan::Decline => break,
            }
        }
        // Stops at the ']' opener, having consumed every char before it
        assert_eq!(consumed, input.find(']').unwrap());
    }
}
