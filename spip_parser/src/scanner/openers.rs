//! Construct opener detection
//!
//! A short bounded lookahead decides whether the cursor sits on the first
//! character of a SPIP construct. Content classification declines on any
//! opener so the grammar layer gets the first chance to consume it.

use super::cursor::Cursor;

/// The construct kinds a template position can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructOpener {
    /// `(#`, parenthesized tag with optional filters
    ParenTag,
    /// `#` followed by an uppercase letter, abbreviated tag
    Tag,
    /// `#_`, loop-scoped tag (`#_loopname:TAG`)
    LoopScopedTag,
    /// `<B` followed by `O` or `_`, loop open or conditional wrapper open
    LoopOpen,
    /// `<IN`, include directive
    Include,
    /// `<mu`, multilingual block open
    MultiOpen,
    /// `<:`, translation shorthand
    Translation,
    /// `</B` followed by `O` or `_`, loop close (long or short form)
    LoopClose,
    /// `</mu`, multilingual block close
    MultiClose,
    /// `<//B`, conditional wrapper close
    WrapperClose,
    /// `[`, conditional bracket open
    BracketOpen,
    /// `]`, conditional bracket close
    BracketClose,
}

/// Decide whether the cursor sits on a construct opener
///
/// Uses non-consuming peeks only; the cursor never moves. Lookahead is
/// bounded by the longest prefix (`<//B` plus one name character).
pub fn opening_construct(cursor: &Cursor<'_>) -> Option<ConstructOpener> {
    match cursor.peek()? {
        '(' => match cursor.peek_at(1) {
            Some('#') => Some(ConstructOpener::ParenTag),
            _ => None,
        },

        '#' => match cursor.peek_at(1) {
            Some(c2) if c2.is_ascii_uppercase() => Some(ConstructOpener::Tag),
            Some('_') => Some(ConstructOpener::LoopScopedTag),
            _ => None,
        },

        '<' => match cursor.peek_at(1) {
            Some('B') => match cursor.peek_at(2) {
                Some('O') | Some('_') => Some(ConstructOpener::LoopOpen),
                _ => None,
            },
            Some('I') => match cursor.peek_at(2) {
                Some('N') => Some(ConstructOpener::Include),
                _ => None,
            },
            Some('m') => match cursor.peek_at(2) {
                Some('u') => Some(ConstructOpener::MultiOpen),
                _ => None,
            },
            Some(':') => Some(ConstructOpener::Translation),
            Some('/') => match cursor.peek_at(2) {
                Some('B') => match cursor.peek_at(3) {
                    Some('O') | Some('_') => Some(ConstructOpener::LoopClose),
                    _ => None,
                },
                Some('m') => match cursor.peek_at(3) {
                    Some('u') => Some(ConstructOpener::MultiClose),
                    _ => None,
                },
                Some('/') => match cursor.peek_at(3) {
                    Some('B') => Some(ConstructOpener::WrapperClose),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        },

        '[' => Some(ConstructOpener::BracketOpen),
        ']' => Some(ConstructOpener::BracketClose),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opener_at(input: &str) -> Option<ConstructOpener> {
        opening_construct(&Cursor::new(input))
    }

    #[test]
    fn test_tag_openers() {
        assert_eq!(opener_at("#TITRE"), Some(ConstructOpener::Tag));
        assert_eq!(opener_at("#_art:TITRE"), Some(ConstructOpener::LoopScopedTag));
        assert_eq!(opener_at("(#TITRE)"), Some(ConstructOpener::ParenTag));
    }

    #[test]
    fn test_lowercase_after_hash_is_not_an_opener() {
        assert_eq!(opener_at("#titre"), None);
        assert_eq!(opener_at("#1"), None);
        assert_eq!(opener_at("# "), None);
        assert_eq!(opener_at("#"), None);
    }

    #[test]
    fn test_paren_without_hash_is_not_an_opener() {
        assert_eq!(opener_at("(x)"), None);
        assert_eq!(opener_at("("), None);
    }

    #[test]
    fn test_loop_openers() {
        assert_eq!(opener_at("<BOUCLE_art(ARTICLES)>"), Some(ConstructOpener::LoopOpen));
        assert_eq!(opener_at("<B_art>"), Some(ConstructOpener::LoopOpen));
        assert_eq!(opener_at("</BOUCLE_art>"), Some(ConstructOpener::LoopClose));
        assert_eq!(opener_at("</B_art>"), Some(ConstructOpener::LoopClose));
        assert_eq!(opener_at("<//B_art>"), Some(ConstructOpener::WrapperClose));
    }

    #[test]
    fn test_bare_angle_b_is_not_an_opener() {
        // <B must be followed by O or _ to open a loop construct
        assert_eq!(opener_at("<Bad>"), None);
        assert_eq!(opener_at("</Body>"), None);
    }

    #[test]
    fn test_directive_openers() {
        assert_eq!(opener_at("<INCLURE(fond)>"), Some(ConstructOpener::Include));
        assert_eq!(opener_at("<multi>"), Some(ConstructOpener::MultiOpen));
        assert_eq!(opener_at("</multi>"), Some(ConstructOpener::MultiClose));
        assert_eq!(opener_at("<:rien:>"), Some(ConstructOpener::Translation));
    }

    #[test]
    fn test_html_is_not_an_opener() {
        assert_eq!(opener_at("<p>"), None);
        assert_eq!(opener_at("</p>"), None);
        assert_eq!(opener_at("<idiv>"), None);
        assert_eq!(opener_at("<img>"), None);
        assert_eq!(opener_at("<"), None);
    }

    #[test]
    fn test_brackets() {
        assert_eq!(opener_at("[x]"), Some(ConstructOpener::BracketOpen));
        assert_eq!(opener_at("]"), Some(ConstructOpener::BracketClose));
    }

    #[test]
    fn test_plain_text_is_not_an_opener() {
        assert_eq!(opener_at("hello"), None);
        assert_eq!(opener_at("{"), None);
        assert_eq!(opener_at("|"), None);
        assert_eq!(opener_at("*"), None);
        assert_eq!(opener_at(""), None);
    }

    #[test]
    fn test_detection_does_not_move_cursor() {
        let cursor = Cursor::new("<BOUCLE_a(X)>");
        let before = cursor.position();
        let _ = opening_construct(&cursor);
        assert_eq!(cursor.position(), before);
    }
}
