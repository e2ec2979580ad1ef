//! Brace-delimited parameter block bodies
//!
//! A block interior is a sequence of raw runs and nested brace pairs.
//! Nesting is recognized up to `MAX_BODY_NESTING` levels; at the limit
//! an opening brace is ordinary raw text, so a deeper pair no longer
//! balances and its closer terminates the enclosing block instead.

use crate::config::compile_time::grammar::MAX_BODY_NESTING;
use crate::grammar::ast::nodes::{BodyPart, ParamBlock, TextRun};
use crate::grammar::builders::atomic::{BuildError, BuildResult, Parser};
use crate::logging::codes;
use crate::utils::{Position, Span};

/// Parse a `{...}` block whose opening brace has not been consumed
pub fn parse_param_block(parser: &mut dyn Parser, depth: usize) -> BuildResult<ParamBlock> {
    let start = parser.current_position();
    parser.expect_char('{')?;
    parse_block_rest(parser, start, depth)
}

/// Parse the remainder of a block whose `{` is already consumed
///
/// Used directly after the classifier accepts a gated parameter brace.
pub fn parse_block_rest(
    parser: &mut dyn Parser,
    start: Position,
    depth: usize,
) -> BuildResult<ParamBlock> {
    let mut parts = Vec::new();
    let mut raw = String::new();
    let mut raw_start = parser.current_position();

    loop {
        match parser.peek_char() {
            None => {
                return Err(BuildError::new(
                    codes::syntax::UNTERMINATED_PARAMETER_BLOCK,
                    format!("parameter block opened at {} never closes", start),
                ))
            }
            Some('}') => {
                flush_raw(&mut parts, &mut raw, raw_start, parser.current_position());
                parser.next_char();
                let span = Span::new(start, parser.current_position());
                return Ok(ParamBlock { parts, span });
            }
            Some('{') if depth < MAX_BODY_NESTING => {
                flush_raw(&mut parts, &mut raw, raw_start, parser.current_position());
                let nested = parse_param_block(parser, depth + 1)?;
                parts.push(BodyPart::Nested(nested));
                raw_start = parser.current_position();
            }
            Some(c) => {
                if raw.is_empty() {
                    raw_start = parser.current_position();
                }
                raw.push(c);
                parser.next_char();
            }
        }
    }
}

fn flush_raw(parts: &mut Vec<BodyPart>, raw: &mut String, start: Position, end: Position) {
    if !raw.is_empty() {
        parts.push(BodyPart::Raw(TextRun::new(
            std::mem::take(raw),
            Span::new(start, end),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::syntax::TemplateParser;
    use assert_matches::assert_matches;

    fn block(input: &str) -> BuildResult<ParamBlock> {
        let mut parser = TemplateParser::new(input);
        parse_param_block(&mut parser, 1)
    }

    #[test]
    fn test_flat_block() {
        let block = block("{par titre}").unwrap();
        assert_eq!(block.parts.len(), 1);
        assert_eq!(block.flat_text(), "par titre");
        assert_eq!(block.nesting_depth(), 1);
    }

    #[test]
    fn test_nested_pairs_balance_to_depth_three() {
        let block = block("{a{b{c}d}e}").unwrap();
        assert_eq!(block.nesting_depth(), 3);
        assert_eq!(block.flat_text(), "a{b{c}d}e");
    }

    #[test]
    fn test_fourth_level_brace_is_raw() {
        let input = "{1{2{3{4}5}6}7}";
        let mut parser = TemplateParser::new(input);
        let block = parse_param_block(&mut parser, 1).unwrap();

        // The level-four closer ends level three, leaving "7}" outside
        assert_eq!(block.nesting_depth(), 3);
        assert_eq!(block.span.slice(input), "{1{2{3{4}5}6}");
        assert!(!parser.is_eof());
    }

    #[test]
    fn test_unterminated_block() {
        let error = block("{no close").unwrap_err();
        assert_eq!(error.code, codes::syntax::UNTERMINATED_PARAMETER_BLOCK);
    }

    #[test]
    fn test_empty_block() {
        let block = block("{}").unwrap();
        assert!(block.parts.is_empty());
        assert_eq!(block.flat_text(), "");
    }

    #[test]
    fn test_raw_and_nested_part_spans() {
        let input = "{x={80}}";
        let block = block(input).unwrap();
        assert_eq!(block.parts.len(), 2);
        assert_matches!(&block.parts[0], BodyPart::Raw(run) => {
            assert_eq!(run.text, "x=");
            assert_eq!(run.span.slice(input), "x=");
        });
        assert_matches!(&block.parts[1], BodyPart::Nested(inner) => {
            assert_eq!(inner.span.slice(input), "{80}");
        });
    }
}
