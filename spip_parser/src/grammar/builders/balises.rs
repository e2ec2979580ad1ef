//! Tag (balise) builders
//!
//! Covers the abbreviated form `#TITRE{params}`, the loop-scoped form
//! `#_art:TITRE`, and the parenthesized form
//! `(#TITRE*{args}|filter{arg}|filter2)`.

use crate::config::compile_time::grammar::MAX_FILTER_CHAIN;
use crate::grammar::ast::nodes::{BaliseNode, Filter};
use crate::grammar::builders::atomic::{
    parse_filter_name, parse_loop_qualifier, parse_tag_name, BuildError, BuildResult, Parser,
};
use crate::grammar::builders::bodies::{parse_block_rest, parse_param_block};
use crate::logging::codes;
use crate::utils::Span;

/// Parse `#TITRE` or `#_art:TITRE`, with optional `{...}` parameters
///
/// The parameter braces come through the classifier's gated scan, so a
/// brace elsewhere in content never opens a block.
pub fn parse_abbreviated_balise(parser: &mut dyn Parser) -> BuildResult<BaliseNode> {
    let start = parser.current_position();
    parser.expect_char('#')?;

    let loop_name = if parser.peek_char() == Some('_') {
        parser.next_char();
        let qualifier = parse_loop_qualifier(parser)?;
        parser.expect_char(':')?;
        Some(format!("_{}", qualifier))
    } else {
        None
    };

    let name = parse_tag_name(parser)?;

    let mut params = Vec::new();
    while let Some(open) = parser.scan_param_open() {
        params.push(parse_block_rest(parser, open.start(), 1)?);
    }

    Ok(BaliseNode {
        loop_name,
        name,
        stars: 0,
        parenthesized: false,
        params,
        filters: Vec::new(),
        span: Span::new(start, parser.current_position()),
    })
}

/// Parse `(#NAME*{args}|filter{arg})`
///
/// Star modifiers and filter chains only exist on this form. Structural
/// whitespace is allowed after the name, between blocks, around the
/// pipe, and before the closing paren; the classifier refuses a run
/// followed by anything else, which makes the whole construct fail and
/// fall back to literal text.
pub fn parse_paren_balise(parser: &mut dyn Parser) -> BuildResult<BaliseNode> {
    let start = parser.current_position();
    parser.expect_char('(')?;
    parser.expect_char('#')?;

    let loop_name = if parser.peek_char() == Some('_') {
        parser.next_char();
        let qualifier = parse_loop_qualifier(parser)?;
        parser.expect_char(':')?;
        Some(format!("_{}", qualifier))
    } else {
        None
    };

    let name = parse_tag_name(parser)?;

    let _ = parser.scan_structural_ws();
    let mut stars: u8 = 0;
    while stars < 2 && parser.peek_char() == Some('*') {
        parser.next_char();
        stars += 1;
    }

    let mut params = Vec::new();
    loop {
        let _ = parser.scan_structural_ws();
        if parser.peek_char() != Some('{') {
            break;
        }
        params.push(parse_param_block(parser, 1)?);
    }

    let mut filters = Vec::new();
    loop {
        let _ = parser.scan_structural_ws();
        if parser.peek_char() != Some('|') {
            break;
        }
        if filters.len() >= MAX_FILTER_CHAIN {
            return Err(BuildError::new(
                codes::syntax::FILTER_CHAIN_TOO_LONG,
                format!("filter chain longer than {}", MAX_FILTER_CHAIN),
            ));
        }
        let filter_start = parser.current_position();
        parser.next_char();

        let filter_name = parse_filter_name(parser)?;
        let mut args = Vec::new();
        loop {
            let _ = parser.scan_structural_ws();
            if parser.peek_char() != Some('{') {
                break;
            }
            args.push(parse_param_block(parser, 1)?);
        }

        filters.push(Filter {
            name: filter_name,
            args,
            span: Span::new(filter_start, parser.current_position()),
        });
    }

    parser.expect_char(')')?;

    Ok(BaliseNode {
        loop_name,
        name,
        stars,
        parenthesized: true,
        params,
        filters,
        span: Span::new(start, parser.current_position()),
    })
}
