//! Directive builders: include, multilingual block, translation
//! shorthand, and conditional brackets

use crate::config::compile_time::grammar::MAX_IDENTIFIER_LENGTH;
use crate::grammar::ast::nodes::{BracketNode, IncludeNode, MultiNode, Node, TranslationNode};
use crate::grammar::builders::atomic::{BuildError, BuildResult, Parser};
use crate::grammar::builders::blocks::{parse_nodes_until, StopAt};
use crate::grammar::builders::bodies::parse_param_block;
use crate::utils::Span;

/// Parse `<INCLURE(fond=...){params}>`, optionally self-closed with `/>`
pub fn parse_include(parser: &mut dyn Parser) -> BuildResult<IncludeNode> {
    let start = parser.current_position();
    parser.expect_str("<INCLURE")?;

    let target = if parser.peek_char() == Some('(') {
        parser.next_char();
        let mut target = String::new();
        loop {
            match parser.peek_char() {
                None => return Err(BuildError::grammar("unterminated include target")),
                Some(')') => break,
                Some(c) if c == '<' || c == '>' => {
                    return Err(BuildError::grammar(format!(
                        "unexpected {:?} in include target",
                        c
                    )));
                }
                Some(c) => {
                    target.push(c);
                    parser.next_char();
                }
            }
        }
        parser.expect_char(')')?;
        Some(target.trim().to_string())
    } else {
        None
    };

    let mut params = Vec::new();
    loop {
        let _ = parser.scan_structural_ws();
        if parser.peek_char() == Some('{') {
            params.push(parse_param_block(parser, 1)?);
        } else {
            break;
        }
    }

    if parser.peek_char() == Some('/') {
        parser.next_char();
    }
    parser.expect_char('>')?;

    Ok(IncludeNode {
        target,
        params,
        span: Span::new(start, parser.current_position()),
    })
}

/// Parse `<multi>...</multi>`; the interior is kept as raw text
pub fn parse_multi(parser: &mut dyn Parser) -> BuildResult<MultiNode> {
    let start = parser.current_position();
    parser.expect_str("<multi>")?;

    let mut raw = String::new();
    while !parser.at_str("</multi>") {
        match parser.next_char() {
            Some(c) => raw.push(c),
            None => return Err(BuildError::grammar("unterminated <multi> block")),
        }
    }
    parser.expect_str("</multi>")?;

    Ok(MultiNode {
        raw,
        span: Span::new(start, parser.current_position()),
    })
}

/// Parse the `<:module:key:>` translation shorthand
pub fn parse_translation(parser: &mut dyn Parser) -> BuildResult<TranslationNode> {
    let start = parser.current_position();
    parser.expect_str("<:")?;

    let mut key = String::new();
    while !parser.at_str(":>") {
        match parser.peek_char() {
            Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == ':' => {
                key.push(c);
                parser.next_char();
            }
            found => {
                return Err(BuildError::grammar(format!(
                    "unexpected {:?} in translation key",
                    found
                )))
            }
        }
        if key.len() > MAX_IDENTIFIER_LENGTH {
            return Err(BuildError::grammar(format!(
                "translation key longer than {} bytes",
                MAX_IDENTIFIER_LENGTH
            )));
        }
    }
    if key.is_empty() {
        return Err(BuildError::grammar("empty translation key"));
    }
    parser.expect_str(":>")?;

    Ok(TranslationNode {
        key,
        span: Span::new(start, parser.current_position()),
    })
}

/// Parse a `[...]` conditional bracket with recursively parsed children
pub fn parse_bracket(parser: &mut dyn Parser) -> BuildResult<BracketNode> {
    let start = parser.current_position();
    parser.expect_char('[')?;

    parser.enter_context("bracket")?;
    let result = bracket_rest(parser);
    parser.exit_context();
    let children = result?;

    Ok(BracketNode {
        children,
        span: Span::new(start, parser.current_position()),
    })
}

fn bracket_rest(parser: &mut dyn Parser) -> BuildResult<Vec<Node>> {
    let children = parse_nodes_until(parser, StopAt::BracketClose)?;
    parser.expect_char(']')?;
    Ok(children)
}
