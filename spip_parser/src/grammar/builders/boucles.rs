//! Loop (boucle) builders
//!
//! A bare loop is `<BOUCLE_name(TABLE){criteria}>body</BOUCLE_name>`,
//! optionally self-closing with `/>`. The wrapped form surrounds it
//! with `<B_name>before` and `after<//B_name>` conditional parts. The
//! short close `</B_name>` is accepted everywhere the long form is.

use crate::grammar::ast::nodes::{BoucleNode, Node, ParamBlock};
use crate::grammar::builders::atomic::{parse_loop_name, BuildError, BuildResult, Parser};
use crate::grammar::builders::blocks::{parse_nodes_until, StopAt};
use crate::grammar::builders::bodies::parse_param_block;
use crate::logging::codes;
use crate::utils::Span;

/// Parse a loop construct starting at `<B`
pub fn parse_boucle(parser: &mut dyn Parser) -> BuildResult<BoucleNode> {
    match parser.peek_char_at(2) {
        Some('O') => parse_bare_loop(parser),
        Some('_') => parse_wrapped_loop(parser),
        found => Err(BuildError::grammar(format!(
            "expected loop construct, found {:?}",
            found
        ))),
    }
}

struct LoopCore {
    name: String,
    table: String,
    criteria: Vec<ParamBlock>,
    body: Vec<Node>,
    self_closing: bool,
}

fn parse_bare_loop(parser: &mut dyn Parser) -> BuildResult<BoucleNode> {
    let start = parser.current_position();
    let core = parse_loop_core(parser)?;
    Ok(BoucleNode {
        name: core.name,
        table: core.table,
        criteria: core.criteria,
        body: core.body,
        before: Vec::new(),
        after: Vec::new(),
        self_closing: core.self_closing,
        wrapped: false,
        span: Span::new(start, parser.current_position()),
    })
}

/// Parse `<B_name>before<BOUCLE_name(...)>body</BOUCLE_name>after<//B_name>`
fn parse_wrapped_loop(parser: &mut dyn Parser) -> BuildResult<BoucleNode> {
    let start = parser.current_position();
    parser.expect_str("<B")?;
    let name = parse_loop_name(parser)?;
    parser.expect_char('>')?;

    parser.enter_context("loop wrapper")?;
    let result = wrapped_loop_rest(parser, &name);
    parser.exit_context();
    let (core, before, after) = result?;

    Ok(BoucleNode {
        name,
        table: core.table,
        criteria: core.criteria,
        body: core.body,
        before,
        after,
        self_closing: core.self_closing,
        wrapped: true,
        span: Span::new(start, parser.current_position()),
    })
}

fn wrapped_loop_rest(
    parser: &mut dyn Parser,
    name: &str,
) -> BuildResult<(LoopCore, Vec<Node>, Vec<Node>)> {
    let before = parse_nodes_until(parser, StopAt::LoopOpen)?;

    let core = parse_loop_core(parser)?;
    if core.name != name {
        return Err(BuildError::new(
            codes::syntax::MISMATCHED_LOOP_NAME,
            format!("wrapper '{}' encloses loop '{}'", name, core.name),
        ));
    }

    let after = parse_nodes_until(parser, StopAt::WrapperClose)?;
    parser.expect_str("<//B")?;
    let close_name = parse_loop_name(parser)?;
    parser.expect_char('>')?;
    if close_name != name {
        return Err(BuildError::new(
            codes::syntax::MISMATCHED_LOOP_NAME,
            format!("wrapper close '{}' does not match '{}'", close_name, name),
        ));
    }

    Ok((core, before, after))
}

/// Parse `<BOUCLE_name(TABLE){criteria}>body</BOUCLE_name>` or the
/// self-closing `<BOUCLE_name(TABLE){criteria}/>`
fn parse_loop_core(parser: &mut dyn Parser) -> BuildResult<LoopCore> {
    parser.expect_str("<BOUCLE")?;
    let name = parse_loop_name(parser)?;

    parser.expect_char('(')?;
    let mut table = String::new();
    loop {
        match parser.peek_char() {
            None => return Err(BuildError::grammar("unterminated loop table selector")),
            Some(')') => break,
            Some(c) if c == '<' || c == '>' || c == '{' => {
                return Err(BuildError::grammar(format!(
                    "unexpected {:?} in loop table selector",
                    c
                )));
            }
            Some(c) => {
                table.push(c);
                parser.next_char();
            }
        }
    }
    parser.expect_char(')')?;
    let table = table.trim().to_string();
    if table.is_empty() {
        return Err(BuildError::grammar("empty loop table selector"));
    }

    let mut criteria = Vec::new();
    loop {
        let _ = parser.scan_structural_ws();
        if parser.peek_char() == Some('{') {
            criteria.push(parse_param_block(parser, 1)?);
        } else {
            break;
        }
    }

    let self_closing = match parser.peek_char() {
        Some('/') => {
            parser.expect_str("/>")?;
            true
        }
        _ => {
            parser.expect_char('>')?;
            false
        }
    };

    let body = if self_closing {
        Vec::new()
    } else {
        parser.enter_context("loop body")?;
        let result = loop_body_rest(parser, &name);
        parser.exit_context();
        result?
    };

    Ok(LoopCore {
        name,
        table,
        criteria,
        body,
        self_closing,
    })
}

fn loop_body_rest(parser: &mut dyn Parser, name: &str) -> BuildResult<Vec<Node>> {
    let body = parse_nodes_until(parser, StopAt::LoopClose)?;
    parse_loop_close(parser, name)?;
    Ok(body)
}

/// Parse `</BOUCLE_name>` or the short `</B_name>` and check the name
fn parse_loop_close(parser: &mut dyn Parser, name: &str) -> BuildResult<()> {
    parser.expect_str("</B")?;
    if parser.peek_char() == Some('O') {
        parser.expect_str("OUCLE")?;
    }
    let close_name = parse_loop_name(parser)?;
    parser.expect_char('>')?;
    if close_name != name {
        return Err(BuildError::new(
            codes::syntax::MISMATCHED_LOOP_NAME,
            format!("loop close '{}' does not match open '{}'", close_name, name),
        ));
    }
    Ok(())
}
