//! Node-level parsing: dispatch, text runs, and literal fallback
//!
//! `parse_nodes_until` drives a node sequence to a terminator. Each
//! iteration consumes at least one character, so the loop terminates on
//! any input. A construct that fails to parse is rolled back exactly
//! and re-emitted as a single literal character; a later retry then
//! observes the same input one position further on.

use crate::grammar::ast::nodes::{Node, TextRun};
use crate::grammar::builders::atomic::{BuildError, BuildResult, Parser};
use crate::grammar::builders::{
    parse_abbreviated_balise, parse_boucle, parse_bracket, parse_include, parse_multi,
    parse_paren_balise, parse_translation,
};
use crate::logging::codes;
use crate::scanner::ConstructOpener;
use crate::utils::Span;

/// Terminator for a node sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAt {
    /// Stop at end of input (document level)
    EndOfInput,
    /// Stop at `]` (bracket children)
    BracketClose,
    /// Stop at `</B` (loop body)
    LoopClose,
    /// Stop at `<BOUCLE` (wrapper before-part)
    LoopOpen,
    /// Stop at `<//B` (wrapper after-part)
    WrapperClose,
}

impl StopAt {
    fn matches(self, parser: &dyn Parser) -> bool {
        match self {
            StopAt::EndOfInput => parser.is_eof(),
            StopAt::BracketClose => {
                parser.current_opener() == Some(ConstructOpener::BracketClose)
            }
            StopAt::LoopClose => parser.current_opener() == Some(ConstructOpener::LoopClose),
            StopAt::LoopOpen => {
                parser.current_opener() == Some(ConstructOpener::LoopOpen)
                    && parser.peek_char_at(2) == Some('O')
            }
            StopAt::WrapperClose => {
                parser.current_opener() == Some(ConstructOpener::WrapperClose)
            }
        }
    }
}

impl StopAt {
    /// The diagnostic code for hitting end of input before this
    /// terminator
    fn eof_code(self) -> crate::logging::Code {
        match self {
            StopAt::EndOfInput => codes::syntax::INTERNAL_PARSER_ERROR,
            StopAt::BracketClose => codes::syntax::UNMATCHED_BRACKET,
            StopAt::LoopClose | StopAt::LoopOpen | StopAt::WrapperClose => {
                codes::syntax::UNCLOSED_LOOP
            }
        }
    }
}

/// Parse nodes until the terminator; the terminator is not consumed
pub fn parse_nodes_until(parser: &mut dyn Parser, stop: StopAt) -> BuildResult<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::new();
    loop {
        if stop.matches(parser) {
            return Ok(nodes);
        }
        if parser.is_eof() {
            return Err(BuildError::new(
                stop.eof_code(),
                format!("unexpected end of template, expected {:?}", stop),
            ));
        }

        let node = parse_node(parser)?;
        parser.note_node()?;
        push_coalescing(&mut nodes, node);
    }
}

/// Append a node, merging adjacent text runs into one
fn push_coalescing(nodes: &mut Vec<Node>, node: Node) {
    if let Node::Text(run) = node {
        if let Some(Node::Text(prev)) = nodes.last_mut() {
            if prev.span.end == run.span.start {
                prev.text.push_str(&run.text);
                prev.span = Span::new(prev.span.start, run.span.end);
                return;
            }
        }
        nodes.push(Node::Text(run));
    } else {
        nodes.push(node);
    }
}

/// Parse a single node at the cursor
///
/// On a construct opener the matching builder runs inside a checkpoint;
/// failure rolls back and emits one literal character instead, unless a
/// resource limit poisoned the parse.
pub fn parse_node(parser: &mut dyn Parser) -> BuildResult<Node> {
    match parser.current_opener() {
        None => parse_text_run(parser).map(Node::Text),
        Some(opener) => {
            let checkpoint = parser.checkpoint();
            match dispatch_construct(parser, opener) {
                Ok(node) => Ok(node),
                Err(error) => {
                    if parser.is_poisoned() {
                        return Err(error);
                    }
                    parser.restore(checkpoint);
                    parser.note_fallback(&error);
                    literal_char(parser).map(Node::Text)
                }
            }
        }
    }
}

fn dispatch_construct(parser: &mut dyn Parser, opener: ConstructOpener) -> BuildResult<Node> {
    match opener {
        ConstructOpener::Tag | ConstructOpener::LoopScopedTag => {
            parse_abbreviated_balise(parser).map(Node::Balise)
        }
        ConstructOpener::ParenTag => parse_paren_balise(parser).map(Node::Balise),
        ConstructOpener::LoopOpen => parse_boucle(parser).map(Node::Boucle),
        ConstructOpener::Include => parse_include(parser).map(Node::Include),
        ConstructOpener::MultiOpen => parse_multi(parser).map(Node::Multi),
        ConstructOpener::Translation => parse_translation(parser).map(Node::Translation),
        ConstructOpener::BracketOpen => parse_bracket(parser).map(Node::Bracket),
        // Close markers with no matching open are literal text
        ConstructOpener::LoopClose
        | ConstructOpener::MultiClose
        | ConstructOpener::WrapperClose
        | ConstructOpener::BracketClose => {
            Err(BuildError::grammar(format!("unmatched {:?}", opener)))
        }
    }
}

/// Consume content characters into a coalesced text run
///
/// The classifier declines each character sitting on a construct
/// opener, so the run ends exactly where the next construct begins.
pub fn parse_text_run(parser: &mut dyn Parser) -> BuildResult<TextRun> {
    let start = parser.current_position();
    let mut text = String::new();
    while let Some(c) = parser.scan_content_char() {
        text.push(c);
    }
    if text.is_empty() {
        return Err(BuildError::grammar(format!(
            "expected content at {}, found {:?}",
            start,
            parser.peek_char()
        )));
    }
    Ok(TextRun::new(
        text,
        Span::new(start, parser.current_position()),
    ))
}

/// Emit exactly one character as literal text
fn literal_char(parser: &mut dyn Parser) -> BuildResult<TextRun> {
    let start = parser.current_position();
    match parser.next_char() {
        Some(c) => Ok(TextRun::new(
            c.to_string(),
            Span::new(start, parser.current_position()),
        )),
        None => Err(BuildError::new(
            codes::syntax::INTERNAL_PARSER_ERROR,
            "fallback reached end of template",
        )),
    }
}
