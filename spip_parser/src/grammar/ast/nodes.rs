//! AST node definitions for SPIP templates
//!
//! Every node carries the span of the template text it covers. Concatenating
//! the spans of a document's top-level nodes in order reproduces the input,
//! which the round-trip tests rely on.
//!
//! Design principles:
//! - Span tracking: all nodes carry a Span for error reporting
//! - Opaque passthrough: HTML and plain text are never interpreted
//! - Serde compatible: full serialization support for tooling output

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic identifier type (tag names, loop names, filter names)
pub type Identifier = String;

/// A complete parsed template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub span: Span,
}

impl Document {
    pub fn new(nodes: Vec<Node>, span: Span) -> Self {
        Self { nodes, span }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A top-level or nested template node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Text(TextRun),
    Balise(BaliseNode),
    Boucle(BoucleNode),
    Include(IncludeNode),
    Multi(MultiNode),
    Translation(TranslationNode),
    Bracket(BracketNode),
}

impl Node {
    /// The span of template text this node covers
    pub fn span(&self) -> Span {
        match self {
            Node::Text(n) => n.span,
            Node::Balise(n) => n.span,
            Node::Boucle(n) => n.span,
            Node::Include(n) => n.span,
            Node::Multi(n) => n.span,
            Node::Translation(n) => n.span,
            Node::Bracket(n) => n.span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Balise(_) => "balise",
            Node::Boucle(_) => "boucle",
            Node::Include(_) => "include",
            Node::Multi(_) => "multi",
            Node::Translation(_) => "translation",
            Node::Bracket(_) => "bracket",
        }
    }
}

/// A coalesced run of plain text characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub span: Span,
}

impl TextRun {
    pub fn new(text: String, span: Span) -> Self {
        Self { text, span }
    }
}

/// A SPIP tag in any of its three surface forms
///
/// Abbreviated `#TITRE`, loop-scoped `#_art:TITRE`, or parenthesized
/// `(#TITRE*{args}|filter{arg})`. Stars and filters only occur on the
/// parenthesized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaliseNode {
    /// Loop qualifier of the `#_loop:TAG` form
    pub loop_name: Option<Identifier>,
    /// Tag name, `[A-Z][A-Z0-9_]*`
    pub name: Identifier,
    /// Star modifiers after the name, 0 to 2
    pub stars: u8,
    /// Whether this is the parenthesized form
    pub parenthesized: bool,
    pub params: Vec<ParamBlock>,
    pub filters: Vec<Filter>,
    pub span: Span,
}

/// One `|name{args}` filter applied to a parenthesized tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: Identifier,
    pub args: Vec<ParamBlock>,
    pub span: Span,
}

/// A `<BOUCLE_name(TABLE){criteria}>body</BOUCLE_name>` loop
///
/// When wrapped in `<B_name>` the loop carries before/after parts shown
/// with a non-empty result, and an alternative part (up to `<//B_name>`)
/// shown when the loop is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoucleNode {
    /// Loop name including its leading underscore, e.g. `_articles`
    pub name: Identifier,
    /// Table selector from the parenthesized part
    pub table: String,
    pub criteria: Vec<ParamBlock>,
    pub body: Vec<Node>,
    /// `<B_name>` part before the loop (wrapped form only)
    pub before: Vec<Node>,
    /// Part between the loop close and `<//B_name>` (wrapped form only)
    pub after: Vec<Node>,
    /// Whether the loop is self-closing (`/>`)
    pub self_closing: bool,
    /// Whether the `<B_name>` conditional wrapper is present
    pub wrapped: bool,
    pub span: Span,
}

/// An `<INCLURE(target){params}>` directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeNode {
    /// Parenthesized target, e.g. `fond=inc/header`
    pub target: Option<String>,
    pub params: Vec<ParamBlock>,
    pub span: Span,
}

/// A `<multi>…</multi>` block; the interior is opaque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiNode {
    pub raw: String,
    pub span: Span,
}

/// A `<:key:>` translation shorthand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationNode {
    pub key: String,
    pub span: Span,
}

/// A `[ … ]` conditional bracket with recursively parsed children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketNode {
    pub children: Vec<Node>,
    pub span: Span,
}

/// A brace-delimited parameter or criteria block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamBlock {
    pub parts: Vec<BodyPart>,
    pub span: Span,
}

impl ParamBlock {
    /// The interior text of the block, nested braces included
    pub fn flat_text(&self) -> String {
        let mut text = String::new();
        for part in &self.parts {
            match part {
                BodyPart::Raw(run) => text.push_str(&run.text),
                BodyPart::Nested(block) => {
                    text.push('{');
                    text.push_str(&block.flat_text());
                    text.push('}');
                }
            }
        }
        text
    }

    /// Maximum brace nesting depth below this block
    pub fn nesting_depth(&self) -> usize {
        1 + self
            .parts
            .iter()
            .map(|part| match part {
                BodyPart::Raw(_) => 0,
                BodyPart::Nested(block) => block.nesting_depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

/// One piece of a parameter block body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyPart {
    /// A run of characters with no structural meaning
    Raw(TextRun),
    /// A same-delimiter nested brace pair
    Nested(ParamBlock),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn span(a: usize, b: usize) -> Span {
        Span::new(
            Position::new(a, 1, a as u32 + 1),
            Position::new(b, 1, b as u32 + 1),
        )
    }

    #[test]
    fn test_node_span_dispatch() {
        let node = Node::Text(TextRun::new("abc".into(), span(0, 3)));
        assert_eq!(node.span().len(), 3);
        assert_eq!(node.kind_name(), "text");
    }

    #[test]
    fn test_param_block_nesting_depth() {
        let inner = ParamBlock {
            parts: vec![BodyPart::Raw(TextRun::new("_MAX".into(), span(20, 24)))],
            span: span(19, 25),
        };
        let outer = ParamBlock {
            parts: vec![
                BodyPart::Raw(TextRun::new("nombre,".into(), span(5, 12)))
                ,
                BodyPart::Nested(inner),
            ],
            span: span(4, 26),
        };
        assert_eq!(outer.nesting_depth(), 2);
    }

    #[test]
    fn test_flat_text_rebuilds_interior() {
        let inner = ParamBlock {
            parts: vec![BodyPart::Raw(TextRun::new("80".into(), span(2, 4)))],
            span: span(1, 5),
        };
        let outer = ParamBlock {
            parts: vec![BodyPart::Raw(TextRun::new("x=".into(), span(0, 2))), BodyPart::Nested(inner)],
            span: span(0, 6),
        };
        assert_eq!(outer.flat_text(), "x={80}");
    }
}
