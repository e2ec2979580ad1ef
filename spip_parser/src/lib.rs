//! Scanner and recursive-descent parser for the SPIP template language
//!
//! SPIP templates interleave opaque HTML with a handful of constructs:
//! tags (`#TITRE`, `(#TITRE|couper{80})`), loops
//! (`<BOUCLE_art(ARTICLES)>...</BOUCLE_art>`), includes, multilingual
//! blocks, translation shorthands, and conditional brackets. A bounded
//! lookahead classifier decides character by character whether text is
//! content or the start of a construct; the grammar layer builds the
//! tree and degrades any malformed construct back to literal text.
//!
//! ```
//! use spip_parser::{parse_template, Node};
//!
//! let doc = parse_template("<p>(#TITRE|couper{80})</p>").unwrap();
//! assert_eq!(doc.nodes.len(), 3);
//! assert!(matches!(doc.nodes[1], Node::Balise(_)));
//! ```

// Internal modules
pub mod config;
pub mod grammar;
#[macro_use]
pub mod logging;
pub mod scanner;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::ast::nodes::{
    BaliseNode, BoucleNode, BracketNode, Document, Filter, IncludeNode, MultiNode, Node,
    ParamBlock, TextRun, TranslationNode,
};
pub use scanner::{classify, opening_construct, ConstructOpener, Cursor};
pub use syntax::{parse_template, SyntaxError, SyntaxResult, TemplateParser};
pub use tokens::{Capabilities, Scan, ScannedToken, TokenKind};
pub use utils::{Position, Span};
