//! Construct builders over the `Parser` trait
//!
//! Each builder is a free function taking `&mut dyn Parser`, so the
//! grammar stays independent of the concrete parser implementation.
//! Builders return `BuildResult<T>`, a `Result` whose `BuildError`
//! carries a diagnostic code; the caller decides whether a failure
//! backtracks to literal text or aborts the parse.

pub mod atomic;
pub mod balises;
pub mod blocks;
pub mod bodies;
pub mod boucles;
pub mod directives;

pub use atomic::{BuildError, BuildResult, ParseCheckpoint, Parser};
pub use balises::{parse_abbreviated_balise, parse_paren_balise};
pub use blocks::{parse_node, parse_nodes_until, parse_text_run, StopAt};
pub use bodies::parse_param_block;
pub use boucles::parse_boucle;
pub use directives::{parse_bracket, parse_include, parse_multi, parse_translation};
