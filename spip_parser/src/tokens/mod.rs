//! Token types produced by the SPIP scanner

pub mod token;

pub use token::{Capabilities, Scan, ScannedToken, TokenKind};
