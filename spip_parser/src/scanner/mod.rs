//! Character-level scanner for SPIP templates
//!
//! The scanner answers one question per call: given the current cursor
//! position and the set of token kinds the caller can accept, produce one
//! token or decline without moving. It keeps no state between calls.

pub mod classifier;
pub mod cursor;
pub mod openers;

pub use classifier::classify;
pub use cursor::Cursor;
pub use openers::{opening_construct, ConstructOpener};
