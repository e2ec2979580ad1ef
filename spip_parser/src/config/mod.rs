//! Configuration module for the SPIP parser
//!
//! Compile-time limits live in `constants`; user-facing preferences that
//! may be tuned through environment variables live in `runtime`.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    LoggingPreferences, LogLevel, ParserPreferences, RuntimeConfig, ScannerPreferences,
};
