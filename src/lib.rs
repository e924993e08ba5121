//! Schema-driven command line argument resolution.
//!
//! This crate resolves a raw command line token list against a declarative
//! schema. Schema keys are flag patterns (`-b`, `--verbose`, `--file=*`,
//! `-f *`, or bare keywords), possibly joined into alternatives with `|`;
//! schema values describe what to return when a pattern matches: a literal
//! value, a per-alternative choice, captured user text, or a nested
//! sub-schema resolved recursively.

mod error;
mod pattern;
mod resolver;
mod schema;

// Re-export core types
pub use error::{Result, SchemaError};
pub use pattern::classify;
pub use resolver::{resolve, resolve_env};
pub use schema::{Resolved, ResultMap, ReturnSpec, Schema, SchemaEntry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
