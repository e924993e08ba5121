//! Error types for schema validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a schema against its pattern-keys.
///
/// All variants indicate a mistake in the schema definition, never in the
/// user-supplied token list; absence of a flag is reported in the result
/// map, not here.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaError {
    /// An atom matches none of the recognized flag shapes
    #[error("Invalid pattern syntax: {0}")]
    InvalidPatternSyntax(String),

    /// Alternatives within one pattern-key disagree on whether they take a value
    #[error("Alternatives disagree on value expectation in pattern: {0}")]
    InconsistentValueExpectation(String),

    /// A pattern-key with an empty alternative (leading, trailing or doubled `|`)
    #[error("Malformed pattern key: {0}")]
    MalformedPatternKey(String),

    /// A return specification incompatible with its pattern-key
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
