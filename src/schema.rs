//! Schema and result types for argument resolution.
//!
//! A [`Schema`] is an ordered mapping from pattern-keys (flag patterns,
//! possibly `|`-joined alternatives) to [`ReturnSpec`]s describing what the
//! resolver should produce when, and with what, a pattern matches.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, SchemaError};

/// What a schema entry resolves to when one of its alternatives matches.
///
/// The shape is declared explicitly by the schema author; the resolver never
/// infers behavior from the runtime shape of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnSpec {
    /// Returned verbatim when any alternative matches
    Literal(Value),

    /// One value per alternative atom in the pattern-key, in listing order,
    /// plus a fallback returned when no alternative matches
    IndexedChoice { choices: Vec<Value>, fallback: Value },

    /// The captured user text; a non-empty template has the capture appended
    CaptureTemplate(String),

    /// A nested schema resolved recursively over the same token list
    SubSchema(Schema),
}

impl ReturnSpec {
    /// Literal specification from anything JSON-representable
    pub fn literal(value: impl Into<Value>) -> Self {
        ReturnSpec::Literal(value.into())
    }

    /// Indexed-choice specification: one value per alternative plus a fallback
    pub fn choice(choices: Vec<Value>, fallback: impl Into<Value>) -> Self {
        ReturnSpec::IndexedChoice {
            choices,
            fallback: fallback.into(),
        }
    }

    /// Capture specification; an empty template returns the capture as-is
    pub fn capture(template: impl Into<String>) -> Self {
        ReturnSpec::CaptureTemplate(template.into())
    }

    /// Sub-schema specification, typically paired with a bare-keyword pattern
    pub fn nested(schema: Schema) -> Self {
        ReturnSpec::SubSchema(schema)
    }
}

/// One schema entry: a pattern-key and its return specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// The pattern-key, e.g. `-b`, `--file=*` or `--this|--that`
    pub pattern: String,

    /// What to resolve when the pattern matches
    pub spec: ReturnSpec,
}

/// An ordered mapping of pattern-keys to return specifications.
///
/// Entry order is significant: results are produced in entry order, and
/// within a composite pattern-key the first listed alternative found in the
/// token list wins. Pattern-keys are unique; inserting an existing key
/// replaces its specification in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for chained construction
    pub fn entry(mut self, pattern: impl Into<String>, spec: ReturnSpec) -> Self {
        self.insert(pattern, spec);
        self
    }

    /// Insert an entry, replacing any existing entry with the same pattern-key
    pub fn insert(&mut self, pattern: impl Into<String>, spec: ReturnSpec) {
        let pattern = pattern.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.pattern == pattern) {
            existing.spec = spec;
        } else {
            self.entries.push(SchemaEntry { pattern, spec });
        }
    }

    /// The entries in insertion order
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Find an entry by its pattern-key
    pub fn find(&self, pattern: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.pattern == pattern)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode a schema from JSON text.
    ///
    /// The document is an array of `{"pattern": ..., "spec": ...}` objects,
    /// where the spec is externally tagged: `{"literal": true}`,
    /// `{"indexed_choice": {"choices": [...], "fallback": ...}}`,
    /// `{"capture_template": "..."}` or `{"sub_schema": [...]}`.
    pub fn from_json(text: &str) -> Result<Schema> {
        serde_json::from_str(text)
            .map_err(|e| SchemaError::InvalidSchema(format!("Failed to decode schema JSON: {}", e)))
    }
}

/// The outcome recorded for one schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// A nested result from sub-schema recursion
    Nested(ResultMap),

    /// A resolved literal, choice or captured value
    Value(Value),

    /// Absence marker: no configured alternative was found in the token list.
    /// Serializes as `null`.
    Absent,
}

impl Resolved {
    /// The resolved value, if this outcome carries one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The nested result map, if this outcome is a sub-schema result
    pub fn as_nested(&self) -> Option<&ResultMap> {
        match self {
            Resolved::Nested(m) => Some(m),
            _ => None,
        }
    }

    /// Whether this outcome is the absence marker
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }
}

/// Resolution result: first atom of each pattern-key mapped to its outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultMap {
    entries: HashMap<String, Resolved>,
}

impl ResultMap {
    /// Create a new empty result map
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, key: String, outcome: Resolved) {
        self.entries.insert(key, outcome);
    }

    /// Look up the outcome for a result key (the pattern-key's first atom)
    pub fn get(&self, key: &str) -> Option<&Resolved> {
        self.entries.get(key)
    }

    /// The resolved value for a key, when present and not absent/nested
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Resolved::as_value)
    }

    /// The nested result for a key, when it came from a sub-schema
    pub fn nested(&self, key: &str) -> Option<&ResultMap> {
        self.get(key).and_then(Resolved::as_nested)
    }

    /// Whether the entry was recorded as absent
    pub fn is_absent(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Resolved::Absent))
    }

    /// Iterate over recorded outcomes
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Resolved)> {
        self.entries.iter()
    }

    /// Number of recorded outcomes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
