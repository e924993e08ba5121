//! The resolution engine.
//!
//! Walks a [`Schema`] in entry order, validates each pattern-key, scans the
//! raw token list for the first matching alternative, and records an outcome
//! per entry. Sub-schemas recurse over the same token list. Schema errors
//! abort the whole call; a flag the user did not supply is recorded as
//! [`Resolved::Absent`], never an error.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::pattern::{Match, PatternAtom, parse_atom};
use crate::schema::{Resolved, ResultMap, ReturnSpec, Schema};

/// Resolve a schema against a raw token list.
///
/// The token list is the command line invocation with the program name
/// already stripped by the host. The result maps each pattern-key's first
/// alternative, exactly as written, to its resolved outcome.
pub fn resolve(schema: &Schema, tokens: &[String]) -> Result<ResultMap> {
    debug!(
        "Resolving schema with {} entries against {} tokens",
        schema.len(),
        tokens.len()
    );

    let mut result = ResultMap::new();

    for entry in schema.entries() {
        // 1. Split and validate the pattern-key
        let atoms = split_pattern_key(&entry.pattern)?;
        check_spec(&entry.pattern, &atoms, &entry.spec)?;

        // 2. Scan the tokens and resolve the outcome
        let outcome = resolve_entry(&atoms, &entry.spec, tokens)?;
        trace!("Pattern {} resolved to {:?}", entry.pattern, outcome);

        // 3. Key the result by the first alternative
        result.record(atoms[0].raw.clone(), outcome);
    }

    Ok(result)
}

/// Resolve a schema against this process's argument list.
///
/// Boundary convenience over [`resolve`]: reads `std::env::args()` once,
/// drops the program name, and delegates. The engine itself never consults
/// the environment.
pub fn resolve_env(schema: &Schema) -> Result<ResultMap> {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    resolve(schema, &tokens)
}

/// Split a pattern-key on `|` and parse every alternative.
fn split_pattern_key(pattern: &str) -> Result<Vec<PatternAtom>> {
    // The literal double separator is reserved
    if pattern.contains("||") {
        return Err(SchemaError::MalformedPatternKey(pattern.to_string()));
    }

    let mut atoms = Vec::new();
    for part in pattern.split('|') {
        if part.is_empty() {
            return Err(SchemaError::MalformedPatternKey(pattern.to_string()));
        }
        atoms.push(parse_atom(part)?);
    }

    // All alternatives must agree on value expectation
    let expects_value = atoms[0].expects_value;
    if atoms.iter().any(|a| a.expects_value != expects_value) {
        return Err(SchemaError::InconsistentValueExpectation(pattern.to_string()));
    }

    Ok(atoms)
}

/// Validate a return specification against its pattern-key.
fn check_spec(pattern: &str, atoms: &[PatternAtom], spec: &ReturnSpec) -> Result<()> {
    match spec {
        ReturnSpec::CaptureTemplate(_) if !atoms[0].expects_value => {
            Err(SchemaError::InvalidSchema(format!(
                "Capture template on pattern without a value marker: {}",
                pattern
            )))
        }
        ReturnSpec::IndexedChoice { choices, .. } if choices.len() != atoms.len() => {
            Err(SchemaError::InvalidSchema(format!(
                "Indexed choice lists {} values for {} alternatives: {}",
                choices.len(),
                atoms.len(),
                pattern
            )))
        }
        _ if atoms[0].expects_value && !matches!(spec, ReturnSpec::CaptureTemplate(_)) => {
            Err(SchemaError::InvalidSchema(format!(
                "Value-capturing pattern requires a capture template: {}",
                pattern
            )))
        }
        _ => Ok(()),
    }
}

/// Scan the tokens for one entry's alternatives and resolve its outcome.
fn resolve_entry(atoms: &[PatternAtom], spec: &ReturnSpec, tokens: &[String]) -> Result<Resolved> {
    // First alternative in listing order found in the token list wins;
    // later alternatives are not checked once one matches.
    let matched = atoms
        .iter()
        .enumerate()
        .find_map(|(idx, atom)| atom.matcher.find_in(tokens).map(|m| (idx, m)));

    let outcome = match (spec, matched) {
        (ReturnSpec::Literal(value), Some(_)) => Resolved::Value(value.clone()),

        (ReturnSpec::IndexedChoice { choices, .. }, Some((idx, _))) => {
            Resolved::Value(choices[idx].clone())
        }
        // The fallback arm means a choice entry is never absent
        (ReturnSpec::IndexedChoice { fallback, .. }, None) => Resolved::Value(fallback.clone()),

        (ReturnSpec::CaptureTemplate(template), Some((_, Match::Captured(text)))) => {
            let value = if template.is_empty() {
                text
            } else {
                format!("{}{}", template, text)
            };
            Resolved::Value(Value::String(value))
        }
        // Value matchers always capture; check_spec pairs templates with them
        (ReturnSpec::CaptureTemplate(_), Some((_, Match::Plain))) => Resolved::Absent,

        (ReturnSpec::SubSchema(inner), Some(_)) => Resolved::Nested(resolve(inner, tokens)?),

        (_, None) => Resolved::Absent,
    };

    Ok(outcome)
}
