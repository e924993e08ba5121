//! Pattern atom validation and matching.
//!
//! An atom is one recognizable flag pattern. Four shapes are accepted:
//! `--name` (long, no value), `--name=*` (long, attached value), `-x`
//! (short, no value) and `-x *` (short, separate-token value). Atoms not
//! starting with `-` are bare keywords; the resolver matches them by exact
//! equality, but [`classify`] rejects them since they are not flags.

use crate::error::{Result, SchemaError};

/// Classify a single flag atom.
///
/// Returns `true` when the atom expects an attached value (`--name=*` or
/// `-x *` forms), `false` for plain flags. Any string not matching one of
/// the four flag shapes fails with [`SchemaError::InvalidPatternSyntax`].
pub fn classify(atom: &str) -> Result<bool> {
    if !atom.starts_with('-') {
        return Err(SchemaError::InvalidPatternSyntax(atom.to_string()));
    }
    parse_atom(atom).map(|a| a.expects_value)
}

/// How an atom is located in the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Matcher {
    /// Exact token equality: plain flags and bare keywords
    Exact(String),

    /// Long value form: token prefix match on `--name=`
    AttachedValue(String),

    /// Short value form: token equality on `-x` with a following token
    SeparateValue(String),
}

/// A successful token-list match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Match {
    Plain,
    Captured(String),
}

impl Matcher {
    /// Scan the token list for this matcher.
    ///
    /// Returns `None` when no token satisfies it. Incomplete user input
    /// (`--name=` with nothing after the `=`, or a separate-value flag as
    /// the final token) is skipped, not an error; scanning continues with
    /// later tokens.
    pub(crate) fn find_in(&self, tokens: &[String]) -> Option<Match> {
        match self {
            Matcher::Exact(word) => tokens.iter().any(|t| t == word).then_some(Match::Plain),
            Matcher::AttachedValue(prefix) => tokens
                .iter()
                .find_map(|t| t.strip_prefix(prefix.as_str()).filter(|c| !c.is_empty()))
                .map(|c| Match::Captured(c.to_string())),
            Matcher::SeparateValue(flag) => tokens.iter().enumerate().find_map(|(i, t)| {
                if t == flag {
                    tokens.get(i + 1).map(|v| Match::Captured(v.clone()))
                } else {
                    None
                }
            }),
        }
    }
}

/// A parsed pattern atom: the text as written, its matcher, and whether it
/// expects an attached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatternAtom {
    pub raw: String,
    pub matcher: Matcher,
    pub expects_value: bool,
}

/// Parse one atom of a pattern-key. Bare keywords are accepted here; flag
/// shapes are validated strictly.
pub(crate) fn parse_atom(atom: &str) -> Result<PatternAtom> {
    if let Some(rest) = atom.strip_prefix("--") {
        parse_long(atom, rest)
    } else if let Some(rest) = atom.strip_prefix('-') {
        parse_short(atom, rest)
    } else {
        Ok(PatternAtom {
            raw: atom.to_string(),
            matcher: Matcher::Exact(atom.to_string()),
            expects_value: false,
        })
    }
}

fn parse_long(atom: &str, rest: &str) -> Result<PatternAtom> {
    let (name, expects_value) = match rest.strip_suffix("=*") {
        Some(name) => (name, true),
        None => (rest, false),
    };

    if !valid_long_name(name) {
        return Err(SchemaError::InvalidPatternSyntax(atom.to_string()));
    }

    let matcher = if expects_value {
        Matcher::AttachedValue(format!("--{}=", name))
    } else {
        Matcher::Exact(atom.to_string())
    };

    Ok(PatternAtom {
        raw: atom.to_string(),
        matcher,
        expects_value,
    })
}

/// Long names are alphanumeric-or-dash, and must start and end with an
/// alphanumeric character (`---x` and `--a-` are both malformed).
fn valid_long_name(name: &str) -> bool {
    let first_ok = name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let last_ok = name.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    first_ok && last_ok && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn parse_short(atom: &str, rest: &str) -> Result<PatternAtom> {
    let chars: Vec<char> = rest.chars().collect();
    match chars.as_slice() {
        [c] if c.is_ascii_alphabetic() => Ok(PatternAtom {
            raw: atom.to_string(),
            matcher: Matcher::Exact(atom.to_string()),
            expects_value: false,
        }),
        [c, ' ', '*'] if c.is_ascii_alphabetic() => Ok(PatternAtom {
            raw: atom.to_string(),
            matcher: Matcher::SeparateValue(format!("-{}", c)),
            expects_value: true,
        }),
        _ => Err(SchemaError::InvalidPatternSyntax(atom.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_flags_classify_without_value() {
        assert_eq!(classify("--abc123"), Ok(false));
        assert_eq!(classify("--with-dashes"), Ok(false));
        assert_eq!(classify("--v"), Ok(false));
    }

    #[test]
    fn long_flags_with_marker_expect_value() {
        assert_eq!(classify("--abc=*"), Ok(true));
        assert_eq!(classify("--file-name=*"), Ok(true));
    }

    #[test]
    fn short_flags_classify() {
        assert_eq!(classify("-b"), Ok(false));
        assert_eq!(classify("-Z"), Ok(false));
        assert_eq!(classify("-f *"), Ok(true));
    }

    #[test]
    fn malformed_atoms_are_rejected() {
        for atom in [
            "--a-", "---x", "--", "-", "-ab", "-1", "-f*", "-f  *", "--=*", "--a_b", "do", "",
            "-f =", "--x=y",
        ] {
            assert_eq!(
                classify(atom),
                Err(SchemaError::InvalidPatternSyntax(atom.to_string())),
                "expected {:?} to be rejected",
                atom
            );
        }
    }

    #[test]
    fn keywords_parse_but_do_not_classify() {
        let atom = parse_atom("do").unwrap();
        assert_eq!(atom.matcher, Matcher::Exact("do".to_string()));
        assert!(!atom.expects_value);
        assert!(classify("do").is_err());
    }

    #[test]
    fn attached_value_scan_captures_after_first_equals() {
        let atom = parse_atom("--file=*").unwrap();
        let tokens = vec!["--file=a=b".to_string()];
        assert_eq!(
            atom.matcher.find_in(&tokens),
            Some(Match::Captured("a=b".to_string()))
        );
    }

    #[test]
    fn attached_value_scan_skips_empty_capture() {
        let atom = parse_atom("--file=*").unwrap();

        let empty_only = vec!["--file=".to_string()];
        assert_eq!(atom.matcher.find_in(&empty_only), None);

        // A later complete token still matches
        let recovered = vec!["--file=".to_string(), "--file=out.txt".to_string()];
        assert_eq!(
            atom.matcher.find_in(&recovered),
            Some(Match::Captured("out.txt".to_string()))
        );
    }

    #[test]
    fn separate_value_scan_never_reads_past_the_end() {
        let atom = parse_atom("-f *").unwrap();

        let dangling = vec!["-f".to_string()];
        assert_eq!(atom.matcher.find_in(&dangling), None);

        let complete = vec!["-f".to_string(), "out.txt".to_string()];
        assert_eq!(
            atom.matcher.find_in(&complete),
            Some(Match::Captured("out.txt".to_string()))
        );
    }
}
