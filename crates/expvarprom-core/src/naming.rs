//! Name/label mapping: raw expvar key + overrides -> metric identity.
//!
//! Prometheus metric names must match `[a-zA-Z_:][a-zA-Z0-9_:]*`. Default names
//! are derived by replacing every other ASCII character with `_` (expvar keys
//! commonly contain `/` and `-`). Case is preserved.
//!
//! Non-ASCII characters are refused instead of mangled: there is no reasonable
//! automatic ASCII mapping for all of them, so the operator has to configure the
//! metric explicitly. Keys with an override name never go through sanitizing.

use thiserror::Error;

use crate::source::Overrides;

/// A raw key contains a character that cannot appear in a default metric name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("non-ascii character {character:?} is unsupported, please configure the metric {key:?} explicitly")]
pub struct UnsupportedCharacterError {
    pub character: char,
    pub key: String,
}

/// Canonical metric identity for one raw key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub help: String,
    pub label_name: Option<String>,
}

/// Resolve the metric identity of `raw_key`.
///
/// Pure and deterministic. Fails only when the default name is needed and the
/// key contains a non-ASCII character.
pub fn resolve_identity(
    raw_key: &str,
    overrides: &Overrides,
) -> Result<Identity, UnsupportedCharacterError> {
    let o = overrides.get(raw_key);

    let name = match o.and_then(|o| o.metric_name.as_ref()) {
        Some(n) => n.clone(),
        None => sanitize_metric_name(raw_key)?,
    };

    let help = match o.and_then(|o| o.help.as_ref()) {
        Some(h) => h.clone(),
        None => default_help(raw_key),
    };

    Ok(Identity {
        name,
        help,
        label_name: o.and_then(|o| o.label_name.clone()),
    })
}

/// Default help text for a key without an override.
pub fn default_help(raw_key: &str) -> String {
    format!("expvar {raw_key:?}")
}

/// Map `raw_key` onto the metric name alphabet.
///
/// A leading digit (or an empty key) gets a `_` prefix so the result is always a
/// valid name.
pub fn sanitize_metric_name(raw_key: &str) -> Result<String, UnsupportedCharacterError> {
    let mut out = String::with_capacity(raw_key.len() + 1);
    for c in raw_key.chars() {
        let mapped = match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | ':' => c,
            c if c.is_ascii() => '_',
            c => {
                return Err(UnsupportedCharacterError {
                    character: c,
                    key: raw_key.to_string(),
                })
            }
        };
        out.push(mapped);
    }

    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    Ok(out)
}

/// Whether `name` is a valid Prometheus metric name.
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Whether `name` is a valid, non-reserved Prometheus label name.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
