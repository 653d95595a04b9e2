//! Scrape translation: raw expvar JSON bytes -> Prometheus samples.
//!
//! Pipeline: escape repair, parse as a JSON object, then per-key dispatch over
//! [`RawValue`]. Keys are independent: a key that cannot be translated is
//! recorded in [`Translation::skipped`] and never affects its siblings. Only a
//! parse failure fails the whole pass.

use serde_json::{Map, Value};

use crate::error::TranslationError;
use crate::escape::repair_escapes;
use crate::naming::{resolve_identity, Identity, UnsupportedCharacterError};
use crate::source::{Label, Overrides, Sample};
use crate::value::{bool_to_f64, RawValue};

/// Why a key produced no samples.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// String, array, null or nested value.
    UnsupportedShape(&'static str),
    /// Object of scalars without a configured label name.
    UnlabeledObject,
    /// Default naming refused the key; needs an override.
    UnsupportedCharacter(UnsupportedCharacterError),
}

impl SkipReason {
    /// Stable label value for drop counters.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnsupportedShape(_) => "unsupported_shape",
            SkipReason::UnlabeledObject => "unlabeled_object",
            SkipReason::UnsupportedCharacter(_) => "unsupported_character",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedKey {
    pub key: String,
    pub reason: SkipReason,
}

/// Output of one successful translation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub samples: Vec<Sample>,
    pub skipped: Vec<SkippedKey>,
}

/// Translator for one source. Immutable after construction, so one instance
/// can serve concurrent scrapes.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    overrides: Overrides,
}

impl Translator {
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }

    /// Translate one scrape body.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD before parsing, so a stray byte
    /// inside one string value does not fail the whole document.
    pub fn translate(&self, raw_body: &[u8]) -> Result<Translation, TranslationError> {
        let repaired = repair_escapes(raw_body);
        let text = String::from_utf8_lossy(&repaired);
        let vars: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        let mut out = Translation::default();
        for (key, value) in vars {
            self.translate_key(key, value, &mut out);
        }
        Ok(out)
    }

    fn translate_key(&self, key: String, value: Value, out: &mut Translation) {
        let Identity {
            name,
            help,
            label_name,
        } = match resolve_identity(&key, &self.overrides) {
            Ok(id) => id,
            Err(e) => {
                out.skipped.push(SkippedKey {
                    key,
                    reason: SkipReason::UnsupportedCharacter(e),
                });
                return;
            }
        };

        let raw = RawValue::classify(value);
        match (raw, label_name) {
            (RawValue::Number(v), _) => out.samples.push(Sample {
                name,
                help,
                label: None,
                value: v,
            }),
            (RawValue::Bool(b), _) => out.samples.push(Sample {
                name,
                help,
                label: None,
                value: bool_to_f64(b),
            }),
            (RawValue::ScalarMap(entries), Some(label_name)) => {
                for (label_value, v) in entries {
                    out.samples.push(Sample {
                        name: name.clone(),
                        help: help.clone(),
                        label: Some(Label {
                            name: label_name.clone(),
                            value: label_value,
                        }),
                        value: v,
                    });
                }
            }
            (RawValue::ScalarMap(_), None) => {
                tracing::trace!(%key, "object without label_name dropped");
                out.skipped.push(SkippedKey {
                    key,
                    reason: SkipReason::UnlabeledObject,
                });
            }
            (raw @ (RawValue::Text | RawValue::Array | RawValue::Other), _) => {
                tracing::trace!(%key, shape = raw.shape(), "unsupported value dropped");
                out.skipped.push(SkippedKey {
                    key,
                    reason: SkipReason::UnsupportedShape(raw.shape()),
                });
            }
        }
    }
}
