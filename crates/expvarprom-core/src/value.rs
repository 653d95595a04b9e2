//! Closed classification of top-level expvar values.

use serde_json::Value;

use crate::error::TranslationError;

/// Decoded value of one top-level key, reduced to the shapes translation cares
/// about.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Bool(bool),
    Text,
    Array,
    /// Object whose values are all numbers or booleans (already coerced).
    ScalarMap(Vec<(String, f64)>),
    /// Null, nested objects, objects holding non-scalar values.
    Other,
}

impl RawValue {
    pub fn classify(v: Value) -> Self {
        match v {
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawValue::Number(f),
                None => RawValue::Other,
            },
            Value::Bool(b) => RawValue::Bool(b),
            Value::String(_) => RawValue::Text,
            Value::Array(_) => RawValue::Array,
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    match coerce_scalar(&v) {
                        Ok(f) => entries.push((k, f)),
                        Err(_) => return RawValue::Other,
                    }
                }
                RawValue::ScalarMap(entries)
            }
            Value::Null => RawValue::Other,
        }
    }

    /// Short shape name for logs.
    pub fn shape(&self) -> &'static str {
        match self {
            RawValue::Number(_) => "number",
            RawValue::Bool(_) => "bool",
            RawValue::Text => "string",
            RawValue::Array => "array",
            RawValue::ScalarMap(_) => "object",
            RawValue::Other => "other",
        }
    }
}

/// Numbers map to themselves, booleans to `1.0`/`0.0`.
pub fn coerce_scalar(v: &Value) -> Result<f64, TranslationError> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| TranslationError::UnexpectedValueType(format!("{n}"))),
        Value::Bool(b) => Ok(bool_to_f64(*b)),
        other => Err(TranslationError::UnexpectedValueType(format!("{other}"))),
    }
}

pub fn bool_to_f64(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
