//! Value classification and scalar coercion.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use expvarprom_core::value::{coerce_scalar, RawValue};
use expvarprom_core::TranslationError;

#[test]
fn classify_scalars() {
    assert_eq!(RawValue::classify(json!(-3)), RawValue::Number(-3.0));
    assert_eq!(RawValue::classify(json!(u64::MAX)), RawValue::Number(u64::MAX as f64));
    assert_eq!(RawValue::classify(json!(true)), RawValue::Bool(true));
    assert_eq!(RawValue::classify(json!("x")), RawValue::Text);
    assert_eq!(RawValue::classify(json!([1])), RawValue::Array);
    assert_eq!(RawValue::classify(json!(null)), RawValue::Other);
}

#[test]
fn classify_objects() {
    assert_eq!(
        RawValue::classify(json!({"a": 1, "b": false})),
        RawValue::ScalarMap(vec![("a".into(), 1.0), ("b".into(), 0.0)])
    );
    assert_eq!(RawValue::classify(json!({})), RawValue::ScalarMap(vec![]));
    assert_eq!(RawValue::classify(json!({"a": [1]})), RawValue::Other);
}

#[test]
fn coerce_rejects_non_scalars() {
    assert_eq!(coerce_scalar(&json!(2.5)).unwrap(), 2.5);
    assert_eq!(coerce_scalar(&json!(false)).unwrap(), 0.0);
    let err = coerce_scalar(&json!("7")).unwrap_err();
    assert!(matches!(err, TranslationError::UnexpectedValueType(_)));
}
