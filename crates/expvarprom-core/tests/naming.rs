//! Default naming and override resolution.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use expvarprom_core::naming::{
    is_valid_label_name, is_valid_metric_name, resolve_identity, sanitize_metric_name,
};
use expvarprom_core::{Override, Overrides};

#[test]
fn sanitize_replaces_slash_and_dash() {
    assert_eq!(sanitize_metric_name("mem/heap").unwrap(), "mem_heap");
    assert_eq!(sanitize_metric_name("http-requests").unwrap(), "http_requests");
    assert_eq!(sanitize_metric_name("a:b_c").unwrap(), "a:b_c");
}

#[test]
fn sanitize_preserves_case() {
    assert_eq!(sanitize_metric_name("Goroutines").unwrap(), "Goroutines");
    assert_eq!(sanitize_metric_name("memStats.HeapAlloc").unwrap(), "memStats_HeapAlloc");
}

#[test]
fn sanitize_other_ascii_becomes_underscore() {
    assert_eq!(sanitize_metric_name("a b.c{d}\"e").unwrap(), "a_b_c_d__e");
}

#[test]
fn sanitize_prefixes_leading_digit_and_empty() {
    assert_eq!(sanitize_metric_name("5xx").unwrap(), "_5xx");
    assert_eq!(sanitize_metric_name("").unwrap(), "_");
}

#[test]
fn sanitized_names_are_always_valid() {
    let alphabet = ["a", "Z", "0", "9", "_", ":", "-", "/"];
    let mut keys = vec![String::new()];
    for a in alphabet {
        keys.push(a.to_string());
        for b in alphabet {
            keys.push(format!("{a}{b}"));
            for c in alphabet {
                keys.push(format!("{a}{b}{c}"));
            }
        }
    }

    for k in keys {
        let name = sanitize_metric_name(&k).unwrap();
        assert!(is_valid_metric_name(&name), "key {k:?} -> {name:?}");
        assert!(!name.contains('/') && !name.contains('-'));
    }
}

#[test]
fn non_ascii_fails_with_key_and_character() {
    let err = sanitize_metric_name("cache/größe").unwrap_err();
    assert_eq!(err.character, 'ö');
    assert_eq!(err.key, "cache/größe");
    assert!(err.to_string().contains("configure the metric"));
}

#[test]
fn resolve_without_override_uses_defaults() {
    let id = resolve_identity("mem/heap", &Overrides::new()).unwrap();
    assert_eq!(id.name, "mem_heap");
    assert_eq!(id.help, "expvar \"mem/heap\"");
    assert_eq!(id.label_name, None);
}

#[test]
fn resolve_override_name_is_verbatim() {
    let mut o = Overrides::new();
    o.insert(
        "größe".into(),
        Override {
            metric_name: Some("cache_size_bytes".into()),
            help: Some("Cache size.".into()),
            label_name: Some("shard".into()),
        },
    );
    let id = resolve_identity("größe", &o).unwrap();
    assert_eq!(id.name, "cache_size_bytes");
    assert_eq!(id.help, "Cache size.");
    assert_eq!(id.label_name.as_deref(), Some("shard"));
}

#[test]
fn resolve_partial_override_derives_missing_fields() {
    let mut o = Overrides::new();
    o.insert(
        "workers".into(),
        Override {
            label_name: Some("worker_id".into()),
            ..Override::default()
        },
    );
    let id = resolve_identity("workers", &o).unwrap();
    assert_eq!(id.name, "workers");
    assert_eq!(id.help, "expvar \"workers\"");
    assert_eq!(id.label_name.as_deref(), Some("worker_id"));
}

#[test]
fn label_name_rules() {
    assert!(is_valid_label_name("worker_id"));
    assert!(is_valid_label_name("_x"));
    assert!(!is_valid_label_name("__reserved"));
    assert!(!is_valid_label_name("a:b"));
    assert!(!is_valid_label_name("1a"));
    assert!(!is_valid_label_name(""));
}
