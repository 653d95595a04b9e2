//! Prometheus text rendering of translated samples.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use expvarprom_core::{Label, Sample};
use expvarprom_exporter::obs::exposition::{format_value, Rejection, SampleWriter};

fn sample(name: &str, label: Option<(&str, &str)>, value: f64) -> Sample {
    Sample {
        name: name.into(),
        help: format!("expvar \"{name}\""),
        label: label.map(|(n, v)| Label {
            name: n.into(),
            value: v.into(),
        }),
        value,
    }
}

#[test]
fn renders_families_in_first_seen_order() {
    let samples = vec![
        sample("workers", Some(("worker_id", "a")), 3.0),
        sample("Goroutines", None, 42.0),
        sample("workers", Some(("worker_id", "b")), 5.0),
    ];
    let mut w = SampleWriter::new();
    for s in &samples {
        w.push(s).unwrap();
    }
    let mut out = String::new();
    w.write_to(&mut out);

    assert_eq!(
        out,
        "# HELP workers expvar \"workers\"\n\
         # TYPE workers untyped\n\
         workers{worker_id=\"a\"} 3\n\
         workers{worker_id=\"b\"} 5\n\
         # HELP Goroutines expvar \"Goroutines\"\n\
         # TYPE Goroutines untyped\n\
         Goroutines 42\n"
    );
}

#[test]
fn escapes_label_values_and_help() {
    let mut s = sample("m", Some(("path", "a\"b\\c\nd")), 1.5);
    s.help = "line one\nback\\slash".into();
    let mut w = SampleWriter::new();
    w.push(&s).unwrap();
    let mut out = String::new();
    w.write_to(&mut out);

    assert!(out.contains("# HELP m line one\\nback\\\\slash\n"), "{out}");
    assert!(out.contains("m{path=\"a\\\"b\\\\c\\nd\"} 1.5\n"), "{out}");
}

#[test]
fn rejects_duplicates_and_label_conflicts() {
    let a = sample("mem_heap", None, 1.0);
    let dup = sample("mem_heap", None, 2.0);
    let conflict = sample("mem_heap", Some(("k", "v")), 3.0);

    let mut w = SampleWriter::new();
    assert_eq!(w.push(&a), Ok(()));
    assert_eq!(w.push(&dup), Err(Rejection::Duplicate));
    assert_eq!(w.push(&conflict), Err(Rejection::LabelConflict));
    assert_eq!(w.len(), 1);

    let mut out = String::new();
    w.write_to(&mut out);
    assert!(out.ends_with("mem_heap 1\n"), "{out}");
}

#[test]
fn reserved_names_are_rejected() {
    let own = sample("exporter_up", None, 1.0);
    let other = sample("app_up", None, 1.0);

    let mut w = SampleWriter::new();
    w.reserve("exporter_up");
    assert_eq!(w.push(&own), Err(Rejection::Reserved));
    assert_eq!(w.push(&other), Ok(()));

    let mut out = String::new();
    w.write_to(&mut out);
    assert!(!out.contains("exporter_up"), "{out}");
}

#[test]
fn special_float_values() {
    assert_eq!(format_value(f64::NAN), "NaN");
    assert_eq!(format_value(f64::INFINITY), "+Inf");
    assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_value(1024.5), "1024.5");
    assert_eq!(format_value(-0.25), "-0.25");
    assert_eq!(format_value(1e21), "1000000000000000000000");
}
