//! Prometheus text exposition (format 0.0.4) for translated samples.
//!
//! Samples are grouped into families by name, in first-seen order. Every family
//! is exported as `untyped` and keeps the help text and label dimension of its
//! first sample. Samples with a different label dimension, repeating an
//! existing (name, label value) pair, or using a reserved name are rejected.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use expvarprom_core::Sample;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value.
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape a HELP string (quotes are allowed there).
pub fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `{k="v",...}`, or an empty string for no labels.
pub fn render_label_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let inner = pairs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k.as_ref(), escape_label(v.as_ref())))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

/// Go-compatible float text: `NaN`, `+Inf`, `-Inf`, otherwise shortest repr.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

struct Family<'a> {
    help: &'a str,
    label_name: Option<&'a str>,
    samples: Vec<&'a Sample>,
}

/// Why a sample was not accepted into the exposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Same name and label value as an earlier sample.
    Duplicate,
    /// Label dimension differs from the family's first sample.
    LabelConflict,
    /// Name belongs to a series the exporter writes itself.
    Reserved,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::Duplicate => "duplicate",
            Rejection::LabelConflict => "label_conflict",
            Rejection::Reserved => "reserved_name",
        }
    }
}

/// Collects samples from any number of sources, then writes them grouped by family.
#[derive(Default)]
pub struct SampleWriter<'a> {
    order: Vec<&'a str>,
    families: HashMap<&'a str, Family<'a>>,
    seen: HashSet<(&'a str, Option<&'a str>)>,
    reserved: HashSet<String>,
}

impl<'a> SampleWriter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse samples named `name` (series written outside this writer).
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    pub fn push(&mut self, s: &'a Sample) -> Result<(), Rejection> {
        let name = s.name.as_str();
        if self.reserved.contains(name) {
            return Err(Rejection::Reserved);
        }
        if !self.families.contains_key(name) {
            self.order.push(name);
        }
        let fam = self.families.entry(name).or_insert_with(|| Family {
            help: s.help.as_str(),
            label_name: s.label_name(),
            samples: Vec::new(),
        });

        if fam.label_name != s.label_name() {
            return Err(Rejection::LabelConflict);
        }
        if !self.seen.insert((name, s.label_value())) {
            return Err(Rejection::Duplicate);
        }
        fam.samples.push(s);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn write_to(&self, out: &mut String) {
        for name in &self.order {
            let Some(fam) = self.families.get(name) else { continue };
            let _ = writeln!(out, "# HELP {} {}", name, escape_help(fam.help));
            let _ = writeln!(out, "# TYPE {} untyped", name);
            for s in &fam.samples {
                let labels = match &s.label {
                    Some(l) => render_label_pairs(&[(l.name.as_str(), l.value.as_str())]),
                    None => String::new(),
                };
                let _ = writeln!(out, "{}{} {}", name, labels, format_value(s.value));
            }
        }
    }
}
