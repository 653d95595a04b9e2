//! Exporter self-metrics.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic ordering.
//! Histogram buckets are fixed in microseconds to avoid floating point math.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use super::exposition::{escape_help, render_label_pairs};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Sorted snapshot so output does not depend on shard iteration order.
fn sorted_rows<V, T>(map: &DashMap<LabelKey, V>, read: impl Fn(&V) -> T) -> Vec<(LabelKey, T)> {
    let mut rows: Vec<_> = map.iter().map(|r| (r.key().clone(), read(r.value()))).collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

fn write_header(out: &mut String, name: &str, help: &str, ty: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, ty);
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        for (key, val) in sorted_rows(&self.map, |c| c.load(Ordering::Relaxed)) {
            let _ = writeln!(out, "{}{} {}", name, render_label_pairs(&key), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    /// Overwrite the value.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        for (key, val) in sorted_rows(&self.map, |g| g.load(Ordering::Relaxed)) {
            let _ = writeln!(out, "{}{} {}", name, render_label_pairs(&key), val);
        }
    }
}

// Fixed buckets in microseconds:
// 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 10s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        // cumulative
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        let rows = sorted_rows(&self.map, |h| {
            let buckets: Vec<u64> = h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect();
            (buckets, h.count.load(Ordering::Relaxed), h.sum.load(Ordering::Relaxed))
        });

        for (key, (buckets, count, sum)) in rows {
            for (le, n) in BUCKETS_MICROS.iter().zip(&buckets) {
                let mut with_le = key.clone();
                with_le.push(("le".into(), le.to_string()));
                let _ = writeln!(out, "{}_bucket{} {}", name, render_label_pairs(&with_le), n);
            }
            let mut inf = key.clone();
            inf.push(("le".into(), "+Inf".into()));
            let _ = writeln!(out, "{}_bucket{} {}", name, render_label_pairs(&inf), count);

            let labels = render_label_pairs(&key);
            let _ = writeln!(out, "{}_sum{} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{} {}", name, labels, count);
        }
    }
}

const SCRAPES: &str = "expvar_exporter_scrapes_total";
const SCRAPE_DURATION: &str = "expvar_exporter_scrape_duration_micros";
const DROPPED_KEYS: &str = "expvar_exporter_dropped_keys_total";
const REJECTED_SAMPLES: &str = "expvar_exporter_rejected_samples_total";
const SAMPLES: &str = "expvar_exporter_samples";

/// Metrics about the exporter itself, appended after the translated samples.
#[derive(Default)]
pub struct ExporterMetrics {
    /// {source, result}: result is `success` or an error kind.
    pub scrapes: CounterVec,
    /// {source}
    pub scrape_duration: HistogramVec, // In Microseconds
    /// {source, reason}: keys the translator skipped.
    pub dropped_keys: CounterVec,
    /// {source, reason}: translated samples left out of the exposition.
    pub rejected_samples: CounterVec,
    /// {source}: samples produced by the latest scrape.
    pub samples: GaugeVec,
}

impl ExporterMetrics {
    /// Every series name `render` can write. Upstream samples must not reuse them.
    pub fn reserved_names() -> Vec<String> {
        let mut names: Vec<String> = [SCRAPES, DROPPED_KEYS, REJECTED_SAMPLES, SAMPLES, SCRAPE_DURATION]
            .iter()
            .map(|n| n.to_string())
            .collect();
        for suffix in ["_bucket", "_sum", "_count"] {
            names.push(format!("{SCRAPE_DURATION}{suffix}"));
        }
        names
    }

    pub fn render(&self, out: &mut String) {
        self.scrapes
            .render(SCRAPES, "Scrapes per source, by result.", out);
        self.scrape_duration.render(
            SCRAPE_DURATION,
            "Fetch and translate time per source in microseconds.",
            out,
        );
        self.dropped_keys.render(
            DROPPED_KEYS,
            "Expvar keys that produced no samples, by reason.",
            out,
        );
        self.rejected_samples.render(
            REJECTED_SAMPLES,
            "Translated samples left out of the exposition, by reason.",
            out,
        );
        self.samples.render(
            SAMPLES,
            "Samples produced by the latest scrape of each source.",
            out,
        );
    }
}
