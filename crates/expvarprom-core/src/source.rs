//! Per-source data model: overrides in, samples out.

use std::collections::HashMap;
use std::time::Duration;

/// Default deadline applied by the fetch collaborator.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Operator-supplied replacement for the default identity of one raw key.
///
/// `None` fields are derived at translation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Override {
    pub metric_name: Option<String>,
    pub help: Option<String>,
    /// When set, the raw value is expected to be a JSON object and every entry
    /// becomes one sample labelled with the entry key.
    pub label_name: Option<String>,
}

/// Override table keyed by raw expvar key.
pub type Overrides = HashMap<String, Override>;

/// One configured upstream. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    pub timeout: Duration,
    pub overrides: Overrides,
}

impl SourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            overrides: Overrides::new(),
        }
    }
}

/// One label dimension. A sample carries either none or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// One emitted observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub help: String,
    pub label: Option<Label>,
    pub value: f64,
}

impl Sample {
    pub fn label_name(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.name.as_str())
    }

    pub fn label_value(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.value.as_str())
    }
}
