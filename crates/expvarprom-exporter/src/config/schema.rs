use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use expvarprom_core::error::{ExporterError, Result};
use expvarprom_core::naming::{is_valid_label_name, is_valid_metric_name};
use expvarprom_core::{Override, Overrides, SourceConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    pub exporter: ExporterSection,

    /// Source name -> source. Ordered so startup logs and `/metrics` output are stable.
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSection>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::UnsupportedVersion);
        }
        if self.sources.is_empty() {
            return Err(ExporterError::BadConfig("sources must not be empty".into()));
        }

        self.exporter.validate()?;
        for (name, src) in &self.sources {
            src.validate(name)?;
        }

        Ok(())
    }

    /// Core view of every source, with the exporter-wide default timeout applied.
    pub fn source_configs(&self) -> Vec<(String, SourceConfig)> {
        let default_timeout = Duration::from_millis(self.exporter.scrape_timeout_ms);
        self.sources
            .iter()
            .map(|(name, s)| (name.clone(), s.to_source_config(default_timeout)))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    /// Required: there is no sensible default port to claim.
    pub listen: String,

    #[serde(default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        validate_timeout("exporter.scrape_timeout_ms", self.scrape_timeout_ms)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExporterError::BadConfig(format!(
                "exporter.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_scrape_timeout_ms() -> u64 {
    5000
}

fn validate_timeout(field: &str, ms: u64) -> Result<()> {
    if !(100..=60000).contains(&ms) {
        return Err(ExporterError::BadConfig(format!(
            "{field} must be between 100 and 60000"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub url: String,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Metric name -> expvar mapping.
    #[serde(default, alias = "m")]
    pub metrics: BTreeMap<String, MetricOverride>,
}

impl SourceSection {
    pub fn validate(&self, source: &str) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ExporterError::BadConfig(format!(
                "sources.{source}.url must be an http(s) url: {}",
                self.url
            )));
        }
        if let Some(ms) = self.timeout_ms {
            validate_timeout(&format!("sources.{source}.timeout_ms"), ms)?;
        }

        let mut claimed = HashSet::new();
        for (name, m) in &self.metrics {
            if !is_valid_metric_name(name) {
                return Err(ExporterError::BadConfig(format!(
                    "sources.{source}.metrics: invalid metric name {name:?}"
                )));
            }
            if let Some(ln) = &m.label_name {
                if !is_valid_label_name(ln) {
                    return Err(ExporterError::BadConfig(format!(
                        "sources.{source}.metrics.{name}: invalid label_name {ln:?}"
                    )));
                }
            }
            if !claimed.insert(m.expvar.as_str()) {
                return Err(ExporterError::BadConfig(format!(
                    "sources.{source}.metrics.{name}: expvar {:?} is already mapped",
                    m.expvar
                )));
            }
        }
        Ok(())
    }

    /// Invert the metric -> expvar mapping into the expvar-keyed override table.
    pub fn to_source_config(&self, default_timeout: Duration) -> SourceConfig {
        let overrides: Overrides = self
            .metrics
            .iter()
            .map(|(name, m)| {
                (
                    m.expvar.clone(),
                    Override {
                        metric_name: Some(name.clone()),
                        help: m.help.clone(),
                        label_name: m.label_name.clone(),
                    },
                )
            })
            .collect();

        SourceConfig {
            url: self.url.clone(),
            timeout: self
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(default_timeout),
            overrides,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricOverride {
    /// Raw expvar key this metric is read from.
    pub expvar: String,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub label_name: Option<String>,
}
