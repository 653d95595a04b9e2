//! Source registry: one translator per configured source.
//!
//! Built once at startup and shared via `Arc`. A scrape is driven by an inbound
//! `/metrics` request; every source is fetched and translated concurrently and
//! independently, so a failing source only loses its own samples.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;

use expvarprom_core::error::{ExporterError, Result};
use expvarprom_core::{SkipReason, SourceConfig, Translation, Translator};

use crate::fetch::Fetch;
use crate::obs::metrics::ExporterMetrics;

/// One configured upstream.
pub struct Source {
    pub name: String,
    pub url: String,
    pub timeout: Duration,
    translator: Translator,
}

impl Source {
    pub fn new(name: String, config: SourceConfig) -> Self {
        Self {
            name,
            url: config.url,
            timeout: config.timeout,
            translator: Translator::new(config.overrides),
        }
    }
}

/// Result of scraping one source.
pub struct SourceScrape {
    pub source: String,
    pub result: Result<Translation>,
}

pub struct SourceRegistry {
    sources: Vec<Source>,
    fetcher: Arc<dyn Fetch>,
    metrics: Arc<ExporterMetrics>,
}

impl SourceRegistry {
    pub fn new(
        sources: Vec<(String, SourceConfig)>,
        fetcher: Arc<dyn Fetch>,
        metrics: Arc<ExporterMetrics>,
    ) -> Result<Self> {
        let mut out: Vec<Source> = Vec::with_capacity(sources.len());
        for (name, cfg) in sources {
            if out.iter().any(|s| s.name == name) {
                return Err(ExporterError::BadConfig(format!(
                    "source {name:?} registered twice"
                )));
            }
            tracing::info!(source = %name, url = %cfg.url, overrides = cfg.overrides.len(), "collecting");
            out.push(Source::new(name, cfg));
        }
        Ok(Self {
            sources: out,
            fetcher,
            metrics,
        })
    }

    /// Scrape every source concurrently. Results come back in registration order.
    pub async fn scrape_all(&self) -> Vec<SourceScrape> {
        join_all(self.sources.iter().map(|s| self.scrape(s))).await
    }

    /// Fetch and translate one source, recording self-metrics and logging
    /// failures. Never fails past this boundary.
    pub async fn scrape(&self, src: &Source) -> SourceScrape {
        let started = Instant::now();
        let result = self.fetch_and_translate(src).await;
        let source = src.name.as_str();

        self.metrics
            .scrape_duration
            .observe(&[("source", source)], started.elapsed());

        match &result {
            Ok(t) => {
                self.metrics
                    .scrapes
                    .inc(&[("source", source), ("result", "success")]);
                self.metrics
                    .samples
                    .set(&[("source", source)], i64::try_from(t.samples.len()).unwrap_or(i64::MAX));
                self.record_skipped(source, t);
            }
            Err(e) => {
                tracing::warn!(source = %source, url = %src.url, kind = e.kind().as_str(), error = %e, "scrape failed");
                self.metrics
                    .scrapes
                    .inc(&[("source", source), ("result", e.kind().as_str())]);
                self.metrics.samples.set(&[("source", source)], 0);
            }
        }

        SourceScrape {
            source: src.name.clone(),
            result,
        }
    }

    async fn fetch_and_translate(&self, src: &Source) -> Result<Translation> {
        let body = self
            .fetcher
            .fetch(&src.url, src.timeout)
            .await?;
        Ok(src.translator.translate(&body)?)
    }

    fn record_skipped(&self, source: &str, t: &Translation) {
        for skipped in &t.skipped {
            match &skipped.reason {
                SkipReason::UnsupportedCharacter(e) => {
                    tracing::warn!(source = %source, key = %skipped.key, character = ?e.character, "expvar needs an explicit metric override");
                }
                reason => {
                    tracing::debug!(source = %source, key = %skipped.key, reason = reason.as_str(), "expvar not exported");
                }
            }
            self.metrics
                .dropped_keys
                .inc(&[("source", source), ("reason", skipped.reason.as_str())]);
        }
    }
}
