//! Shared application state for the expvar exporter.
//!
//! Owns the source registry and self-metrics. Constructed once in `main` and
//! handed to the router, so there is no process-wide collector registry.

use std::sync::Arc;

use expvarprom_core::error::Result;

use crate::config::ExporterConfig;
use crate::fetch::{Fetch, HttpFetcher};
use crate::obs::exposition::SampleWriter;
use crate::obs::metrics::ExporterMetrics;
use crate::registry::SourceRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: SourceRegistry,
    metrics: Arc<ExporterMetrics>,
}

impl AppState {
    /// Build application state with the HTTP fetcher.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        Self::with_fetcher(cfg, Arc::new(HttpFetcher::new()))
    }

    /// Build application state with a custom fetcher (tests).
    pub fn with_fetcher(cfg: ExporterConfig, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        let metrics = Arc::new(ExporterMetrics::default());
        let registry =
            SourceRegistry::new(cfg.source_configs(), fetcher, Arc::clone(&metrics))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                registry,
                metrics,
            }),
        })
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    /// Scrape every source and render the full `/metrics` body: translated
    /// samples first, then self-metrics.
    pub async fn render_metrics(&self) -> String {
        let scrapes = self.registry().scrape_all().await;

        let mut writer = SampleWriter::new();
        for name in ExporterMetrics::reserved_names() {
            writer.reserve(name);
        }
        for scrape in &scrapes {
            let Ok(t) = &scrape.result else { continue };
            for sample in &t.samples {
                if let Err(rejection) = writer.push(sample) {
                    tracing::warn!(source = %scrape.source, metric = %sample.name, reason = rejection.as_str(), "sample rejected");
                    self.metrics()
                        .rejected_samples
                        .inc(&[("source", scrape.source.as_str()), ("reason", rejection.as_str())]);
                }
            }
        }

        let mut out = String::new();
        writer.write_to(&mut out);
        self.metrics().render(&mut out);
        out
    }
}
