//! Observability: Prometheus text exposition and exporter self-metrics.
//!
//! Self-metrics are stored as atomics and rendered by the `/metrics` handler
//! after the translated samples of every source.

pub mod exposition;
pub mod metrics;
