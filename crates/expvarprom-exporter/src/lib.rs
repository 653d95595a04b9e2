//! expvar exporter library entry.
//!
//! This crate wires configuration, the upstream fetcher, the source registry
//! and the Prometheus exposition into an HTTP exporter. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod obs;
pub mod ops;
pub mod registry;
pub mod router;
