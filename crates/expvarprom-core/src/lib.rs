//! expvarprom core: translation of expvar JSON documents into Prometheus
//! samples.
//!
//! This crate holds the name mapping and scrape translation logic shared by the
//! exporter and its tests. It carries no transport or runtime dependencies: it
//! consumes an already-parsed [`SourceConfig`] and raw response bytes, and
//! produces [`Sample`]s.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed upstream documents surface as `TranslationError` or as skipped
//! keys, so one bad source or key never takes the exporter down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod escape;
pub mod naming;
pub mod source;
pub mod translate;
pub mod value;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result, TranslationError};
pub use naming::{resolve_identity, Identity, UnsupportedCharacterError};
pub use source::{Label, Override, Overrides, Sample, SourceConfig};
pub use translate::{SkipReason, SkippedKey, Translation, Translator};
