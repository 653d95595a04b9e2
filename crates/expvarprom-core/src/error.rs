//! Shared error types across expvarprom crates.

use thiserror::Error;

use crate::naming::UnsupportedCharacterError;

/// Stable error kinds (used as log fields and metric label values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration missing or invalid.
    BadConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Upstream fetch failed (transport, status, deadline).
    Fetch,
    /// Body could not be parsed as a JSON object.
    Parse,
    /// A value had a shape the coercion helper cannot turn into a float.
    UnexpectedValueType,
    /// A key needs an explicit override (non-ASCII character).
    UnsupportedCharacter,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadConfig => "bad_config",
            ErrorKind::UnsupportedVersion => "unsupported_version",
            ErrorKind::Fetch => "fetch_error",
            ErrorKind::Parse => "parse_error",
            ErrorKind::UnexpectedValueType => "unexpected_value_type",
            ErrorKind::UnsupportedCharacter => "unsupported_character",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Failure of one translation pass (or one coercion inside it).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    #[error("invalid expvar json: {0}")]
    Parse(String),
    #[error("unexpected value type: {0}")]
    UnexpectedValueType(String),
    #[error(transparent)]
    UnsupportedCharacter(#[from] UnsupportedCharacterError),
}

impl TranslationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslationError::Parse(_) => ErrorKind::Parse,
            TranslationError::UnexpectedValueType(_) => ErrorKind::UnexpectedValueType,
            TranslationError::UnsupportedCharacter(_) => ErrorKind::UnsupportedCharacter,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error(transparent)]
    Translate(#[from] TranslationError),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map to a stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::BadConfig(_) => ErrorKind::BadConfig,
            ExporterError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            ExporterError::Fetch(_) => ErrorKind::Fetch,
            ExporterError::Translate(e) => e.kind(),
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
