//! Error types for the pawablox library.
//!
//! The coordinator itself never fails: missing regions are skipped and
//! clipboard failures degrade to a log line. These errors cover the edges
//! where the crate talks to the outside world (clipboard backends, page
//! description files, configuration files).

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a clipboard capability.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The capability does not exist in this context (no display server,
    /// no clipboard API).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The backend exists but refused the write.
    #[error("clipboard rejected the write: {0}")]
    Rejected(String),

    /// The legacy copy command ran with nothing selected.
    #[error("copy command invoked without a selection")]
    NothingSelected,
}

/// Failure while loading a page description.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed page description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate element id `{0}`")]
    DuplicateId(String),

    #[error("element tag must not be empty")]
    EmptyTag,
}

/// Failure while loading coordinator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("breakpoint must be a positive width, got {0}")]
    InvalidBreakpoint(f32),
}
