//! Errors that abort a dims build.

use std::path::PathBuf;

use shared_utils::{config::ConfigError, sink::SinkError};
use thiserror::Error;

/// Fatal failures of a dims build. Row-level problems never surface here.
#[derive(Debug, Error)]
pub enum DimsError {
    /// A master file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A master file's header row could not be parsed.
    #[error("{}: malformed CSV header", .path.display())]
    Csv {
        /// File that failed.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The TOML config could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `dims.json` could not be written.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
