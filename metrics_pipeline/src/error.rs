use std::path::PathBuf;

use shared_utils::sink::SinkError;
use thiserror::Error;

/// Setup failures for the fake generator and the aggregator. Record-level
/// problems never surface here; they are counted in the run reports.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{} not found; run build-dims first", .0.display())]
    MissingDims(PathBuf),

    #[error("no localities in {}", .0.display())]
    NoLocalities(PathBuf),

    #[error("required metric file {} not found", .0.display())]
    MissingMetric(PathBuf),

    #[error("invalid month {0:?}; expected YYYY-MM")]
    InvalidMonth(String),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bad CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Sink(#[from] SinkError),
}
