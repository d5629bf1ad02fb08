use std::path::PathBuf;

use thiserror::Error;

/// Setup failures that stop a validation run before any check is made.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("missing required file(s): {}", .0.join(", "))]
    MissingFiles(Vec<String>),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid JSON", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: not a FeatureCollection", .path.display())]
    NotFeatureCollection { path: PathBuf },
}
