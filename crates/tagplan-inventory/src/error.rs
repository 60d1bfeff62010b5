//! Error types for tagplan-inventory

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for inventory operations
#[derive(Error, Debug)]
pub enum Error {
    /// Named view does not exist
    #[error("The resource view named '{view}' was not found in {region}")]
    ViewNotFound { view: String, region: String },

    /// Snapshot file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON of the expected shape
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One tag lookup batch failed
    #[error("Tag lookup failed for {count} resources in {region}: {message}")]
    BatchFailed {
        region: String,
        count: usize,
        message: String,
    },

    /// Rate limit must be at least one request per second
    #[error("Invalid rate limit: {0} requests/second")]
    InvalidRateLimit(u32),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
