//! Error types for enrichment collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading enrichment payloads.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// A cached payload exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload is not valid JSON of the expected shape.
    #[error("invalid payload in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
