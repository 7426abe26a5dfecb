//! Error types for report writers and readers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing or reading report files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write JSON to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A sequence file whose header lacks a required column.
    #[error("sequence file {path} has no {column} column")]
    MissingColumn { path: PathBuf, column: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
