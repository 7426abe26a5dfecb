//! Error types for publication event ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal ingestion errors.
///
/// Malformed individual rows are not errors: they are counted as
/// [`RejectReason`](crate::RejectReason)s and the run continues.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("input unavailable: {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required columns are absent from the header row.
    #[error("missing required columns in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// The CSV stream became unreadable (header decoding or I/O failure).
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Ingest options cannot be used.
    #[error("invalid ingest options: {reason}")]
    InvalidOptions { reason: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
