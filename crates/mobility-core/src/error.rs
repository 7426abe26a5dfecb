use thiserror::Error;

use mobility_ingest::IngestError;
use mobility_model::SequenceError;

use crate::classify::ClassifyError;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
