use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Rows per batch when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 1_000_000;

/// Options for batched ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Rows read and normalized per batch.
    /// Defaults to 1 000 000.
    pub batch_size: usize,

    /// Number of independent aggregation shards.
    /// Defaults to 1 (a single reducer).
    pub shards: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            shards: 1,
        }
    }
}

impl IngestOptions {
    /// Set the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the number of aggregation shards.
    #[must_use]
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(IngestError::InvalidOptions {
                reason: "batch size must be at least 1".to_string(),
            });
        }
        if self.shards == 0 {
            return Err(IngestError::InvalidOptions {
                reason: "shard count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
