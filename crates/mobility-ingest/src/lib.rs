//! Publication event ingestion.
//!
//! This crate turns raw publication rows into per-author event lists while
//! keeping the working set bounded by the batch size plus the number of
//! distinct authors.
//!
//! # Features
//!
//! - **Normalization**: Parse one raw row into a [`PublicationEvent`] or a counted rejection
//! - **CSV Batches**: Read the input table in fixed-size batches with required column checks
//! - **Aggregation**: Group events per author in arrival order, optionally across hash shards
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mobility_ingest::{IngestOptions, ingest_csv};
//!
//! let options = IngestOptions::default().with_batch_size(500_000).with_shards(4);
//! let outcome = ingest_csv(Path::new("author_events.csv"), &options)?;
//! println!("{} authors, {} rows rejected", outcome.authors.len(), outcome.report.rejected_rows);
//! ```
//!
//! [`PublicationEvent`]: mobility_model::PublicationEvent

mod aggregate;
mod error;
mod ingest;
mod normalize;
mod options;
mod raw;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Raw Input ===
pub use raw::{AUTHOR_ID_COLUMN, COUNTRY_CODES_COLUMN, PUBLICATION_YEAR_COLUMN, RawRow};

// === Normalization ===
pub use normalize::{RejectReason, Rejected, normalize, normalize_countries};

// === CSV Reading ===
pub use reader::{CsvBatchReader, RowBatch};

// === Aggregation ===
pub use aggregate::{AuthorAggregator, AuthorEvents, ShardedAggregator, shard_for};

// === Driver ===
pub use ingest::{IngestOutcome, IngestReport, Ingestor, ingest_csv, ingest_rows};
pub use options::{DEFAULT_BATCH_SIZE, IngestOptions};
