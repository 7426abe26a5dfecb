//! Batch-driven ingestion: normalize, count rejections, aggregate.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::aggregate::{AuthorEvents, ShardedAggregator};
use crate::error::Result;
use crate::normalize::{RejectReason, normalize};
use crate::options::IngestOptions;
use crate::raw::RawRow;
use crate::reader::{CsvBatchReader, RowBatch};

/// Row accounting for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Data rows seen, including rejected ones.
    pub total_rows: u64,
    /// Rows that produced no event.
    pub rejected_rows: u64,
    pub rejections_by_reason: BTreeMap<RejectReason, u64>,
    /// Batches consumed.
    pub batches: u64,
}

impl IngestReport {
    fn reject(&mut self, reason: RejectReason, count: u64) {
        if count == 0 {
            return;
        }
        self.rejected_rows += count;
        *self.rejections_by_reason.entry(reason).or_insert(0) += count;
    }

    pub fn accepted_rows(&self) -> u64 {
        self.total_rows - self.rejected_rows
    }
}

/// Grouped events plus the row accounting that produced them.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Per-author event lists in first-seen order.
    pub authors: Vec<AuthorEvents>,
    pub report: IngestReport,
}

/// Owned accumulation state for one run.
///
/// Feed it batches with [`Ingestor::push_batch`]; [`Ingestor::finish`]
/// hands the per-author lists over to the caller.
#[derive(Debug)]
pub struct Ingestor {
    aggregator: ShardedAggregator,
    report: IngestReport,
}

impl Ingestor {
    pub fn new(options: &IngestOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            aggregator: ShardedAggregator::new(options.shards),
            report: IngestReport::default(),
        })
    }

    /// Normalize a batch in parallel and append the accepted events.
    pub fn push_batch(&mut self, batch: RowBatch) {
        let RowBatch { rows, unreadable } = batch;
        let base = self.report.total_rows;
        self.report.total_rows += rows.len() as u64 + unreadable;
        self.report.batches += 1;
        self.report.reject(RejectReason::Unreadable, unreadable);

        let normalized: Vec<_> = rows.into_par_iter().map(normalize).collect();
        let mut accepted = Vec::with_capacity(normalized.len());
        for (offset, result) in normalized.into_iter().enumerate() {
            match result {
                Ok(event) => accepted.push((base + offset as u64, event)),
                Err(rejected) => self.report.reject(rejected.reason, 1),
            }
        }
        self.aggregator.push_batch(accepted);

        info!(
            batch = self.report.batches,
            total_rows = self.report.total_rows,
            rejected_rows = self.report.rejected_rows,
            authors = self.aggregator.author_count(),
            "processed batch"
        );
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn finish(self) -> IngestOutcome {
        IngestOutcome {
            authors: self.aggregator.finish(),
            report: self.report,
        }
    }
}

/// Ingest in-memory rows, chunked by `options.batch_size`.
pub fn ingest_rows<I>(rows: I, options: &IngestOptions) -> Result<IngestOutcome>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut ingestor = Ingestor::new(options)?;
    let mut rows = rows.into_iter();
    loop {
        let chunk: Vec<RawRow> = rows.by_ref().take(options.batch_size).collect();
        if chunk.is_empty() {
            break;
        }
        ingestor.push_batch(RowBatch {
            rows: chunk,
            unreadable: 0,
        });
    }
    Ok(ingestor.finish())
}

/// Ingest the event table at `path`.
///
/// The file is opened and its header validated before any aggregation
/// starts; an unreadable source fails the whole run.
pub fn ingest_csv(path: &Path, options: &IngestOptions) -> Result<IngestOutcome> {
    let span = info_span!("ingest", path = %path.display(), batch_size = options.batch_size, shards = options.shards);
    let _guard = span.enter();
    let start = Instant::now();

    let mut ingestor = Ingestor::new(options)?;
    let reader = CsvBatchReader::open(path, options.batch_size)?;
    for batch in reader {
        ingestor.push_batch(batch?);
    }
    let outcome = ingestor.finish();
    debug!(
        authors = outcome.authors.len(),
        total_rows = outcome.report.total_rows,
        rejected_rows = outcome.report.rejected_rows,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(outcome)
}
