//! End-to-end runs: ingest, build, classify, summarize.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, info_span};

use mobility_ingest::{
    AuthorEvents, IngestOptions, IngestOutcome, IngestReport, RawRow, ingest_csv, ingest_rows,
};
use mobility_model::{CareerCategory, CareerSequence, RunStats};

use crate::classify::{Classifier, ClassifierConfig};
use crate::cohort::{CohortSummarizer, CohortSummary, SummaryOptions};
use crate::error::{PipelineError, Result};
use crate::sequence::build_all;

/// Options for a whole run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub ingest: IngestOptions,
    pub classifier: ClassifierConfig,
    pub summary: SummaryOptions,
    /// Worker threads for a dedicated pool. `None` uses the global pool.
    pub threads: Option<usize>,
}

impl PipelineOptions {
    #[must_use]
    pub fn with_ingest(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: SummaryOptions) -> Self {
        self.summary = summary;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Category assigned to one origin-starting sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSequence {
    pub author_id: String,
    pub start_year: i32,
    pub category: CareerCategory,
    /// Identifier of the rule that fired.
    pub rule_id: &'static str,
}

/// Classification and cohort results for a set of sequences.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// Origin-starting sequences, in input order.
    pub classified: Vec<ClassifiedSequence>,
    pub summary: CohortSummary,
    /// Sequences skipped because they do not start in the origin.
    pub not_origin: u64,
}

impl ClassificationOutcome {
    /// Category counts over every classified sequence, floor ignored.
    pub fn distribution(&self) -> BTreeMap<CareerCategory, u64> {
        let mut counts: BTreeMap<CareerCategory, u64> = CareerCategory::ALL
            .into_iter()
            .map(|category| (category, 0))
            .collect();
        for sequence in &self.classified {
            *counts.entry(sequence.category).or_insert(0) += 1;
        }
        counts
    }

    /// Fill the classification counters of `stats`.
    pub fn record_into(&self, stats: &mut RunStats) {
        stats.origin_authors = self.classified.len() as u64;
        stats.below_floor_authors = self.summary.below_floor;
        stats.category_distribution = self.distribution();
    }
}

/// Everything a full run produces.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// One sequence per author, in first-seen order.
    pub sequences: Vec<CareerSequence>,
    pub classification: ClassificationOutcome,
    pub stats: RunStats,
}

/// Build the career sequences of every aggregated author.
pub fn build_sequences(authors: Vec<AuthorEvents>) -> Result<Vec<CareerSequence>> {
    let span = info_span!("build_sequences", authors = authors.len());
    let _guard = span.enter();
    let start = Instant::now();

    let sequences = build_all(authors)?;
    info!(
        sequences = sequences.len(),
        duration_ms = start.elapsed().as_millis(),
        "built career sequences"
    );
    Ok(sequences)
}

/// Classify origin-starting sequences and fold them into cohorts.
///
/// Sequences whose first country is not the origin are skipped and counted.
pub fn classify_sequences(
    sequences: &[CareerSequence],
    classifier: &Classifier,
    summary: SummaryOptions,
) -> Result<ClassificationOutcome> {
    let origin = classifier.config().origin.as_str();
    let span = info_span!("classify", origin, hub = %classifier.config().hub);
    let _guard = span.enter();
    let start = Instant::now();

    let classified = sequences
        .par_iter()
        .filter(|sequence| sequence.started_in(origin))
        .map(|sequence| {
            classifier.explain(sequence).map(|rule| ClassifiedSequence {
                author_id: sequence.author_id().to_string(),
                start_year: sequence.start_year(),
                category: rule.category,
                rule_id: rule.id,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut summarizer = CohortSummarizer::new(summary);
    for sequence in &classified {
        summarizer.record(sequence.start_year, sequence.category);
    }
    let summary = summarizer.finish();
    let not_origin = (sequences.len() - classified.len()) as u64;

    info!(
        classified = classified.len(),
        not_origin,
        cohorts = summary.len(),
        below_floor = summary.below_floor,
        duration_ms = start.elapsed().as_millis(),
        "classified sequences"
    );
    Ok(ClassificationOutcome {
        classified,
        summary,
        not_origin,
    })
}

/// Run every stage over the event table at `path`.
pub fn run_pipeline(path: &Path, options: &PipelineOptions) -> Result<PipelineRun> {
    with_thread_pool(options.threads, || {
        let outcome = ingest_csv(path, &options.ingest)?;
        complete(outcome, options)
    })
}

/// Run every stage over in-memory rows.
pub fn run_rows<I>(rows: I, options: &PipelineOptions) -> Result<PipelineRun>
where
    I: IntoIterator<Item = RawRow> + Send,
{
    with_thread_pool(options.threads, || {
        let outcome = ingest_rows(rows, &options.ingest)?;
        complete(outcome, options)
    })
}

fn complete(outcome: IngestOutcome, options: &PipelineOptions) -> Result<PipelineRun> {
    let IngestOutcome { authors, report } = outcome;
    let sequences = build_sequences(authors)?;
    let classifier = Classifier::new(options.classifier.clone());
    let classification = classify_sequences(&sequences, &classifier, options.summary)?;

    let mut stats = ingest_stats(&report, sequences.len());
    classification.record_into(&mut stats);
    debug!(?stats, "run complete");

    Ok(PipelineRun {
        sequences,
        classification,
        stats,
    })
}

/// Run counters known once sequences are built.
pub fn ingest_stats(report: &IngestReport, sequences: usize) -> RunStats {
    RunStats {
        total_rows: report.total_rows,
        rejected_rows: report.rejected_rows,
        rejections_by_reason: report
            .rejections_by_reason
            .iter()
            .map(|(reason, count)| (reason.as_str().to_string(), *count))
            .collect(),
        authors: sequences as u64,
        ..RunStats::default()
    }
}

/// Run `job` on a dedicated pool of `threads` workers, or on the global
/// pool when `threads` is `None`.
pub fn with_thread_pool<T, F>(threads: Option<usize>, job: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> Result<T> + Send,
{
    let Some(threads) = threads else {
        return job();
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| PipelineError::ThreadPool(err.to_string()))?;
    pool.install(job)
}
