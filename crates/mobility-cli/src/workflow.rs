//! Command bodies: read inputs, run the library stages, write outputs.
//!
//! Each function returns a report for the summary tables and leaves
//! printing to the binary. Output files appear only once every writer of
//! the command has succeeded.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use mobility_core::{
    Classifier, PipelineOptions, build_sequences, classify_sequences, ingest_stats, run_pipeline,
    with_thread_pool,
};
use mobility_enrich::{CachedDirectory, CachedThesisRegistry, EnrichOptions, Enricher};
use mobility_ingest::ingest_csv;
use mobility_model::RunStats;
use mobility_report::{
    RunSummary, SequenceFile, read_sequences_csv, write_cohort_csv, write_enrichment_csv,
    write_run_summary_json, write_sequences_csv,
};

use crate::staging::StagedOutputs;
use crate::types::{EnrichReport, OutputFile, RunOutputs, RunReport};

/// Rejection key for sequence CSV rows that cannot be rebuilt.
pub const UNPARSABLE_SEQUENCE: &str = "unparsable_sequence";

/// Ingest the event table and write one career sequence per author.
pub fn sequences(input: &Path, output: &Path, options: &PipelineOptions) -> Result<RunReport> {
    let span = info_span!("sequences", input = %input.display());
    let _guard = span.enter();

    let (sequences, stats) = with_thread_pool(options.threads, || {
        let outcome = ingest_csv(input, &options.ingest)?;
        let sequences = build_sequences(outcome.authors)?;
        let stats = ingest_stats(&outcome.report, sequences.len());
        Ok((sequences, stats))
    })
    .with_context(|| format!("build sequences from {}", input.display()))?;

    let mut staged = StagedOutputs::new();
    write_sequences_csv(&staged.stage(output)?, &sequences).context("write sequence CSV")?;
    staged.commit()?;
    Ok(RunReport {
        stats,
        cohorts: None,
        outputs: vec![OutputFile::new("Sequences", output)],
    })
}

/// Classify a previously written sequence CSV.
pub fn classify(
    input: &Path,
    cohort_output: Option<&Path>,
    options: &PipelineOptions,
) -> Result<RunReport> {
    let span = info_span!("classify_file", input = %input.display());
    let _guard = span.enter();

    let file = read_sequences_csv(input).context("read sequence CSV")?;
    let sequences = &file.sequences;
    let classifier = Classifier::new(options.classifier.clone());
    let outcome = with_thread_pool(options.threads, || {
        classify_sequences(sequences, &classifier, options.summary)
    })
    .context("classify sequences")?;

    let mut stats = sequence_file_stats(&file);
    outcome.record_into(&mut stats);

    let mut outputs = Vec::new();
    if let Some(path) = cohort_output {
        let mut staged = StagedOutputs::new();
        write_cohort_csv(&staged.stage(path)?, &outcome.summary).context("write cohort CSV")?;
        staged.commit()?;
        outputs.push(OutputFile::new("Cohorts", path));
    }
    Ok(RunReport {
        stats,
        cohorts: Some(outcome.summary),
        outputs,
    })
}

/// Run every stage and write all outputs.
pub fn run(input: &Path, outputs: &RunOutputs, options: &PipelineOptions) -> Result<RunReport> {
    let span = info_span!("run", input = %input.display());
    let _guard = span.enter();

    let run = run_pipeline(input, options)
        .with_context(|| format!("run pipeline on {}", input.display()))?;

    let mut staged = StagedOutputs::new();
    write_sequences_csv(&staged.stage(&outputs.sequences)?, &run.sequences)
        .context("write sequence CSV")?;
    write_cohort_csv(&staged.stage(&outputs.cohorts)?, &run.classification.summary)
        .context("write cohort CSV")?;
    let mut written = vec![
        OutputFile::new("Sequences", &outputs.sequences),
        OutputFile::new("Cohorts", &outputs.cohorts),
    ];
    if let Some(path) = &outputs.summary_json {
        write_run_summary_json(&staged.stage(path)?, &RunSummary::from_run(&run, options))
            .context("write run summary")?;
        written.push(OutputFile::new("Summary", path));
    }
    staged.commit()?;

    Ok(RunReport {
        stats: run.stats,
        cohorts: Some(run.classification.summary),
        outputs: written,
    })
}

/// Merge cached thesis evidence onto a sequence CSV.
pub fn enrich(
    input: &Path,
    cache: &Path,
    output: &Path,
    options: EnrichOptions,
) -> Result<EnrichReport> {
    let span = info_span!("enrich_file", input = %input.display(), cache = %cache.display());
    let _guard = span.enter();

    let file = read_sequences_csv(input).context("read sequence CSV")?;
    let enricher = Enricher::new(
        CachedDirectory::new(cache),
        CachedThesisRegistry::new(cache),
        options,
    );
    let outcome = enricher.enrich(&file.sequences);
    let mut staged = StagedOutputs::new();
    write_enrichment_csv(&staged.stage(output)?, &outcome.records)
        .context("write enrichment CSV")?;
    staged.commit()?;

    Ok(EnrichReport {
        stats: outcome.stats,
        skipped_rows: file.skipped.len() as u64,
        outputs: vec![OutputFile::new("Enrichment", output)],
    })
}

/// Row counters for a sequence CSV: every data row is either a sequence
/// or an unparsable-row rejection.
fn sequence_file_stats(file: &SequenceFile) -> RunStats {
    let mut stats = RunStats {
        total_rows: file.total_rows(),
        rejected_rows: file.skipped.len() as u64,
        authors: file.sequences.len() as u64,
        ..RunStats::default()
    };
    if !file.skipped.is_empty() {
        stats
            .rejections_by_reason
            .insert(UNPARSABLE_SEQUENCE.to_string(), file.skipped.len() as u64);
    }
    stats
}
