use std::path::PathBuf;

use mobility_core::CohortSummary;
use mobility_enrich::EnrichStats;
use mobility_model::RunStats;

/// A file written by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub label: &'static str,
    pub path: PathBuf,
}

impl OutputFile {
    pub fn new(label: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            label,
            path: path.into(),
        }
    }
}

/// Result of `sequences`, `classify` and `run`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    /// Cohort summary, absent when classification did not run.
    pub cohorts: Option<CohortSummary>,
    pub outputs: Vec<OutputFile>,
}

/// Result of `enrich`.
#[derive(Debug, Clone)]
pub struct EnrichReport {
    pub stats: EnrichStats,
    /// Sequence CSV rows that could not be rebuilt.
    pub skipped_rows: u64,
    pub outputs: Vec<OutputFile>,
}

/// Where `run` writes its files.
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub sequences: PathBuf,
    pub cohorts: PathBuf,
    pub summary_json: Option<PathBuf>,
}
