//! JSON run summary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use mobility_core::{PipelineOptions, PipelineRun};
use mobility_model::{CareerCategory, RunStats};

use crate::error::{ReportError, Result};

/// Machine-readable summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub origin: String,
    pub hub: String,
    pub floor_year: i32,
    pub stats: RunStats,
    /// Category percentages per cohort start year.
    pub cohorts: BTreeMap<i32, BTreeMap<CareerCategory, f64>>,
}

impl RunSummary {
    pub fn from_run(run: &PipelineRun, options: &PipelineOptions) -> Self {
        Self {
            origin: options.classifier.origin.clone(),
            hub: options.classifier.hub.clone(),
            floor_year: options.summary.floor_year,
            stats: run.stats.clone(),
            cohorts: run.classification.summary.percentages(),
        }
    }
}

/// Write `summary` as pretty-printed JSON to `path`.
pub fn write_run_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json_error = |source: serde_json::Error| ReportError::Json {
        path: path.to_path_buf(),
        source,
    };
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary).map_err(json_error)?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(())
}
