//! Cohort CSV: one row per (start year, category).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use mobility_core::CohortSummary;

use crate::error::{ReportError, Result};

/// Header of the cohort CSV.
pub const COHORT_HEADER: [&str; 4] = ["start_year", "category", "count", "percentage"];

/// Write long-form cohort rows. Percentages carry four decimals.
pub fn write_cohorts<W: Write>(writer: W, summary: &CohortSummary) -> csv::Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(COHORT_HEADER)?;
    for row in summary.rows() {
        writer.write_record([
            row.start_year.to_string(),
            row.category.as_str().to_string(),
            row.count.to_string(),
            format!("{:.4}", row.percentage),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the cohort CSV to `path`.
pub fn write_cohort_csv(path: &Path, summary: &CohortSummary) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_cohorts(file, summary).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), cohorts = summary.len(), "wrote cohort CSV");
    Ok(())
}
