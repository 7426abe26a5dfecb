//! Enrichment CSV: one row per enriched sequence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use mobility_enrich::EnrichedSequence;

use crate::error::{ReportError, Result};

/// Header of the enrichment CSV.
pub const ENRICHMENT_HEADER: [&str; 9] = [
    "author_id",
    "display_name",
    "started_in_origin",
    "ever_in_origin",
    "country_sequence",
    "has_potential_thesis",
    "thesis_confidence",
    "thesis_details",
    "best_match_score",
];

/// Write enrichment rows. Thesis details are embedded as compact JSON.
pub fn write_enrichment<W: Write>(writer: W, records: &[EnrichedSequence]) -> csv::Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(ENRICHMENT_HEADER)?;
    for record in records {
        let details = record
            .thesis
            .as_ref()
            .and_then(|thesis| serde_json::to_string(thesis).ok())
            .unwrap_or_default();
        writer.write_record([
            record.author_id.clone(),
            record.display_name.clone().unwrap_or_default(),
            record.started_in_origin.to_string(),
            record.ever_in_origin.to_string(),
            record.country_sequence.clone(),
            record.has_potential_thesis.to_string(),
            record.thesis_confidence.as_str().to_string(),
            details,
            record
                .best_match_score
                .map(|score| score.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the enrichment CSV to `path`.
pub fn write_enrichment_csv(path: &Path, records: &[EnrichedSequence]) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_enrichment(file, records).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote enrichment CSV");
    Ok(())
}
