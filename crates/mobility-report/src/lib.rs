//! Output files for the mobility pipeline.
//!
//! - Sequence CSV (`author_id,publication_years_sequence,country_codes_sequence`)
//!   and its reader, so classification can run on a previously built file
//! - Cohort CSV with one row per start year and category
//! - Enrichment CSV
//! - Pretty-printed JSON run summary

mod cohort;
mod enrichment;
mod error;
mod sequences;
mod summary;

pub use cohort::{COHORT_HEADER, write_cohort_csv, write_cohorts};
pub use enrichment::{ENRICHMENT_HEADER, write_enrichment, write_enrichment_csv};
pub use error::{ReportError, Result};
pub use sequences::{
    SEQUENCE_HEADER, SequenceFile, SkippedRow, read_sequences, read_sequences_csv, write_sequences,
    write_sequences_csv,
};
pub use summary::{RunSummary, write_run_summary_json};
