//! Career sequence building, trajectory classification and cohort summaries.
//!
//! The pipeline runs in five stages:
//!
//! 1. Normalize raw rows (`mobility-ingest`)
//! 2. Aggregate events per author (`mobility-ingest`)
//! 3. Build one ordered [`CareerSequence`] per author ([`sequence`])
//! 4. Classify origin-starting sequences ([`classify`])
//! 5. Summarize categories per start-year cohort ([`cohort`])
//!
//! Stages 3 to 5 are pure and run in parallel across authors.
//!
//! [`CareerSequence`]: mobility_model::CareerSequence

pub mod classify;
pub mod cohort;
pub mod error;
pub mod pipeline;
pub mod sequence;

pub use classify::{
    CLASSIFICATION_RULES, ClassificationRule, Classifier, ClassifierConfig, ClassifyError,
    TrajectoryFacts, classify,
};
pub use cohort::{CohortSummarizer, CohortSummary, SummaryOptions, summarize};
pub use error::PipelineError;
pub use pipeline::{
    ClassificationOutcome, ClassifiedSequence, PipelineOptions, PipelineRun, build_sequences,
    classify_sequences, ingest_stats, run_pipeline, run_rows, with_thread_pool,
};
pub use sequence::{build, build_all};
