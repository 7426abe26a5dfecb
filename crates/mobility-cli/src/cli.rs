//! CLI argument definitions for the mobility pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mobility_model::{DEFAULT_FLOOR_YEAR, DEFAULT_HUB, DEFAULT_ORIGIN};

#[derive(Parser)]
#[command(
    name = "mobility",
    version,
    about = "Researcher mobility - Classify career trajectories from publication events",
    long_about = "Build per-author career sequences from publication events and classify\n\
                  the migration trajectory of researchers who start in an origin country.\n\
                  Writes sequence, cohort and enrichment CSVs plus a JSON run summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build one career sequence per author from a publication event table.
    Sequences(SequencesArgs),

    /// Classify a sequence CSV and summarize categories per start-year cohort.
    Classify(ClassifyArgs),

    /// Run ingestion, sequencing, classification and cohort summaries.
    Run(RunArgs),

    /// Merge cached thesis evidence onto a sequence CSV.
    Enrich(EnrichArgs),

    /// List the trajectory categories and the rules that assign them.
    Categories,
}

#[derive(Parser)]
pub struct SequencesArgs {
    /// Publication event CSV (author_id, publication_year, country_codes).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sequence CSV to write.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub ingest: IngestArgs,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Sequence CSV produced by `mobility sequences`.
    #[arg(value_name = "SEQUENCES")]
    pub input: PathBuf,

    /// Cohort CSV to write.
    #[arg(long = "cohort-output", value_name = "PATH")]
    pub cohort_output: Option<PathBuf>,

    #[command(flatten)]
    pub classify: ClassifyOptionsArgs,

    /// Worker threads (default: one per core).
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Publication event CSV (author_id, publication_year, country_codes).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sequence CSV to write.
    #[arg(long = "sequences-output", value_name = "PATH")]
    pub sequences_output: PathBuf,

    /// Cohort CSV to write.
    #[arg(long = "cohort-output", value_name = "PATH")]
    pub cohort_output: PathBuf,

    /// Also write a JSON run summary.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    #[command(flatten)]
    pub ingest: IngestArgs,

    #[command(flatten)]
    pub classify: ClassifyOptionsArgs,
}

#[derive(Parser)]
pub struct EnrichArgs {
    /// Sequence CSV produced by `mobility sequences`.
    #[arg(value_name = "SEQUENCES")]
    pub input: PathBuf,

    /// Directory holding `authors/<id>.json` and `theses/<id>.json` payloads.
    #[arg(long = "cache", value_name = "DIR")]
    pub cache: PathBuf,

    /// Enrichment CSV to write.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Only enrich sequences that start in the origin country.
    #[arg(long = "origin-only")]
    pub origin_only: bool,

    /// Origin country code.
    #[arg(long = "origin", value_name = "CODE", default_value = DEFAULT_ORIGIN)]
    pub origin: String,
}

/// Batching and parallelism flags.
#[derive(Args)]
pub struct IngestArgs {
    /// Rows read per batch.
    #[arg(long = "batch-size", value_name = "ROWS")]
    pub batch_size: Option<usize>,

    /// Independent aggregation shards.
    #[arg(long = "shards", value_name = "N")]
    pub shards: Option<usize>,

    /// Worker threads (default: one per core).
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,
}

/// Classification and summary flags.
#[derive(Args)]
pub struct ClassifyOptionsArgs {
    /// Origin country code.
    #[arg(long = "origin", value_name = "CODE", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Hub country code.
    #[arg(long = "hub", value_name = "CODE", default_value = DEFAULT_HUB)]
    pub hub: String,

    /// Cohorts include careers starting strictly after this year.
    #[arg(long = "floor-year", value_name = "YEAR", default_value_t = DEFAULT_FLOOR_YEAR)]
    pub floor_year: i32,

    /// Number of most recent cohorts shown in the summary.
    #[arg(long = "tail", value_name = "N", default_value_t = 5)]
    pub tail: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
