//! Data model for researcher mobility analysis.
//!
//! The types here are shared by every stage of the pipeline: raw publication
//! events, per-author career sequences, the closed set of migration
//! categories, and the cohort buckets built from classified sequences.

pub mod category;
pub mod cohort;
pub mod error;
pub mod event;
pub mod sequence;
pub mod stats;

pub use category::CareerCategory;
pub use cohort::{CohortBucket, CohortShare};
pub use error::SequenceError;
pub use event::{CountryField, PublicationEvent};
pub use sequence::{CareerEntry, CareerSequence};
pub use stats::RunStats;

/// Separator used when serializing year and country sequences.
pub const SEQUENCE_SEPARATOR: &str = " -> ";

/// Serialized form of an event without any recorded country.
pub const EMPTY_MARKER: &str = "<empty>";

/// Country values treated as "no country recorded" (compared case-insensitively).
pub const PLACEHOLDER_TOKENS: [&str; 2] = ["empty", "<empty>"];

/// Default origin country.
pub const DEFAULT_ORIGIN: &str = "FR";

/// Default hub country.
pub const DEFAULT_HUB: &str = "US";

/// Cohorts must start strictly after this year to be summarized.
pub const DEFAULT_FLOOR_YEAR: i32 = 1990;
