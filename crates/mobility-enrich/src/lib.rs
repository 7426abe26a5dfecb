//! Thesis evidence enrichment for career sequences.
//!
//! Enrichment sits outside the classification pipeline: it resolves each
//! author to a profile through an [`AuthorDirectory`], searches a
//! [`ThesisRegistry`] by display name, and merges the resulting evidence
//! onto the sequence. Classification never depends on it.
//!
//! # Features
//!
//! - **Payloads**: Parse directory records and registry search results
//! - **Cached Sources**: Read payloads fetched ahead of time from a cache directory
//! - **Evidence**: Confidence levels and institution/discipline candidate ranking
//!
//! # Example
//!
//! ```ignore
//! use mobility_enrich::{CachedDirectory, CachedThesisRegistry, EnrichOptions, Enricher};
//!
//! let enricher = Enricher::new(
//!     CachedDirectory::new("cache"),
//!     CachedThesisRegistry::new("cache"),
//!     EnrichOptions::default().with_origin_only(true),
//! );
//! let outcome = enricher.enrich(&sequences);
//! ```

mod enrich;
mod error;
mod evidence;
mod payload;
mod source;

// === Error Types ===
pub use error::{EnrichError, Result};

// === Payloads ===
pub use payload::{AUTHOR_ROLE, AuthorProfile, TOP_CONCEPTS, ThesisCandidate, parse_candidates};

// === Collaborators ===
pub use source::{
    AUTHORS_DIR, AuthorDirectory, CachedDirectory, CachedThesisRegistry, THESES_DIR,
    ThesisQuery, ThesisRegistry,
};

// === Evidence ===
pub use evidence::{
    DISCIPLINE_SCORE, INSTITUTION_SCORE, RankedCandidate, ThesisConfidence, ThesisEvidence,
    assess, rank_candidates,
};

// === Enrichment ===
pub use enrich::{EnrichOptions, EnrichOutcome, EnrichStats, EnrichedSequence, Enricher};
