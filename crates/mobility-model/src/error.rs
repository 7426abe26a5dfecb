use thiserror::Error;

/// Violations of the career sequence invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A sequence needs at least one entry.
    #[error("career sequence for author {author_id} has no entries")]
    Empty { author_id: String },

    /// Entries must be ordered by year.
    #[error("career sequence for author {author_id} is not ordered by year at entry {index}")]
    Unsorted { author_id: String, index: usize },
}
