//! Sequence building: one author's events to a [`CareerSequence`].

use rayon::prelude::*;

use mobility_ingest::AuthorEvents;
use mobility_model::{CareerEntry, CareerSequence, PublicationEvent, SequenceError};

/// Build the career sequence for one author.
///
/// Events are sorted once, stably, by year: equal-year events keep their
/// arrival order. The event list is consumed.
pub fn build(
    author_id: impl Into<String>,
    mut events: Vec<PublicationEvent>,
) -> Result<CareerSequence, SequenceError> {
    events.sort_by_key(|event| event.year);
    let entries = events
        .into_iter()
        .map(|event| CareerEntry {
            year: event.year,
            countries: event.countries,
        })
        .collect();
    CareerSequence::new(author_id, entries)
}

/// Build sequences for every aggregated author, preserving author order.
pub fn build_all(authors: Vec<AuthorEvents>) -> Result<Vec<CareerSequence>, SequenceError> {
    authors
        .into_par_iter()
        .map(|author| build(author.author_id, author.events))
        .collect()
}
