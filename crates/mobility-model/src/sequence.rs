//! Per-author career sequences.

use serde::{Deserialize, Serialize};

use crate::SEQUENCE_SEPARATOR;
use crate::error::SequenceError;
use crate::event::CountryField;

/// One position in a career sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerEntry {
    pub year: i32,
    pub countries: CountryField,
}

/// A time-ordered career sequence for one author.
///
/// Entries are non-empty and ordered by year. Construction validates both,
/// and the sequence is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerSequence {
    author_id: String,
    entries: Vec<CareerEntry>,
}

impl CareerSequence {
    /// Wrap entries that are already ordered by year.
    pub fn new(
        author_id: impl Into<String>,
        entries: Vec<CareerEntry>,
    ) -> Result<Self, SequenceError> {
        let author_id = author_id.into();
        if entries.is_empty() {
            return Err(SequenceError::Empty { author_id });
        }
        if let Some(index) = entries
            .windows(2)
            .position(|pair| pair[0].year > pair[1].year)
        {
            return Err(SequenceError::Unsorted {
                author_id,
                index: index + 1,
            });
        }
        Ok(Self { author_id, entries })
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn entries(&self) -> &[CareerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Year of the earliest publication.
    pub fn start_year(&self) -> i32 {
        self.entries[0].year
    }

    /// Latest entry of the sequence.
    pub fn last(&self) -> &CareerEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// First country of the career.
    ///
    /// Entries holding the empty marker or a placeholder value are skipped.
    /// The first other entry decides, and its first token is returned trimmed
    /// even when that leaves an empty string: a blank first token still ends
    /// the scan.
    pub fn first_country(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| !entry.countries.is_placeholder())
            .map(|entry| {
                entry
                    .countries
                    .trimmed_tokens()
                    .next()
                    .unwrap_or_default()
            })
    }

    /// True when the first country equals `origin`.
    pub fn started_in(&self, origin: &str) -> bool {
        self.first_country() == Some(origin)
    }

    /// True when `origin` appears as a token in any entry.
    pub fn ever_in(&self, origin: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.countries.contains(origin))
    }

    /// Years joined with the sequence separator, e.g. `2001 -> 2004`.
    pub fn years_joined(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.year.to_string())
            .collect::<Vec<_>>()
            .join(SEQUENCE_SEPARATOR)
    }

    /// Country fields joined with the sequence separator, e.g. `FR -> FR,US`.
    pub fn countries_joined(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.countries.as_serialized())
            .collect::<Vec<_>>()
            .join(SEQUENCE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(year: i32, countries: &str) -> CareerEntry {
        CareerEntry {
            year,
            countries: CountryField::parse_serialized(countries),
        }
    }

    #[test]
    fn rejects_empty_entries() {
        let err = CareerSequence::new("A1", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            SequenceError::Empty {
                author_id: "A1".to_string()
            }
        );
    }

    #[test]
    fn rejects_unsorted_entries() {
        let err = CareerSequence::new("A1", vec![entry(2005, "FR"), entry(2001, "US")])
            .unwrap_err();
        assert!(matches!(err, SequenceError::Unsorted { index: 1, .. }));
    }

    #[test]
    fn first_country_skips_placeholders() {
        let seq = CareerSequence::new(
            "A1",
            vec![entry(2001, "<empty>"), entry(2002, "empty"), entry(2003, "FR,GB")],
        )
        .unwrap();
        assert_eq!(seq.first_country(), Some("FR"));
        assert!(seq.started_in("FR"));
    }

    #[test]
    fn blank_first_token_ends_scan() {
        let seq =
            CareerSequence::new("A1", vec![entry(2001, " ,FR"), entry(2002, "FR")]).unwrap();
        assert_eq!(seq.first_country(), Some(""));
        assert!(!seq.started_in("FR"));
    }

    #[test]
    fn all_placeholders_have_no_first_country() {
        let seq = CareerSequence::new("A1", vec![entry(2001, "<empty>")]).unwrap();
        assert_eq!(seq.first_country(), None);
    }

    #[test]
    fn joins_with_separator() {
        let seq = CareerSequence::new(
            "A1",
            vec![entry(2001, "FR"), entry(2001, "<empty>"), entry(2004, "FR,US")],
        )
        .unwrap();
        assert_eq!(seq.years_joined(), "2001 -> 2001 -> 2004");
        assert_eq!(seq.countries_joined(), "FR -> <empty> -> FR,US");
        assert!(seq.ever_in("US"));
        assert_eq!(seq.start_year(), 2001);
    }
}
