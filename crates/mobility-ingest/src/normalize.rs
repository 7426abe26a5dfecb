//! Record normalization: raw row to [`PublicationEvent`].

use std::fmt;

use serde::{Deserialize, Serialize};

use mobility_model::{CountryField, PublicationEvent};

use crate::raw::RawRow;

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Author identifier absent or blank.
    MissingAuthor,
    /// Publication year absent or blank.
    MissingYear,
    /// Publication year is not an integer.
    InvalidYear,
    /// The record could not be decoded by the reader.
    Unreadable,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingAuthor => "missing_author",
            RejectReason::MissingYear => "missing_year",
            RejectReason::InvalidYear => "invalid_year",
            RejectReason::Unreadable => "unreadable",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that did not produce an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected {
    pub reason: RejectReason,
}

impl From<RejectReason> for Rejected {
    fn from(reason: RejectReason) -> Self {
        Self { reason }
    }
}

/// Normalize one raw row.
///
/// The year is trimmed and parsed as an integer with no coercion: `2001.0`
/// is rejected like any other non-integer. A missing or blank country field
/// becomes [`CountryField::Empty`] so the event keeps its place in the
/// sequence.
pub fn normalize(row: RawRow) -> Result<PublicationEvent, Rejected> {
    let RawRow {
        author_id,
        publication_year,
        country_codes,
    } = row;

    let author_id = author_id
        .filter(|value| !value.trim().is_empty())
        .ok_or(RejectReason::MissingAuthor)?;

    let year_text = publication_year
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RejectReason::MissingYear)?;
    let year = year_text
        .parse::<i32>()
        .map_err(|_| RejectReason::InvalidYear)?;

    Ok(PublicationEvent {
        author_id,
        year,
        countries: normalize_countries(country_codes.as_deref()),
    })
}

/// Normalize a raw country field.
///
/// Structural braces are removed wherever they appear. Tokens keep their
/// order and spelling; unknown or malformed codes pass through verbatim.
pub fn normalize_countries(raw: Option<&str>) -> CountryField {
    let Some(raw) = raw else {
        return CountryField::Empty;
    };
    let stripped: String = raw.chars().filter(|ch| !matches!(ch, '{' | '}')).collect();
    if stripped.trim().is_empty() {
        CountryField::Empty
    } else {
        CountryField::from_raw(stripped)
    }
}
