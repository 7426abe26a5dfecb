//! Normalized publication events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EMPTY_MARKER, PLACEHOLDER_TOKENS};

/// Country information attached to one publication.
///
/// `Empty` is an explicit marker for a publication with no recorded country.
/// It keeps its position in the career sequence and is never confused with
/// a country that simply differs from the origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountryField {
    Empty,
    Codes {
        /// The field as serialized, structural braces removed.
        raw: String,
        /// `raw` split on `,`, in order. Joining with `,` gives back `raw`.
        tokens: Vec<String>,
    },
}

impl CountryField {
    /// Build a field from an already brace-stripped, non-blank value.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = raw.split(',').map(str::to_string).collect();
        Self::Codes { raw, tokens }
    }

    /// Parse a serialized value back into a field.
    ///
    /// Blank values and the empty marker become [`CountryField::Empty`].
    pub fn parse_serialized(value: &str) -> Self {
        if value.trim().is_empty() || value == EMPTY_MARKER {
            Self::Empty
        } else {
            Self::from_raw(value)
        }
    }

    /// The value as it appears in the country sequence.
    pub fn as_serialized(&self) -> &str {
        match self {
            Self::Empty => EMPTY_MARKER,
            Self::Codes { raw, .. } => raw,
        }
    }

    /// Raw code tokens, untrimmed. Empty for the empty marker.
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Empty => &[],
            Self::Codes { tokens, .. } => tokens,
        }
    }

    /// Iterate over tokens with surrounding whitespace removed.
    pub fn trimmed_tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens().iter().map(|token| token.trim())
    }

    /// True when any trimmed token equals `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.trimmed_tokens().any(|token| token == code)
    }

    /// True when the value, outer whitespace removed, is exactly `code`.
    ///
    /// Case is kept and inner tokens are not trimmed, so `"FR "` matches
    /// `FR` while `"fr"` and `"FR, "` do not.
    pub fn is_exactly(&self, code: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Codes { raw, .. } => raw.trim() == code,
        }
    }

    /// True when `code` is one of the comma-separated parts of the value
    /// after outer whitespace removal, with no per-token trimming.
    ///
    /// `"DE,US "` lists `US`; `"DE, US"` does not.
    pub fn lists_verbatim(&self, code: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Codes { raw, .. } => raw.trim().split(',').any(|token| token == code),
        }
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for the empty marker and for placeholder spellings such as `EMPTY`.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Codes { raw, .. } => {
                let value = raw.trim();
                PLACEHOLDER_TOKENS
                    .iter()
                    .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
            }
        }
    }
}

impl fmt::Display for CountryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_serialized())
    }
}

/// One author-paper-year-country observation after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationEvent {
    pub author_id: String,
    pub year: i32,
    pub countries: CountryField,
}

impl PublicationEvent {
    pub fn new(author_id: impl Into<String>, year: i32, countries: CountryField) -> Self {
        Self {
            author_id: author_id.into(),
            year,
            countries,
        }
    }
}
