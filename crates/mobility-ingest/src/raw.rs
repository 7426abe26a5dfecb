/// Column holding the canonical author identifier.
pub const AUTHOR_ID_COLUMN: &str = "author_id";
/// Column holding the publication year.
pub const PUBLICATION_YEAR_COLUMN: &str = "publication_year";
/// Column holding the (possibly brace-wrapped, comma-joined) country codes.
pub const COUNTRY_CODES_COLUMN: &str = "country_codes";

/// One input row as supplied by the tabular reader.
///
/// `None` means the cell was absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub author_id: Option<String>,
    pub publication_year: Option<String>,
    pub country_codes: Option<String>,
}

impl RawRow {
    /// Build a row from cell text, mapping empty cells to `None`.
    pub fn from_cells(author_id: &str, publication_year: &str, country_codes: &str) -> Self {
        Self {
            author_id: non_empty(author_id),
            publication_year: non_empty(publication_year),
            country_codes: non_empty(country_codes),
        }
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
