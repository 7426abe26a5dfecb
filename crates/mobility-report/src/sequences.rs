//! Sequence CSV: one row per author.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};

use mobility_model::{CareerEntry, CareerSequence, CountryField, SEQUENCE_SEPARATOR};

use crate::error::{ReportError, Result};

/// Header of the sequence CSV.
pub const SEQUENCE_HEADER: [&str; 3] = [
    "author_id",
    "publication_years_sequence",
    "country_codes_sequence",
];

/// Write sequences, in the given order, to any writer.
pub fn write_sequences<W: Write>(writer: W, sequences: &[CareerSequence]) -> csv::Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(SEQUENCE_HEADER)?;
    for sequence in sequences {
        writer.write_record([
            sequence.author_id(),
            sequence.years_joined().as_str(),
            sequence.countries_joined().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the sequence CSV to `path`.
pub fn write_sequences_csv(path: &Path, sequences: &[CareerSequence]) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_sequences(file, sequences).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), sequences = sequences.len(), "wrote sequence CSV");
    Ok(())
}

/// A data row of a sequence CSV that could not be rebuilt into a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Sequences read back from a sequence CSV.
///
/// Rows that cannot be rebuilt are skipped and kept in `skipped`, so one
/// bad row never costs the rest of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceFile {
    pub sequences: Vec<CareerSequence>,
    pub skipped: Vec<SkippedRow>,
}

impl SequenceFile {
    /// Data rows read, skipped ones included.
    pub fn total_rows(&self) -> u64 {
        (self.sequences.len() + self.skipped.len()) as u64
    }
}

/// Read a sequence CSV written by [`write_sequences_csv`].
pub fn read_sequences_csv(path: &Path) -> Result<SequenceFile> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_sequences(file, path)
}

/// Read sequences from `reader`; `path` labels errors.
///
/// A missing column or an undecodable file is fatal. A row whose years
/// and countries do not line up is skipped and recorded.
pub fn read_sequences<R: Read>(reader: R, path: &Path) -> Result<SequenceFile> {
    let csv_error = |source: csv::Error| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().trim_matches('\u{feff}') == name)
            .ok_or_else(|| ReportError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let author = column(SEQUENCE_HEADER[0])?;
    let years = column(SEQUENCE_HEADER[1])?;
    let countries = column(SEQUENCE_HEADER[2])?;

    let mut file = SequenceFile::default();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |index: usize| record.get(index).unwrap_or_default();
        match parse_row(cell(author), cell(years), cell(countries)) {
            Ok(sequence) => file.sequences.push(sequence),
            Err(reason) => file.skipped.push(SkippedRow { line, reason }),
        }
    }
    if !file.skipped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = file.skipped.len(),
            first_line = file.skipped[0].line,
            "skipped sequence rows that could not be rebuilt"
        );
    }
    tracing::info!(
        path = %path.display(),
        sequences = file.sequences.len(),
        "read sequence CSV"
    );
    Ok(file)
}

fn parse_row(
    author_id: &str,
    years: &str,
    countries: &str,
) -> std::result::Result<CareerSequence, String> {
    if author_id.trim().is_empty() {
        return Err("empty author_id".to_string());
    }
    let years: Vec<&str> = years.split(SEQUENCE_SEPARATOR).collect();
    let countries: Vec<&str> = countries.split(SEQUENCE_SEPARATOR).collect();
    if years.len() != countries.len() {
        return Err(format!(
            "{} years but {} country entries",
            years.len(),
            countries.len()
        ));
    }
    let entries = years
        .into_iter()
        .zip(countries)
        .map(|(year, value)| {
            let year = year
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year {year:?}"))?;
            Ok(CareerEntry {
                year,
                countries: CountryField::parse_serialized(value),
            })
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;
    CareerSequence::new(author_id, entries).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        let err = parse_row("A1", "2001 -> 2002", "FR").unwrap_err();
        assert_eq!(err, "2 years but 1 country entries");
    }

    #[test]
    fn rejects_unsorted_years() {
        assert!(parse_row("A1", "2003 -> 2001", "FR -> US").is_err());
        assert!(parse_row("A1", "x", "FR").is_err());
        assert!(parse_row(" ", "2001", "FR").is_err());
    }

    #[test]
    fn bad_row_is_skipped_with_its_line() {
        let input = "author_id,publication_years_sequence,country_codes_sequence\n\
A1,2001,FR\n\
A2,2001 -> 2002,FR\n\
A3,2004,DE\n";
        let file = read_sequences(input.as_bytes(), Path::new("seq.csv")).unwrap();
        let ids: Vec<&str> = file.sequences.iter().map(|s| s.author_id()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);
        assert_eq!(
            file.skipped,
            vec![SkippedRow {
                line: 3,
                reason: "2 years but 1 country entries".to_string(),
            }]
        );
        assert_eq!(file.total_rows(), 3);
    }

    #[test]
    fn missing_column_is_reported() {
        let input = "author_id,publication_years_sequence\nA1,2001\n";
        assert!(matches!(
            read_sequences(input.as_bytes(), Path::new("seq.csv")),
            Err(ReportError::MissingColumn { ref column, .. }) if column == "country_codes_sequence"
        ));
    }
}
