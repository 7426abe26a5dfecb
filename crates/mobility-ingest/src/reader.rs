//! Batched CSV reading of the raw event table.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};
use crate::raw::{
    AUTHOR_ID_COLUMN, COUNTRY_CODES_COLUMN, PUBLICATION_YEAR_COLUMN, RawRow, non_empty,
};

/// One batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct RowBatch {
    pub rows: Vec<RawRow>,
    /// Records in this batch the reader could not decode.
    pub unreadable: u64,
}

impl RowBatch {
    /// Data rows covered by this batch, decoded or not.
    pub fn len(&self) -> u64 {
        self.rows.len() as u64 + self.unreadable
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    author_id: usize,
    publication_year: usize,
    country_codes: usize,
}

/// Streaming reader yielding at most `batch_size` rows at a time.
///
/// Only the three required columns are kept; everything else in the
/// record is ignored.
pub struct CsvBatchReader {
    path: PathBuf,
    reader: csv::Reader<File>,
    columns: ColumnIndices,
    batch_size: usize,
    record: StringRecord,
    exhausted: bool,
}

impl CsvBatchReader {
    /// Open `path` and resolve the required columns from its header row.
    pub fn open(path: impl AsRef<Path>, batch_size: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| IngestError::InputUnavailable {
            path: path.clone(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|source| IngestError::Csv {
                path: path.clone(),
                source,
            })?
            .clone();
        let columns = resolve_columns(&headers, &path)?;
        tracing::debug!(
            path = %path.display(),
            batch_size,
            "opened event table"
        );
        Ok(Self {
            path,
            reader,
            columns,
            batch_size: batch_size.max(1),
            record: StringRecord::new(),
            exhausted: false,
        })
    }

    /// Read the next batch, or `None` once the input is consumed.
    ///
    /// Records that fail to decode are counted in [`RowBatch::unreadable`];
    /// I/O failures abort the read.
    pub fn next_batch(&mut self) -> Result<Option<RowBatch>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut batch = RowBatch {
            rows: Vec::with_capacity(self.batch_size.min(65_536)),
            unreadable: 0,
        };
        while batch.len() < self.batch_size as u64 {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => batch.rows.push(self.row_from_record()),
                Ok(false) => {
                    self.exhausted = true;
                    break;
                }
                Err(source) if source.is_io_error() => {
                    return Err(IngestError::Csv {
                        path: self.path.clone(),
                        source,
                    });
                }
                Err(_) => batch.unreadable += 1,
            }
        }
        if batch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(batch))
        }
    }

    fn row_from_record(&self) -> RawRow {
        let cell = |index: usize| self.record.get(index).and_then(non_empty);
        RawRow {
            author_id: cell(self.columns.author_id),
            publication_year: cell(self.columns.publication_year),
            country_codes: cell(self.columns.country_codes),
        }
    }
}

impl Iterator for CsvBatchReader {
    type Item = Result<RowBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}

fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}').trim()
}

fn resolve_columns(headers: &StringRecord, path: &Path) -> Result<ColumnIndices> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| normalize_header(header) == name)
    };
    let author_id = find(AUTHOR_ID_COLUMN);
    let publication_year = find(PUBLICATION_YEAR_COLUMN);
    let country_codes = find(COUNTRY_CODES_COLUMN);
    match (author_id, publication_year, country_codes) {
        (Some(author_id), Some(publication_year), Some(country_codes)) => Ok(ColumnIndices {
            author_id,
            publication_year,
            country_codes,
        }),
        _ => {
            let columns = [
                (AUTHOR_ID_COLUMN, author_id),
                (PUBLICATION_YEAR_COLUMN, publication_year),
                (COUNTRY_CODES_COLUMN, country_codes),
            ]
            .into_iter()
            .filter(|(_, index)| index.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
            Err(IngestError::MissingColumns {
                path: path.to_path_buf(),
                columns,
            })
        }
    }
}
