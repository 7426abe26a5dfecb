//! Integration tests for CSV ingestion and normalization.

use std::io::Write;

use proptest::prelude::*;
use tempfile::NamedTempFile;

use mobility_ingest::{
    IngestError, IngestOptions, RawRow, RejectReason, ingest_csv, normalize, normalize_countries,
};
use mobility_model::CountryField;

fn temp_csv(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_ingest_groups_across_batches() {
    let file = temp_csv(
        b"\xef\xbb\xbfauthor_id,publication_year,country_codes,title\n\
A1,2005,{US},x\n\
A2,2001,{FR},y\n\
A1,2001,{FR},z\n\
,2001,{FR},w\n\
A2,2001.0,{FR},v\n\
A1,2003,\"{FR,DE}\",u\n",
    );
    let options = IngestOptions::default().with_batch_size(2);
    let outcome = ingest_csv(file.path(), &options).unwrap();

    assert_eq!(outcome.report.total_rows, 6);
    assert_eq!(outcome.report.rejected_rows, 2);
    assert_eq!(outcome.report.batches, 3);
    assert_eq!(
        outcome.report.rejections_by_reason[&RejectReason::MissingAuthor],
        1
    );
    assert_eq!(
        outcome.report.rejections_by_reason[&RejectReason::InvalidYear],
        1
    );

    let a1 = &outcome.authors[0];
    assert_eq!(a1.author_id, "A1");
    let years: Vec<i32> = a1.events.iter().map(|event| event.year).collect();
    assert_eq!(years, vec![2005, 2001, 2003]);
    assert_eq!(a1.events[2].countries.tokens(), ["FR", "DE"]);
    assert_eq!(outcome.authors[1].author_id, "A2");
}

#[test]
fn test_undecodable_records_are_counted() {
    let file = temp_csv(b"author_id,publication_year,country_codes\nA1,2001,FR\nA\xff,2002,US\nA1,2003,US\n");
    let outcome = ingest_csv(file.path(), &IngestOptions::default()).unwrap();
    assert_eq!(outcome.report.total_rows, 3);
    assert_eq!(
        outcome.report.rejections_by_reason[&RejectReason::Unreadable],
        1
    );
    assert_eq!(outcome.authors[0].events.len(), 2);
}

#[test]
fn test_missing_columns_are_listed() {
    let file = temp_csv(b"author_id,year\nA1,2001\n");
    match ingest_csv(file.path(), &IngestOptions::default()) {
        Err(IngestError::MissingColumns { columns, .. }) => {
            assert_eq!(columns, vec!["publication_year", "country_codes"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_header_only_input_is_empty() {
    let file = temp_csv(b"author_id,publication_year,country_codes\n");
    let outcome = ingest_csv(file.path(), &IngestOptions::default()).unwrap();
    assert!(outcome.authors.is_empty());
    assert_eq!(outcome.report.total_rows, 0);
    assert_eq!(outcome.report.batches, 0);
}

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z?]{0,3}"
}

proptest! {
    #[test]
    fn test_country_tokens_keep_order_and_count(tokens in prop::collection::vec(token(), 1..6)) {
        let joined = tokens.join(",");
        let field = normalize_countries(Some(&format!("{{{joined}}}")));
        if joined.trim().is_empty() {
            prop_assert_eq!(field, CountryField::Empty);
        } else {
            prop_assert_eq!(field.tokens(), tokens.as_slice());
            prop_assert_eq!(field.as_serialized(), joined.as_str());
        }
    }

    #[test]
    fn test_integer_years_are_accepted(year in -3000i32..3000, pad in " {0,2}") {
        let row = RawRow::from_cells("A1", &format!("{pad}{year}{pad}"), "FR");
        let event = normalize(row).unwrap();
        prop_assert_eq!(event.year, year);
    }
}
