//! Integration tests for the shared data model.

use mobility_model::{
    CareerCategory, CareerEntry, CareerSequence, CohortBucket, CountryField, EMPTY_MARKER,
    RunStats,
};

#[test]
fn test_country_field_json_shape() {
    let codes = CountryField::from_raw("FR,US");
    let json = serde_json::to_value(&codes).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "kind": "codes", "raw": "FR,US", "tokens": ["FR", "US"] })
    );
    let empty = serde_json::to_value(&CountryField::Empty).unwrap();
    assert_eq!(empty, serde_json::json!({ "kind": "empty" }));
}

#[test]
fn test_empty_marker_round_trips_through_text() {
    let field = CountryField::parse_serialized(EMPTY_MARKER);
    assert!(field.is_empty_marker());
    assert_eq!(field.to_string(), EMPTY_MARKER);
    assert!(CountryField::parse_serialized("  ").is_empty_marker());
    assert!(!CountryField::parse_serialized("EMPTY").is_empty_marker());
    assert!(CountryField::parse_serialized("EMPTY").is_placeholder());
}

#[test]
fn test_unrecognized_tokens_are_neither_origin_nor_hub() {
    let field = CountryField::from_raw("??,fr, ");
    assert!(!field.contains("FR"));
    assert!(!field.contains("US"));
    assert!(field.contains("fr"));
}

#[test]
fn test_sequence_serializes_entries_in_order() {
    let sequence = CareerSequence::new(
        "A1",
        vec![
            CareerEntry {
                year: 2001,
                countries: CountryField::from_raw("FR"),
            },
            CareerEntry {
                year: 2003,
                countries: CountryField::Empty,
            },
        ],
    )
    .unwrap();
    let json = serde_json::to_value(&sequence).unwrap();
    assert_eq!(json["author_id"], "A1");
    assert_eq!(json["entries"][1]["year"], 2003);
    assert_eq!(json["entries"][1]["countries"]["kind"], "empty");
}

#[test]
fn test_bucket_and_stats_serialize_category_keys() {
    let mut bucket = CohortBucket::new(2001);
    bucket.record(CareerCategory::ExpatriateElsewhere);
    let json = serde_json::to_value(&bucket).unwrap();
    assert_eq!(json["category_counts"]["expatriate_elsewhere"], 1);
    assert_eq!(json["category_counts"]["stayed_in_origin"], 0);

    let mut stats = RunStats {
        total_rows: 10,
        rejected_rows: 3,
        ..RunStats::default()
    };
    stats
        .category_distribution
        .insert(CareerCategory::ComplexOngoing, 4);
    assert_eq!(stats.accepted_rows(), 7);
    assert_eq!(stats.classified_authors(), 4);
}
