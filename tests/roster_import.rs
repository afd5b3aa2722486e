//! End-to-end coverage for the CSV roster import adapter feeding the
//! selection engine.

use std::collections::BTreeMap;
use std::io::Cursor;

use chrono::NaiveDate;
use roster_ai::workflows::staffing::import::{RosterCsvImporter, RosterImportError};
use roster_ai::workflows::staffing::roster::{
    ScoringConfig, SelectionEngine, SelectionError, SelectionRequest,
};

const ROSTER_CSV: &str = "\
Name,Expertise,Experience Years,Distance Km,Performance History,Preferred Schools,Preferred Subjects
Ana Torres,math:high; physics:medium,8,12,2026-02-01=4.5; 2025-01-15=4.0,Lincoln High,Math
Noah Feld,math:medium,22,3,,,
Ira Blum,,2,45,2026-02-23=5.0,,
";

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

#[test]
fn import_parses_every_row_into_records() {
    let records = RosterCsvImporter::from_reader(Cursor::new(ROSTER_CSV)).expect("roster parses");

    assert_eq!(records.len(), 3);

    let ana = &records[0];
    assert_eq!(ana.name.as_deref(), Some("Ana Torres"));
    let expertise = ana.expertise.as_ref().expect("expertise parsed");
    assert_eq!(expertise.get("math").map(String::as_str), Some("high"));
    assert_eq!(
        expertise.get("physics").map(String::as_str),
        Some("medium")
    );
    assert_eq!(ana.experience_years, Some(8.0));
    assert_eq!(ana.distance_km, Some(12.0));
    assert_eq!(ana.performance_history.as_ref().map(Vec::len), Some(2));
    let preferences = ana.preferences.as_ref().expect("preferences parsed");
    assert!(preferences
        .schools
        .as_ref()
        .expect("schools parsed")
        .contains("Lincoln High"));
    // Subjects are folded to lowercase on the way in so they line up with
    // expertise keys from the same export.
    assert!(preferences
        .subjects
        .as_ref()
        .expect("subjects parsed")
        .contains("math"));

    // Present-but-empty cells mean "none of them", not missing data.
    assert_eq!(
        records[1].performance_history.as_ref().map(Vec::len),
        Some(0)
    );
    assert_eq!(records[2].expertise, Some(BTreeMap::new()));
    assert_eq!(records[1].preferences, None);
}

#[test]
fn imported_roster_flows_into_a_selection() {
    let records = RosterCsvImporter::from_reader(Cursor::new(ROSTER_CSV)).expect("roster parses");

    let engine = SelectionEngine::new(ScoringConfig::default());
    let request = SelectionRequest::new("math", as_of()).with_target_school("Lincoln High");
    let outcome = engine
        .select(&records, &request)
        .expect("selection succeeds");

    assert_eq!(outcome.winner_index, 0);
    assert_eq!(outcome.winner.name.as_deref(), Some("Ana Torres"));
    assert_eq!(outcome.scores.len(), 3);
}

#[test]
fn exports_missing_a_column_fail_selection_not_import() {
    let csv = "\
Name,Expertise,Experience Years,Performance History
Ana Torres,math:high,8,2026-02-01=4.5
";

    let records = RosterCsvImporter::from_reader(Cursor::new(csv)).expect("roster parses");
    assert_eq!(records[0].distance_km, None);

    let engine = SelectionEngine::new(ScoringConfig::default());
    match engine.select(&records, &SelectionRequest::new("math", as_of())) {
        Err(SelectionError::Candidate { index: 0, .. }) => {}
        other => panic!("expected missing-field failure, got {other:?}"),
    }
}

#[test]
fn malformed_numbers_are_reported_with_their_line() {
    let csv = "\
Name,Expertise,Experience Years,Distance Km,Performance History
Ana Torres,math:high,8,12,
Noah Feld,math:medium,eight,3,
";

    match RosterCsvImporter::from_reader(Cursor::new(csv)) {
        Err(RosterImportError::Row { line, detail }) => {
            assert_eq!(line, 3);
            assert!(detail.contains("Experience Years"));
        }
        other => panic!("expected row error, got {other:?}"),
    }
}

#[test]
fn malformed_review_pairs_are_rejected() {
    let csv = "\
Name,Expertise,Experience Years,Distance Km,Performance History
Ana Torres,math:high,8,12,2026-02-01:4.5
";

    match RosterCsvImporter::from_reader(Cursor::new(csv)) {
        Err(RosterImportError::Row { line, detail }) => {
            assert_eq!(line, 2);
            assert!(detail.contains("date=score"));
        }
        other => panic!("expected row error, got {other:?}"),
    }
}
