/*!
 * Tests for marker table parsing and timestamp arithmetic
 */

use podpost::errors::MarkerError;
use podpost::markers::{parse_timestr_ms, MarkerTable};

use crate::common;

/// Test three-component timestamps
#[test]
fn test_parse_timestr_withHours_shouldConvert() {
    assert_eq!(parse_timestr_ms("1:02:03").unwrap(), 3_723_000);
}

/// Test two-component timestamps
#[test]
fn test_parse_timestr_withMinutes_shouldConvert() {
    assert_eq!(parse_timestr_ms("02:03").unwrap(), 123_000);
}

/// Test fractional seconds are truncated, never rounded
#[test]
fn test_parse_timestr_withFraction_shouldTruncate() {
    assert_eq!(parse_timestr_ms("02:03.500").unwrap(), 123_000);
    assert_eq!(parse_timestr_ms("02:03.999").unwrap(), 123_000);
}

/// Test the zero timestamp
#[test]
fn test_parse_timestr_withZero_shouldBeZero() {
    assert_eq!(parse_timestr_ms("0:00").unwrap(), 0);
}

/// Test unparseable strings are rejected
#[test]
fn test_parse_timestr_withGarbage_shouldFail() {
    assert!(matches!(
        parse_timestr_ms("abc"),
        Err(MarkerError::InvalidTimestamp(_))
    ));
    assert!(matches!(
        parse_timestr_ms("1:2:3:4"),
        Err(MarkerError::InvalidTimestamp(_))
    ));
    assert!(matches!(
        parse_timestr_ms("42"),
        Err(MarkerError::InvalidTimestamp(_))
    ));
    assert!(matches!(
        parse_timestr_ms(""),
        Err(MarkerError::InvalidTimestamp(_))
    ));
}

/// Test header columns are resolved by name, extra columns tolerated
#[test]
fn test_parse_table_withReorderedColumns_shouldResolveByName() {
    let content = "Name\tStart\tDuration\tType\n\
        Intro\t0:00\t0:10\tCue\n\
        Topic\t0:10\t0:05\tCue\n";
    let table = MarkerTable::parse_str(content).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].name, "Intro");
    assert_eq!(table.rows[0].start, "0:00");
    assert_eq!(table.rows[0].duration, "0:10");
    assert_eq!(table.rows[1].name, "Topic");
}

/// Test rows keep file order
#[test]
fn test_parse_table_withOutOfOrderTimes_shouldKeepFileOrder() {
    let content = "Start\tDuration\tName\n\
        0:30\t0:05\tLater marker placed first\n\
        0:00\t0:10\tEarlier marker placed second\n";
    let table = MarkerTable::parse_str(content).unwrap();
    assert_eq!(table.rows[0].name, "Later marker placed first");
    assert_eq!(table.rows[1].name, "Earlier marker placed second");
}

/// Test a missing required column is reported by name
#[test]
fn test_parse_table_withMissingColumn_shouldFail() {
    let content = "Start\tName\nIntro\t0:00\n";
    let result = MarkerTable::parse_str(content);
    match result {
        Err(MarkerError::MissingColumn(column)) => assert_eq!(column, "Duration"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

/// Test truncated rows are rejected
#[test]
fn test_parse_table_withTruncatedRow_shouldFail() {
    let content = "Start\tDuration\tName\n0:00\t0:10\n";
    assert!(matches!(
        MarkerTable::parse_str(content),
        Err(MarkerError::TruncatedRow { row: 1, .. })
    ));
}

/// Test reading a marker file from disk, including multi-byte names
#[test]
fn test_read_from_path_withUnicodeNames_shouldParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path =
        common::create_test_markers(&temp_dir.path().to_path_buf(), "15.csv").unwrap();

    let table = MarkerTable::read_from_path(&path).unwrap();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[2].name, "おわりに");
    assert_eq!(table.names(), vec!["Intro", "Topic", "おわりに"]);
}

/// Test a missing marker file is reported as such
#[test]
fn test_read_from_path_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("nope.csv");
    assert!(matches!(
        MarkerTable::read_from_path(&missing),
        Err(MarkerError::FileNotFound(_))
    ));
}

/// Test a file with only a header is an empty table
#[test]
fn test_read_from_path_withHeaderOnly_shouldBeEmptyTable() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "empty.csv",
        "Start\tDuration\tName\n",
    )
    .unwrap();
    assert!(matches!(
        MarkerTable::read_from_path(&path),
        Err(MarkerError::EmptyTable(_))
    ));
}
