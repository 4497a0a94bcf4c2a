//! Tests for read statistics

use crate::app::models::RecordKind;
use crate::app::services::devio_parser::{ClassifyError, ParseFailure, ReadStats};
use crate::constants::MAX_RECORDED_ERRORS;

#[test]
fn test_read_stats_default() {
    let stats = ReadStats::default();
    assert_eq!(stats.lines_read, 0);
    assert_eq!(stats.error_count(), 0);
    assert!(stats.errors.is_empty());
}

#[test]
fn test_read_stats_record_kind() {
    let mut stats = ReadStats::new();
    stats.record_kind(RecordKind::IoStats);
    stats.record_kind(RecordKind::IoStats);
    stats.record_kind(RecordKind::Header);
    stats.record_kind(RecordKind::Restart);

    assert_eq!(stats.records_emitted, 2);
    assert_eq!(stats.headers_skipped, 1);
    assert_eq!(stats.restarts_skipped, 1);
}

#[test]
fn test_read_stats_record_error_splits_kinds() {
    let mut stats = ReadStats::new();
    stats.record_error(4, &ClassifyError::unrecognized("junk"));
    stats.record_error(
        9,
        &ClassifyError::ambiguous(
            "h;-1;ts;X",
            ParseFailure::StructureMismatch {
                record: RecordKind::Restart,
                reason: "fourth field lacks the RESTART marker",
            },
        ),
    );

    assert_eq!(stats.unrecognized_lines, 1);
    assert_eq!(stats.ambiguous_lines, 1);
    assert_eq!(stats.error_count(), 2);
    assert!(stats.errors[0].starts_with("Line 4: Unrecognised source line"));
    assert!(stats.errors[1].starts_with("Line 9: Ambiguous source line"));
}

#[test]
fn test_read_stats_merge() {
    let mut total = ReadStats {
        lines_read: 10,
        records_emitted: 8,
        headers_skipped: 1,
        restarts_skipped: 1,
        ..Default::default()
    };
    let mut other = ReadStats::new();
    other.lines_read = 3;
    other.records_emitted = 2;
    other.record_error(3, &ClassifyError::unrecognized("x"));

    total.merge(&other);

    assert_eq!(total.lines_read, 13);
    assert_eq!(total.records_emitted, 10);
    assert_eq!(total.unrecognized_lines, 1);
    assert_eq!(total.errors.len(), 1);
}

#[test]
fn test_read_stats_caps_recorded_errors() {
    let mut stats = ReadStats::new();
    for line_number in 1..=MAX_RECORDED_ERRORS + 5 {
        stats.record_error(line_number, &ClassifyError::unrecognized("junk"));
    }

    assert_eq!(stats.errors.len(), MAX_RECORDED_ERRORS);
    assert_eq!(stats.errors_omitted, 5);
    assert_eq!(stats.unrecognized_lines, MAX_RECORDED_ERRORS + 5);
    let last = stats.errors.last().unwrap();
    assert!(last.starts_with(&format!("Line {}:", MAX_RECORDED_ERRORS)));
}

#[test]
fn test_read_stats_merge_respects_error_cap() {
    let mut total = ReadStats::new();
    for line_number in 1..MAX_RECORDED_ERRORS {
        total.record_error(line_number, &ClassifyError::unrecognized("a"));
    }
    let mut other = ReadStats::new();
    for line_number in 1..=3 {
        other.record_error(line_number, &ClassifyError::unrecognized("b"));
    }
    other.errors_omitted = 2;

    total.merge(&other);

    assert_eq!(total.errors.len(), MAX_RECORDED_ERRORS);
    assert_eq!(total.errors_omitted, 4);
    assert_eq!(total.error_count(), MAX_RECORDED_ERRORS + 2);
}
