//! Tests for the device I/O stream reader

use super::*;
use crate::app::models::RecordKind;
use crate::app::services::devio_parser::{ClassifyError, DevIoReader, classify_lines};

#[test]
fn test_reader_keeps_only_iostats_in_order() {
    let output = sample_diskio_output();
    let records: Vec<_> = DevIoReader::new()
        .records(output.lines())
        .collect::<Result<_, _>>()
        .unwrap();

    let devices: Vec<&str> = records.iter().map(|r| r.device.as_str()).collect();
    assert_eq!(devices, vec!["dev8-0", "dev8-16", "dev8-32", "dev8-0"]);
    assert_eq!(records[3].timestamp, "2016-02-20 09:05:01 UTC");
}

#[test]
fn test_reader_stats() {
    let output = sample_diskio_output();
    let mut records = DevIoReader::new().records(output.lines());
    for result in records.by_ref() {
        assert!(result.is_ok());
    }

    let stats = records.into_stats();
    assert_eq!(stats.lines_read, 6);
    assert_eq!(stats.records_emitted, 4);
    assert_eq!(stats.headers_skipped, 1);
    assert_eq!(stats.restarts_skipped, 1);
    assert_eq!(stats.error_count(), 0);
}

#[test]
fn test_reader_surfaces_errors_in_place() {
    let lines = vec![DEV8_0_LINE, "garbage", DEV8_16_LINE, "foo;-1;ts;NOTRESTART"];
    let results: Vec<_> = DevIoReader::new().records(lines).collect();

    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(ClassifyError::unrecognized("garbage")));
    assert!(results[2].is_ok());
    assert!(results[3].as_ref().unwrap_err().is_ambiguous());
}

#[test]
fn test_reader_error_line_numbers() {
    let lines = [HEADER_LINE, DEV8_0_LINE, "garbage"];
    let mut reader = DevIoReader::new();
    for line in lines {
        let _ = reader.read_line(line);
    }

    let stats = reader.stats();
    assert_eq!(stats.unrecognized_lines, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].starts_with("Line 3:"));
}

#[test]
fn test_reader_halting_caller_stops_at_first_error() {
    let lines = vec![DEV8_0_LINE, "garbage", DEV8_16_LINE];
    let result: Result<Vec<_>, _> = DevIoReader::new().records(lines).collect();
    assert_eq!(result, Err(ClassifyError::unrecognized("garbage")));
}

#[test]
fn test_reader_skipping_caller_continues_past_errors() {
    let lines = vec![DEV8_0_LINE, "garbage", DEV8_16_LINE];
    let records: Vec<_> = DevIoReader::new()
        .records(lines)
        .filter_map(Result::ok)
        .collect();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_reader_read_line_drops_markers() {
    let mut reader = DevIoReader::new();
    assert!(reader.read_line(RESTART_LINE).is_none());
    assert!(reader.read_line(HEADER_LINE).is_none());
    assert!(reader.read_line(DEV8_0_LINE).is_some());
}

#[test]
fn test_reader_accepts_owned_lines() {
    let lines: Vec<String> = sample_diskio_output().lines().map(String::from).collect();
    assert_eq!(DevIoReader::new().records(lines).count(), 4);
}

#[test]
fn test_classify_lines_one_result_per_line() {
    let output = sample_diskio_output();
    let kinds: Vec<RecordKind> = classify_lines(output.lines().chain(["bad"]))
        .map(|r| r.map(|record| record.kind()).unwrap_or(RecordKind::Header))
        .collect();

    assert_eq!(kinds.len(), 7);
    assert_eq!(kinds[0], RecordKind::Restart);
    assert_eq!(kinds[2], RecordKind::IoStats);
}

#[test]
fn test_reader_read_bytes_rejects_invalid_utf8() {
    let mut reader = DevIoReader::new();

    let record = reader.read_bytes(DEV8_0_LINE.as_bytes()).unwrap().unwrap();
    assert_eq!(record.device, "dev8-0");

    let err = reader.read_bytes(b"foohost;600;ts;dev\xff;1").unwrap().unwrap_err();
    assert!(!err.is_ambiguous());
    assert_eq!(err.line(), "foohost;600;ts;dev\u{FFFD};1");

    assert_eq!(reader.stats().lines_read, 2);
    assert_eq!(reader.stats().unrecognized_lines, 1);
    assert!(reader.stats().errors[0].starts_with("Line 2:"));
}
