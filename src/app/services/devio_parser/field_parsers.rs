//! Field parsing utilities for sadf database lines
//!
//! This module provides helper functions for splitting lines into fields and
//! converting metric fields, mapping every problem to a [`ParseFailure`].

use super::error::ParseFailure;
use crate::app::models::RecordKind;
use crate::constants::{FIELD_DELIMITER, fields};

/// Split a raw line into its semicolon-delimited fields
///
/// An empty line yields a single empty field, as `str::split` does.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).collect()
}

/// Parse one metric field as floating point
///
/// Surrounding ASCII whitespace is tolerated so a stray `\r` from a file
/// written on another platform does not invalidate the line.
pub fn parse_metric(value: &str, record: RecordKind) -> Result<f64, ParseFailure> {
    value
        .trim_ascii()
        .parse::<f64>()
        .map_err(|_| ParseFailure::mismatch(record, "metric field is not a number"))
}

/// Collect the seven metric fields of an I/O statistics line
///
/// Metrics are the eight fields after the device with field 9 left out, so
/// the line must have exactly twelve fields.
pub fn parse_io_metrics(parts: &[&str]) -> Result<[f64; fields::METRIC_COUNT], ParseFailure> {
    if parts.len() != fields::IOSTATS_FIELD_COUNT {
        return Err(ParseFailure::mismatch(
            RecordKind::IoStats,
            if parts.len() < fields::IOSTATS_FIELD_COUNT {
                "too few fields"
            } else {
                "too many fields"
            },
        ));
    }

    let metric_fields = parts[fields::FIRST_METRIC..fields::DROPPED_METRIC]
        .iter()
        .chain(&parts[fields::DROPPED_METRIC + 1..]);

    let mut values = [0.0; fields::METRIC_COUNT];
    for (slot, raw) in values.iter_mut().zip(metric_fields) {
        *slot = parse_metric(raw, RecordKind::IoStats)?;
    }

    Ok(values)
}

/// Get a required positional field
pub fn get_required_field<'a>(
    parts: &[&'a str],
    index: usize,
    record: RecordKind,
) -> Result<&'a str, ParseFailure> {
    parts
        .get(index)
        .copied()
        .ok_or_else(|| ParseFailure::mismatch(record, "missing required field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_empty_line() {
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_parse_metric_tolerates_trailing_carriage_return() {
        assert_eq!(parse_metric("0.01\r", RecordKind::IoStats), Ok(0.01));
    }

    #[test]
    fn test_parse_metric_rejects_text() {
        let err = parse_metric("%util", RecordKind::IoStats).unwrap_err();
        assert!(matches!(
            err,
            ParseFailure::StructureMismatch {
                record: RecordKind::IoStats,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_io_metrics_skips_field_9() {
        let parts = split_fields("h;600;ts;dev;1;2;3;4;5;99;6;7");
        let values = parse_io_metrics(&parts).unwrap();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_parse_io_metrics_field_count() {
        let short = split_fields("h;600;ts;dev;1;2;3;4;5;6;7");
        let long = split_fields("h;600;ts;dev;1;2;3;4;5;6;7;99;8");
        assert_eq!(
            parse_io_metrics(&short),
            Err(ParseFailure::mismatch(RecordKind::IoStats, "too few fields"))
        );
        assert_eq!(
            parse_io_metrics(&long),
            Err(ParseFailure::mismatch(RecordKind::IoStats, "too many fields"))
        );
    }

    #[test]
    fn test_parse_io_metrics_ignores_dropped_column_content() {
        let parts = split_fields("h;600;ts;dev;1;2;3;4;5;n/a;6;7");
        assert!(parse_io_metrics(&parts).is_ok());
    }

    #[test]
    fn test_get_required_field() {
        let parts = split_fields("a;b");
        assert_eq!(get_required_field(&parts, 1, RecordKind::Restart), Ok("b"));
        assert!(get_required_field(&parts, 2, RecordKind::Restart).is_err());
    }
}
