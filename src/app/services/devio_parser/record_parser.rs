//! Strict parsers for the three sadf device I/O line shapes
//!
//! Each parser inspects one raw line on its own and either returns the
//! record or a [`ParseFailure`]. Parsers never consult each other.

use regex::Regex;
use std::sync::LazyLock;

use super::error::ParseFailure;
use super::field_parsers::{get_required_field, parse_io_metrics, split_fields};
use crate::app::models::{HeaderRecord, IoStatsRecord, RecordKind, RestartRecord};
use crate::constants::{
    COMMENT_PREFIX, HEADER_PREFIX, RESTART_FIELD_COUNT, RESTART_MARKER_PATTERN, fields,
};

static RESTART_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RESTART_MARKER_PATTERN).expect("restart marker pattern is valid")
});

impl IoStatsRecord {
    /// Parse a device statistics line
    ///
    /// ```text
    /// foohost;600;2016-02-20 08:55:01 UTC;dev8-0;0.35;5.88;5.17;31.73;0.00;0.36;0.34;0.01
    /// ```
    ///
    /// Hostname, timestamp and device are kept verbatim. Shape errors and
    /// non-numeric metrics both fail with `StructureMismatch`.
    pub fn parse(line: &str) -> Result<Self, ParseFailure> {
        if line.starts_with(COMMENT_PREFIX) {
            return Err(ParseFailure::mismatch(
                RecordKind::IoStats,
                "comment lines carry no data",
            ));
        }

        let parts = split_fields(line);
        let [tps, read_freq, write_freq, avg_req_size, avg_que_size, r#await, cpu_util] =
            parse_io_metrics(&parts)?;

        Ok(Self {
            hostname: parts[fields::HOSTNAME].to_string(),
            timestamp: parts[fields::TIMESTAMP].to_string(),
            device: parts[fields::DEVICE].to_string(),
            tps,
            read_freq,
            write_freq,
            avg_req_size,
            avg_que_size,
            r#await,
            cpu_util,
        })
    }
}

impl RestartRecord {
    /// Parse a restart notification line
    ///
    /// ```text
    /// foohost;-1;2016-02-20 08:37:26 UTC;LINUX-RESTART	(4 CPU)
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseFailure> {
        let parts = split_fields(line);
        if parts.len() != RESTART_FIELD_COUNT {
            return Err(ParseFailure::mismatch(
                RecordKind::Restart,
                "restart lines have exactly four fields",
            ));
        }

        let marker = get_required_field(&parts, fields::RESTART_MARKER, RecordKind::Restart)?;
        if !RESTART_MARKER.is_match(marker) {
            return Err(ParseFailure::mismatch(
                RecordKind::Restart,
                "fourth field lacks the RESTART marker",
            ));
        }

        Ok(Self {
            hostname: get_required_field(&parts, fields::HOSTNAME, RecordKind::Restart)?
                .to_string(),
            timestamp: get_required_field(&parts, fields::TIMESTAMP, RecordKind::Restart)?
                .to_string(),
        })
    }
}

impl HeaderRecord {
    /// Recognise the column legend by its `# host` prefix
    pub fn parse(line: &str) -> Result<Self, ParseFailure> {
        if Self::matches(line) {
            Ok(HeaderRecord)
        } else {
            Err(ParseFailure::mismatch(
                RecordKind::Header,
                "line does not start with '# host'",
            ))
        }
    }

    /// Prefix test used by the classifier before any field splitting
    pub fn matches(line: &str) -> bool {
        line.starts_with(HEADER_PREFIX)
    }
}
