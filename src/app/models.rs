//! Data models for sadf device I/O processing
//!
//! This module contains the record types produced by classifying lines of
//! `sadf -d -- -dp` output. Every line maps to exactly one [`DevIoRecord`]
//! variant; only [`IoStatsRecord`] carries statistics worth emitting as a row.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Record Variants
// =============================================================================

/// One classified line of sadf device I/O output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DevIoRecord {
    /// Column legend echoed by sadf (`# hostname;interval;...`)
    Header(HeaderRecord),
    /// System or counter restart boundary
    Restart(RestartRecord),
    /// One device sample for one interval
    IoStats(IoStatsRecord),
}

impl DevIoRecord {
    /// The shape this record was classified as
    pub fn kind(&self) -> RecordKind {
        match self {
            DevIoRecord::Header(_) => RecordKind::Header,
            DevIoRecord::Restart(_) => RecordKind::Restart,
            DevIoRecord::IoStats(_) => RecordKind::IoStats,
        }
    }

    /// Consume the record, keeping it only if it carries I/O statistics
    pub fn into_io_stats(self) -> Option<IoStatsRecord> {
        match self {
            DevIoRecord::IoStats(record) => Some(record),
            DevIoRecord::Header(_) | DevIoRecord::Restart(_) => None,
        }
    }
}

/// Structural shapes a sadf line can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Header,
    Restart,
    IoStats,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Header => "header",
            RecordKind::Restart => "restart",
            RecordKind::IoStats => "iostats",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Header Record
// =============================================================================

/// Marker for the column legend line; carries no data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord;

// =============================================================================
// Restart Record
// =============================================================================

/// Restart notification emitted when sysstat counters were reset
///
/// sadf prints these as `host;-1;timestamp;LINUX-RESTART\t(N CPU)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartRecord {
    pub hostname: String,
    pub timestamp: String,
}

// =============================================================================
// I/O Statistics Record
// =============================================================================

/// Per-device I/O statistics for one sampling interval
///
/// Field order matches the row layout handed to consumers. The `svctm`
/// column reported by sadf is not part of this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoStatsRecord {
    /// Host that produced the sample
    pub hostname: String,

    /// Sample timestamp exactly as printed by sadf (e.g. `2016-02-20 08:55:01 UTC`)
    pub timestamp: String,

    /// Device name (e.g. `dev8-0`, or `sda` with `-p`)
    #[serde(rename = "dev")]
    pub device: String,

    /// Transfers per second
    pub tps: f64,

    /// Sectors read per second
    pub read_freq: f64,

    /// Sectors written per second
    pub write_freq: f64,

    /// Average request size in sectors
    pub avg_req_size: f64,

    /// Average queue length
    pub avg_que_size: f64,

    /// Average time in milliseconds for requests to be served
    pub r#await: f64,

    /// Percentage of CPU time during which requests were issued
    pub cpu_util: f64,
}

impl IoStatsRecord {
    /// Numeric fields in declared order
    pub fn values(&self) -> [f64; 7] {
        [
            self.tps,
            self.read_freq,
            self.write_freq,
            self.avg_req_size,
            self.avg_que_size,
            self.r#await,
            self.cpu_util,
        ]
    }
}
