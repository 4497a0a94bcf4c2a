//! Read statistics for sadf device I/O sources
//!
//! This module tracks how the lines of one source were classified so that
//! commands can report skipped marker lines and rejected lines.

use super::error::ClassifyError;
use crate::app::models::RecordKind;
use crate::constants::MAX_RECORDED_ERRORS;

/// Simple per-source read statistics
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReadStats {
    /// Total number of lines pulled from the source
    pub lines_read: usize,

    /// Number of I/O statistics records emitted
    pub records_emitted: usize,

    /// Number of column legend lines dropped
    pub headers_skipped: usize,

    /// Number of restart lines dropped
    pub restarts_skipped: usize,

    /// Lines that matched no known shape
    pub unrecognized_lines: usize,

    /// Lines that matched the restart signature but not its content
    pub ambiguous_lines: usize,

    /// First classification errors with their 1-based line numbers
    pub errors: Vec<String>,

    /// Errors counted but not kept in `errors`
    pub errors_omitted: usize,
}

impl ReadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            records_emitted: 0,
            headers_skipped: 0,
            restarts_skipped: 0,
            unrecognized_lines: 0,
            ambiguous_lines: 0,
            errors: Vec::new(),
            errors_omitted: 0,
        }
    }

    /// Count a successfully classified line
    pub fn record_kind(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::IoStats => self.records_emitted += 1,
            RecordKind::Header => self.headers_skipped += 1,
            RecordKind::Restart => self.restarts_skipped += 1,
        }
    }

    /// Count a classification error found at `line_number`
    pub fn record_error(&mut self, line_number: usize, error: &ClassifyError) {
        if error.is_ambiguous() {
            self.ambiguous_lines += 1;
        } else {
            self.unrecognized_lines += 1;
        }
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(format!("Line {}: {}", line_number, error));
        } else {
            self.errors_omitted += 1;
        }
    }

    /// Total number of rejected lines
    pub fn error_count(&self) -> usize {
        self.unrecognized_lines + self.ambiguous_lines
    }

    /// Fold another source's statistics into this one
    pub fn merge(&mut self, other: &ReadStats) {
        self.lines_read += other.lines_read;
        self.records_emitted += other.records_emitted;
        self.headers_skipped += other.headers_skipped;
        self.restarts_skipped += other.restarts_skipped;
        self.unrecognized_lines += other.unrecognized_lines;
        self.ambiguous_lines += other.ambiguous_lines;

        let room = MAX_RECORDED_ERRORS.saturating_sub(self.errors.len());
        let kept = other.errors.len().min(room);
        self.errors.extend(other.errors[..kept].iter().cloned());
        self.errors_omitted += other.errors_omitted + (other.errors.len() - kept);
    }
}

impl Default for ReadStats {
    fn default() -> Self {
        Self::new()
    }
}
