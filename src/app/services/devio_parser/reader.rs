//! Device I/O stream reader
//!
//! Applies [`classify_line`] to an ordered sequence of lines and keeps only
//! the I/O statistics records. Header and restart lines are dropped.
//!
//! Classification errors are yielded in place, never swallowed. Whether a
//! bad line stops the whole sequence or is skipped is decided by the caller,
//! usually through [`crate::config::ErrorPolicy`].

use super::classifier::classify_line;
use super::error::ClassifyError;
use super::stats::ReadStats;
use crate::app::models::{DevIoRecord, IoStatsRecord};

/// Stateful filter from raw lines to I/O statistics records
///
/// The only state is the running [`ReadStats`]; classification itself is a
/// pure function of each line.
#[derive(Debug, Default)]
pub struct DevIoReader {
    stats: ReadStats,
}

impl DevIoReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the next line of the source
    ///
    /// Returns `None` for lines that classify as header or restart records.
    pub fn read_line(&mut self, line: &str) -> Option<Result<IoStatsRecord, ClassifyError>> {
        self.stats.lines_read += 1;

        match classify_line(line) {
            Ok(record) => {
                self.stats.record_kind(record.kind());
                record.into_io_stats().map(Ok)
            }
            Err(error) => {
                self.stats.record_error(self.stats.lines_read, &error);
                Some(Err(error))
            }
        }
    }

    /// Decode and classify the next raw line of the source
    ///
    /// A line that is not valid UTF-8 is counted and returned as
    /// [`ClassifyError::UnrecognizedLine`] holding its lossy decoding.
    pub fn read_bytes(&mut self, line: &[u8]) -> Option<Result<IoStatsRecord, ClassifyError>> {
        match std::str::from_utf8(line) {
            Ok(text) => self.read_line(text),
            Err(_) => {
                self.stats.lines_read += 1;
                let error = ClassifyError::unrecognized(String::from_utf8_lossy(line));
                self.stats.record_error(self.stats.lines_read, &error);
                Some(Err(error))
            }
        }
    }

    /// Lazily read every line of `lines`, in order
    pub fn records<I>(self, lines: I) -> DevIoRecords<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        DevIoRecords {
            lines: lines.into_iter(),
            reader: self,
        }
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    pub fn into_stats(self) -> ReadStats {
        self.stats
    }
}

/// Iterator returned by [`DevIoReader::records`]
#[derive(Debug)]
pub struct DevIoRecords<I> {
    lines: I,
    reader: DevIoReader,
}

impl<I> DevIoRecords<I> {
    pub fn stats(&self) -> &ReadStats {
        self.reader.stats()
    }

    pub fn into_stats(self) -> ReadStats {
        self.reader.into_stats()
    }
}

impl<I> Iterator for DevIoRecords<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<IoStatsRecord, ClassifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(result) = self.reader.read_line(line.as_ref()) {
                return Some(result);
            }
        }
        None
    }
}

/// Classify every line without filtering, one result per input line
pub fn classify_lines<I>(lines: I) -> impl Iterator<Item = Result<DevIoRecord, ClassifyError>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines.into_iter().map(|line| classify_line(line.as_ref()))
}
