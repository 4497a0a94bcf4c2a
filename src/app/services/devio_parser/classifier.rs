//! Line classification for sadf device I/O output
//!
//! Data lines dominate sadf output, so every line is first parsed as an
//! I/O statistics record. Only when that fails is the line matched against
//! the rare marker shapes:
//!
//! 1. `# host...` is the column legend ([`HeaderRecord`])
//! 2. `<host>;-1;...` has the restart position signature and must then pass
//!    [`RestartRecord::parse`], otherwise it is [`ClassifyError::AmbiguousLine`]
//! 3. anything else is [`ClassifyError::UnrecognizedLine`]

use regex::Regex;
use std::sync::LazyLock;

use super::error::ClassifyError;
use crate::app::models::{DevIoRecord, HeaderRecord, IoStatsRecord, RestartRecord};
use crate::constants::RESTART_SIGNATURE_PATTERN;

static RESTART_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RESTART_SIGNATURE_PATTERN).expect("restart signature pattern is valid")
});

/// Whether a line has the restart position signature (host, then `-1`)
pub fn has_restart_signature(line: &str) -> bool {
    RESTART_SIGNATURE.is_match(line)
}

/// Classify one raw line into exactly one record variant
pub fn classify_line(line: &str) -> Result<DevIoRecord, ClassifyError> {
    if let Ok(record) = IoStatsRecord::parse(line) {
        return Ok(DevIoRecord::IoStats(record));
    }

    if HeaderRecord::matches(line) {
        return Ok(DevIoRecord::Header(HeaderRecord));
    }

    if has_restart_signature(line) {
        return RestartRecord::parse(line)
            .map(DevIoRecord::Restart)
            .map_err(|cause| ClassifyError::ambiguous(line, cause));
    }

    Err(ClassifyError::unrecognized(line))
}
