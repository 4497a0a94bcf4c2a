//! Failure types for record parsing and line classification
//!
//! Parsers report [`ParseFailure`] locally; the classifier either recovers
//! from it by trying another shape or escalates a [`ClassifyError`].

use crate::app::models::RecordKind;

/// A single parser's expectations were not met by a line
///
/// Carries only static data so the failure path never allocates.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Wrong field count, missing marker, or a non-numeric metric
    #[error("line is not a {record} record: {reason}")]
    StructureMismatch {
        record: RecordKind,
        reason: &'static str,
    },
}

impl ParseFailure {
    pub(crate) fn mismatch(record: RecordKind, reason: &'static str) -> Self {
        Self::StructureMismatch { record, reason }
    }
}

/// A line could not be classified as any record
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The line looks like none of the known shapes
    #[error("Unrecognised source line: {line:?}")]
    UnrecognizedLine { line: String },

    /// The line has the restart position signature but fails its content check
    #[error("Ambiguous source line: {line:?} ({cause})")]
    AmbiguousLine { line: String, cause: ParseFailure },
}

impl ClassifyError {
    pub fn unrecognized(line: impl Into<String>) -> Self {
        Self::UnrecognizedLine { line: line.into() }
    }

    pub fn ambiguous(line: impl Into<String>, cause: ParseFailure) -> Self {
        Self::AmbiguousLine {
            line: line.into(),
            cause,
        }
    }

    /// The offending raw line
    pub fn line(&self) -> &str {
        match self {
            Self::UnrecognizedLine { line } | Self::AmbiguousLine { line, .. } => line,
        }
    }

    /// Whether the line matched a known shape but failed its content contract
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousLine { .. })
    }
}
