//! Parser for sadf device I/O output (`sadf -d -- -dp`)
//!
//! sadf prints one semicolon-delimited line per device and interval, mixed
//! with a column legend and restart notifications. This module turns each
//! raw line into a typed [`DevIoRecord`](crate::app::models::DevIoRecord).
//!
//! ## Architecture
//!
//! - [`record_parser`] - Strict per-shape parsers (`IoStatsRecord::parse`, ...)
//! - [`field_parsers`] - Field splitting and metric conversion helpers
//! - [`classifier`] - Two-phase line classification with fallback
//! - [`reader`] - Ordered filtering down to I/O statistics records
//! - [`stats`] - Per-source read statistics
//! - [`error`] - Parse failures and classification errors
//!
//! ## Usage
//!
//! ```rust
//! use sadf_reader::app::services::devio_parser::DevIoReader;
//!
//! let output = "foohost;-1;2016-02-20 08:37:26 UTC;LINUX-RESTART\t(4 CPU)\n\
//!               foohost;600;2016-02-20 08:55:01 UTC;dev8-0;0.35;5.88;5.17;31.73;0.00;0.36;0.34;0.01";
//!
//! let records: Vec<_> = DevIoReader::new()
//!     .records(output.lines())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].device, "dev8-0");
//! ```

pub mod classifier;
pub mod error;
pub mod field_parsers;
pub mod reader;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::classify_line;
pub use error::{ClassifyError, ParseFailure};
pub use reader::{DevIoReader, DevIoRecords, classify_lines};
pub use stats::ReadStats;
