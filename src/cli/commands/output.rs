//! Row output for CLI commands
//!
//! Device I/O rows go to stdout in one of three formats. Logging and
//! progress bars use stderr, so stdout can be piped straight into other tools.

use crate::app::models::IoStatsRecord;
use crate::cli::args::OutputFormat;
use crate::constants::ROW_COLUMNS;
use crate::{Error, Result};
use std::io::Write;

/// Writes [`IoStatsRecord`] rows in the selected output format
pub enum RowWriter<W: Write> {
    /// Aligned table with a single header line
    Human { out: W, header_written: bool },
    /// One JSON object per line
    Json(W),
    /// CSV with a header row
    Csv(csv::Writer<W>),
}

impl<W: Write> RowWriter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        match format {
            OutputFormat::Human => RowWriter::Human {
                out,
                header_written: false,
            },
            OutputFormat::Json => RowWriter::Json(out),
            OutputFormat::Csv => RowWriter::Csv(csv::Writer::from_writer(out)),
        }
    }

    /// Write one row
    pub fn write_record(&mut self, record: &IoStatsRecord) -> Result<()> {
        match self {
            RowWriter::Human {
                out,
                header_written,
            } => {
                if !*header_written {
                    writeln!(out, "{}", human_header()).map_err(write_error)?;
                    *header_written = true;
                }
                writeln!(out, "{}", human_row(record)).map_err(write_error)
            }
            RowWriter::Json(out) => {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out).map_err(write_error)
            }
            RowWriter::Csv(writer) => Ok(writer.serialize(record)?),
        }
    }

    /// Flush buffered rows
    pub fn flush(&mut self) -> Result<()> {
        match self {
            RowWriter::Human { out, .. } | RowWriter::Json(out) => out.flush(),
            RowWriter::Csv(writer) => writer.flush(),
        }
        .map_err(write_error)
    }
}

fn write_error(error: std::io::Error) -> Error {
    Error::io("Failed to write rows", error)
}

fn human_header() -> String {
    let mut line = format!(
        "{:<16} {:<25} {:<10}",
        ROW_COLUMNS[0], ROW_COLUMNS[1], ROW_COLUMNS[2]
    );
    for column in &ROW_COLUMNS[3..] {
        line.push_str(&format!(" {:>12}", column));
    }
    line
}

fn human_row(record: &IoStatsRecord) -> String {
    let mut line = format!(
        "{:<16} {:<25} {:<10}",
        record.hostname, record.timestamp, record.device
    );
    for value in record.values() {
        line.push_str(&format!(" {:>12.2}", value));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> IoStatsRecord {
        IoStatsRecord {
            hostname: "foohost".to_string(),
            timestamp: "2016-02-20 08:55:01 UTC".to_string(),
            device: "dev8-0".to_string(),
            tps: 0.35,
            read_freq: 5.88,
            write_freq: 5.17,
            avg_req_size: 31.73,
            avg_que_size: 0.0,
            r#await: 0.34,
            cpu_util: 0.01,
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        {
            let mut writer = RowWriter::new(format, &mut buffer);
            writer.write_record(&sample_record()).unwrap();
            writer.write_record(&sample_record()).unwrap();
            writer.flush().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_csv_columns() {
        let output = render(OutputFormat::Csv);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some(ROW_COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("foohost,2016-02-20 08:55:01 UTC,dev8-0,0.35,5.88,5.17,31.73,0.0,0.34,0.01")
        );
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_json_lines() {
        let output = render(OutputFormat::Json);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["dev"], "dev8-0");
        assert_eq!(value["await"], 0.34);
        assert_eq!(value["cpu_util"], 0.01);
    }

    #[test]
    fn test_human_table_has_single_header() {
        let output = render(OutputFormat::Human);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("hostname"));
        assert!(lines[1].contains("dev8-0"));
        assert!(lines[1].trim_end().ends_with("0.01"));
    }
}
