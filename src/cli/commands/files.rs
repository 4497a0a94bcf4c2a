//! Files command implementation for the sadf reader CLI
//!
//! Lists the sysstat data files that `all` would read, in reading order.

use super::shared::{load_configuration, setup_logging};
use crate::app::services::devio_parser::ReadStats;
use crate::app::services::file_discovery::{DataFile, DataFileDiscovery};
use crate::cli::args::{FilesArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use std::io::Write;
use tracing::debug;

/// Files command runner
pub async fn run_files(args: FilesArgs) -> Result<ReadStats> {
    setup_logging(&args.common)?;
    debug!("Files arguments: {:?}", args);

    args.common.validate()?;
    let config = load_configuration(&args.common)?;

    let files = DataFileDiscovery::from_config(&config).discover()?;

    let stdout = std::io::stdout();
    write_listing(&files, args.common.output_format, stdout.lock())?;

    Ok(ReadStats::default())
}

/// Write the file listing in the selected format
pub fn write_listing<W: Write>(files: &[DataFile], format: OutputFormat, mut out: W) -> Result<()> {
    let write = |e| Error::io("Failed to write file listing", e);

    match format {
        OutputFormat::Human => {
            if files.is_empty() {
                writeln!(out, "{}", "No data files found".bright_yellow()).map_err(write)?;
            }
            for file in files {
                writeln!(
                    out,
                    "{}  {}  {:>10}",
                    file.modified
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .bright_cyan(),
                    file.path.display().to_string().bright_white().bold(),
                    file.size
                )
                .map_err(write)?;
            }
        }
        OutputFormat::Json => {
            for file in files {
                serde_json::to_writer(&mut out, file)?;
                writeln!(out).map_err(write)?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for file in files {
                writer.serialize(file)?;
            }
            writer.flush().map_err(write)?;
        }
    }
    Ok(())
}
