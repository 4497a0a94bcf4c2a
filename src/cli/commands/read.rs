//! Read command implementation for the sadf reader CLI
//!
//! Runs `sadf -d -- -dp TARGET` and prints one row per device sample.

use super::output::RowWriter;
use super::shared::{load_configuration, log_read_stats, setup_logging, write_rows};
use crate::Result;
use crate::app::services::devio_parser::{DevIoReader, ReadStats};
use crate::app::services::line_source::LineSource;
use crate::app::services::sadf_command::SadfCommand;
use crate::cli::args::ReadArgs;
use tracing::{debug, info};

/// Read command runner
pub async fn run_read(args: ReadArgs) -> Result<ReadStats> {
    setup_logging(&args.common)?;
    debug!("Read arguments: {:?}", args);

    args.common.validate()?;
    let config = load_configuration(&args.common)?;

    let command = SadfCommand::device_io().with_binary(config.sadf_binary.clone());
    let target = args.target.unwrap_or_default();
    info!("Reading device I/O statistics for {}", target);

    let source = LineSource::sadf(&command, Some(&target))?;
    let description = source.describe();

    let stdout = std::io::stdout();
    let mut writer = RowWriter::new(args.common.output_format, stdout.lock());
    let mut reader = DevIoReader::new();
    write_rows(source, &config, &mut writer, &mut reader).await?;
    let stats = reader.into_stats();

    log_read_stats(&description, &stats);
    Ok(stats)
}
