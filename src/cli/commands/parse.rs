//! Parse command implementation for the sadf reader CLI
//!
//! Classifies a stored text dump of sadf output, or stdin, without running
//! sadf. Useful for output captured on another machine.

use super::output::RowWriter;
use super::shared::{load_configuration, log_read_stats, setup_logging, write_rows};
use crate::Result;
use crate::app::services::devio_parser::{DevIoReader, ReadStats};
use crate::app::services::line_source::open_path_or_stdin;
use crate::cli::args::ParseArgs;
use tracing::debug;

/// Parse command runner
pub async fn run_parse(args: ParseArgs) -> Result<ReadStats> {
    setup_logging(&args.common)?;
    debug!("Parse arguments: {:?}", args);

    args.common.validate()?;
    let config = load_configuration(&args.common)?;

    let source = open_path_or_stdin(&args.input).await?;
    let description = source.describe();

    let stdout = std::io::stdout();
    let mut writer = RowWriter::new(args.common.output_format, stdout.lock());
    let mut reader = DevIoReader::new();
    write_rows(source, &config, &mut writer, &mut reader).await?;
    let stats = reader.into_stats();

    log_read_stats(&description, &stats);
    Ok(stats)
}
