//! All command implementation for the sadf reader CLI
//!
//! Discovers every sysstat data file and reads each one through sadf, oldest
//! first, so rows come out in chronological order across days.

use super::output::RowWriter;
use super::shared::{
    create_progress_bar, is_critical_error, load_configuration, log_read_stats, setup_logging,
    write_rows,
};
use crate::{Error, Result};
use crate::app::services::devio_parser::{DevIoReader, ReadStats};
use crate::app::services::file_discovery::{DataFile, DataFileDiscovery};
use crate::app::services::line_source::LineSource;
use crate::app::services::sadf_command::{SadfCommand, Target};
use crate::cli::args::AllArgs;
use crate::config::SadfConfig;
use colored::*;
use indicatif::HumanDuration;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome of reading every data file
#[derive(Debug, Default)]
struct AllSummary {
    files_read: usize,
    files_failed: usize,
    stats: ReadStats,
}

/// All command runner
pub async fn run_all(args: AllArgs) -> Result<ReadStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("All arguments: {:?}", args);

    args.common.validate()?;
    let config = load_configuration(&args.common)?;

    let files = DataFileDiscovery::from_config(&config).discover()?;
    info!(
        "Reading {} data files from {}",
        files.len(),
        config.data_dir.display()
    );

    let command = SadfCommand::device_io().with_binary(config.sadf_binary.clone());
    let stdout = std::io::stdout();
    let mut writer = RowWriter::new(args.common.output_format, stdout.lock());

    let progress = create_progress_bar(files.len() as u64, "Reading data files");
    if !args.common.show_progress() {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let mut summary = AllSummary::default();
    for file in &files {
        progress.set_message(file.name());

        match read_data_file(&command, file, &config, &mut writer, &mut summary).await {
            Ok(()) => summary.files_read += 1,
            Err(e) => {
                error!("Failed to read {}: {}", file.path.display(), e);
                summary.files_failed += 1;

                if args.fail_fast || is_critical_error(&e) {
                    progress.abandon();
                    return Err(e);
                }
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if args.common.show_progress() {
        print_summary(&summary, start_time)?;
    }

    Ok(summary.stats)
}

/// Read one data file, adding its counts to `summary` even when it fails
async fn read_data_file<W: Write>(
    command: &SadfCommand,
    file: &DataFile,
    config: &SadfConfig,
    writer: &mut RowWriter<W>,
    summary: &mut AllSummary,
) -> Result<()> {
    let target = Target::File(file.path.clone());
    let source = LineSource::sadf(command, Some(&target))?;
    let description = source.describe();

    let mut reader = DevIoReader::new();
    let result = write_rows(source, config, writer, &mut reader).await;

    let stats = reader.into_stats();
    log_read_stats(&description, &stats);
    summary.stats.merge(&stats);
    result
}

/// Print the run summary on stderr, leaving stdout to the rows
fn print_summary(summary: &AllSummary, start_time: Instant) -> Result<()> {
    let mut err = std::io::stderr().lock();
    let write = |e| Error::io("Failed to write summary", e);

    writeln!(err, "\n{}", "Reading Summary".bright_green().bold()).map_err(write)?;
    writeln!(
        err,
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(start_time.elapsed()).to_string().bright_white()
    )
    .map_err(write)?;
    writeln!(
        err,
        "  {} {}",
        "Files read:".bright_cyan(),
        summary.files_read.to_string().bright_white()
    )
    .map_err(write)?;
    if summary.files_failed > 0 {
        writeln!(
            err,
            "  {} {}",
            "Files failed:".bright_red(),
            summary.files_failed.to_string().bright_red().bold()
        )
        .map_err(write)?;
    }
    writeln!(
        err,
        "  {} {}",
        "Rows:".bright_cyan(),
        summary.stats.records_emitted.to_string().bright_white().bold()
    )
    .map_err(write)?;
    if summary.stats.error_count() > 0 {
        writeln!(
            err,
            "  {} {}",
            "Lines skipped:".bright_yellow(),
            summary.stats.error_count().to_string().bright_yellow()
        )
        .map_err(write)?;
    }
    Ok(())
}
