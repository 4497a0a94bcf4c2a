//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading and the row
//! pipeline used across the command implementations.

use super::output::RowWriter;
use crate::app::services::devio_parser::{DevIoReader, ReadStats};
use crate::app::services::line_source::{LineSource, read_records_with};
use crate::cli::args::CommonArgs;
use crate::config::SadfConfig;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sadf_reader={}", log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<SadfConfig> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        SadfConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = SadfConfig::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut SadfConfig, args: &CommonArgs) {
    if let Some(sadf_binary) = &args.sadf_binary {
        config.sadf_binary = sadf_binary.clone();
    }
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(policy) = args.on_error {
        config.error_policy = policy;
    }
}

/// Read one line source and write its rows
///
/// `reader` keeps counting rows written before a failure.
pub async fn write_rows<W: Write>(
    source: LineSource,
    config: &SadfConfig,
    writer: &mut RowWriter<W>,
    reader: &mut DevIoReader,
) -> Result<()> {
    let result = read_records_with(reader, source, config.error_policy, |record| {
        writer.write_record(&record)
    })
    .await;
    writer.flush()?;
    result
}

/// Check if an error is critical enough to stop a multi-file run
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. }
            | Error::Classification(_)
            | Error::Io { .. }
            | Error::ProcessingInterrupted { .. }
    )
}

/// Log a short summary of one source
pub fn log_read_stats(description: &str, stats: &ReadStats) {
    info!(
        "{}: {} rows from {} lines ({} headers, {} restarts skipped)",
        description,
        stats.records_emitted,
        stats.lines_read,
        stats.headers_skipped,
        stats.restarts_skipped
    );
    if stats.error_count() > 0 {
        info!(
            "{}: {} lines rejected ({} unrecognised, {} ambiguous)",
            description,
            stats.error_count(),
            stats.unrecognized_lines,
            stats.ambiguous_lines
        );
    }
    if stats.errors_omitted > 0 {
        debug!(
            "{}: {} error messages not kept",
            description, stats.errors_omitted
        );
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
