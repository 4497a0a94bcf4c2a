//! Command-line argument definitions for the sadf reader
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::sadf_command::Target;
use crate::config::ErrorPolicy;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sadf reader
///
/// Runs sysstat's `sadf` formatter and turns its device I/O report into
/// rows of typed statistics.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sadf-reader",
    version,
    about = "Read sysstat device I/O reports from sadf as typed rows",
    long_about = "Runs `sadf -d -- -dp` against sysstat data files (or reads stored sadf \
                  output) and classifies every line as a column legend, a restart marker \
                  or a per-device I/O sample. Samples are printed as a table, JSON lines \
                  or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the sadf reader
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run sadf for one day and print device I/O rows
    Read(ReadArgs),
    /// Classify a stored sadf text dump (or stdin) and print device I/O rows
    Parse(ParseArgs),
    /// Read every sysstat data file, oldest first
    All(AllArgs),
    /// List discovered sysstat data files
    Files(FilesArgs),
}

/// Arguments for the read command
#[derive(Debug, Clone, Parser)]
pub struct ReadArgs {
    /// Data file path or day offset
    ///
    /// A path to a binary `saDD` file, or a non-positive day offset: `0` or
    /// `-0` for today, `-1` for yesterday and so on. Defaults to today.
    #[arg(value_name = "TARGET", allow_negative_numbers = true)]
    pub target: Option<Target>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Text file holding sadf output, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the all command
#[derive(Debug, Clone, Parser)]
pub struct AllArgs {
    /// Stop at the first data file that fails instead of moving on
    #[arg(long = "fail-fast", help = "Stop at the first data file that fails")]
    pub fail_fast: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the files command
#[derive(Debug, Clone, Parser)]
pub struct FilesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for rows
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for rows"
    )]
    pub output_format: OutputFormat,

    /// What to do with lines that cannot be classified
    ///
    /// `halt` stops at the first bad line, `skip` logs it and keeps going.
    /// Overrides the config file and SADF_READER_ERROR_POLICY.
    #[arg(
        long = "on-error",
        value_enum,
        value_name = "POLICY",
        help = "Policy for unclassifiable lines"
    )]
    pub on_error: Option<ErrorPolicy>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// ~/.config/sadf-reader/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// sadf executable to run
    #[arg(long = "sadf", value_name = "PATH", help = "sadf executable to run")]
    pub sadf_binary: Option<PathBuf>,

    /// Directory holding sysstat data files
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding sysstat saDD files"
    )]
    pub data_dir: Option<PathBuf>,
}

/// Output format options for rows and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// One JSON object per line
    Json,
    /// CSV with a header row
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Result<Commands> {
        self.command
            .clone()
            .ok_or_else(|| Error::configuration("No command specified"))
    }
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Read(args) => &args.common,
            Commands::Parse(args) => &args.common,
            Commands::All(args) => &args.common,
            Commands::Files(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(data_dir) = &self.data_dir {
            if !data_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data directory is not a directory: {}",
                    data_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Commands {
        Args::try_parse_from(argv).unwrap().get_command().unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["sadf-reader"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.get_command().is_err());
    }

    #[test]
    fn test_read_defaults() {
        match parse(&["sadf-reader", "read"]) {
            Commands::Read(args) => {
                assert_eq!(args.target, None);
                assert_eq!(args.common.output_format, OutputFormat::Human);
                assert_eq!(args.common.on_error, None);
                assert_eq!(args.common.get_log_level(), "warn");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_negative_day_offset() {
        match parse(&["sadf-reader", "read", "-1", "--format", "json"]) {
            Commands::Read(args) => {
                assert_eq!(args.target, Some(Target::DayOffset(-1)));
                assert_eq!(args.common.output_format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_file_target() {
        match parse(&["sadf-reader", "read", "/var/log/sysstat/sa20"]) {
            Commands::Read(args) => {
                assert_eq!(
                    args.target,
                    Some(Target::File(PathBuf::from("/var/log/sysstat/sa20")))
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_future_day() {
        assert!(Args::try_parse_from(["sadf-reader", "read", "2"]).is_err());
    }

    #[test]
    fn test_parse_stdin_with_skip_policy() {
        match parse(&["sadf-reader", "parse", "-", "--on-error", "skip", "-vv"]) {
            Commands::Parse(args) => {
                assert_eq!(args.input, PathBuf::from("-"));
                assert_eq!(args.common.on_error, Some(ErrorPolicy::Skip));
                assert_eq!(args.common.get_log_level(), "debug");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["sadf-reader", "files", "-q", "-v"]).is_err());

        let command = parse(&["sadf-reader", "files", "-q"]);
        assert_eq!(command.common().get_log_level(), "error");
        assert!(!command.common().show_progress());
    }

    #[test]
    fn test_validate_missing_config_file() {
        let command = parse(&["sadf-reader", "all", "--config", "/nonexistent/config.json"]);
        assert!(command.common().validate().is_err());
    }
}
