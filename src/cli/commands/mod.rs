//! Command implementations for the sadf reader CLI
//!
//! This module dispatches to the subcommand handlers. Each command is
//! implemented in its own module.

pub mod all;
pub mod files;
pub mod output;
pub mod parse;
pub mod read;
pub mod shared;

pub use output::RowWriter;

use crate::Result;
use crate::app::services::devio_parser::ReadStats;
use crate::cli::args::{Args, Commands};

/// Main command runner for the sadf reader
///
/// - `read`: run sadf for one day and print rows
/// - `parse`: classify stored sadf output
/// - `all`: read every discovered data file
/// - `files`: list discovered data files
pub async fn run(args: Args) -> Result<ReadStats> {
    match args.get_command()? {
        Commands::Read(read_args) => read::run_read(read_args).await,
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::All(all_args) => all::run_all(all_args).await,
        Commands::Files(files_args) => files::run_files(files_args).await,
    }
}
