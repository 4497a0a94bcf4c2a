use clap::Parser;
use sadf_reader::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No handler available; never resolve so the command runs to completion
                std::future::pending::<()>().await;
            }
        };

        // Dropping the command future kills any running sadf child
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(sadf_reader::Error::processing_interrupted(
                    "Reading interrupted by user"
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("sadf reader - sysstat device I/O reports as typed rows");
    println!("======================================================");
    println!();
    println!("Runs `sadf -d -- -dp` and classifies each output line as a column");
    println!("legend, a restart marker or a per-device I/O sample.");
    println!();
    println!("USAGE:");
    println!("    sadf-reader <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    read        Run sadf for one day and print device I/O rows");
    println!("    parse       Classify stored sadf output (file or stdin)");
    println!("    all         Read every sysstat data file, oldest first");
    println!("    files       List discovered sysstat data files");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Today's device statistics:");
    println!("    sadf-reader read");
    println!();
    println!("    # Yesterday's statistics as CSV, skipping unexpected lines:");
    println!("    sadf-reader read -1 --format csv --on-error skip");
    println!();
    println!("    # Classify output captured on another host:");
    println!("    sadf -d -- -dp /var/log/sysstat/sa20 | sadf-reader parse -");
    println!();
    println!("    # Every data file as JSON lines:");
    println!("    sadf-reader all --data-dir /var/log/sa --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sadf-reader <COMMAND> --help");
}
