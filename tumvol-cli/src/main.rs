// ============================================================================
// tumvol-cli/src/main.rs
// ============================================================================
//
// MAIN ENTRY POINT: tumvol Command-Line Interface
//
// This file contains the entry point for the tumvol CLI application. It parses
// command-line arguments, installs the logger and dispatches to the command
// implementations in the commands module.
//
// WORKFLOW:
// 1. Parse command-line arguments using clap
// 2. Initialize logging (console, plus a run log with --log-dir)
// 3. Dispatch to the appropriate command handler
// 4. Print any error to stderr and exit with a non-zero code
//
// AI-ASSISTANT-INFO: Entry point for the tumvol CLI application

// ---- Internal crate imports ----
use tumvol_cli::logging::init_logging;
use tumvol_cli::{Cli, Commands, run_batch, run_measure, run_normalize, run_sample};

// ---- External crate imports ----
use clap::Parser;

// ---- Standard library imports ----
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_dir.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Measure(args) => run_measure(args),
        Commands::Batch(args) => run_batch(args),
        Commands::Sample(args) => run_sample(args),
        Commands::Normalize(args) => run_normalize(args),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
