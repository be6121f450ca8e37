// ============================================================================
// tumvol-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Run-Log Initialization
//
// This file installs the global logger for the tumvol CLI. Everything in the
// application, terminal presentation included, goes through the `log` macros.
//
// KEY COMPONENTS:
// - init_logging: env_logger on stderr, or a fern dispatch to stderr and a
//   run log file when a log directory is given
// - get_timestamp: Timestamp used in log and report file names
//
// USAGE:
// The console logger respects the RUST_LOG environment variable:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug (or --verbose): Per-frame metrics and calibration details
//
// AI-ASSISTANT-INFO: Logging initialization for the CLI

// ---- Internal crate imports ----
use crate::error::{CliErrorContext, CliResult};

// ---- External crate imports ----
use log::{Level, LevelFilter, debug};

// ---- Standard library imports ----
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// use tumvol_cli::logging::get_timestamp;
///
/// let log_filename = format!("tumvol_run_{}.log", get_timestamp());
/// assert!(log_filename.starts_with("tumvol_run_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Installs the global logger.
///
/// Returns the path of the run log when `log_dir` is given.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_dir {
        None => {
            init_console_logger(level);
            Ok(None)
        }
        Some(dir) => {
            let path = init_file_logger(level, dir)?;
            debug!("Writing run log to {}", path.display());
            Ok(Some(path))
        }
    }
}

fn init_console_logger(level: LevelFilter) {
    let default_filter = level.to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| match record.level() {
            // Presentation lines are written as-is
            Level::Info => writeln!(buf, "{}", record.args()),
            other => writeln!(buf, "{other}: {}", record.args()),
        })
        .init();
}

fn init_file_logger(level: LevelFilter, dir: &Path) -> CliResult<PathBuf> {
    fs::create_dir_all(dir)
        .cli_with_context(|| format!("Failed to create log directory '{}'", dir.display()))?;
    let path = dir.join(format!("tumvol_run_{}.log", get_timestamp()));

    let console = fern::Dispatch::new()
        .format(|out, message, record| match record.level() {
            Level::Info => out.finish(format_args!("{message}")),
            other => out.finish(format_args!("{other}: {message}")),
        })
        .chain(std::io::stderr());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .chain(
            fern::log_file(&path)
                .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?,
        );

    fern::Dispatch::new()
        .level(level)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(|e| tumvol_core::CoreError::OperationFailed(format!("Failed to install logger: {e}")))?;

    Ok(path)
}
