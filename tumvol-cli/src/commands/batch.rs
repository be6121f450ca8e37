//! Implementation of the 'batch' subcommand.
//!
//! Discovers sweep directories, measures each one with a progress bar, writes
//! the JSON report and fails the run when any sweep failed.

use crate::cli::BatchArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use tumvol_core::config::CoreConfigBuilder;
use tumvol_core::processing::{SweepInput, SweepObserver, SweepOutcome};
use tumvol_core::utils::format_volume;
use tumvol_core::{BatchReport, CoreConfig, CoreError, DuplicateFramePolicy};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use std::io::IsTerminal;
use std::time::Instant;

/// Progress bar advanced once per finished sweep.
struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::default_bar()
            .template("Measuring: [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>.");
        bar.set_style(style);
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SweepObserver for SweepProgress {
    fn sweep_started(&self, _index: usize, _total: usize, sweep: &SweepInput) {
        self.bar.set_message(sweep.name.clone());
    }

    fn sweep_finished(&self, _outcome: &SweepOutcome) {
        self.bar.inc(1);
    }
}

fn create_core_config(args: &BatchArgs) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone());

    if let Some(thickness) = args.slice_thickness_mm {
        builder = builder.slice_thickness_mm(thickness);
    }
    if let Some(ratio) = args.pixels_per_mm {
        builder = builder.pixels_per_mm(ratio);
    }
    if args.reject_duplicates {
        builder = builder.duplicate_policy(DuplicateFramePolicy::Reject);
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

fn display_summary(report: &BatchReport) {
    terminal::print_section("Results");
    for row in &report.rows {
        match (&row.measurement, &row.error) {
            (Some(m), _) => terminal::print_status(&row.sweep, &format_volume(m.volume_mm3), true),
            (None, Some(e)) => terminal::print_error(&format!("{}: {e}", row.sweep)),
            (None, None) => terminal::print_error(&format!("{}: failed", row.sweep)),
        }
    }
}

/// Runs the `batch` command.
pub fn run_batch(args: BatchArgs) -> CliResult<()> {
    let config = create_core_config(&args)?;
    let start_time = Instant::now();

    let sweeps = tumvol_core::find_sweep_dirs(&config.input_dir).cli_with_context(|| {
        format!("No sweep directories found in '{}'", config.input_dir.display())
    })?;

    terminal::print_section("Batch");
    terminal::print_status("Input", &config.input_dir.display().to_string(), false);
    terminal::print_status("Output", &config.output_dir.display().to_string(), false);
    terminal::print_status("Sweeps", &sweeps.len().to_string(), false);

    let progress = SweepProgress::new(sweeps.len());
    let outcomes = tumvol_core::process_sweeps(&config, &sweeps, &progress);
    progress.finish();

    let report = BatchReport::new(chrono::Local::now(), &outcomes);
    let report_path = report.write_to_dir(&config.output_dir).cli_with_context(|| {
        format!("Failed to write report to '{}'", config.output_dir.display())
    })?;

    display_summary(&report);
    terminal::print_status("Report", &report_path.display().to_string(), false);
    terminal::print_status(
        "Elapsed",
        &format!("{:.2}s", start_time.elapsed().as_secs_f64()),
        false,
    );

    if report.failed() > 0 {
        terminal::print_warning(&format!(
            "{} of {} sweeps failed",
            report.failed(),
            report.rows.len()
        ));
        return Err(CoreError::OperationFailed(format!(
            "{} of {} sweeps failed",
            report.failed(),
            report.rows.len()
        )));
    }

    terminal::print_success(&format!("Measured {} sweeps", report.succeeded()));
    Ok(())
}
