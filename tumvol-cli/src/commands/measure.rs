//! Implementation of the 'measure' subcommand.
//!
//! Resolves the calibration from the arguments, loads one directory of frame
//! annotations and reports the rounded measurement either as aligned status
//! lines or as JSON on stdout.

use crate::cli::MeasureArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use tumvol_core::config::CoreConfigBuilder;
use tumvol_core::utils::{format_mm, format_volume};
use tumvol_core::{
    Calibration, CoreConfig, CoreError, DuplicateFramePolicy, VolumeResult, load_annotation_dir,
    measure,
};

use log::debug;

/// Builds the configuration for a single measurement from CLI arguments.
///
/// A reference line replaces the configured ratio, so the ratio is only
/// carried (and validated) when no line is given.
fn create_core_config(args: &MeasureArgs) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .input_dir(args.annotation_dir.clone())
        .slice_thickness_mm(args.slice_thickness_mm)
        .reference_length_mm(args.reference_mm);

    if let Some(ratio) = args.pixels_per_mm {
        builder = builder.pixels_per_mm(ratio);
    }
    if args.reject_duplicates {
        builder = builder.duplicate_policy(DuplicateFramePolicy::Reject);
    }

    let mut config = builder.build();
    if args.reference_line.is_some() {
        if config.pixels_per_mm.is_some() {
            debug!("Reference line given, ignoring the configured pixel-to-mm ratio");
        }
        config.pixels_per_mm = None;
    }
    config.validate()?;
    Ok(config)
}

/// Calibration from the reference line if given, otherwise from the ratio.
fn resolve_calibration(args: &MeasureArgs, config: &CoreConfig) -> CliResult<Calibration> {
    if let Some(line) = args.reference_line {
        return Calibration::from_reference_line(
            line.start,
            line.end,
            config.reference_length_mm,
            config.slice_thickness_mm,
        );
    }

    config.default_calibration().unwrap_or_else(|| {
        Err(CoreError::InvalidCalibration(
            "provide --ratio, --reference-line or TUMVOL_PIXELS_PER_MM".to_string(),
        ))
    })
}

fn display_result(result: &VolumeResult, calibration: &Calibration) {
    let rounded = result.rounded();

    terminal::print_section("Calibration");
    terminal::print_status("Ratio", &format!("{} px/mm", calibration.pixels_per_mm()), false);
    terminal::print_status("Slice thickness", &format_mm(calibration.slice_thickness_mm()), false);

    terminal::print_section("Measurement");
    terminal::print_status("Frames", &result.frame_count.to_string(), false);
    terminal::print_status("Volume", &format_volume(rounded.volume_mm3), true);
    terminal::print_status("Max width", &format_mm(rounded.max_width_mm), false);
    terminal::print_status("Avg width", &format_mm(rounded.avg_width_mm), false);
    terminal::print_status("Max depth", &format_mm(rounded.max_depth_mm), false);
    terminal::print_status("Avg depth", &format_mm(rounded.avg_depth_mm), false);
    terminal::print_status("Length", &format_mm(rounded.length_mm), false);
}

/// Runs the `measure` command.
pub fn run_measure(args: MeasureArgs) -> CliResult<()> {
    let config = create_core_config(&args)?;

    // Calibration is checked before any annotation is read
    let calibration = resolve_calibration(&args, &config)?;

    let annotations = load_annotation_dir(&args.annotation_dir, config.duplicate_policy)
        .cli_with_context(|| {
            format!("Failed to load annotations from '{}'", args.annotation_dir.display())
        })?;
    let result = measure(&annotations, &calibration)?;

    for (frame, metrics) in &result.frames {
        debug!(
            "Frame {frame}: area {:.1} px², width {}, depth {}",
            metrics.area_px2,
            format_mm(metrics.width_mm),
            format_mm(metrics.depth_mm)
        );
    }

    if args.json {
        let json = serde_json::to_string_pretty(&result.rounded())?;
        println!("{json}");
    } else {
        display_result(&result, &calibration);
        terminal::print_success("Measurement complete");
    }
    Ok(())
}
