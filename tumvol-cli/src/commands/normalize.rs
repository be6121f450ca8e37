//! Implementation of the 'normalize' subcommand.
//!
//! Reads a directory of annotations and writes each one back closed, under
//! the canonical `frame_<index:05>.json` name. With `--resample` the closed
//! contour is first redistributed to a fixed number of evenly spaced points.

use crate::cli::NormalizeArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use tumvol_core::geometry::{close_polygon, resample_polygon};
use tumvol_core::{Annotation, CoreConfig, load_annotation_dir, write_annotation};

use log::debug;

use std::fs;

/// Runs the `normalize` command.
pub fn run_normalize(args: NormalizeArgs) -> CliResult<()> {
    let policy = CoreConfig::default().duplicate_policy;
    let annotations = load_annotation_dir(&args.annotation_dir, policy).cli_with_context(|| {
        format!("Failed to load annotations from '{}'", args.annotation_dir.display())
    })?;

    fs::create_dir_all(&args.output_dir).cli_with_context(|| {
        format!("Failed to create output directory '{}'", args.output_dir.display())
    })?;

    terminal::print_section("Normalize");
    for annotation in &annotations {
        let normalized = match args.resample {
            Some(target) => {
                let closed = close_polygon(annotation.points());
                let points = resample_polygon(&closed, target as usize)?;
                Annotation::new(annotation.frame_index(), points)?
            }
            None => annotation.clone(),
        };

        let path = write_annotation(&args.output_dir, &normalized)?;
        terminal::print_processing(&format!(
            "Frame {} -> {}",
            normalized.frame_index(),
            path.display()
        ));
        debug!("Frame {} has {} points", normalized.frame_index(), normalized.points().len());
    }

    terminal::print_success(&format!(
        "Wrote {} annotations to {}",
        annotations.len(),
        args.output_dir.display()
    ));
    Ok(())
}
