// tumvol-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use tumvol_core::calibration::DEFAULT_REFERENCE_LENGTH_MM;
use tumvol_core::geometry::Point;

use std::path::PathBuf;
use std::str::FromStr;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "tumvol: Tumour volume estimation from annotated sweep frames",
    long_about = "Measures tumour volume and dimensions from per-frame contour annotations using the tumvol-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Also write a timestamped run log into this directory
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measures one sweep from a directory of frame annotations
    Measure(MeasureArgs),
    /// Measures every sweep sub-directory of an input directory and writes a report
    Batch(BatchArgs),
    /// Prints evenly spaced frame indices to annotate within a range
    Sample(SampleArgs),
    /// Rewrites annotations closed (and optionally resampled) under canonical names
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
pub struct MeasureArgs {
    /// Directory containing frame_<index>.json annotation files
    #[arg(short = 'a', long = "annotations", required = true, value_name = "ANNOTATION_DIR")]
    pub annotation_dir: PathBuf,

    /// Distance between consecutive frames in millimetres
    #[arg(short = 't', long = "slice-thickness", required = true, value_name = "MM", env = "TUMVOL_SLICE_THICKNESS_MM")]
    pub slice_thickness_mm: f64,

    /// Pixels per millimetre
    #[arg(long = "ratio", value_name = "PX_PER_MM", env = "TUMVOL_PIXELS_PER_MM")]
    pub pixels_per_mm: Option<f64>,

    /// Reference line endpoints in pixels; replaces --ratio when given
    #[arg(long, value_name = "X1,Y1,X2,Y2")]
    pub reference_line: Option<ReferenceLine>,

    /// Physical length of the reference line
    #[arg(long = "reference-mm", value_name = "MM", default_value_t = DEFAULT_REFERENCE_LENGTH_MM)]
    pub reference_mm: f64,

    /// Fail on repeated frame indices instead of keeping the last one
    #[arg(long, default_value_t = false)]
    pub reject_duplicates: bool,

    /// Print the rounded measurement as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Directory whose sub-directories each hold one sweep
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where the JSON report will be saved
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Default slice thickness for sweeps whose calibration.json has none
    #[arg(short = 't', long = "slice-thickness", value_name = "MM", env = "TUMVOL_SLICE_THICKNESS_MM")]
    pub slice_thickness_mm: Option<f64>,

    /// Default pixels per millimetre for sweeps without calibration.json
    #[arg(long = "ratio", value_name = "PX_PER_MM", env = "TUMVOL_PIXELS_PER_MM")]
    pub pixels_per_mm: Option<f64>,

    /// Fail a sweep on repeated frame indices instead of keeping the last one
    #[arg(long, default_value_t = false)]
    pub reject_duplicates: bool,
}

#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// First frame of the tumour range
    #[arg(long, value_name = "FRAME")]
    pub start: u32,

    /// Last frame of the tumour range (inclusive)
    #[arg(long, value_name = "FRAME")]
    pub end: u32,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Directory containing frame_<index>.json annotation files
    #[arg(short = 'a', long = "annotations", required = true, value_name = "ANNOTATION_DIR")]
    pub annotation_dir: PathBuf,

    /// Directory where normalized annotations will be written
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Resample each contour to this many points, evenly spaced along its boundary
    #[arg(long, value_name = "POINTS", value_parser = clap::value_parser!(u32).range(3..))]
    pub resample: Option<u32>,
}

/// Two reference-line endpoints given as `X1,Y1,X2,Y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub start: Point,
    pub end: Point,
}

impl FromStr for ReferenceLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid coordinate in '{s}': {e}"))?;

        match values.as_slice() {
            &[x1, y1, x2, y2] => Ok(Self {
                start: Point::new(x1, y1),
                end: Point::new(x2, y2),
            }),
            other => Err(format!("expected 4 comma-separated values, got {}", other.len())),
        }
    }
}
