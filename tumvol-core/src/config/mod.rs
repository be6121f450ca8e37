//! Configuration structures and constants for the tumvol-core library.
//!
//! This module provides the configuration for batch measurement runs:
//! where sweeps are read from, where reports go, and the calibration
//! defaults applied when a sweep carries no calibration record of its own.

mod builder;
pub mod utils;

use crate::annotation::DuplicateFramePolicy;
use crate::calibration::{Calibration, DEFAULT_REFERENCE_LENGTH_MM};
use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default physical distance between consecutive frame indices, in mm.
pub const DEFAULT_SLICE_THICKNESS_MM: f64 = 1.0;

/// Environment variable overriding [`DEFAULT_SLICE_THICKNESS_MM`].
pub const ENV_SLICE_THICKNESS_MM: &str = "TUMVOL_SLICE_THICKNESS_MM";

/// Environment variable providing a default pixel-to-mm ratio.
pub const ENV_PIXELS_PER_MM: &str = "TUMVOL_PIXELS_PER_MM";

/// Environment variable switching duplicate frames from overwrite to reject.
pub const ENV_REJECT_DUPLICATES: &str = "TUMVOL_REJECT_DUPLICATE_FRAMES";

/// Main configuration structure for the tumvol-core library.
///
/// Created by the consumer of the library (e.g., tumvol-cli) and passed to
/// [`crate::process_sweeps`]. Only the path fields normally need setting;
/// the builder provides the defaults for everything else.
///
/// # Examples
///
/// ```rust,no_run
/// use tumvol_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/sweeps"))
///     .output_dir(PathBuf::from("/path/to/reports"))
///     .slice_thickness_mm(0.5)
///     .pixels_per_mm(12.4)
///     .build();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory whose sub-directories each hold one sweep's annotations
    pub input_dir: PathBuf,

    /// Directory where batch reports are written
    pub output_dir: PathBuf,

    /// Slice thickness used when a sweep's calibration record has none
    pub slice_thickness_mm: f64,

    /// Pixel-to-mm ratio used when a sweep has no calibration record
    pub pixels_per_mm: Option<f64>,

    /// Physical length of the calibration reference line
    pub reference_length_mm: f64,

    /// How repeated frame indices within one sweep are handled
    pub duplicate_policy: DuplicateFramePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            slice_thickness_mm: utils::get_env_f64(
                ENV_SLICE_THICKNESS_MM,
                DEFAULT_SLICE_THICKNESS_MM,
            ),
            pixels_per_mm: utils::get_env_opt_f64(ENV_PIXELS_PER_MM),
            reference_length_mm: DEFAULT_REFERENCE_LENGTH_MM,
            duplicate_policy: if utils::get_env_bool(ENV_REJECT_DUPLICATES, false) {
                DuplicateFramePolicy::Reject
            } else {
                DuplicateFramePolicy::Overwrite
            },
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with the given directories and defaults for
    /// everything else.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Checks that the configured calibration defaults are usable.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.reference_length_mm.is_finite() || self.reference_length_mm <= 0.0 {
            return Err(CoreError::Config(format!(
                "reference length must be positive, got {} mm",
                self.reference_length_mm
            )));
        }
        match self.pixels_per_mm {
            Some(ratio) => {
                Calibration::new(ratio, self.slice_thickness_mm)?;
            }
            None if !self.slice_thickness_mm.is_finite() || self.slice_thickness_mm <= 0.0 => {
                return Err(CoreError::InvalidCalibration(format!(
                    "slice thickness must be positive, got {} mm",
                    self.slice_thickness_mm
                )));
            }
            None => {}
        }
        Ok(())
    }

    /// Calibration from the configured defaults, if a ratio is configured.
    pub fn default_calibration(&self) -> Option<CoreResult<Calibration>> {
        self.pixels_per_mm
            .map(|ratio| Calibration::new(ratio, self.slice_thickness_mm))
    }
}
