//! Pixel-to-millimetre calibration.
//!
//! A [`Calibration`] pairs the in-plane scale (pixels per millimetre) with the
//! slice thickness (millimetres per unit of frame index). Both are validated
//! once at construction and cannot change afterwards, so every later stage
//! may divide by the ratio without re-checking it.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{Point, line_length};
use crate::utils::round3;

use log::debug;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Physical length of the reference line drawn during calibration.
pub const DEFAULT_REFERENCE_LENGTH_MM: f64 = 5.0;

/// Validated, immutable calibration for one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pixels_per_mm: f64,
    slice_thickness_mm: f64,
}

impl Calibration {
    /// Fails with [`CoreError::InvalidCalibration`] unless both values are
    /// finite and strictly positive.
    pub fn new(pixels_per_mm: f64, slice_thickness_mm: f64) -> CoreResult<Self> {
        if !pixels_per_mm.is_finite() || pixels_per_mm <= 0.0 {
            return Err(CoreError::InvalidCalibration(format!(
                "pixel-to-mm ratio must be positive, got {pixels_per_mm}"
            )));
        }
        if !slice_thickness_mm.is_finite() || slice_thickness_mm <= 0.0 {
            return Err(CoreError::InvalidCalibration(format!(
                "slice thickness must be positive, got {slice_thickness_mm} mm"
            )));
        }
        Ok(Self {
            pixels_per_mm,
            slice_thickness_mm,
        })
    }

    /// Derives the ratio from a two-click reference line of known length.
    ///
    /// The ratio is the pixel length divided by `reference_mm`, rounded to
    /// three decimals.
    pub fn from_reference_line(
        a: Point,
        b: Point,
        reference_mm: f64,
        slice_thickness_mm: f64,
    ) -> CoreResult<Self> {
        let ratio = ratio_from_reference_line(a, b, reference_mm)?;
        Self::new(ratio, slice_thickness_mm)
    }

    pub fn pixels_per_mm(&self) -> f64 {
        self.pixels_per_mm
    }

    pub fn slice_thickness_mm(&self) -> f64 {
        self.slice_thickness_mm
    }

    /// Converts a pixel length to millimetres.
    pub fn px_to_mm(&self, px: f64) -> f64 {
        px / self.pixels_per_mm
    }
}

/// Pixels per millimetre for a reference line `a`–`b` of `reference_mm`.
pub fn ratio_from_reference_line(a: Point, b: Point, reference_mm: f64) -> CoreResult<f64> {
    if !reference_mm.is_finite() || reference_mm <= 0.0 {
        return Err(CoreError::InvalidCalibration(format!(
            "reference length must be positive, got {reference_mm} mm"
        )));
    }
    let pixels = line_length(a, b);
    let ratio = round3(pixels / reference_mm);
    debug!("Reference line of {pixels:.3} px over {reference_mm} mm gives {ratio} px/mm");
    Ok(ratio)
}

/// Optional per-sweep calibration stored next to the annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub pixel_to_mm_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_thickness_mm: Option<f64>,
}

impl CalibrationRecord {
    pub fn read(path: &Path) -> CoreResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader)
            .map_err(|e| CoreError::Parse(format!("{}: {}", path.display(), e)))
    }
}
