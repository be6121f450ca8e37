//! Utility functions for rounding and formatting measurements.
//!
//! This module provides small helpers shared by the pipeline, the batch
//! report and the CLI output.

use std::path::Path;

/// Number of decimal places carried by every reported measurement.
pub const OUTPUT_DECIMALS: u32 = 3;

/// Rounds `value` to `decimals` places, half away from zero.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Rounds to [`OUTPUT_DECIMALS`] places.
#[must_use]
pub fn round3(value: f64) -> f64 {
    round_to(value, OUTPUT_DECIMALS)
}

/// Formats a length in millimetres (e.g., 12.5 -> "12.500 mm").
#[must_use]
pub fn format_mm(value: f64) -> String {
    format!("{value:.3} mm")
}

/// Formats a volume in cubic millimetres, switching to millilitres at 1000 mm³.
#[must_use]
pub fn format_volume(mm3: f64) -> String {
    if mm3.abs() >= 1000.0 {
        format!("{:.3} mm³ ({:.3} mL)", mm3, mm3 / 1000.0)
    } else {
        format!("{mm3:.3} mm³")
    }
}

/// Returns the final path component as a String, or the full path when there
/// is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-1.23449), -1.234);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round3(7.0), 7.0);
    }

    #[test]
    fn test_format_mm() {
        assert_eq!(format_mm(5.0), "5.000 mm");
        assert_eq!(format_mm(0.12345), "0.123 mm");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(2.0), "2.000 mm³");
        assert_eq!(format_volume(1500.0), "1500.000 mm³ (1.500 mL)");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/data/sweep_a")), "sweep_a");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
