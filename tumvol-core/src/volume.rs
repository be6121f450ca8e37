// ============================================================================
// tumvol-core/src/volume.rs
// ============================================================================
//
// VOLUME INTEGRATION: Trapezoidal Rule Over Annotated Frames
//
// The volume between two consecutive annotated frames is the mean of their
// areas times the physical distance between them. Distances come from the
// actual frame-index gaps, so irregular annotation spacing is handled
// without resampling.
//
// UNITS:
// Areas are in pixel² and the frame distance is already in mm, so the raw
// integral is in pixel²·mm. Dividing once by ratio² converts pixel² to mm²
// and yields mm³.
//
// AI-ASSISTANT-INFO: Trapezoidal volume integration

// ---- Internal crate imports ----
use crate::calibration::Calibration;
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::debug;
use serde::Serialize;

/// Output of the trapezoidal integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeEstimate {
    /// Raw integral, pixel² × mm.
    pub volume_px2mm: f64,
    pub volume_mm3: f64,
}

/// Integrates `areas` (pixel²) over ascending `frame_indices`.
///
/// Needs at least two frames; a single cross-section has no volume.
pub fn integrate_volume(
    frame_indices: &[u32],
    areas: &[f64],
    calibration: &Calibration,
) -> CoreResult<VolumeEstimate> {
    if frame_indices.len() != areas.len() {
        return Err(CoreError::InvalidInput(format!(
            "{} frame indices but {} areas",
            frame_indices.len(),
            areas.len()
        )));
    }
    if frame_indices.len() < 2 {
        return Err(CoreError::InsufficientData(format!(
            "volume needs at least 2 annotated frames, got {}",
            frame_indices.len()
        )));
    }
    if let Some(pair) = frame_indices.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(CoreError::InvalidInput(format!(
            "frame indices must be strictly ascending, found {} followed by {}",
            pair[0], pair[1]
        )));
    }

    let slice_thickness = calibration.slice_thickness_mm();
    let volume_px2mm: f64 = frame_indices
        .windows(2)
        .zip(areas.windows(2))
        .map(|(frames, pair)| {
            let distance_mm = f64::from(frames[1] - frames[0]) * slice_thickness;
            (pair[0] + pair[1]) / 2.0 * distance_mm
        })
        .sum();

    let ratio = calibration.pixels_per_mm();
    let volume_mm3 = volume_px2mm / (ratio * ratio);
    debug!("Trapezoidal volume: {volume_px2mm:.3} px²·mm -> {volume_mm3:.3} mm³");

    Ok(VolumeEstimate {
        volume_px2mm,
        volume_mm3,
    })
}
