// ============================================================================
// tumvol-core/src/pipeline.rs
// ============================================================================
//
// MEASUREMENT PIPELINE: Loader -> Metrics -> Aggregator / Integrator
//
// This module runs the full measurement for one sweep. Data only flows
// forward: annotations are loaded, each frame is measured, then the
// per-frame metrics are reduced and integrated into a VolumeResult.
//
// KEY COMPONENTS:
// - VolumeResult: Full-precision terminal output of a run
// - Measurement: The reported record, rounded to three decimals
// - measure / measure_sources: Pipeline entry points
//
// AI-ASSISTANT-INFO: Single-sweep measurement pipeline

// ---- Internal crate imports ----
use crate::aggregate::{aggregate_frame_metrics, sweep_length_mm};
use crate::annotation::{AnnotationSet, DuplicateFramePolicy};
use crate::calibration::Calibration;
use crate::error::CoreResult;
use crate::loader::{AnnotationSource, load_annotations};
use crate::metrics::{FrameMetrics, compute_frame_metrics};
use crate::utils::round3;
use crate::volume::integrate_volume;

// ---- External crate imports ----
use log::{debug, info};
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::collections::BTreeMap;

/// Terminal output of a measurement run, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeResult {
    /// Raw trapezoidal integral before unit conversion, pixel² × mm.
    pub volume_px2mm: f64,
    pub volume_mm3: f64,
    pub max_width_mm: f64,
    pub avg_width_mm: f64,
    pub max_depth_mm: f64,
    pub avg_depth_mm: f64,
    pub length_mm: f64,
    pub frame_count: usize,
    /// Per-frame metrics the aggregates were computed from.
    pub frames: BTreeMap<u32, FrameMetrics>,
}

/// The reported measurement: every value rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub volume_mm3: f64,
    pub max_width_mm: f64,
    pub avg_width_mm: f64,
    pub max_depth_mm: f64,
    pub avg_depth_mm: f64,
    pub length_mm: f64,
}

impl VolumeResult {
    pub fn rounded(&self) -> Measurement {
        Measurement {
            volume_mm3: round3(self.volume_mm3),
            max_width_mm: round3(self.max_width_mm),
            avg_width_mm: round3(self.avg_width_mm),
            max_depth_mm: round3(self.max_depth_mm),
            avg_depth_mm: round3(self.avg_depth_mm),
            length_mm: round3(self.length_mm),
        }
    }
}

/// Measures an annotation set.
///
/// Fails with `InsufficientData` for fewer than two annotated frames.
pub fn measure(annotations: &AnnotationSet, calibration: &Calibration) -> CoreResult<VolumeResult> {
    let frame_indices = annotations.frame_indices();
    debug!(
        "Measuring {} annotated frames at {} px/mm, {} mm per frame",
        frame_indices.len(),
        calibration.pixels_per_mm(),
        calibration.slice_thickness_mm()
    );

    let frames = compute_frame_metrics(annotations, calibration);
    let areas: Vec<f64> = frame_indices.iter().map(|f| frames[f].area_px2).collect();

    let dimensions = aggregate_frame_metrics(&frames)?;
    let length_mm = sweep_length_mm(&frame_indices, calibration.slice_thickness_mm())?;
    let volume = integrate_volume(&frame_indices, &areas, calibration)?;

    info!(
        "Estimated tumour volume: {:.3} px²·mm ({:.3} mm³)",
        volume.volume_px2mm, volume.volume_mm3
    );

    Ok(VolumeResult {
        volume_px2mm: volume.volume_px2mm,
        volume_mm3: volume.volume_mm3,
        max_width_mm: dimensions.max_width_mm,
        avg_width_mm: dimensions.avg_width_mm,
        max_depth_mm: dimensions.max_depth_mm,
        avg_depth_mm: dimensions.avg_depth_mm,
        length_mm,
        frame_count: frame_indices.len(),
        frames,
    })
}

/// Loads `sources` and measures them.
pub fn measure_sources<S: AnnotationSource>(
    sources: &[S],
    calibration: &Calibration,
    policy: DuplicateFramePolicy,
) -> CoreResult<VolumeResult> {
    let annotations = load_annotations(sources, policy)?;
    measure(&annotations, calibration)
}
