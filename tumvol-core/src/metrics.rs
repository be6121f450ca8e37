//! Per-frame measurements.
//!
//! Width and depth are the axis-aligned bounding-box extents of each contour,
//! converted to millimetres. They are not rotation invariant.

use crate::annotation::{Annotation, AnnotationSet};
use crate::calibration::Calibration;
use crate::geometry::{bounding_box, polygon_area};

use log::trace;
use serde::Serialize;

use std::collections::BTreeMap;

/// Measurements derived from one annotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameMetrics {
    /// Shoelace area of the closed contour, in pixel².
    pub area_px2: f64,
    pub width_mm: f64,
    pub depth_mm: f64,
}

/// Measures a single annotation.
pub fn measure_frame(annotation: &Annotation, calibration: &Calibration) -> FrameMetrics {
    let points = annotation.points();
    let area_px2 = polygon_area(points);
    // Annotations always hold at least three points
    let (width_px, depth_px) = bounding_box(points)
        .map(|bb| (bb.width(), bb.depth()))
        .unwrap_or_default();

    FrameMetrics {
        area_px2,
        width_mm: calibration.px_to_mm(width_px),
        depth_mm: calibration.px_to_mm(depth_px),
    }
}

/// Measures every frame of the set, keyed by frame index.
pub fn compute_frame_metrics(
    annotations: &AnnotationSet,
    calibration: &Calibration,
) -> BTreeMap<u32, FrameMetrics> {
    annotations
        .iter()
        .map(|annotation| {
            let metrics = measure_frame(annotation, calibration);
            trace!(
                "Frame {}: area {:.3} px², width {:.3} mm, depth {:.3} mm",
                annotation.frame_index(),
                metrics.area_px2,
                metrics.width_mm,
                metrics.depth_mm
            );
            (annotation.frame_index(), metrics)
        })
        .collect()
}
