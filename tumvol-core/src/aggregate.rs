//! Cross-frame reduction of per-frame metrics.

use crate::error::{CoreError, CoreResult};
use crate::metrics::FrameMetrics;

use serde::Serialize;

use std::collections::BTreeMap;

/// Maxima and unweighted means of width and depth over all annotated frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub max_width_mm: f64,
    pub avg_width_mm: f64,
    pub max_depth_mm: f64,
    pub avg_depth_mm: f64,
}

/// Reduces the per-frame metrics to a [`DimensionSummary`].
///
/// Frames count equally regardless of their spacing along the sweep.
pub fn aggregate_frame_metrics(
    metrics: &BTreeMap<u32, FrameMetrics>,
) -> CoreResult<DimensionSummary> {
    if metrics.is_empty() {
        return Err(CoreError::InsufficientData(
            "at least one annotated frame is needed to aggregate dimensions".to_string(),
        ));
    }

    let n = metrics.len() as f64;
    let mut max_width = f64::NEG_INFINITY;
    let mut max_depth = f64::NEG_INFINITY;
    let mut sum_width = 0.0;
    let mut sum_depth = 0.0;
    for m in metrics.values() {
        max_width = max_width.max(m.width_mm);
        max_depth = max_depth.max(m.depth_mm);
        sum_width += m.width_mm;
        sum_depth += m.depth_mm;
    }

    Ok(DimensionSummary {
        max_width_mm: max_width,
        avg_width_mm: sum_width / n,
        max_depth_mm: max_depth,
        avg_depth_mm: sum_depth / n,
    })
}

/// Antero-posterior length: distance between the first and last annotated
/// frames, gaps included.
pub fn sweep_length_mm(frame_indices: &[u32], slice_thickness_mm: f64) -> CoreResult<f64> {
    let first = frame_indices.iter().min();
    let last = frame_indices.iter().max();
    match (first, last) {
        (Some(&first), Some(&last)) => Ok(f64::from(last - first) * slice_thickness_mm),
        _ => Err(CoreError::InsufficientData(
            "at least one annotated frame is needed to measure length".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(widths: &[f64], depths: &[f64]) -> BTreeMap<u32, FrameMetrics> {
        widths
            .iter()
            .zip(depths)
            .enumerate()
            .map(|(i, (&width_mm, &depth_mm))| {
                (
                    i as u32,
                    FrameMetrics {
                        area_px2: 0.0,
                        width_mm,
                        depth_mm,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_aggregate_max_and_mean() {
        let summary = aggregate_frame_metrics(&frames(&[2.0, 4.0, 6.0], &[1.0, 1.0, 4.0])).unwrap();
        assert_eq!(summary.max_width_mm, 6.0);
        assert_eq!(summary.avg_width_mm, 4.0);
        assert_eq!(summary.max_depth_mm, 4.0);
        assert_eq!(summary.avg_depth_mm, 2.0);
    }

    #[test]
    fn test_aggregate_single_frame() {
        let summary = aggregate_frame_metrics(&frames(&[3.5], &[1.5])).unwrap();
        assert_eq!(summary.max_width_mm, 3.5);
        assert_eq!(summary.avg_width_mm, 3.5);
    }

    #[test]
    fn test_aggregate_empty_fails() {
        assert!(matches!(
            aggregate_frame_metrics(&BTreeMap::new()),
            Err(CoreError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_sweep_length() {
        assert_eq!(sweep_length_mm(&[0, 3, 10], 0.5).unwrap(), 5.0);
        assert_eq!(sweep_length_mm(&[7], 2.0).unwrap(), 0.0);
        assert!(sweep_length_mm(&[], 1.0).is_err());
    }
}
