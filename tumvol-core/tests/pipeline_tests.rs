// tumvol-core/tests/pipeline_tests.rs
//
// End-to-end checks of the measurement pipeline through the public API.

use tumvol_core::*;

fn record(points: &[(f64, f64)]) -> AnnotationRecord {
    AnnotationRecord {
        points: points.iter().copied().map(Point::from).collect(),
    }
}

fn square_source(frame_index: u32, side: f64) -> InMemorySource {
    InMemorySource {
        identifier: format!("frame_{frame_index}"),
        frame_index,
        record: record(&[(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)]),
    }
}

#[test]
fn test_constant_cross_section_volume() -> CoreResult<()> {
    let sources = vec![square_source(0, 10.0), square_source(1, 10.0)];
    let calibration = Calibration::new(10.0, 2.0)?;

    let result = measure_sources(&sources, &calibration, DuplicateFramePolicy::Reject)?;
    assert_eq!(result.volume_px2mm, 200.0);
    assert_eq!(result.volume_mm3, 2.0);
    Ok(())
}

#[test]
fn test_non_uniform_spacing_volume() -> CoreResult<()> {
    let sources = vec![square_source(5, 10.0), square_source(1, 10.0), square_source(0, 10.0)];
    let calibration = Calibration::new(1.0, 1.0)?;

    let result = measure_sources(&sources, &calibration, DuplicateFramePolicy::Reject)?;
    assert_eq!(result.volume_px2mm, 500.0);
    assert_eq!(result.volume_mm3, 500.0);
    assert_eq!(result.length_mm, 5.0);
    Ok(())
}

#[test]
fn test_aggregates_from_rectangles() -> CoreResult<()> {
    // Widths 2, 4 and 6 mm at 1 px/mm
    let sources: Vec<InMemorySource> = [(0u32, 2.0), (2, 4.0), (4, 6.0)]
        .iter()
        .map(|&(frame_index, w)| InMemorySource {
            identifier: format!("rect_{frame_index}"),
            frame_index,
            record: record(&[(0.0, 0.0), (w, 0.0), (w, 1.0), (0.0, 1.0)]),
        })
        .collect();
    let calibration = Calibration::new(1.0, 0.5)?;

    let result = measure_sources(&sources, &calibration, DuplicateFramePolicy::Reject)?;
    assert_eq!(result.max_width_mm, 6.0);
    assert_eq!(result.avg_width_mm, 4.0);
    assert_eq!(result.max_depth_mm, 1.0);
    assert_eq!(result.avg_depth_mm, 1.0);
    assert_eq!(result.length_mm, 2.0);
    Ok(())
}

#[test]
fn test_length_over_gapped_frames() -> CoreResult<()> {
    assert_eq!(sweep_length_mm(&[0, 4, 10], 0.5)?, 5.0);
    Ok(())
}

#[test]
fn test_invalid_calibration_stops_before_metrics() {
    for ratio in [0.0, -4.0] {
        match Calibration::new(ratio, 1.0) {
            Err(CoreError::InvalidCalibration(_)) => {}
            other => panic!("Unexpected result for ratio {ratio}: {other:?}"),
        }
    }
}

#[test]
fn test_single_frame_volume_is_an_error() -> CoreResult<()> {
    let sources = vec![square_source(3, 10.0)];
    let calibration = Calibration::new(1.0, 1.0)?;

    match measure_sources(&sources, &calibration, DuplicateFramePolicy::Reject) {
        Err(CoreError::InsufficientData(_)) => Ok(()),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_winding_does_not_change_volume() -> CoreResult<()> {
    let ccw = vec![square_source(0, 10.0), square_source(2, 10.0)];
    let mut cw = ccw.clone();
    for source in &mut cw {
        source.record.points.reverse();
    }
    let calibration = Calibration::new(2.0, 1.0)?;

    let a = measure_sources(&ccw, &calibration, DuplicateFramePolicy::Reject)?;
    let b = measure_sources(&cw, &calibration, DuplicateFramePolicy::Reject)?;
    assert_eq!(a.volume_mm3, b.volume_mm3);
    assert_eq!(a.volume_mm3, 50.0);
    Ok(())
}

#[test]
fn test_session_results_feed_the_pipeline() -> CoreResult<()> {
    let mut session = AnnotationSession::new(DEFAULT_REFERENCE_LENGTH_MM, DuplicateFramePolicy::Reject);
    for frame in [0, 2] {
        session = session
            .begin_stroke(frame)?
            .add_point(Point::new(0.0, 0.0))?
            .add_point(Point::new(20.0, 0.0))?
            .add_point(Point::new(20.0, 20.0))?
            .add_point(Point::new(0.0, 20.0))?
            .finish_frame()?;
    }
    let session = session
        .begin_calibration()?
        .calibration_click(Point::new(0.0, 0.0))?
        .calibration_click(Point::new(50.0, 0.0))?;

    let (annotations, calibration) = session.into_results(1.0)?;
    let result = measure(&annotations, &calibration)?;

    // 400 px² at 10 px/mm is 4 mm², over 2 mm
    assert_eq!(result.volume_mm3, 8.0);
    assert_eq!(result.rounded().max_width_mm, 2.0);
    Ok(())
}
