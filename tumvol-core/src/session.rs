//! Annotation session state machine.
//!
//! Interactive annotation front-ends drive an [`AnnotationSession`] value
//! through its states instead of keeping ambient mutable fields:
//!
//! ```text
//! Idle --begin_stroke--> Drawing --finish_frame--> Idle
//! Idle --begin_calibration--> CalibrationPending --2nd click--> CalibrationDone
//! ```
//!
//! Every transition consumes the session and returns the next one, or
//! [`CoreError::InvalidTransition`] when the event does not apply to the
//! current state.

use crate::annotation::{Annotation, AnnotationSet, DuplicateFramePolicy};
use crate::calibration::{Calibration, ratio_from_reference_line};
use crate::error::{CoreError, CoreResult};
use crate::geometry::Point;

use log::{debug, info};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drawing,
    CalibrationPending,
    CalibrationDone,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Drawing { frame_index: u32, points: Vec<Point> },
    CalibrationPending { first_click: Option<Point> },
    CalibrationDone { pixels_per_mm: f64 },
}

/// Value-typed annotation session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSession {
    phase: Phase,
    annotations: AnnotationSet,
    reference_mm: f64,
    policy: DuplicateFramePolicy,
}

impl AnnotationSession {
    /// Starts an idle session calibrated against a reference line of
    /// `reference_mm` millimetres.
    pub fn new(reference_mm: f64, policy: DuplicateFramePolicy) -> Self {
        Self {
            phase: Phase::Idle,
            annotations: AnnotationSet::new(),
            reference_mm,
            policy,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Drawing { .. } => SessionState::Drawing,
            Phase::CalibrationPending { .. } => SessionState::CalibrationPending,
            Phase::CalibrationDone { .. } => SessionState::CalibrationDone,
        }
    }

    /// Annotations completed so far.
    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Points of the stroke in progress, empty outside `Drawing`.
    pub fn current_points(&self) -> &[Point] {
        match &self.phase {
            Phase::Drawing { points, .. } => points,
            _ => &[],
        }
    }

    fn invalid(self, event: &str) -> CoreError {
        CoreError::InvalidTransition(format!("{event} is not allowed in {:?}", self.state()))
    }

    /// Idle -> Drawing on `frame_index`.
    pub fn begin_stroke(self, frame_index: u32) -> CoreResult<Self> {
        match self.phase {
            Phase::Idle => Ok(Self {
                phase: Phase::Drawing {
                    frame_index,
                    points: Vec::new(),
                },
                ..self
            }),
            _ => Err(self.invalid("begin_stroke")),
        }
    }

    /// Appends a point to the stroke in progress.
    pub fn add_point(mut self, point: Point) -> CoreResult<Self> {
        match &mut self.phase {
            Phase::Drawing { points, .. } => {
                points.push(point);
                Ok(self)
            }
            _ => Err(self.invalid("add_point")),
        }
    }

    /// Discards the stroke in progress, staying in `Drawing`.
    pub fn undo(mut self) -> CoreResult<Self> {
        match &mut self.phase {
            Phase::Drawing { points, .. } => {
                points.clear();
                Ok(self)
            }
            _ => Err(self.invalid("undo")),
        }
    }

    /// Drawing -> Idle, storing the stroke as the frame's annotation.
    pub fn finish_frame(self) -> CoreResult<Self> {
        let Self {
            phase,
            mut annotations,
            reference_mm,
            policy,
        } = self;
        match phase {
            Phase::Drawing {
                frame_index,
                points,
            } => {
                let annotation = Annotation::new(frame_index, points)?;
                debug!(
                    "Frame {} annotated with {} points",
                    frame_index,
                    annotation.points().len()
                );
                annotations.insert(annotation, policy)?;
                Ok(Self {
                    phase: Phase::Idle,
                    annotations,
                    reference_mm,
                    policy,
                })
            }
            phase => Err(Self {
                phase,
                annotations,
                reference_mm,
                policy,
            }
            .invalid("finish_frame")),
        }
    }

    /// Idle -> CalibrationPending. Needs at least one finished annotation.
    pub fn begin_calibration(self) -> CoreResult<Self> {
        match self.phase {
            Phase::Idle if !self.annotations.is_empty() => Ok(Self {
                phase: Phase::CalibrationPending { first_click: None },
                ..self
            }),
            Phase::Idle => Err(CoreError::InsufficientData(
                "annotate at least one frame before calibrating".to_string(),
            )),
            _ => Err(self.invalid("begin_calibration")),
        }
    }

    /// Records a reference-line endpoint; the second click computes the ratio
    /// and moves to `CalibrationDone`.
    pub fn calibration_click(self, point: Point) -> CoreResult<Self> {
        match self.phase {
            Phase::CalibrationPending { first_click: None } => Ok(Self {
                phase: Phase::CalibrationPending {
                    first_click: Some(point),
                },
                ..self
            }),
            Phase::CalibrationPending {
                first_click: Some(first),
            } => {
                let pixels_per_mm = ratio_from_reference_line(first, point, self.reference_mm)?;
                info!("Calibration complete: {pixels_per_mm} px/mm");
                Ok(Self {
                    phase: Phase::CalibrationDone { pixels_per_mm },
                    ..self
                })
            }
            _ => Err(self.invalid("calibration_click")),
        }
    }

    /// Ends a calibrated session, yielding its annotations and calibration.
    pub fn into_results(self, slice_thickness_mm: f64) -> CoreResult<(AnnotationSet, Calibration)> {
        match self.phase {
            Phase::CalibrationDone { pixels_per_mm } => {
                let calibration = Calibration::new(pixels_per_mm, slice_thickness_mm)?;
                Ok((self.annotations, calibration))
            }
            _ => Err(self.invalid("into_results")),
        }
    }
}
