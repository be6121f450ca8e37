//! Annotation data model.
//!
//! An [`Annotation`] is one closed tumour contour on one frame. The core never
//! mutates annotations; closure is applied transiently by the geometry
//! helpers. An [`AnnotationSet`] keeps annotations ordered by ascending frame
//! index, which is the order every downstream stage iterates in.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{Point, close_polygon};

use log::warn;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Smallest number of vertices that encloses an area.
pub const MIN_POLYGON_POINTS: usize = 3;

/// On-disk annotation record: `{ "points": [[x0, y0], [x1, y1], ...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub points: Vec<Point>,
}

/// A validated contour on a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    frame_index: u32,
    points: Vec<Point>,
}

impl Annotation {
    /// Builds an annotation, rejecting fewer than three points or any
    /// non-finite coordinate.
    pub fn new(frame_index: u32, points: Vec<Point>) -> CoreResult<Self> {
        let identifier = format!("frame {frame_index}");
        validate_points(&identifier, &points)?;
        Ok(Self { frame_index, points })
    }

    /// Builds an annotation from a decoded record, using `identifier` in errors.
    pub fn from_record(
        identifier: &str,
        frame_index: u32,
        record: AnnotationRecord,
    ) -> CoreResult<Self> {
        validate_points(identifier, &record.points)?;
        Ok(Self {
            frame_index,
            points: record.points,
        })
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Points in their input traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Record holding the closed polygon, as written back to disk.
    pub fn to_closed_record(&self) -> AnnotationRecord {
        AnnotationRecord {
            points: close_polygon(&self.points).into_owned(),
        }
    }
}

fn validate_points(identifier: &str, points: &[Point]) -> CoreResult<()> {
    if points.len() < MIN_POLYGON_POINTS {
        return Err(CoreError::MalformedAnnotation {
            identifier: identifier.to_string(),
            reason: format!(
                "expected at least {MIN_POLYGON_POINTS} points, got {}",
                points.len()
            ),
        });
    }
    if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(CoreError::MalformedAnnotation {
            identifier: identifier.to_string(),
            reason: format!("point {i} has a non-finite coordinate ({}, {})", p.x, p.y),
        });
    }
    Ok(())
}

/// What to do when two sources carry the same frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateFramePolicy {
    /// Keep the annotation read last and log a warning.
    #[default]
    Overwrite,
    /// Fail with [`CoreError::DuplicateFrame`].
    Reject,
}

/// Annotations keyed by frame index, iterated in ascending frame order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    frames: BTreeMap<u32, Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an annotation, resolving frame collisions per `policy`.
    pub fn insert(
        &mut self,
        annotation: Annotation,
        policy: DuplicateFramePolicy,
    ) -> CoreResult<()> {
        let frame = annotation.frame_index();
        match self.frames.entry(frame) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(annotation);
            }
            btree_map::Entry::Occupied(mut slot) => match policy {
                DuplicateFramePolicy::Overwrite => {
                    warn!("Frame {frame} annotated more than once; keeping the last one read");
                    slot.insert(annotation);
                }
                DuplicateFramePolicy::Reject => return Err(CoreError::DuplicateFrame(frame)),
            },
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, frame_index: u32) -> Option<&Annotation> {
        self.frames.get(&frame_index)
    }

    /// Frame indices in ascending order.
    pub fn frame_indices(&self) -> Vec<u32> {
        self.frames.keys().copied().collect()
    }

    /// Annotations in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.frames.values()
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Annotation;
    type IntoIter = btree_map::Values<'a, u32, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.values()
    }
}

/// Extracts the frame index from an identifier such as `frame_0042.json`.
///
/// The index is the second `_`-delimited token with any extension removed.
pub fn parse_frame_index(identifier: &str) -> CoreResult<u32> {
    let token = identifier.split('_').nth(1).ok_or_else(|| {
        CoreError::Parse(format!(
            "'{identifier}' has no '_'-delimited frame index token"
        ))
    })?;
    let digits = token.split('.').next().unwrap_or(token);
    digits.parse::<u32>().map_err(|e| {
        CoreError::Parse(format!(
            "'{identifier}': frame index '{digits}' is not a non-negative integer ({e})"
        ))
    })
}
