//! Planar polygon helpers shared by every pipeline stage.
//!
//! Annotations arrive as ordered pixel-space point sequences. The traversal
//! order defines the boundary, so nothing here sorts points. Polygons are
//! treated as closed: [`close_polygon`] appends the first point when the
//! sequence does not already end on it.

use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};

use std::borrow::Cow;

/// A 2-D point in pixel space.
///
/// Serialized as a two-element array `[x, y]` to match annotation records.
/// Arrays of any other length fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            &[x, y] => Ok(Self { x, y }),
            other => Err(format!("expected an [x, y] pair, got {} values", other.len())),
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extents of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Horizontal extent, in the units of the points.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent, in the units of the points.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Returns the sequence closed on its first point.
///
/// Uses exact equality: annotation coordinates are integral pixel positions.
/// An already-closed (or empty) sequence is returned borrowed and untouched,
/// so applying this twice is the same as applying it once.
pub fn close_polygon(points: &[Point]) -> Cow<'_, [Point]> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if first != last => {
            let mut closed = Vec::with_capacity(points.len() + 1);
            closed.extend_from_slice(points);
            closed.push(*first);
            Cow::Owned(closed)
        }
        _ => Cow::Borrowed(points),
    }
}

/// Unsigned polygon area by the shoelace formula, in squared point units.
///
/// The sequence is closed first. The result does not depend on winding
/// order. Self-intersecting input gives a number, just not a meaningful one.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    let closed = close_polygon(points);
    let n = closed.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let prev = closed[(i + n - 1) % n];
        let cur = closed[i];
        sum += cur.x * prev.y - cur.y * prev.x;
    }
    0.5 * sum.abs()
}

/// Axis-aligned bounding box of the points, or `None` when empty.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let init = BoundingBox {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    Some(points.iter().skip(1).fold(init, |bb, p| BoundingBox {
        min_x: bb.min_x.min(p.x),
        max_x: bb.max_x.max(p.x),
        min_y: bb.min_y.min(p.y),
        max_y: bb.max_y.max(p.y),
    }))
}

/// Euclidean distance between two points.
#[must_use]
pub fn line_length(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Resamples a point path to `target` points spaced evenly by arc length.
///
/// Positions are linearly interpolated along the path in its given order;
/// the path is not closed first. The first and last output points coincide
/// with the first and last input points.
pub fn resample_polygon(points: &[Point], target: usize) -> CoreResult<Vec<Point>> {
    if points.len() < 2 {
        return Err(CoreError::MalformedAnnotation {
            identifier: "resample".to_string(),
            reason: format!("need at least 2 points to resample, got {}", points.len()),
        });
    }
    if target < 2 {
        return Err(CoreError::InvalidInput(format!(
            "resample target must be at least 2, got {target}"
        )));
    }

    // Cumulative distance at each input vertex
    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for pair in points.windows(2) {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + line_length(pair[0], pair[1]));
    }
    let total = cumulative[cumulative.len() - 1];

    if total == 0.0 {
        return Ok(vec![points[0]; target]);
    }

    let step = total / (target - 1) as f64;
    let mut resampled = Vec::with_capacity(target);
    let mut segment = 0;
    for k in 0..target {
        let distance = if k == target - 1 { total } else { step * k as f64 };

        while segment < points.len() - 2 && cumulative[segment + 1] < distance {
            segment += 1;
        }

        let start = cumulative[segment];
        let span = cumulative[segment + 1] - start;
        let t = if span > 0.0 { (distance - start) / span } else { 0.0 };
        let a = points[segment];
        let b = points[segment + 1];
        resampled.push(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
    }

    Ok(resampled)
}
