//! Segment intersection and hover hit testing.
//!
//! Both tests are coordinate-space agnostic; callers decide whether they run
//! on canvas pixels or data units.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::{Point, Segment};

/// Default band on the slope difference used by `point_near_line`.
pub const SLOPE_TOLERANCE: f64 = 0.1;

/// Axis-aligned bounds of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn of_segment(segment: &Segment) -> Self {
        Self {
            min_x: segment.x1.min(segment.x2),
            min_y: segment.y1.min(segment.y2),
            max_x: segment.x1.max(segment.x2),
            max_y: segment.y1.max(segment.y2),
        }
    }

    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.min_x > other.max_x
            || self.max_x < other.min_x
            || self.min_y > other.max_y
            || self.max_y < other.min_y
    }

    #[must_use]
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Interior test; points on the boundary are outside.
    #[must_use]
    pub fn contains_strict(&self, point: Point) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }
}

/// Crossing point of two segments.
///
/// Returns `None` for parallel or collinear segments (overlaps included), when
/// the crossing lies at or behind either segment's start, and when the point
/// is not strictly inside at least one of the two bounding boxes. Touching
/// endpoints therefore never count.
#[must_use]
pub fn intersect(a: &Segment, b: &Segment) -> Option<Point> {
    let box_a = BoundingBox::of_segment(a);
    let box_b = BoundingBox::of_segment(b);
    if box_a.is_disjoint(&box_b) {
        return None;
    }

    let denominator = (b.y2 - b.y1) * (a.x2 - a.x1) - (b.x2 - b.x1) * (a.y2 - a.y1);
    if denominator == 0.0 {
        return None;
    }

    let ua = ((b.x2 - b.x1) * (a.y1 - b.y1) - (b.y2 - b.y1) * (a.x1 - b.x1)) / denominator;
    let ub = ((a.x2 - a.x1) * (a.y1 - b.y1) - (a.y2 - a.y1) * (a.x1 - b.x1)) / denominator;
    if !(ua > 0.0 && ub > 0.0) {
        return None;
    }

    let point = Point::new(a.x1 + ua * (a.x2 - a.x1), a.y1 + ua * (a.y2 - a.y1));
    if box_a.contains_strict(point) || box_b.contains_strict(point) {
        Some(point)
    } else {
        None
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Cheap hover test comparing slopes instead of distances.
///
/// The point must sit inside the segment's bounding box (edges included); the
/// slope from the segment start to the point and the segment slope, both
/// rounded to three decimals, may differ by at most `tolerance`. Vertical
/// segments have no finite slope and never match.
#[must_use]
pub fn point_near_line(point: Point, segment: &Segment, tolerance: f64) -> bool {
    if !BoundingBox::of_segment(segment).contains_inclusive(point) {
        return false;
    }

    let point_slope = round_to_thousandths((point.y - segment.y1) / (point.x - segment.x1));
    let segment_slope =
        round_to_thousandths((segment.y2 - segment.y1) / (segment.x2 - segment.x1));
    let error = (segment_slope - point_slope).abs();
    error - tolerance <= f64::EPSILON
}

/// Euclidean distance from `point` to the closest point of `segment`.
#[must_use]
pub fn distance_to_segment(point: Point, segment: &Segment) -> f64 {
    let dx = segment.x2 - segment.x1;
    let dy = segment.y2 - segment.y1;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return (point.x - segment.x1).hypot(point.y - segment.y1);
    }

    let t = (((point.x - segment.x1) * dx + (point.y - segment.y1) * dy) / length_sq)
        .clamp(0.0, 1.0);
    let closest_x = segment.x1 + t * dx;
    let closest_y = segment.y1 + t * dy;
    (point.x - closest_x).hypot(point.y - closest_y)
}

/// Hover hit-test flavour.
///
/// `SlopeBand` is the established behaviour; `PerpendicularDistance` is an
/// opt-in change that also works on near-vertical segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitTest {
    SlopeBand { tolerance: f64 },
    PerpendicularDistance { tolerance_px: f64 },
}

impl Default for HitTest {
    fn default() -> Self {
        Self::SlopeBand {
            tolerance: SLOPE_TOLERANCE,
        }
    }
}

impl HitTest {
    #[must_use]
    pub fn hits(self, point: Point, segment: &Segment) -> bool {
        match self {
            Self::SlopeBand { tolerance } => point_near_line(point, segment, tolerance),
            Self::PerpendicularDistance { tolerance_px } => {
                distance_to_segment(point, segment) <= tolerance_px
            }
        }
    }
}

/// Crossing of two segments, identified by their indices in the scanned slice
/// (`first < second`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictPoint {
    pub point: Point,
    pub first: usize,
    pub second: usize,
}

fn conflicts_of(segments: &[Segment], first: usize) -> Vec<ConflictPoint> {
    let segment = &segments[first];
    segments[first + 1..]
        .iter()
        .enumerate()
        .filter_map(|(offset, other)| {
            intersect(segment, other).map(|point| ConflictPoint {
                point,
                first,
                second: first + 1 + offset,
            })
        })
        .collect()
}

/// Tests every unordered pair once, ordered by `(first, second)`.
#[must_use]
pub fn detect_conflicts(segments: &[Segment]) -> Vec<ConflictPoint> {
    #[cfg(feature = "parallel-conflicts")]
    let conflicts: Vec<ConflictPoint> = {
        use rayon::prelude::*;

        (0..segments.len())
            .into_par_iter()
            .map(|first| conflicts_of(segments, first))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    };

    #[cfg(not(feature = "parallel-conflicts"))]
    let conflicts: Vec<ConflictPoint> = (0..segments.len())
        .flat_map(|first| conflicts_of(segments, first))
        .collect();

    trace!(
        segments = segments.len(),
        conflicts = conflicts.len(),
        "pairwise conflict scan"
    );
    conflicts
}

/// Axis-aligned rectangle, e.g. a resumption area on the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges in scan order: left, bottom, right, top.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        let left = self.x;
        let right = self.x + self.width;
        let near = self.y;
        let far = self.y + self.height;
        [
            Segment::new(left, far, left, near),
            Segment::new(right, far, left, far),
            Segment::new(right, near, right, far),
            Segment::new(left, near, right, near),
        ]
    }

    #[must_use]
    pub fn map_corners(&self, map: impl Fn(Point) -> Point) -> Self {
        let a = map(Point::new(self.x, self.y));
        let b = map(Point::new(self.x + self.width, self.y + self.height));
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }
}

/// A segment crossing the boundary of an area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaConflict {
    pub point: Point,
    pub area: usize,
    pub segment: usize,
}

/// Reports at most one boundary crossing per (area, segment) pair: the first
/// edge in `Rect::edges` order that the segment crosses.
#[must_use]
pub fn detect_area_conflicts(areas: &[Rect], segments: &[Segment]) -> Vec<AreaConflict> {
    let mut conflicts = Vec::new();
    for (area_index, area) in areas.iter().enumerate() {
        let edges = area.edges();
        for (segment_index, segment) in segments.iter().enumerate() {
            if let Some(point) = edges.iter().find_map(|edge| intersect(edge, segment)) {
                conflicts.push(AreaConflict {
                    point,
                    area: area_index,
                    segment: segment_index,
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::round_to_thousandths;

    #[test]
    fn rounding_keeps_infinities() {
        assert_eq!(round_to_thousandths(1.23456), 1.235);
        assert!(round_to_thousandths(f64::INFINITY).is_infinite());
        assert!(round_to_thousandths(f64::NAN).is_nan());
    }
}
