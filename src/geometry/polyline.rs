use crate::math::{Point2, TOLERANCE};

use super::curve::Segment;

/// An open chain of straight segments through a list of points.
///
/// Consecutive duplicate points are allowed and produce no segment.
#[derive(Debug, Clone)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    /// Creates a `Polyline` through the given points.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// Iterates over the non-degenerate segments of the chain.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .filter(|w| (w[1] - w[0]).norm() >= TOLERANCE)
            .filter_map(|w| Segment::new(w[0], w[1]).ok())
    }
}
