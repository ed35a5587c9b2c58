use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

use super::XMonotoneLinear;

/// A bounded line segment between two points.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if both endpoints coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at ({}, {})",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Converts the segment into its single x-monotone piece, oriented left to right
    /// (bottom to top when vertical).
    #[must_use]
    pub fn to_x_monotone(&self, tol: f64) -> XMonotoneLinear {
        let (a, b) = (self.start, self.end);
        if (b.x - a.x).abs() < tol {
            return XMonotoneLinear::vertical(a.x, a.y.min(b.y), a.y.max(b.y));
        }
        let (left, right) = if a.x < b.x { (a, b) } else { (b, a) };
        let slope = (right.y - left.y) / (right.x - left.x);
        let intercept = left.y - slope * left.x;
        XMonotoneLinear::non_vertical(slope, intercept, left.x, right.x)
    }
}
