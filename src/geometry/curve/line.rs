use crate::error::Result;
use crate::math::{Point2, Vector2};

use super::XMonotoneLinear;

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < crate::math::TOLERANCE {
            return Err(crate::error::GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the non-vertical line `y = slope * x + intercept`.
    #[must_use]
    pub fn from_slope(slope: f64, intercept: f64) -> Self {
        let direction = Vector2::new(1.0, slope);
        Self {
            origin: Point2::new(0.0, intercept),
            direction: direction / direction.norm(),
        }
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Converts the line into its single x-monotone piece.
    #[must_use]
    pub fn to_x_monotone(&self, tol: f64) -> XMonotoneLinear {
        if self.direction.x.abs() < tol {
            return XMonotoneLinear::vertical(self.origin.x, f64::NEG_INFINITY, f64::INFINITY);
        }
        let slope = self.direction.y / self.direction.x;
        let intercept = self.origin.y - slope * self.origin.x;
        XMonotoneLinear::non_vertical(slope, intercept, f64::NEG_INFINITY, f64::INFINITY)
    }
}
