use crate::error::Result;
use crate::math::{Point2, Vector2};

use super::XMonotoneLinear;

/// A half-line starting at `origin` and extending along `direction`.
#[derive(Debug, Clone)]
pub struct Ray {
    origin: Point2,
    direction: Vector2,
}

impl Ray {
    /// Creates a new ray from an origin and direction.
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

    /// Returns the origin of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction of the ray.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Converts the ray into its single x-monotone piece.
    #[must_use]
    pub fn to_x_monotone(&self, tol: f64) -> XMonotoneLinear {
        let (ox, oy) = (self.origin.x, self.origin.y);
        if self.direction.x.abs() < tol {
            return if self.direction.y > 0.0 {
                XMonotoneLinear::vertical(ox, oy, f64::INFINITY)
            } else {
                XMonotoneLinear::vertical(ox, f64::NEG_INFINITY, oy)
            };
        }
        let slope = self.direction.y / self.direction.x;
        let intercept = oy - slope * ox;
        if self.direction.x > 0.0 {
            XMonotoneLinear::non_vertical(slope, intercept, ox, f64::INFINITY)
        } else {
            XMonotoneLinear::non_vertical(slope, intercept, f64::NEG_INFINITY, ox)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn leftward_ray_is_unbounded_on_the_left() {
        let ray = Ray::new(Point2::new(2.0, 1.0), Vector2::new(-1.0, 1.0)).unwrap();
        let piece = ray.to_x_monotone(TOLERANCE);
        assert_eq!(piece.x_range(), (f64::NEG_INFINITY, 2.0));
        assert!((piece.y_at(0.0).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn downward_ray_is_vertical() {
        let ray = Ray::new(Point2::new(2.0, 1.0), Vector2::new(0.0, -3.0)).unwrap();
        assert_eq!(
            ray.to_x_monotone(TOLERANCE),
            XMonotoneLinear::vertical(2.0, f64::NEG_INFINITY, 1.0)
        );
    }
}
