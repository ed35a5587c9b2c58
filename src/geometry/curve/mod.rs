mod line;
mod ray;
mod segment;

pub use line::Line;
pub use ray::Ray;
pub use segment::Segment;

use super::Polyline;

/// An x-monotone linear piece.
///
/// Non-vertical pieces lie on `y = slope * x + intercept` over `[x_min, x_max]`;
/// vertical pieces lie on `x = x` over `[y_min, y_max]`. Any bound may be
/// infinite, which makes that side of the piece unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XMonotoneLinear {
    /// A piece of a non-vertical line.
    NonVertical {
        slope: f64,
        intercept: f64,
        x_min: f64,
        x_max: f64,
    },
    /// A piece of a vertical line.
    Vertical { x: f64, y_min: f64, y_max: f64 },
}

impl XMonotoneLinear {
    /// Creates a non-vertical piece.
    #[must_use]
    pub fn non_vertical(slope: f64, intercept: f64, x_min: f64, x_max: f64) -> Self {
        Self::NonVertical {
            slope,
            intercept,
            x_min,
            x_max,
        }
    }

    /// Creates a vertical piece.
    #[must_use]
    pub fn vertical(x: f64, y_min: f64, y_max: f64) -> Self {
        Self::Vertical { x, y_min, y_max }
    }

    /// Returns whether the piece is vertical.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Returns the closed x-range covered by the piece.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        match *self {
            Self::NonVertical { x_min, x_max, .. } => (x_min, x_max),
            Self::Vertical { x, .. } => (x, x),
        }
    }

    /// Evaluates a non-vertical piece at `x`.
    ///
    /// Returns `None` for vertical pieces and for `x` outside the x-range.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Self::NonVertical {
                slope,
                intercept,
                x_min,
                x_max,
            } if x >= x_min && x <= x_max => Some(slope * x + intercept),
            _ => None,
        }
    }
}

/// A general linear curve, split into x-monotone pieces before enveloping.
#[derive(Debug, Clone)]
pub enum LinearCurve {
    Segment(Segment),
    Ray(Ray),
    Line(Line),
    Polyline(Polyline),
}

impl LinearCurve {
    /// Splits the curve into its x-monotone pieces.
    #[must_use]
    pub fn x_monotone_pieces(&self, tol: f64) -> Vec<XMonotoneLinear> {
        match self {
            Self::Segment(s) => vec![s.to_x_monotone(tol)],
            Self::Ray(r) => vec![r.to_x_monotone(tol)],
            Self::Line(l) => vec![l.to_x_monotone(tol)],
            Self::Polyline(p) => p.segments().map(|s| s.to_x_monotone(tol)).collect(),
        }
    }
}

impl From<Segment> for LinearCurve {
    fn from(s: Segment) -> Self {
        Self::Segment(s)
    }
}

impl From<Ray> for LinearCurve {
    fn from(r: Ray) -> Self {
        Self::Ray(r)
    }
}

impl From<Line> for LinearCurve {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<Polyline> for LinearCurve {
    fn from(p: Polyline) -> Self {
        Self::Polyline(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_at_respects_the_closed_range() {
        let piece = XMonotoneLinear::non_vertical(-1.0, 0.0, 0.0, 10.0);
        assert_eq!(piece.y_at(0.0), Some(0.0));
        assert_eq!(piece.y_at(10.0), Some(-10.0));
        assert_eq!(piece.y_at(10.5), None);
    }

    #[test]
    fn vertical_pieces_have_no_value() {
        let piece = XMonotoneLinear::vertical(5.0, -8.0, -6.0);
        assert!(piece.is_vertical());
        assert_eq!(piece.y_at(5.0), None);
        assert_eq!(piece.x_range(), (5.0, 5.0));
    }
}
