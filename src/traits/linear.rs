use std::cmp::Ordering;

use crate::geometry::{LinearCurve, XMonotoneLinear};
use crate::math::{cmp_tol, line_line_crossing_x, Point2, TOLERANCE};

use super::{EnvelopeKind, EnvelopeTraits, IntervalComparison};

/// Predicates for segments, rays, lines and polylines over `f64`.
///
/// All comparisons treat values within `tolerance` as equal.
#[derive(Debug, Clone, Copy)]
pub struct LinearTraits {
    tolerance: f64,
}

impl Default for LinearTraits {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
        }
    }
}

impl LinearTraits {
    /// Creates the predicates with the global tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom comparison tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether a non-vertical piece is defined on the whole closed range `[lo, hi]`.
    fn covers(&self, xcv: &XMonotoneLinear, lo: f64, hi: f64) -> bool {
        let (x_min, x_max) = xcv.x_range();
        cmp_tol(x_min, lo, self.tolerance) != Ordering::Greater
            && cmp_tol(hi, x_max, self.tolerance) != Ordering::Greater
    }
}

fn supporting_line(xcv: &XMonotoneLinear) -> Option<(f64, f64)> {
    match *xcv {
        XMonotoneLinear::NonVertical {
            slope, intercept, ..
        } => Some((slope, intercept)),
        XMonotoneLinear::Vertical { .. } => None,
    }
}

fn from_ordering(ord: Ordering) -> IntervalComparison<Point2> {
    match ord {
        Ordering::Less => IntervalComparison::Smaller,
        Ordering::Greater => IntervalComparison::Larger,
        Ordering::Equal => IntervalComparison::Equal,
    }
}

impl EnvelopeTraits for LinearTraits {
    type Point = Point2;
    type Curve = LinearCurve;
    type XCurve = XMonotoneLinear;

    fn make_x_monotone(&self, curve: &LinearCurve) -> Vec<XMonotoneLinear> {
        curve.x_monotone_pieces(self.tolerance)
    }

    fn is_vertical(&self, xcv: &XMonotoneLinear) -> bool {
        xcv.is_vertical()
    }

    fn min_end(&self, xcv: &XMonotoneLinear) -> Option<Point2> {
        match *xcv {
            XMonotoneLinear::NonVertical {
                slope,
                intercept,
                x_min,
                ..
            } => x_min
                .is_finite()
                .then(|| Point2::new(x_min, slope * x_min + intercept)),
            XMonotoneLinear::Vertical { x, y_min, .. } => {
                y_min.is_finite().then(|| Point2::new(x, y_min))
            }
        }
    }

    fn max_end(&self, xcv: &XMonotoneLinear) -> Option<Point2> {
        match *xcv {
            XMonotoneLinear::NonVertical {
                slope,
                intercept,
                x_max,
                ..
            } => x_max
                .is_finite()
                .then(|| Point2::new(x_max, slope * x_max + intercept)),
            XMonotoneLinear::Vertical { x, y_max, .. } => {
                y_max.is_finite().then(|| Point2::new(x, y_max))
            }
        }
    }

    fn extreme_end(&self, vertical: &XMonotoneLinear, kind: EnvelopeKind) -> Point2 {
        match (*vertical, kind) {
            (XMonotoneLinear::Vertical { x, y_min, .. }, EnvelopeKind::Lower) => {
                Point2::new(x, y_min)
            }
            (XMonotoneLinear::Vertical { x, y_max, .. }, EnvelopeKind::Upper) => {
                Point2::new(x, y_max)
            }
            // Only meaningful for verticals; fall back to the left end.
            (
                XMonotoneLinear::NonVertical {
                    slope,
                    intercept,
                    x_min,
                    ..
                },
                _,
            ) => Point2::new(x_min, slope * x_min + intercept),
        }
    }

    fn compare_x(&self, p: &Point2, q: &Point2) -> Ordering {
        cmp_tol(p.x, q.x, self.tolerance)
    }

    fn compare_xy(&self, p: &Point2, q: &Point2) -> Ordering {
        self.compare_x(p, q)
            .then_with(|| cmp_tol(p.y, q.y, self.tolerance))
    }

    fn compare_y_at_x(&self, p: &Point2, xcv: &XMonotoneLinear) -> Option<Ordering> {
        let (slope, intercept) = supporting_line(xcv)?;
        if !self.covers(xcv, p.x, p.x) {
            return None;
        }
        Some(cmp_tol(p.y, slope * p.x + intercept, self.tolerance))
    }

    fn compare_over(
        &self,
        c1: &XMonotoneLinear,
        c2: &XMonotoneLinear,
        from: Option<&Point2>,
        to: Option<&Point2>,
    ) -> Option<IntervalComparison<Point2>> {
        let tol = self.tolerance;
        let (a1, b1) = supporting_line(c1)?;
        let (a2, b2) = supporting_line(c2)?;
        let lo = from.map_or(f64::NEG_INFINITY, |p| p.x);
        let hi = to.map_or(f64::INFINITY, |p| p.x);
        if cmp_tol(lo, hi, tol) != Ordering::Less
            || !self.covers(c1, lo, hi)
            || !self.covers(c2, lo, hi)
        {
            return None;
        }

        let Some(x) = line_line_crossing_x(a1, b1, a2, b2, tol) else {
            // Parallel supporting lines: one is above the other everywhere, or they coincide.
            return Some(from_ordering(cmp_tol(b1, b2, tol)));
        };

        // Left of the crossing the first line is above iff it has the smaller slope.
        let (before, after) = if a1 > a2 {
            (Ordering::Less, Ordering::Greater)
        } else {
            (Ordering::Greater, Ordering::Less)
        };

        if x <= lo {
            return Some(from_ordering(after));
        }
        if x >= hi {
            return Some(from_ordering(before));
        }
        // A crossing counts as lying on an end only where the lines tie in y,
        // matching `compare_y_at_x` at that end.
        let ties_at = |e: f64| {
            e.is_finite() && cmp_tol(a1 * e + b1, a2 * e + b2, tol) == Ordering::Equal
        };
        let relation = match (ties_at(lo), ties_at(hi)) {
            (true, true) => IntervalComparison::Equal,
            (true, false) => from_ordering(after),
            (false, true) => from_ordering(before),
            (false, false) => IntervalComparison::Meets {
                point: Point2::new(x, a1 * x + b1),
                before,
                after,
            },
        };
        Some(relation)
    }
}
