use std::cmp::Ordering;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Compares two scalars, treating values within `tol` of each other as equal.
///
/// Infinities of the same sign compare equal. NaN compares equal to
/// everything, which callers never feed in.
#[must_use]
pub fn cmp_tol(a: f64, b: f64, tol: f64) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let diff = a - b;
    if diff > tol {
        Ordering::Greater
    } else if diff < -tol {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Returns the x-coordinate of a point on the supporting line `y = slope * x + intercept`
/// where it meets the line `y = other_slope * x + other_intercept`.
///
/// Returns `None` for (near-)parallel lines.
#[must_use]
pub fn line_line_crossing_x(
    slope: f64,
    intercept: f64,
    other_slope: f64,
    other_intercept: f64,
    tol: f64,
) -> Option<f64> {
    let ds = slope - other_slope;
    if ds.abs() < tol {
        return None;
    }
    Some((other_intercept - intercept) / ds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_tol_absorbs_noise() {
        assert_eq!(cmp_tol(1.0, 1.0 + 1e-12, TOLERANCE), Ordering::Equal);
        assert_eq!(cmp_tol(1.0, 1.1, TOLERANCE), Ordering::Less);
        assert_eq!(cmp_tol(2.0, 1.0, TOLERANCE), Ordering::Greater);
    }

    #[test]
    fn cmp_tol_handles_infinities() {
        assert_eq!(
            cmp_tol(f64::NEG_INFINITY, f64::NEG_INFINITY, TOLERANCE),
            Ordering::Equal
        );
        assert_eq!(cmp_tol(f64::NEG_INFINITY, -1e300, TOLERANCE), Ordering::Less);
        assert_eq!(cmp_tol(f64::INFINITY, 0.0, TOLERANCE), Ordering::Greater);
    }

    #[test]
    fn crossing_of_opposite_slopes() {
        // y = -x and y = x - 10 meet at x = 5.
        let x = line_line_crossing_x(-1.0, 0.0, 1.0, -10.0, TOLERANCE);
        assert!((x.unwrap_or(f64::NAN) - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_lines_never_cross() {
        assert!(line_line_crossing_x(2.0, 0.0, 2.0, 1.0, TOLERANCE).is_none());
    }
}
