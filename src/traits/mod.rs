mod linear;

pub use linear::LinearTraits;

use std::cmp::Ordering;
use std::fmt::Debug;

/// Which envelope is computed: the pointwise minimum or maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnvelopeKind {
    #[default]
    Lower,
    Upper,
}

impl EnvelopeKind {
    /// Orients a y-comparison so that `Less` means "more extreme" for this
    /// envelope: smaller y for lower envelopes, larger y for upper ones.
    #[must_use]
    pub fn orient(self, ord: Ordering) -> Ordering {
        match self {
            Self::Lower => ord,
            Self::Upper => ord.reverse(),
        }
    }
}

/// Relation between two x-monotone curves over an open x-interval on which
/// both are defined. `Smaller` means the first curve lies below.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalComparison<P> {
    Smaller,
    Larger,
    /// The curves coincide over the whole interval.
    Equal,
    /// The curves meet at `point`, the leftmost meeting strictly inside the
    /// interval. `before` and `after` give the order of the first curve
    /// relative to the second immediately to the left and right of it;
    /// `Ordering::Equal` on either side reports a partial overlap.
    Meets {
        point: P,
        before: Ordering,
        after: Ordering,
    },
}

/// Geometric predicates and constructions for one curve family.
///
/// The envelope algorithm treats this purely as a decision oracle: all
/// arithmetic on points and curves happens behind these methods. A single
/// instance is shared read-only across the whole recursive computation.
pub trait EnvelopeTraits: Sync {
    /// A point in the plane.
    type Point: Clone + Debug + Send + Sync;
    /// A general curve, possibly not x-monotone.
    type Curve;
    /// An x-monotone curve or a vertical curve.
    type XCurve: Clone + Debug + Send + Sync;

    /// Splits a curve into x-monotone pieces.
    fn make_x_monotone(&self, curve: &Self::Curve) -> Vec<Self::XCurve>;

    /// Returns whether the piece is vertical.
    fn is_vertical(&self, xcv: &Self::XCurve) -> bool;

    /// Returns the left endpoint (bottom for verticals), or `None` if unbounded.
    fn min_end(&self, xcv: &Self::XCurve) -> Option<Self::Point>;

    /// Returns the right endpoint (top for verticals), or `None` if unbounded.
    fn max_end(&self, xcv: &Self::XCurve) -> Option<Self::Point>;

    /// Returns the most extreme point of a vertical piece for the given
    /// envelope kind. For a piece unbounded in that direction the point lies
    /// at infinite y.
    fn extreme_end(&self, vertical: &Self::XCurve, kind: EnvelopeKind) -> Self::Point;

    /// Compares the x-coordinates of two points.
    fn compare_x(&self, p: &Self::Point, q: &Self::Point) -> Ordering;

    /// Compares two points lexicographically by x, then y.
    fn compare_xy(&self, p: &Self::Point, q: &Self::Point) -> Ordering;

    /// Compares the y-coordinate of `p` with the curve's value at `x(p)`.
    ///
    /// Returns `None` if the curve is not defined at `x(p)`.
    fn compare_y_at_x(&self, p: &Self::Point, xcv: &Self::XCurve) -> Option<Ordering>;

    /// Compares two curves over the open x-interval between `from` and `to`
    /// (`None` meaning unbounded on that side).
    ///
    /// Returns `None` if the relation cannot be decided, for instance when
    /// one of the curves does not cover the interval.
    fn compare_over(
        &self,
        c1: &Self::XCurve,
        c2: &Self::XCurve,
        from: Option<&Self::Point>,
        to: Option<&Self::Point>,
    ) -> Option<IntervalComparison<Self::Point>>;
}
