use super::curve_store::CurveId;
use super::union_into;

/// Position of an edge in its diagram, counted from the left.
///
/// Edge `i` lies between vertex `i - 1` and vertex `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Returns the zero-based position of the edge.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A diagram edge: an open x-interval and the curves realizing the envelope there.
///
/// More than one curve means the curves coincide over the whole interval.
/// An empty curve set means no input curve covers the interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge {
    pub(crate) curves: Vec<CurveId>,
}

impl Edge {
    /// Creates an edge realized by the given curves.
    #[must_use]
    pub fn new(mut curves: Vec<CurveId>) -> Self {
        curves.sort_unstable();
        curves.dedup();
        Self { curves }
    }

    /// Returns whether no curve covers the edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Returns the curves realizing the envelope over the edge.
    #[must_use]
    pub fn curves(&self) -> &[CurveId] {
        &self.curves
    }

    /// Returns one curve of the edge, standing in for all the coinciding ones.
    #[must_use]
    pub fn representative(&self) -> Option<CurveId> {
        self.curves.first().copied()
    }

    /// Adds curves to the edge, ignoring ones already present.
    pub fn add_curves(&mut self, curves: &[CurveId]) {
        union_into(&mut self.curves, curves);
    }
}
