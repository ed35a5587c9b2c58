use super::curve_store::CurveId;
use super::union_into;

/// Position of a vertex in its diagram, counted from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Returns the zero-based position of the vertex.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A diagram vertex: a point on the envelope and the curves through it.
///
/// The curve set is kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<P> {
    pub(crate) point: P,
    pub(crate) curves: Vec<CurveId>,
}

impl<P> Vertex<P> {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: P, mut curves: Vec<CurveId>) -> Self {
        curves.sort_unstable();
        curves.dedup();
        Self { point, curves }
    }

    /// Returns the point of the vertex.
    #[must_use]
    pub fn point(&self) -> &P {
        &self.point
    }

    /// Returns the curves passing through the vertex.
    #[must_use]
    pub fn curves(&self) -> &[CurveId] {
        &self.curves
    }

    /// Returns the number of curves passing through the vertex.
    #[must_use]
    pub fn number_of_curves(&self) -> usize {
        self.curves.len()
    }

    /// Adds curves to the vertex, ignoring ones already present.
    pub fn add_curves(&mut self, curves: &[CurveId]) {
        union_into(&mut self.curves, curves);
    }
}
