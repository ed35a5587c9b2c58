use std::cmp::Ordering;

use crate::diagram::{Diagram, EdgeId, VertexId};
use crate::traits::EnvelopeTraits;

/// Where an x-coordinate falls in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// On an existing vertex.
    Vertex(VertexId),
    /// Strictly inside an edge.
    Edge(EdgeId),
}

/// Locates the x-coordinate of a point in a diagram by binary search over
/// its vertices.
pub struct Locate<'p, P> {
    point: &'p P,
}

impl<'p, P> Locate<'p, P> {
    /// Creates a new `Locate` query for the x-coordinate of `point`.
    #[must_use]
    pub fn new(point: &'p P) -> Self {
        Self { point }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute<T>(&self, traits: &T, diagram: &Diagram<P>) -> Location
    where
        T: EnvelopeTraits<Point = P>,
    {
        let vertices = diagram.vertices();
        let idx = vertices
            .partition_point(|v| traits.compare_x(v.point(), self.point) == Ordering::Less);
        match vertices.get(idx) {
            Some(v) if traits.compare_x(v.point(), self.point) == Ordering::Equal => {
                Location::Vertex(VertexId(idx))
            }
            _ => Location::Edge(EdgeId(idx)),
        }
    }
}
