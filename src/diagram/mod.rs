pub mod curve_store;
pub mod edge;
pub mod vertex;

pub use curve_store::{CurveData, CurveId, CurveStore};
pub use edge::{Edge, EdgeId};
pub use vertex::{Vertex, VertexId};

use std::cmp::Ordering;

use crate::error::DiagramError;
use crate::traits::{EnvelopeKind, EnvelopeTraits};

/// Merges `extra` into the sorted, duplicate-free `curves`.
pub(crate) fn union_into(curves: &mut Vec<CurveId>, extra: &[CurveId]) {
    for &id in extra {
        if let Err(pos) = curves.binary_search(&id) {
            curves.insert(pos, id);
        }
    }
}

/// Returns the sorted union of two sorted curve sets.
pub(crate) fn union_of(a: &[CurveId], b: &[CurveId]) -> Vec<CurveId> {
    let mut out = a.to_vec();
    union_into(&mut out, b);
    out
}

/// Minimization (or maximization) diagram along the x-axis.
///
/// Stored as two flat sequences: `n` vertices with strictly increasing x and
/// `n + 1` edges, where edge `i` is the open interval left of vertex `i` and
/// the last edge is unbounded to the right. Handles are plain positions, so a
/// diagram never references storage it does not own.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<P> {
    vertices: Vec<Vertex<P>>,
    edges: Vec<Edge>,
}

impl<P> Default for Diagram<P> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: vec![Edge::default()],
        }
    }
}

impl<P> Diagram<P> {
    /// Creates an empty diagram: a single empty edge spanning the whole x-axis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a diagram from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error unless there is exactly one more edge than vertices.
    pub fn from_parts(vertices: Vec<Vertex<P>>, edges: Vec<Edge>) -> Result<Self, DiagramError> {
        if edges.len() != vertices.len() + 1 {
            return Err(DiagramError::InvalidDiagram(format!(
                "{} vertices need {} edges, got {}",
                vertices.len(),
                vertices.len() + 1,
                edges.len()
            )));
        }
        Ok(Self { vertices, edges })
    }

    /// Consumes the diagram, returning its vertices and edges.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vertex<P>>, Vec<Edge>) {
        (self.vertices, self.edges)
    }

    /// Returns whether the diagram has no vertices and its only edge is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.iter().all(Edge::is_empty)
    }

    /// Resets the diagram to the empty state.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.edges.push(Edge::default());
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the vertices from left to right.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex<P>] {
        &self.vertices
    }

    /// Returns the edges from left to right.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // --- Navigation ---

    /// Returns the leftmost edge, unbounded to the left.
    #[must_use]
    pub fn leftmost(&self) -> EdgeId {
        EdgeId(0)
    }

    /// Returns the rightmost edge, unbounded to the right.
    #[must_use]
    pub fn rightmost(&self) -> EdgeId {
        EdgeId(self.vertices.len())
    }

    /// Returns the edge to the left of a vertex.
    #[must_use]
    pub fn vertex_left(&self, id: VertexId) -> EdgeId {
        EdgeId(id.0)
    }

    /// Returns the edge to the right of a vertex.
    #[must_use]
    pub fn vertex_right(&self, id: VertexId) -> EdgeId {
        EdgeId(id.0 + 1)
    }

    /// Returns the vertex bounding an edge on the left, `None` for the leftmost edge.
    #[must_use]
    pub fn edge_left(&self, id: EdgeId) -> Option<VertexId> {
        id.0.checked_sub(1)
            .filter(|&i| i < self.vertices.len())
            .map(VertexId)
    }

    /// Returns the vertex bounding an edge on the right, `None` for the rightmost edge.
    #[must_use]
    pub fn edge_right(&self, id: EdgeId) -> Option<VertexId> {
        (id.0 < self.vertices.len()).then_some(VertexId(id.0))
    }

    // --- Lookup ---

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is out of range for this diagram.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex<P>, DiagramError> {
        self.vertices
            .get(id.0)
            .ok_or_else(|| DiagramError::EntityNotFound("vertex".into()))
    }

    /// Returns a reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is out of range for this diagram.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, DiagramError> {
        self.edges
            .get(id.0)
            .ok_or_else(|| DiagramError::EntityNotFound("edge".into()))
    }

    // --- Appending ---

    /// Adds curves to the rightmost edge.
    pub(crate) fn extend_rightmost(&mut self, curves: &[CurveId]) {
        if let Some(edge) = self.edges.last_mut() {
            edge.add_curves(curves);
        }
    }

    /// Appends a vertex to the right end of the diagram, followed by a new
    /// empty rightmost edge.
    ///
    /// A vertex at the same x as the current rightmost vertex is folded into
    /// it instead: the more extreme point is kept, and curve sets are merged
    /// when both points coincide.
    pub(crate) fn append_vertex<T>(
        &mut self,
        traits: &T,
        kind: EnvelopeKind,
        point: P,
        curves: Vec<CurveId>,
    ) where
        T: EnvelopeTraits<Point = P>,
    {
        if let Some(last) = self.vertices.last_mut() {
            if traits.compare_x(&last.point, &point) == Ordering::Equal {
                match kind.orient(traits.compare_xy(&point, &last.point)) {
                    Ordering::Less => *last = Vertex::new(point, curves),
                    Ordering::Equal => last.add_curves(&curves),
                    Ordering::Greater => {}
                }
                return;
            }
        }
        self.vertices.push(Vertex::new(point, curves));
        self.edges.push(Edge::default());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::traits::LinearTraits;

    fn ids(n: usize) -> Vec<CurveId> {
        let mut store = CurveStore::new();
        (0..n).map(|i| store.insert_owned(i, i)).collect()
    }

    #[test]
    fn empty_diagram_has_one_empty_edge() {
        let d: Diagram<Point2> = Diagram::new();
        assert!(d.is_empty());
        assert_eq!(d.number_of_vertices(), 0);
        assert_eq!(d.number_of_edges(), 1);
        assert_eq!(d.leftmost(), d.rightmost());
        assert_eq!(d.edge_left(d.leftmost()), None);
        assert_eq!(d.edge_right(d.rightmost()), None);
    }

    #[test]
    fn navigation_links_edges_and_vertices() {
        let c = ids(2);
        let traits = LinearTraits::new();
        let mut d = Diagram::new();
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(0.0, 0.0), vec![c[0]]);
        d.extend_rightmost(&[c[0]]);
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(1.0, 1.0), vec![c[0]]);

        assert_eq!(d.number_of_vertices(), 2);
        assert_eq!(d.number_of_edges(), 3);
        let v0 = VertexId(0);
        let middle = d.vertex_right(v0);
        assert_eq!(d.edge(middle).unwrap().curves(), &[c[0]]);
        assert_eq!(d.edge_left(middle), Some(v0));
        assert_eq!(d.edge_right(middle), Some(VertexId(1)));
        assert_eq!(d.vertex_left(VertexId(1)), middle);
        assert!(d.edge(d.rightmost()).unwrap().is_empty());
        assert!(d.vertex(VertexId(2)).is_err());
    }

    #[test]
    fn same_x_vertex_folds_into_the_previous_one() {
        let c = ids(3);
        let traits = LinearTraits::new();
        let mut d = Diagram::new();
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(1.0, 2.0), vec![c[0]]);
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(1.0, 2.0), vec![c[1]]);
        assert_eq!(d.number_of_vertices(), 1);
        assert_eq!(d.vertices()[0].curves(), &[c[0], c[1]]);

        // A lower point replaces the vertex for a lower envelope.
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(1.0, -1.0), vec![c[2]]);
        assert_eq!(d.number_of_vertices(), 1);
        assert_eq!(*d.vertices()[0].point(), Point2::new(1.0, -1.0));
        assert_eq!(d.vertices()[0].curves(), &[c[2]]);

        // A higher point is ignored.
        d.append_vertex(&traits, EnvelopeKind::Lower, Point2::new(1.0, 5.0), vec![c[0]]);
        assert_eq!(d.vertices()[0].curves(), &[c[2]]);
        assert_eq!(d.number_of_edges(), 2);
    }

    #[test]
    fn from_parts_checks_edge_count() {
        let v = Vertex::new(Point2::new(0.0, 0.0), Vec::new());
        assert!(Diagram::from_parts(vec![v.clone()], vec![Edge::default()]).is_err());
        let d = Diagram::from_parts(vec![v], vec![Edge::default(), Edge::default()]).unwrap();
        assert_eq!(d.number_of_vertices(), 1);
    }

    #[test]
    fn clear_restores_the_empty_state() {
        let c = ids(1);
        let traits = LinearTraits::new();
        let mut d = Diagram::new();
        d.extend_rightmost(&c);
        d.append_vertex(&traits, EnvelopeKind::Upper, Point2::new(3.0, 0.0), c.clone());
        assert!(!d.is_empty());
        d.clear();
        assert_eq!(d, Diagram::new());
    }

    #[test]
    fn union_keeps_sets_sorted() {
        let c = ids(4);
        let mut set = vec![c[3], c[1]];
        set.sort_unstable();
        union_into(&mut set, &[c[2], c[1], c[0]]);
        let mut expected = c.clone();
        expected.sort_unstable();
        assert_eq!(set, expected);
        assert_eq!(union_of(&[c[0]], &[c[0]]), vec![c[0]]);
    }
}
