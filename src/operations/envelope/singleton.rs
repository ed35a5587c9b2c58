use crate::diagram::{CurveId, Diagram, Edge, Vertex};
use crate::error::DiagramError;
use crate::traits::EnvelopeTraits;

/// Builds the diagram of a single non-vertical x-monotone curve.
///
/// Every bounded end becomes a vertex carrying the curve; the edge between
/// the ends carries the curve and the edges beyond them are empty. An
/// unbounded side leaves the curve's edge unbounded on that side.
pub(crate) fn singleton_diagram<T: EnvelopeTraits>(
    traits: &T,
    id: CurveId,
    curve: &T::XCurve,
) -> Result<Diagram<T::Point>, DiagramError> {
    let mut vertices = Vec::with_capacity(2);
    let mut edges = Vec::with_capacity(3);

    if let Some(left) = traits.min_end(curve) {
        edges.push(Edge::default());
        vertices.push(Vertex::new(left, vec![id]));
    }
    edges.push(Edge::new(vec![id]));
    if let Some(right) = traits.max_end(curve) {
        vertices.push(Vertex::new(right, vec![id]));
        edges.push(Edge::default());
    }

    Diagram::from_parts(vertices, edges)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagram::CurveStore;
    use crate::geometry::XMonotoneLinear;
    use crate::math::Point2;
    use crate::traits::LinearTraits;

    fn single(piece: XMonotoneLinear) -> (CurveId, Diagram<Point2>) {
        let mut store = CurveStore::new();
        let id = store.insert_owned(piece, 0);
        let d = singleton_diagram(&LinearTraits::new(), id, store.curve(id).unwrap()).unwrap();
        (id, d)
    }

    #[test]
    fn bounded_curve_has_two_vertices() {
        let (id, d) = single(XMonotoneLinear::non_vertical(-1.0, 0.0, 0.0, 10.0));
        assert_eq!(d.number_of_vertices(), 2);
        assert_eq!(d.number_of_edges(), 3);
        assert_eq!(*d.vertices()[0].point(), Point2::new(0.0, 0.0));
        assert_eq!(*d.vertices()[1].point(), Point2::new(10.0, -10.0));
        assert!(d.vertices().iter().all(|v| v.curves() == [id]));
        assert!(d.edges()[0].is_empty());
        assert_eq!(d.edges()[1].curves(), &[id]);
        assert!(d.edges()[2].is_empty());
    }

    #[test]
    fn right_ray_has_one_vertex() {
        let (id, d) = single(XMonotoneLinear::non_vertical(1.0, 0.0, 2.0, f64::INFINITY));
        assert_eq!(d.number_of_vertices(), 1);
        assert!(d.edges()[0].is_empty());
        assert_eq!(d.edges()[1].curves(), &[id]);
    }

    #[test]
    fn left_ray_has_one_vertex() {
        let (id, d) = single(XMonotoneLinear::non_vertical(1.0, 0.0, f64::NEG_INFINITY, 2.0));
        assert_eq!(d.number_of_vertices(), 1);
        assert_eq!(d.edges()[0].curves(), &[id]);
        assert!(d.edges()[1].is_empty());
    }

    #[test]
    fn full_line_has_no_vertices() {
        let (id, d) = single(XMonotoneLinear::non_vertical(
            0.5,
            1.0,
            f64::NEG_INFINITY,
            f64::INFINITY,
        ));
        assert_eq!(d.number_of_vertices(), 0);
        assert_eq!(d.edges()[0].curves(), &[id]);
    }
}
