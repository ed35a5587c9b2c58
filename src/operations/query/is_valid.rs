use std::cmp::Ordering;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::traits::EnvelopeTraits;

/// Validates the structural invariants of a diagram.
///
/// Checks that there is one more edge than vertices, that vertices are
/// strictly increasing in x, and that every vertex carries at least one curve.
pub struct IsValid<'d, P> {
    diagram: &'d Diagram<P>,
}

impl<'d, P> IsValid<'d, P> {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(diagram: &'d Diagram<P>) -> Self {
        Self { diagram }
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidDiagram`] describing the first violation found.
    pub fn execute<T>(&self, traits: &T) -> Result<(), DiagramError>
    where
        T: EnvelopeTraits<Point = P>,
    {
        let vertices = self.diagram.vertices();
        let edges = self.diagram.edges();
        if edges.len() != vertices.len() + 1 {
            return Err(DiagramError::InvalidDiagram(format!(
                "{} vertices but {} edges",
                vertices.len(),
                edges.len()
            )));
        }

        for (i, pair) in vertices.windows(2).enumerate() {
            if traits.compare_x(pair[0].point(), pair[1].point()) != Ordering::Less {
                return Err(DiagramError::InvalidDiagram(format!(
                    "vertex {} is not strictly left of vertex {}",
                    i,
                    i + 1
                )));
            }
        }

        if let Some(i) = vertices.iter().position(|v| v.curves().is_empty()) {
            return Err(DiagramError::InvalidDiagram(format!(
                "vertex {i} has no curves"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{CurveStore, Edge, Vertex};
    use crate::math::Point2;
    use crate::traits::LinearTraits;

    #[test]
    fn empty_diagram_is_valid() {
        let d: Diagram<Point2> = Diagram::new();
        assert!(IsValid::new(&d).execute(&LinearTraits::new()).is_ok());
    }

    #[test]
    fn unordered_vertices_are_rejected() {
        let mut store = CurveStore::new();
        let id = store.insert_owned(0_u8, 0);
        let vertices = vec![
            Vertex::new(Point2::new(2.0, 0.0), vec![id]),
            Vertex::new(Point2::new(2.0, 1.0), vec![id]),
        ];
        let edges = vec![Edge::default(), Edge::new(vec![id]), Edge::default()];
        let d = match Diagram::from_parts(vertices, edges) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        };
        let err = IsValid::new(&d).execute(&LinearTraits::new());
        assert!(matches!(err, Err(DiagramError::InvalidDiagram(_))));
    }

    #[test]
    fn curveless_vertex_is_rejected() {
        let d = match Diagram::from_parts(
            vec![Vertex::new(Point2::new(0.0, 0.0), Vec::new())],
            vec![Edge::default(), Edge::default()],
        ) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        };
        assert!(IsValid::new(&d).execute(&LinearTraits::new()).is_err());
    }
}
