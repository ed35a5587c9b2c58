use std::cmp::Ordering;

use crate::diagram::{union_of, CurveId, Diagram, Vertex};
use crate::error::{MergeError, Result};
use crate::operations::query::{Locate, Location};
use crate::traits::EnvelopeTraits;

use super::merge::compare_vertices;
use super::Context;

/// Vertical curves sharing one x-coordinate, reduced to their extreme point.
struct VerticalGroup<P> {
    point: P,
    curves: Vec<CurveId>,
}

/// What one vertical group does to the diagram.
enum Change<P> {
    /// Replace the point of an existing vertex and add curves to it.
    Update {
        vertex: usize,
        point: P,
        curves: Vec<CurveId>,
    },
    /// Add curves to an existing vertex.
    Touch {
        vertex: usize,
        curves: Vec<CurveId>,
    },
    /// Split an edge with a new vertex. The vertex carries the edge's curves
    /// only when the vertical's end lies on them.
    Insert { edge: usize, vertex: Vertex<P> },
}

/// Folds vertical curves into a finished envelope of non-vertical curves.
///
/// Verticals are grouped by x and only the most extreme of each group is
/// considered. A group changes the diagram only where its extreme point is
/// at least as extreme as the envelope at that x.
pub(crate) fn merge_vertical<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    verticals: &[CurveId],
    diagram: Diagram<T::Point>,
) -> Result<Diagram<T::Point>> {
    let groups = group_by_x(ctx, verticals)?;
    let mut changes = Vec::with_capacity(groups.len());
    for group in groups {
        if let Some(change) = plan(ctx, &diagram, group)? {
            changes.push(change);
        }
    }
    tracing::trace!(
        verticals = verticals.len(),
        changes = changes.len(),
        "merging vertical curves"
    );
    apply(diagram, changes)
}

/// Sorts verticals by their extreme points and keeps, for every x, those
/// attaining the most extreme one.
fn group_by_x<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    verticals: &[CurveId],
) -> Result<Vec<VerticalGroup<T::Point>>> {
    let mut ends = Vec::with_capacity(verticals.len());
    for &id in verticals {
        let curve = ctx.store.curve(id)?;
        ends.push((ctx.traits.extreme_end(curve, ctx.kind), id));
    }
    ends.sort_by(|a, b| compare_vertices(ctx, &a.0, &b.0));

    let mut groups: Vec<VerticalGroup<T::Point>> = Vec::new();
    for (point, id) in ends {
        match groups.last_mut() {
            Some(last) if ctx.traits.compare_x(&last.point, &point) == Ordering::Equal => {
                if ctx.traits.compare_xy(&last.point, &point) == Ordering::Equal {
                    last.curves.push(id);
                }
            }
            _ => groups.push(VerticalGroup {
                point,
                curves: vec![id],
            }),
        }
    }
    Ok(groups)
}

/// Decides how one group affects the diagram, reading the envelope at its x.
fn plan<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    diagram: &Diagram<T::Point>,
    group: VerticalGroup<T::Point>,
) -> Result<Option<Change<T::Point>>> {
    match Locate::new(&group.point).execute(ctx.traits, diagram) {
        Location::Vertex(id) => {
            let vertex = diagram.vertex(id)?;
            let ord = ctx.traits.compare_xy(&group.point, vertex.point());
            let change = match ctx.kind.orient(ord) {
                Ordering::Less => Some(Change::Update {
                    vertex: id.index(),
                    point: group.point,
                    curves: group.curves,
                }),
                Ordering::Equal => Some(Change::Touch {
                    vertex: id.index(),
                    curves: group.curves,
                }),
                Ordering::Greater => None,
            };
            Ok(change)
        }
        Location::Edge(id) => {
            let edge = diagram.edge(id)?;
            let Some(rep) = edge.representative() else {
                return Ok(Some(Change::Insert {
                    edge: id.index(),
                    vertex: Vertex::new(group.point, group.curves),
                }));
            };
            let ord = ctx
                .traits
                .compare_y_at_x(&group.point, ctx.store.curve(rep)?)
                .ok_or_else(|| {
                    MergeError::UnresolvableTie(format!(
                        "vertical end {:?} is outside the domain of {:?}",
                        group.point,
                        edge.curves()
                    ))
                })?;
            let curves = match ctx.kind.orient(ord) {
                Ordering::Less => group.curves,
                Ordering::Equal => union_of(&group.curves, edge.curves()),
                Ordering::Greater => return Ok(None),
            };
            Ok(Some(Change::Insert {
                edge: id.index(),
                vertex: Vertex::new(group.point, curves),
            }))
        }
    }
}

/// Applies the planned changes in one left-to-right pass. Every inserted
/// vertex splits its edge into two copies of it.
fn apply<P>(diagram: Diagram<P>, changes: Vec<Change<P>>) -> Result<Diagram<P>> {
    let (mut vertices, edges) = diagram.into_parts();
    let mut inserts = Vec::new();
    for change in changes {
        match change {
            Change::Update {
                vertex,
                point,
                curves,
            } => {
                if let Some(v) = vertices.get_mut(vertex) {
                    v.point = point;
                    v.add_curves(&curves);
                }
            }
            Change::Touch { vertex, curves } => {
                if let Some(v) = vertices.get_mut(vertex) {
                    v.add_curves(&curves);
                }
            }
            Change::Insert { edge, vertex } => inserts.push((edge, vertex)),
        }
    }
    if inserts.is_empty() {
        return Ok(Diagram::from_parts(vertices, edges)?);
    }

    let mut out_vertices = Vec::with_capacity(vertices.len() + inserts.len());
    let mut out_edges = Vec::with_capacity(edges.len() + inserts.len());
    let mut pending = inserts.into_iter().peekable();
    let mut old_vertices = vertices.into_iter();
    for (i, edge) in edges.into_iter().enumerate() {
        while let Some((_, vertex)) = pending.next_if(|(e, _)| *e == i) {
            out_edges.push(edge.clone());
            out_vertices.push(vertex);
        }
        out_edges.push(edge);
        out_vertices.extend(old_vertices.next());
    }
    Ok(Diagram::from_parts(out_vertices, out_edges)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagram::CurveStore;
    use crate::geometry::XMonotoneLinear;
    use crate::math::Point2;
    use crate::operations::envelope::singleton::singleton_diagram;
    use crate::operations::query::IsValid;
    use crate::traits::{EnvelopeKind, LinearTraits};

    fn store_of(pieces: &[XMonotoneLinear]) -> (CurveStore<'_, XMonotoneLinear>, Vec<CurveId>) {
        let mut store = CurveStore::new();
        let ids = pieces
            .iter()
            .enumerate()
            .map(|(i, p)| store.insert_borrowed(p, i))
            .collect();
        (store, ids)
    }

    #[test]
    fn only_the_lowest_vertical_per_x_is_kept() {
        let traits = LinearTraits::new();
        let pieces = [
            XMonotoneLinear::vertical(1.0, 2.0, 3.0),
            XMonotoneLinear::vertical(1.0, -4.0, 0.0),
            XMonotoneLinear::vertical(0.0, 7.0, 8.0),
            XMonotoneLinear::vertical(1.0, -4.0, 9.0),
        ];
        let (store, ids) = store_of(&pieces);
        let ctx = Context::new(&traits, &store, EnvelopeKind::Lower);
        let groups = group_by_x(&ctx, &ids).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].point, Point2::new(0.0, 7.0));
        assert_eq!(groups[1].point, Point2::new(1.0, -4.0));
        let mut kept = groups[1].curves.clone();
        kept.sort_unstable();
        assert_eq!(kept, vec![ids[1], ids[3]]);
    }

    #[test]
    fn upper_envelope_keeps_the_highest_vertical() {
        let traits = LinearTraits::new();
        let pieces = [
            XMonotoneLinear::vertical(1.0, 2.0, 3.0),
            XMonotoneLinear::vertical(1.0, -4.0, 0.0),
        ];
        let (store, ids) = store_of(&pieces);
        let ctx = Context::new(&traits, &store, EnvelopeKind::Upper);
        let groups = group_by_x(&ctx, &ids).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].curves, vec![ids[0]]);
    }

    #[test]
    fn vertical_in_empty_edge_splits_it() {
        let traits = LinearTraits::new();
        let pieces = [
            XMonotoneLinear::non_vertical(0.0, 0.0, 0.0, 1.0),
            XMonotoneLinear::vertical(3.0, 1.0, 2.0),
        ];
        let (store, ids) = store_of(&pieces);
        let ctx = Context::new(&traits, &store, EnvelopeKind::Lower);
        let d = singleton_diagram(&traits, ids[0], store.curve(ids[0]).unwrap()).unwrap();
        let d = merge_vertical(&ctx, &ids[1..], d).unwrap();

        assert!(IsValid::new(&d).execute(&traits).is_ok());
        assert_eq!(d.number_of_vertices(), 3);
        assert_eq!(*d.vertices()[2].point(), Point2::new(3.0, 1.0));
        assert_eq!(d.vertices()[2].curves(), &[ids[1]]);
        assert!(d.edges()[2].is_empty());
        assert!(d.edges()[3].is_empty());
    }

    #[test]
    fn vertical_below_an_edge_splits_it_into_copies() {
        let traits = LinearTraits::new();
        let pieces = [
            XMonotoneLinear::non_vertical(0.0, 0.0, 0.0, 4.0),
            XMonotoneLinear::vertical(1.0, -2.0, -1.0),
            XMonotoneLinear::vertical(3.0, f64::NEG_INFINITY, 5.0),
            XMonotoneLinear::vertical(2.0, 1.0, 5.0),
        ];
        let (store, ids) = store_of(&pieces);
        let ctx = Context::new(&traits, &store, EnvelopeKind::Lower);
        let d = singleton_diagram(&traits, ids[0], store.curve(ids[0]).unwrap()).unwrap();
        let d = merge_vertical(&ctx, &ids[1..], d).unwrap();

        // The vertical at x = 2 lies above the segment and is dropped.
        let xs: Vec<_> = d.vertices().iter().map(|v| v.point().x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 3.0, 4.0]);
        assert_eq!(d.vertices()[1].point().y, -2.0);
        assert!(d.vertices()[2].point().y.is_infinite());
        assert_eq!(d.vertices()[1].curves(), &[ids[1]]);
        for e in &d.edges()[1..4] {
            assert_eq!(e.curves(), &[ids[0]]);
        }
        assert!(IsValid::new(&d).execute(&traits).is_ok());
    }

    #[test]
    fn vertical_ending_on_an_edge_shares_its_curves() {
        let traits = LinearTraits::new();
        let pieces = [
            XMonotoneLinear::non_vertical(1.0, 0.0, 0.0, 4.0),
            XMonotoneLinear::vertical(2.0, 2.0, 6.0),
        ];
        let (store, ids) = store_of(&pieces);
        let ctx = Context::new(&traits, &store, EnvelopeKind::Lower);
        let d = singleton_diagram(&traits, ids[0], store.curve(ids[0]).unwrap()).unwrap();
        let d = merge_vertical(&ctx, &ids[1..], d).unwrap();

        assert_eq!(*d.vertices()[1].point(), Point2::new(2.0, 2.0));
        assert_eq!(d.vertices()[1].curves(), &[ids[0], ids[1]]);
    }
}
