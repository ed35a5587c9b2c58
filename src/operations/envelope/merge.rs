use std::cmp::Ordering;
use std::fmt::Debug;
use std::vec;

use crate::diagram::{union_of, CurveId, Diagram, Edge, Vertex};
use crate::error::{MergeError, Result};
use crate::traits::{EnvelopeTraits, IntervalComparison};

use super::Context;

/// Compares two envelope vertices.
///
/// Orders by x first. At equal x the more extreme point (lower for a lower
/// envelope, higher for an upper one) is the smaller vertex. Equal points
/// compare equal.
pub(crate) fn compare_vertices<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    p: &T::Point,
    q: &T::Point,
) -> Ordering {
    match ctx.traits.compare_x(p, q) {
        Ordering::Equal => ctx.kind.orient(ctx.traits.compare_xy(p, q)),
        ord => ord,
    }
}

/// Sweep cursor over one input diagram, which it owns.
struct Cursor<P> {
    edges: vec::IntoIter<Edge>,
    vertices: vec::IntoIter<Vertex<P>>,
    /// Edge left of `next`.
    edge: Edge,
    /// Vertex ending `edge`, `None` once `edge` is the rightmost one.
    next: Option<Vertex<P>>,
}

impl<P> Cursor<P> {
    fn new(diagram: Diagram<P>) -> Self {
        let (vertices, edges) = diagram.into_parts();
        let mut edges = edges.into_iter();
        let mut vertices = vertices.into_iter();
        let edge = edges.next().unwrap_or_default();
        let next = vertices.next();
        Self {
            edges,
            vertices,
            edge,
            next,
        }
    }

    /// Steps past `next`, returning it.
    fn advance(&mut self) -> Option<Vertex<P>> {
        let passed = self.next.take();
        self.edge = self.edges.next().unwrap_or_default();
        self.next = self.vertices.next();
        passed
    }
}

/// Which input's vertex comes next in the sweep.
enum Step {
    First,
    Second,
    Both,
    Done,
}

/// Merges two envelope diagrams of disjoint curve sets into the envelope of
/// their union, consuming both.
///
/// Runs one left-to-right sweep over the inputs, so the cost is linear in
/// their combined size plus the number of crossings found.
pub(crate) fn merge<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    d1: Diagram<T::Point>,
    d2: Diagram<T::Point>,
) -> Result<Diagram<T::Point>> {
    let (n1, n2) = (d1.number_of_vertices(), d2.number_of_vertices());
    let mut first = Cursor::new(d1);
    let mut second = Cursor::new(d2);
    let mut out = Diagram::new();
    let mut lo: Option<T::Point> = None;
    // Set when the last input vertex was dominated and left no output vertex.
    let mut hidden = false;

    loop {
        let step = match (&first.next, &second.next) {
            (None, None) => Step::Done,
            (Some(_), None) => Step::First,
            (None, Some(_)) => Step::Second,
            (Some(v1), Some(v2)) => match ctx.traits.compare_x(&v1.point, &v2.point) {
                Ordering::Less => Step::First,
                Ordering::Greater => Step::Second,
                Ordering::Equal => Step::Both,
            },
        };
        let hi = match step {
            Step::First | Step::Both => first.next.as_ref().map(|v| v.point.clone()),
            Step::Second => second.next.as_ref().map(|v| v.point.clone()),
            Step::Done => None,
        };

        let covered =
            hidden.then(|| (out.number_of_edges() - 1, rightmost_curves(&out).to_vec()));
        resolve_interval(ctx, &mut out, &first.edge, &second.edge, lo.as_ref(), hi.as_ref())?;
        if let Some((edge, curves)) = covered {
            check_unchanged(&out, edge, &curves, lo.as_ref(), hi.as_ref())?;
        }

        hidden = match step {
            Step::Done => break,
            Step::First => match first.advance() {
                Some(v) => !emit_single(ctx, &mut out, v, &second.edge)?,
                None => false,
            },
            Step::Second => match second.advance() {
                Some(v) => !emit_single(ctx, &mut out, v, &first.edge)?,
                None => false,
            },
            Step::Both => {
                if let (Some(v1), Some(v2)) = (first.advance(), second.advance()) {
                    emit_pair(ctx, &mut out, v1, v2);
                }
                false
            }
        };
        lo = hi;
    }

    tracing::trace!(
        left = n1,
        right = n2,
        merged = out.number_of_vertices(),
        "merged diagrams"
    );
    Ok(out)
}

/// Fills the rightmost output edge(s) over the open interval `(lo, hi)`,
/// where `e1` and `e2` are the two inputs' edges covering it.
fn resolve_interval<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    out: &mut Diagram<T::Point>,
    e1: &Edge,
    e2: &Edge,
    lo: Option<&T::Point>,
    hi: Option<&T::Point>,
) -> Result<()> {
    match (e1.is_empty(), e2.is_empty()) {
        (true, true) => {}
        (false, true) => out.extend_rightmost(e1.curves()),
        (true, false) => out.extend_rightmost(e2.curves()),
        (false, false) => resolve_overlap(ctx, out, e1, e2, lo, hi)?,
    }
    Ok(())
}

/// Resolves an interval covered by both inputs, splitting it at every
/// point where the winning side changes.
fn resolve_overlap<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    out: &mut Diagram<T::Point>,
    e1: &Edge,
    e2: &Edge,
    lo: Option<&T::Point>,
    hi: Option<&T::Point>,
) -> Result<()> {
    let c1 = representative(ctx, e1)?;
    let c2 = representative(ctx, e2)?;
    let mut from = lo.cloned();
    let mut met = false;

    loop {
        let relation = ctx
            .traits
            .compare_over(c1, c2, from.as_ref(), hi)
            .ok_or_else(|| {
                MergeError::UnresolvableTie(format!(
                    "cannot compare {:?} and {:?} on {}",
                    e1.curves(),
                    e2.curves(),
                    describe_interval(from.as_ref(), hi)
                ))
            })?;

        let (point, before) = match relation {
            IntervalComparison::Smaller => {
                out.extend_rightmost(winner(ctx, Ordering::Less, e1, e2));
                return Ok(());
            }
            IntervalComparison::Larger => {
                out.extend_rightmost(winner(ctx, Ordering::Greater, e1, e2));
                return Ok(());
            }
            IntervalComparison::Equal => {
                out.extend_rightmost(e1.curves());
                out.extend_rightmost(e2.curves());
                return Ok(());
            }
            IntervalComparison::Meets {
                point,
                before,
                after,
            } => {
                if before == Ordering::Equal || after == Ordering::Equal {
                    return Err(MergeError::MalformedMonotoneInput {
                        interval: describe_interval(from.as_ref(), hi),
                        first: e1.curves().to_vec(),
                        second: e2.curves().to_vec(),
                    }
                    .into());
                }
                (point, before)
            }
        };

        // A second meeting must lie strictly right of the first.
        let before_from = from.as_ref().is_some_and(|f| match ctx.traits.compare_x(&point, f) {
            Ordering::Less => true,
            Ordering::Equal => met,
            Ordering::Greater => false,
        });
        let after_to = hi.is_some_and(|h| ctx.traits.compare_x(&point, h) == Ordering::Greater);
        if before_from || after_to {
            return Err(MergeError::UnresolvableTie(format!(
                "meeting point {point:?} lies outside {}",
                describe_interval(from.as_ref(), hi)
            ))
            .into());
        }

        // A meeting at the x of the last output vertex changes the winner
        // right there.
        let at_last = out
            .vertices()
            .last()
            .is_some_and(|v| ctx.traits.compare_x(v.point(), &point) == Ordering::Equal);
        if !at_last {
            out.extend_rightmost(winner(ctx, before, e1, e2));
            out.append_vertex(
                ctx.traits,
                ctx.kind,
                point.clone(),
                union_of(e1.curves(), e2.curves()),
            );
        }
        // What is left up to `hi` has no width; the vertex at `hi` closes it.
        if hi.is_some_and(|h| ctx.traits.compare_x(&point, h) == Ordering::Equal) {
            return Ok(());
        }
        from = Some(point);
        met = true;
    }
}

/// Emits a vertex of one input whose x lies strictly inside `other`, an
/// edge of the other input. The vertex survives only if it is at least as
/// extreme as `other` there; returns whether it did.
fn emit_single<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    out: &mut Diagram<T::Point>,
    v: Vertex<T::Point>,
    other: &Edge,
) -> Result<bool> {
    if other.is_empty() {
        out.append_vertex(ctx.traits, ctx.kind, v.point, v.curves);
        return Ok(true);
    }
    let curve = representative(ctx, other)?;
    let ord = ctx
        .traits
        .compare_y_at_x(&v.point, curve)
        .ok_or_else(|| {
            MergeError::UnresolvableTie(format!(
                "vertex {:?} is outside the domain of {:?}",
                v.point,
                other.curves()
            ))
        })?;
    match ctx.kind.orient(ord) {
        Ordering::Less => out.append_vertex(ctx.traits, ctx.kind, v.point, v.curves),
        Ordering::Equal => {
            let curves = union_of(&v.curves, other.curves());
            out.append_vertex(ctx.traits, ctx.kind, v.point, curves);
        }
        // Dominated: the other side's curve passes strictly beyond it.
        Ordering::Greater => return Ok(false),
    }
    Ok(true)
}

fn rightmost_curves<P>(out: &Diagram<P>) -> &[CurveId] {
    out.edges().last().map_or(&[][..], Edge::curves)
}

/// Fails if the edge that was rightmost before a dominated vertex gained
/// curves afterwards. Without an output vertex there the winner cannot
/// change, so new curves mean the predicates contradicted each other.
fn check_unchanged<P: Debug>(
    out: &Diagram<P>,
    edge: usize,
    covered: &[CurveId],
    lo: Option<&P>,
    hi: Option<&P>,
) -> Result<()> {
    let now = out.edges().get(edge).map_or(&[][..], Edge::curves);
    if covered.is_empty() || now == covered {
        return Ok(());
    }
    Err(MergeError::MalformedMonotoneInput {
        interval: describe_interval(lo, hi),
        first: covered.to_vec(),
        second: now.iter().filter(|c| !covered.contains(c)).copied().collect(),
    }
    .into())
}

/// Emits one vertex for two input vertices sharing an x-coordinate.
fn emit_pair<T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    out: &mut Diagram<T::Point>,
    v1: Vertex<T::Point>,
    v2: Vertex<T::Point>,
) {
    match compare_vertices(ctx, &v1.point, &v2.point) {
        Ordering::Less => out.append_vertex(ctx.traits, ctx.kind, v1.point, v1.curves),
        Ordering::Greater => out.append_vertex(ctx.traits, ctx.kind, v2.point, v2.curves),
        Ordering::Equal => {
            let curves = union_of(&v1.curves, &v2.curves);
            out.append_vertex(ctx.traits, ctx.kind, v1.point, curves);
        }
    }
}

/// Picks the winning edge's curves given the y-order of `e1` relative to `e2`.
fn winner<'e, T: EnvelopeTraits>(
    ctx: &Context<'_, '_, T>,
    ord: Ordering,
    e1: &'e Edge,
    e2: &'e Edge,
) -> &'e [CurveId] {
    if ctx.kind.orient(ord) == Ordering::Less {
        e1.curves()
    } else {
        e2.curves()
    }
}

fn representative<'c, T: EnvelopeTraits>(
    ctx: &Context<'c, '_, T>,
    edge: &Edge,
) -> Result<&'c T::XCurve> {
    let id = edge
        .representative()
        .ok_or_else(|| MergeError::UnresolvableTie("edge has no curve".into()))?;
    Ok(ctx.store.curve(id)?)
}

fn describe_interval<P: Debug>(from: Option<&P>, to: Option<&P>) -> String {
    let side = |p: Option<&P>, inf: &str| p.map_or_else(|| inf.to_owned(), |p| format!("{p:?}"));
    format!("({}, {})", side(from, "-inf"), side(to, "+inf"))
}
