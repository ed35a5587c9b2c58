mod classify;
mod merge;
mod singleton;
mod vertical;


use crate::diagram::{CurveId, CurveStore, Diagram};
use crate::error::Result;
use crate::traits::{EnvelopeKind, EnvelopeTraits};

use classify::classify;
use singleton::singleton_diagram;
use vertical::merge_vertical;

/// Input size at and above which the two halves of a division are built
/// in parallel when the `parallel` feature is enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Read-only state shared by every step of one envelope computation.
pub(crate) struct Context<'c, 'a, T: EnvelopeTraits> {
    pub traits: &'c T,
    pub store: &'c CurveStore<'a, T::XCurve>,
    pub kind: EnvelopeKind,
}

impl<'c, 'a, T: EnvelopeTraits> Context<'c, 'a, T> {
    pub fn new(traits: &'c T, store: &'c CurveStore<'a, T::XCurve>, kind: EnvelopeKind) -> Self {
        Self {
            traits,
            store,
            kind,
        }
    }
}

/// The envelope of a set of curves: its diagram together with the store
/// that the diagram's [`CurveId`]s refer to.
#[derive(Debug)]
pub struct Envelope<'a, X: Clone, P> {
    kind: EnvelopeKind,
    curves: CurveStore<'a, X>,
    diagram: Diagram<P>,
}

impl<'a, X: Clone, P> Envelope<'a, X, P> {
    /// Returns whether this is a lower or an upper envelope.
    #[must_use]
    pub fn kind(&self) -> EnvelopeKind {
        self.kind
    }

    /// Returns the minimization (or maximization) diagram.
    #[must_use]
    pub fn diagram(&self) -> &Diagram<P> {
        &self.diagram
    }

    /// Returns the x-monotone pieces the diagram refers to.
    #[must_use]
    pub fn curves(&self) -> &CurveStore<'a, X> {
        &self.curves
    }

    /// Returns the x-monotone piece for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this envelope.
    pub fn curve(&self, id: CurveId) -> Result<&X> {
        Ok(self.curves.curve(id)?)
    }

    /// Returns the index of the input curve that `id` was split from.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this envelope.
    pub fn source(&self, id: CurveId) -> Result<usize> {
        Ok(self.curves.source(id)?)
    }

    /// Consumes the envelope, returning the curve store and the diagram.
    #[must_use]
    pub fn into_parts(self) -> (CurveStore<'a, X>, Diagram<P>) {
        (self.curves, self.diagram)
    }
}

/// Computes the lower or upper envelope of a set of curves by divide and
/// conquer.
///
/// Curves are split into x-monotone pieces, the non-vertical pieces are
/// enveloped recursively, and vertical pieces are folded in afterwards.
pub struct BuildEnvelope<'t, T> {
    traits: &'t T,
    kind: EnvelopeKind,
    parallel_threshold: usize,
}

impl<'t, T: EnvelopeTraits> BuildEnvelope<'t, T> {
    /// Creates a new `BuildEnvelope` operation.
    #[must_use]
    pub fn new(traits: &'t T, kind: EnvelopeKind) -> Self {
        Self {
            traits,
            kind,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the input size at which sub-envelopes are built in parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(2);
        self
    }

    /// Executes the operation on general curves, splitting each into
    /// x-monotone pieces first.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge detects a structural violation.
    pub fn execute<'a>(&self, curves: &[T::Curve]) -> Result<Envelope<'a, T::XCurve, T::Point>>
    where
        T::XCurve: 'a,
    {
        let mut store = CurveStore::new();
        for (source, curve) in curves.iter().enumerate() {
            for piece in self.traits.make_x_monotone(curve) {
                store.insert_owned(piece, source);
            }
        }
        self.run(store)
    }

    /// Executes the operation on curves that are already x-monotone (or
    /// vertical). The resulting envelope borrows them.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge detects a structural violation.
    pub fn execute_x_monotone<'a>(
        &self,
        xcurves: &'a [T::XCurve],
    ) -> Result<Envelope<'a, T::XCurve, T::Point>> {
        let mut store = CurveStore::new();
        for (source, xcv) in xcurves.iter().enumerate() {
            store.insert_borrowed(xcv, source);
        }
        self.run(store)
    }

    fn run<'a>(
        &self,
        store: CurveStore<'a, T::XCurve>,
    ) -> Result<Envelope<'a, T::XCurve, T::Point>> {
        let classified = classify(self.traits, &store);
        tracing::debug!(
            kind = ?self.kind,
            regular = classified.regular.len(),
            vertical = classified.vertical.len(),
            "building envelope"
        );

        let ctx = Context::new(self.traits, &store, self.kind);
        let mut diagram = self.construct(&ctx, &classified.regular)?;
        if !classified.vertical.is_empty() {
            diagram = merge_vertical(&ctx, &classified.vertical, diagram)?;
        }

        tracing::debug!(vertices = diagram.number_of_vertices(), "envelope built");
        Ok(Envelope {
            kind: self.kind,
            curves: store,
            diagram,
        })
    }

    fn construct(&self, ctx: &Context<'_, '_, T>, ids: &[CurveId]) -> Result<Diagram<T::Point>> {
        match ids {
            [] => Ok(Diagram::new()),
            [id] => Ok(singleton_diagram(ctx.traits, *id, ctx.store.curve(*id)?)?),
            _ => {
                let (left, right) = ids.split_at(ids.len() / 2);
                let (d1, d2) = if ids.len() >= self.parallel_threshold {
                    join(|| self.construct(ctx, left), || self.construct(ctx, right))
                } else {
                    (self.construct(ctx, left), self.construct(ctx, right))
                };
                merge::merge(ctx, d1?, d2?)
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}

/// Merges two diagrams of disjoint curve sets from the same store into one,
/// consuming both.
///
/// # Errors
///
/// Returns an error if two curves overlap without either dominating, or if
/// the predicates cannot decide a comparison.
pub fn merge_diagrams<T: EnvelopeTraits>(
    traits: &T,
    store: &CurveStore<'_, T::XCurve>,
    kind: EnvelopeKind,
    d1: Diagram<T::Point>,
    d2: Diagram<T::Point>,
) -> Result<Diagram<T::Point>> {
    merge::merge(&Context::new(traits, store, kind), d1, d2)
}

/// Computes the envelope of general curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute`].
pub fn build_envelope<'a, T: EnvelopeTraits>(
    traits: &T,
    curves: &[T::Curve],
    kind: EnvelopeKind,
) -> Result<Envelope<'a, T::XCurve, T::Point>>
where
    T::XCurve: 'a,
{
    BuildEnvelope::new(traits, kind).execute(curves)
}

/// Computes the envelope of x-monotone (or vertical) curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute_x_monotone`].
pub fn build_envelope_from_x_monotone<'a, T: EnvelopeTraits>(
    traits: &T,
    xcurves: &'a [T::XCurve],
    kind: EnvelopeKind,
) -> Result<Envelope<'a, T::XCurve, T::Point>> {
    BuildEnvelope::new(traits, kind).execute_x_monotone(xcurves)
}

/// Computes the lower envelope of general curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute`].
pub fn lower_envelope<'a, T: EnvelopeTraits>(
    traits: &T,
    curves: &[T::Curve],
) -> Result<Envelope<'a, T::XCurve, T::Point>>
where
    T::XCurve: 'a,
{
    build_envelope(traits, curves, EnvelopeKind::Lower)
}

/// Computes the upper envelope of general curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute`].
pub fn upper_envelope<'a, T: EnvelopeTraits>(
    traits: &T,
    curves: &[T::Curve],
) -> Result<Envelope<'a, T::XCurve, T::Point>>
where
    T::XCurve: 'a,
{
    build_envelope(traits, curves, EnvelopeKind::Upper)
}

/// Computes the lower envelope of x-monotone curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute_x_monotone`].
pub fn lower_envelope_x_monotone<'a, T: EnvelopeTraits>(
    traits: &T,
    xcurves: &'a [T::XCurve],
) -> Result<Envelope<'a, T::XCurve, T::Point>> {
    build_envelope_from_x_monotone(traits, xcurves, EnvelopeKind::Lower)
}

/// Computes the upper envelope of x-monotone curves.
///
/// # Errors
///
/// See [`BuildEnvelope::execute_x_monotone`].
pub fn upper_envelope_x_monotone<'a, T: EnvelopeTraits>(
    traits: &T,
    xcurves: &'a [T::XCurve],
) -> Result<Envelope<'a, T::XCurve, T::Point>> {
    build_envelope_from_x_monotone(traits, xcurves, EnvelopeKind::Upper)
}
