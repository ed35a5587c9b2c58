use crate::diagram::{CurveId, CurveStore};
use crate::traits::EnvelopeTraits;

/// Curves of one computation, split by whether their slope is defined.
#[derive(Debug, Default)]
pub(crate) struct Classified {
    pub regular: Vec<CurveId>,
    pub vertical: Vec<CurveId>,
}

/// Partitions the stored pieces into regular and vertical ones, keeping
/// insertion order within each group.
pub(crate) fn classify<T: EnvelopeTraits>(
    traits: &T,
    store: &CurveStore<'_, T::XCurve>,
) -> Classified {
    let mut out = Classified::default();
    for (id, xcv) in store.iter() {
        if traits.is_vertical(xcv) {
            out.vertical.push(id);
        } else {
            out.regular.push(id);
        }
    }
    out
}
