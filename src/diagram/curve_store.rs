use std::borrow::Cow;

use slotmap::SlotMap;

use crate::error::DiagramError;

slotmap::new_key_type! {
    /// Unique identifier for an x-monotone piece in the curve store.
    pub struct CurveId;
}

/// An x-monotone piece taking part in one envelope computation.
#[derive(Debug, Clone)]
pub struct CurveData<'a, X: Clone> {
    /// The piece itself, borrowed from the caller when it was passed in
    /// x-monotone form, owned when it came out of a split.
    pub curve: Cow<'a, X>,
    /// Index of the input curve the piece came from.
    pub source: usize,
}

/// Arena that owns (or borrows) the curves referenced by a diagram.
///
/// Diagrams only hold [`CurveId`]s; the store is scoped to a single
/// envelope computation and handed to the caller with the result.
#[derive(Debug)]
pub struct CurveStore<'a, X: Clone> {
    curves: SlotMap<CurveId, CurveData<'a, X>>,
}

impl<X: Clone> Default for CurveStore<'_, X> {
    fn default() -> Self {
        Self {
            curves: SlotMap::with_key(),
        }
    }
}

impl<'a, X: Clone> CurveStore<'a, X> {
    /// Creates a new, empty curve store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a piece borrowed from the caller's input.
    pub fn insert_borrowed(&mut self, curve: &'a X, source: usize) -> CurveId {
        self.curves.insert(CurveData {
            curve: Cow::Borrowed(curve),
            source,
        })
    }

    /// Registers a piece produced while splitting an input curve.
    pub fn insert_owned(&mut self, curve: X, source: usize) -> CurveId {
        self.curves.insert(CurveData {
            curve: Cow::Owned(curve),
            source,
        })
    }

    /// Returns the curve for `id`, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn curve(&self, id: CurveId) -> Result<&X, DiagramError> {
        self.curves
            .get(id)
            .map(|data| data.curve.as_ref())
            .ok_or_else(|| DiagramError::EntityNotFound("curve".into()))
    }

    /// Returns the index of the input curve that `id` came from.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn source(&self, id: CurveId) -> Result<usize, DiagramError> {
        self.curves
            .get(id)
            .map(|data| data.source)
            .ok_or_else(|| DiagramError::EntityNotFound("curve".into()))
    }

    /// Iterates over all stored pieces in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CurveId, &X)> {
        self.curves.iter().map(|(id, data)| (id, data.curve.as_ref()))
    }

    /// Returns the number of stored pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_and_owned_pieces_resolve() {
        let input = [10_i32, 20];
        let mut store = CurveStore::new();
        let a = store.insert_borrowed(&input[1], 1);
        let b = store.insert_owned(30, 0);
        assert_eq!(*store.curve(a).unwrap(), 20);
        assert_eq!(*store.curve(b).unwrap(), 30);
        assert_eq!(store.source(a).unwrap(), 1);
        assert_eq!(store.source(b).unwrap(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store = CurveStore::new();
        let ids: Vec<_> = (0..5_usize).map(|i| store.insert_owned(i, i)).collect();
        let seen: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, seen);
    }

    #[test]
    fn foreign_id_is_not_found() {
        let mut other = CurveStore::new();
        let id = other.insert_owned(1_u8, 0);
        let store: CurveStore<'_, u8> = CurveStore::new();
        assert!(store.curve(id).is_err());
        assert!(store.source(id).is_err());
    }
}
