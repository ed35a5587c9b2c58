use thiserror::Error;

use crate::diagram::CurveId;

/// Top-level error type for envelope computations.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Errors related to constructing curves.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the diagram store.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid diagram: {0}")]
    InvalidDiagram(String),
}

/// Structural violations detected while merging envelopes.
///
/// Both indicate that an upstream contract was broken: either an input piece
/// was not really x-monotone, or the capability set could not decide a
/// relation it is required to decide.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("curves {first:?} and {second:?} partially overlap on {interval}")]
    MalformedMonotoneInput {
        /// The offending x-interval, formatted from its bounding points.
        interval: String,
        /// Curve set of the first diagram's edge.
        first: Vec<CurveId>,
        /// Curve set of the second diagram's edge.
        second: Vec<CurveId>,
    },

    #[error("unresolvable comparison: {0}")]
    UnresolvableTie(String),
}

/// Convenience type alias for results using [`EnvelopeError`].
pub type Result<T> = std::result::Result<T, EnvelopeError>;
