pub mod diagram;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod traits;

pub use diagram::{CurveId, CurveStore, Diagram, Edge, EdgeId, Vertex, VertexId};
pub use error::{EnvelopeError, Result};
pub use operations::envelope::{
    build_envelope, build_envelope_from_x_monotone, lower_envelope, lower_envelope_x_monotone,
    merge_diagrams, upper_envelope, upper_envelope_x_monotone, BuildEnvelope, Envelope,
};
pub use traits::{EnvelopeKind, EnvelopeTraits, IntervalComparison, LinearTraits};
