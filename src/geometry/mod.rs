pub mod curve;
pub mod polyline;

pub use curve::{Line, LinearCurve, Ray, Segment, XMonotoneLinear};
pub use polyline::Polyline;
