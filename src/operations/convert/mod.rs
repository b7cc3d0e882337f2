//! Conversions between the Bézier and polyline curve representations.

mod bezier_to_poly;
mod poly_to_bezier;

pub use bezier_to_poly::BezierToPoly;
pub use poly_to_bezier::PolyToBezier;
