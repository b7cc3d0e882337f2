mod bezier;
mod control_point;
mod polyline;

pub use bezier::{BezierCurve, DEFAULT_RESOLUTION};
pub use control_point::{ControlPoint, HandleType};
pub use polyline::Polyline;

/// Either kind of curve the toolkit operates on.
///
/// Operations that accept both kinds (length, loft, conversion) match on
/// this exhaustively; everything else takes the concrete type.
#[derive(Debug, Clone, PartialEq)]
pub enum Spline {
    Bezier(BezierCurve),
    Poly(Polyline),
}

impl Spline {
    /// Returns the number of control points or vertices.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Spline::Bezier(curve) => curve.point_count(),
            Spline::Poly(line) => line.point_count(),
        }
    }

    /// Whether the curve wraps back to its first point.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Spline::Bezier(curve) => curve.closed,
            Spline::Poly(line) => line.closed,
        }
    }

    /// Returns the reversed curve.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Spline::Bezier(curve) => Spline::Bezier(curve.reversed()),
            Spline::Poly(line) => Spline::Poly(line.reversed()),
        }
    }
}

/// A location strictly inside a curve segment at which the curve divides.
///
/// Produced by inverse point lookup
/// ([`FindSplitPoint`](crate::operations::query::FindSplitPoint)) and
/// consumed by the split and insert operations. `t == 0.0` is the special
/// case of an existing control point at the segment's start; `t` never
/// reaches `1.0` (that sample belongs to the next segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPoint {
    /// Index of the segment containing the split location.
    pub segment: usize,
    /// Parameter inside the segment, in `[0, 1)`.
    pub t: f64,
}

impl SplitPoint {
    /// Creates a new split point.
    #[must_use]
    pub fn new(segment: usize, t: f64) -> Self {
        Self { segment, t }
    }
}
