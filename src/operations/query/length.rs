use crate::error::Result;
use crate::geometry::Spline;
use crate::operations::resample::bezier_length;

/// Computes the arc length of a curve.
pub struct CurveLength<'a> {
    spline: &'a Spline,
}

impl<'a> CurveLength<'a> {
    /// Creates a new `CurveLength` query.
    #[must_use]
    pub fn new(spline: &'a Spline) -> Self {
        Self { spline }
    }

    /// Executes the query, returning the curve length.
    ///
    /// For a Bézier curve the length is measured by dense sampling at the
    /// curve's resolution; for a polyline it is the exact vertex-chain
    /// length.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for uniformity with the other
    /// queries.
    pub fn execute(&self) -> Result<f64> {
        match self.spline {
            Spline::Bezier(curve) => Ok(bezier_length(curve)),
            Spline::Poly(line) => Ok(line.length()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{BezierCurve, Polyline};
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn straight_bezier_length() {
        let curve = Spline::Bezier(BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            (p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
        ]));
        let length = CurveLength::new(&curve).execute().unwrap();
        assert_relative_eq!(length, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn polyline_length_3_4_5() {
        let line = Spline::Poly(Polyline::from_points(
            vec![p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(3.0, 4.0, 0.0)],
            false,
        ));
        let length = CurveLength::new(&line).execute().unwrap();
        assert_relative_eq!(length, 7.0, epsilon = 1e-10);
    }

    #[test]
    fn curved_length_exceeds_chord() {
        let curve = Spline::Bezier(BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0)),
            (p(2.0, 2.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
        ]));
        let length = CurveLength::new(&curve).execute().unwrap();
        assert!(length > 3.0, "length={length}");
    }
}
