use crate::error::{GeometryError, Result};
use crate::geometry::BezierCurve;
use crate::math::{Point3, TOLERANCE};

use super::interpolate::bezier_length;

/// Scales a curve uniformly about the origin so its arc length matches a
/// target value.
pub struct SetCurveLength<'a> {
    curve: &'a BezierCurve,
    target: f64,
}

impl<'a> SetCurveLength<'a> {
    /// Creates a new `SetCurveLength` operation.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, target: f64) -> Self {
        Self { curve, target }
    }

    /// Executes the scaling, returning a new curve of the requested length.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve's current length is zero (a zero-length
    /// curve cannot be scaled).
    pub fn execute(&self) -> Result<BezierCurve> {
        let length = bezier_length(self.curve);
        if length < TOLERANCE {
            return Err(
                GeometryError::Degenerate("zero-length curve cannot be scaled".into()).into(),
            );
        }

        let scale = self.target / length;
        let mut result = self.curve.clone();
        for point in &mut result.points {
            point.co = Point3::from(point.co.coords * scale);
            point.handle_left = Point3::from(point.handle_left.coords * scale);
            point.handle_right = Point3::from(point.handle_right.coords * scale);
        }
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::ControlPoint;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn doubles_a_straight_line() {
        let curve = BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            (p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
        ]);
        let scaled = SetCurveLength::new(&curve, 6.0).execute().unwrap();
        let length = bezier_length(&scaled);
        assert!((length - 6.0).abs() < 1e-9, "length={length}");
        assert_eq!(scaled.points[1].co, p(6.0, 0.0, 0.0));
    }

    #[test]
    fn zero_length_curve_fails() {
        let point = ControlPoint::collapsed(p(1.0, 1.0, 0.0));
        let curve = BezierCurve::from_control_points(vec![point, point], 12, false);
        assert!(SetCurveLength::new(&curve, 2.0).execute().is_err());
    }
}
