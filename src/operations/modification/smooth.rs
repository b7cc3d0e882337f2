use crate::error::{OperationError, Result};
use crate::geometry::{BezierCurve, SplitPoint};

use super::{InsertPoint, RemovePoint};

/// Smooths the curve around an interior control point, in place.
///
/// Both segments adjacent to the point are subdivided at their midpoints and
/// the original point is then removed, replacing a possible kink with two
/// on-curve points whose handles come from the subdivision. The curve gains
/// one control point.
pub struct Smooth {
    index: usize,
}

impl Smooth {
    /// Creates a new `Smooth` operation for the point at `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the smoothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve has fewer than 3 points, when `index`
    /// is an endpoint or out of range, or when the final removal hits
    /// degenerate handles.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<()> {
        let n = curve.point_count();
        if n < 3 {
            return Err(OperationError::InvalidSelection(
                "smoothing needs at least 3 control points".into(),
            )
            .into());
        }
        if self.index == 0 || self.index >= n - 1 {
            return Err(OperationError::InvalidSelection(format!(
                "point {} is not an interior point of {n}",
                self.index
            ))
            .into());
        }

        InsertPoint::new(SplitPoint::new(self.index - 1, 0.5)).execute(curve)?;
        // The smoothed point moved to index + 1; its outgoing segment
        // carries the same index.
        InsertPoint::new(SplitPoint::new(self.index + 1, 0.5)).execute(curve)?;
        RemovePoint::new(self.index + 1).execute(curve)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{cubic_3d, Point3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// A curve with a sharp kink at the middle point.
    fn kinked_curve() -> BezierCurve {
        BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            (p(3.0, 4.0, 0.0), p(4.0, 4.0, 0.0), p(5.0, 4.0, 0.0)),
            (p(7.0, 0.0, 0.0), p(8.0, 0.0, 0.0), p(9.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn smoothing_replaces_point_with_two() {
        let mut curve = kinked_curve();
        Smooth::new(1).execute(&mut curve).unwrap();
        assert_eq!(curve.point_count(), 4);
        // The kink position is no longer a control point.
        for point in &curve.points {
            assert!((point.co - p(4.0, 4.0, 0.0)).norm() > 0.1);
        }
    }

    #[test]
    fn replacement_points_come_from_midpoint_subdivision() {
        let mut curve = kinked_curve();
        let [a0, a1, a2, a3] = curve.segment(0);
        let left_mid = cubic_3d::evaluate(&a0, &a1, &a2, &a3, 0.5);
        let [b0, b1, b2, b3] = curve.segment(1);
        let right_mid = cubic_3d::evaluate(&b0, &b1, &b2, &b3, 0.5);

        Smooth::new(1).execute(&mut curve).unwrap();
        assert!((curve.points[1].co - left_mid).norm() < 1e-9);
        assert!((curve.points[2].co - right_mid).norm() < 1e-9);
    }

    #[test]
    fn endpoints_out_of_range_rejected() {
        let mut curve = kinked_curve();
        assert!(Smooth::new(0).execute(&mut curve).is_err());
        assert!(Smooth::new(2).execute(&mut curve).is_err());
        assert!(Smooth::new(9).execute(&mut curve).is_err());
    }
}
