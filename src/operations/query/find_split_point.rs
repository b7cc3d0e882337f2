use crate::error::{OperationError, Result};
use crate::geometry::{BezierCurve, SplitPoint};
use crate::math::{distance, Point3};
use crate::operations::resample::Interpolate;

/// Locates the parametric position on a curve nearest to a target point.
///
/// The curve is sampled at `resolution + 1` points per segment and the
/// nearest sample is mapped back to a `(segment, t)` pair. A sample landing
/// exactly on an interior control point reports `t == 0.0` of the following
/// segment; the curve's own endpoints are never reported.
pub struct FindSplitPoint<'a> {
    curve: &'a BezierCurve,
    target: Point3,
    tolerance: f64,
}

impl<'a> FindSplitPoint<'a> {
    /// Creates a new `FindSplitPoint` query. `tolerance` is the maximum
    /// accepted distance between the target and the nearest curve sample.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, target: Point3, tolerance: f64) -> Self {
        Self {
            curve,
            target,
            tolerance,
        }
    }

    /// Executes the query. Returns `None` when no sample lies within
    /// tolerance of the target, or when the nearest sample is one of the
    /// curve's endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve's resolution is below 2 (the sampling
    /// grid would be too coarse to invert).
    pub fn execute(&self) -> Result<Option<SplitPoint>> {
        let resolution = self.curve.resolution;
        if resolution < 2 {
            return Err(OperationError::InvalidSelection(
                "curve resolution must be at least 2 to locate a split point".into(),
            )
            .into());
        }

        let samples = Interpolate::new(self.curve, resolution + 1).execute()?;

        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for (index, sample) in samples.iter().enumerate() {
            let d = distance(sample, &self.target);
            if d < nearest_distance {
                nearest = index;
                nearest_distance = d;
            }
        }

        if nearest_distance > self.tolerance {
            return Ok(None);
        }
        if nearest == 0 || nearest == samples.len() - 1 {
            return Ok(None);
        }

        #[allow(clippy::cast_precision_loss)]
        let t = (nearest % resolution) as f64 / resolution as f64;
        Ok(Some(SplitPoint::new(nearest / resolution, t)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::cubic_3d;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn two_segment_curve() -> BezierCurve {
        BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
            (p(2.0, -1.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 1.0, 0.0)),
            (p(5.0, -1.0, 0.0), p(6.0, 0.0, 0.0), p(7.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn finds_midpoint_of_first_segment() {
        let curve = two_segment_curve();
        let [p0, p1, p2, p3] = curve.segment(0);
        let target = cubic_3d::evaluate(&p0, &p1, &p2, &p3, 0.5);

        let split = FindSplitPoint::new(&curve, target, 0.1)
            .execute()
            .unwrap()
            .unwrap();
        assert_eq!(split.segment, 0);
        assert!((split.t - 0.5).abs() < 0.1, "t={}", split.t);
    }

    #[test]
    fn interior_control_point_maps_to_t_zero() {
        let curve = two_segment_curve();
        let split = FindSplitPoint::new(&curve, p(3.0, 0.0, 0.0), 1e-6)
            .execute()
            .unwrap()
            .unwrap();
        assert_eq!(split.segment, 1);
        assert!(split.t.abs() < 1e-12, "t={}", split.t);
    }

    #[test]
    fn far_target_returns_none() {
        let curve = two_segment_curve();
        let split = FindSplitPoint::new(&curve, p(0.0, 50.0, 0.0), 0.5)
            .execute()
            .unwrap();
        assert!(split.is_none());
    }

    #[test]
    fn curve_endpoints_return_none() {
        let curve = two_segment_curve();
        for target in [p(0.0, 0.0, 0.0), p(6.0, 0.0, 0.0)] {
            let split = FindSplitPoint::new(&curve, target, 1e-6).execute().unwrap();
            assert!(split.is_none(), "target={target}");
        }
    }

    #[test]
    fn coarse_resolution_is_rejected() {
        let mut curve = two_segment_curve();
        curve.resolution = 1;
        assert!(FindSplitPoint::new(&curve, p(1.0, 0.0, 0.0), 1.0)
            .execute()
            .is_err());
    }
}
