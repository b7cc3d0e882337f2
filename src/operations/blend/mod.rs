//! Interpolated curve arrays: plain blends and rail-constrained blends.

mod rails;

pub use rails::{BlendOneProfileTwoRails, BlendTwoProfilesTwoRails};

use crate::error::{OperationError, Result};
use crate::geometry::{BezierCurve, ControlPoint};
use crate::math::lerp;

/// Pointwise linear interpolation between two curves with equal point
/// counts. Positions and both handles interpolate independently.
///
/// # Errors
///
/// Returns [`OperationError::MismatchedPointCount`] when the curves differ
/// in control point count.
pub fn lerp_curves(from: &BezierCurve, to: &BezierCurve, t: f64) -> Result<BezierCurve> {
    if from.point_count() != to.point_count() {
        return Err(OperationError::MismatchedPointCount {
            left: from.point_count(),
            right: to.point_count(),
        }
        .into());
    }

    let points = from
        .points
        .iter()
        .zip(&to.points)
        .map(|(a, b)| {
            ControlPoint::new(
                lerp(&a.handle_left, &b.handle_left, t),
                lerp(&a.co, &b.co, t),
                lerp(&a.handle_right, &b.handle_right, t),
            )
        })
        .collect();

    Ok(BezierCurve::from_control_points(
        points,
        from.resolution,
        from.closed && to.closed,
    ))
}

/// The evenly spaced intermediate blends between two curves, excluding the
/// sources themselves: `count` curves at `t = i / (count + 1)`.
pub(crate) fn blend_family(
    from: &BezierCurve,
    to: &BezierCurve,
    count: usize,
) -> Result<Vec<BezierCurve>> {
    #[allow(clippy::cast_precision_loss)]
    let denominator = (count + 1) as f64;
    (1..=count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / denominator;
            lerp_curves(from, to, t)
        })
        .collect()
}

/// Builds an array of interpolated curves between two opposite curves.
///
/// The second curve is reversed automatically when its start direction
/// opposes the first curve's, so visually parallel inputs blend without
/// crossing.
pub struct BlendCurves<'a> {
    curve_1: &'a BezierCurve,
    curve_2: &'a BezierCurve,
    count: usize,
}

impl<'a> BlendCurves<'a> {
    /// Creates a new `BlendCurves` operation producing `count` intermediate
    /// curves.
    #[must_use]
    pub fn new(curve_1: &'a BezierCurve, curve_2: &'a BezierCurve, count: usize) -> Self {
        Self {
            curve_1,
            curve_2,
            count,
        }
    }

    /// Executes the blend, returning the intermediate curves ordered from
    /// the first source toward the second.
    ///
    /// # Errors
    ///
    /// Returns an error when the point counts differ or either curve has
    /// fewer than 2 points.
    pub fn execute(&self) -> Result<Vec<BezierCurve>> {
        if self.curve_1.point_count() < 2 || self.curve_2.point_count() < 2 {
            return Err(OperationError::InvalidSelection(
                "blending needs at least 2 control points per curve".into(),
            )
            .into());
        }

        let along_1 = self.curve_1.points[0].co - self.curve_1.points[1].co;
        let along_2 = self.curve_2.points[0].co - self.curve_2.points[1].co;
        let oriented;
        let curve_2 = if along_1.dot(&along_2) < 0.0 {
            oriented = self.curve_2.reversed();
            &oriented
        } else {
            self.curve_2
        };

        blend_family(self.curve_1, curve_2, self.count)
    }
}
