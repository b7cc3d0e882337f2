use crate::error::{OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{distance, round_to, Point3};

use super::interpolate::{bezier_length, InterpolateProportional};

/// Resamples a curve at approximately uniform arc-length spacing
/// ("space resampling").
///
/// The curve is first densely sampled (proportionally, at `precision * 100`
/// points), then the dense samples are walked while accumulating chord
/// length; a resample point is emitted each time the accumulator crosses
/// `length / count`, and the final dense sample is always forced as the last
/// output point.
///
/// The output contains `count + 1` or `count + 2` points depending on how
/// the rounding falls. Downstream consumers (blending, lofting) rely on this
/// exact behaviour, so it is pinned by tests rather than corrected.
pub struct ResampleByArcLength<'a> {
    curve: &'a BezierCurve,
    precision: usize,
    count: usize,
}

impl<'a> ResampleByArcLength<'a> {
    /// Creates a new `ResampleByArcLength` operation.
    ///
    /// `precision` scales the dense pre-sampling; `count` is the target
    /// number of arc-length intervals.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, precision: usize, count: usize) -> Self {
        Self {
            curve,
            precision,
            count,
        }
    }

    /// Executes the resampling, returning points spaced approximately
    /// uniformly along the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 control points or
    /// `precision`/`count` is zero.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        if self.precision == 0 || self.count == 0 {
            return Err(OperationError::InvalidSelection(
                "resample precision and count must be positive".into(),
            )
            .into());
        }

        let dense = InterpolateProportional::new(self.curve, self.precision * 100).execute()?;

        #[allow(clippy::cast_precision_loss)]
        let target_length = round_to(bezier_length(self.curve) / self.count as f64, 9);

        let mut resampled = vec![dense[0]];
        let mut accumulated = 0.0;

        for index in 0..dense.len() - 1 {
            accumulated += distance(&dense[index], &dense[index + 1]);
            if accumulated > target_length {
                resampled.push(dense[index.saturating_sub(1)]);
                accumulated = 0.0;
            }
        }

        // The walk never emits the curve end itself; force it, replacing a
        // near-duplicate trailing point if one slipped in.
        let last_dense = dense[dense.len() - 1];
        if resampled.len() - 1 < self.count {
            resampled.push(last_dense);
        }
        if let Some(last) = resampled.last_mut() {
            if (last.coords.norm() - last_dense.coords.norm()).abs() > 1e-5 {
                *last = last_dense;
            }
        }

        Ok(resampled)
    }
}
