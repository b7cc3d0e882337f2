use crate::error::{OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{cubic_3d, distance, Point3, TOLERANCE};

/// Number of sub-samples used to estimate a segment's arc length when
/// distributing proportional sample counts.
const LENGTH_ESTIMATE_SAMPLES: usize = 12;

/// Approximate arc length of a 4-point cubic segment, measured over a fixed
/// number of interpolated samples.
pub(crate) fn segment_arc_length(segment: &[Point3; 4], samples: usize) -> f64 {
    let [p0, p1, p2, p3] = segment;
    let mut length = 0.0;
    let mut previous = *p0;
    for k in 1..samples {
        #[allow(clippy::cast_precision_loss)]
        let t = k as f64 / (samples - 1) as f64;
        let point = cubic_3d::evaluate(p0, p1, p2, p3, t);
        length += distance(&previous, &point);
        previous = point;
    }
    length
}

/// Arc length of a whole curve, densely sampled at the curve's resolution.
pub(crate) fn bezier_length(curve: &BezierCurve) -> f64 {
    (0..curve.segment_count())
        .map(|i| segment_arc_length(&curve.segment(i), curve.resolution.max(2) + 1))
        .sum()
}

/// Samples a Bézier curve at a fixed number of points per segment.
///
/// Produces `(count - 1) * segments + 1` points; the shared endpoint of
/// neighbouring segments appears once.
pub struct Interpolate<'a> {
    curve: &'a BezierCurve,
    count: usize,
}

impl<'a> Interpolate<'a> {
    /// Creates a new `Interpolate` operation with `count` samples per
    /// segment (including both segment endpoints).
    #[must_use]
    pub fn new(curve: &'a BezierCurve, count: usize) -> Self {
        Self { curve, count }
    }

    /// Executes the interpolation, returning the sampled points in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 control points or
    /// `count` is below 2.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        if self.curve.point_count() < 2 {
            return Err(OperationError::InvalidSelection(
                "curve needs at least 2 control points to interpolate".into(),
            )
            .into());
        }
        if self.count < 2 {
            return Err(OperationError::InvalidSelection(
                "interpolation needs at least 2 samples per segment".into(),
            )
            .into());
        }

        let segments = self.curve.segment_count();
        let mut points = Vec::with_capacity((self.count - 1) * segments + 1);
        points.push(self.curve.points[0].co);

        for index in 0..segments {
            let [p0, p1, p2, p3] = self.curve.segment(index);
            for k in 1..self.count {
                #[allow(clippy::cast_precision_loss)]
                let t = k as f64 / (self.count - 1) as f64;
                points.push(cubic_3d::evaluate(&p0, &p1, &p2, &p3, t));
            }
        }

        Ok(points)
    }
}

/// Samples a Bézier curve with a total sample budget distributed across
/// segments in proportion to their arc lengths.
///
/// Longer segments receive more samples. The residual of the per-segment
/// rounding is deliberately not redistributed, so the returned count may
/// differ slightly from `count`; smoothness of the distribution is preferred
/// over hitting the exact total.
pub struct InterpolateProportional<'a> {
    curve: &'a BezierCurve,
    count: usize,
}

impl<'a> InterpolateProportional<'a> {
    /// Creates a new `InterpolateProportional` operation with a total
    /// sample budget of `count`.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, count: usize) -> Self {
        Self { curve, count }
    }

    /// Executes the interpolation, returning the sampled points in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 control points.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        if self.curve.point_count() < 2 {
            return Err(OperationError::InvalidSelection(
                "curve needs at least 2 control points to interpolate".into(),
            )
            .into());
        }

        let segments = self.curve.segment_count();
        let lengths: Vec<f64> = (0..segments)
            .map(|i| segment_arc_length(&self.curve.segment(i), LENGTH_ESTIMATE_SAMPLES))
            .collect();
        let full_length: f64 = lengths.iter().sum();

        let distribution: Vec<usize> = if full_length < TOLERANCE {
            vec![2; segments]
        } else {
            lengths
                .iter()
                .map(|length| {
                    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let share = (self.count as f64 * (length / full_length)) as usize;
                    // Segment interpolation needs a count of at least 2.
                    share.max(2)
                })
                .collect()
        };

        let mut points = vec![self.curve.points[0].co];
        for (index, &count) in distribution.iter().enumerate() {
            let [p0, p1, p2, p3] = self.curve.segment(index);
            for k in 1..count {
                #[allow(clippy::cast_precision_loss)]
                let t = k as f64 / (count - 1) as f64;
                points.push(cubic_3d::evaluate(&p0, &p1, &p2, &p3, t));
            }
        }

        Ok(points)
    }
}
