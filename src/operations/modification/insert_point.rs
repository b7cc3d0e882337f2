use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{BezierCurve, ControlPoint, SplitPoint};
use crate::math::{cubic_3d, distance};

/// Two candidate positions closer than this are treated as the same control
/// point and no insertion happens.
const DUPLICATE_TOLERANCE: f64 = 1e-5;

/// Inserts a control point on the curve at a split location, in place.
///
/// The segment's existing handles are shortened so the curve shape is
/// preserved exactly.
pub struct InsertPoint {
    split: SplitPoint,
}

impl InsertPoint {
    /// Creates a new `InsertPoint` operation.
    #[must_use]
    pub fn new(split: SplitPoint) -> Self {
        Self { split }
    }

    /// Executes the insertion. Returns `false` without modifying the curve
    /// when the split position coincides with an existing control point of
    /// the segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the segment index or parameter is out of range.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<bool> {
        let segment = self.split.segment;
        let t = self.split.t;
        if segment >= curve.segment_count() {
            return Err(OperationError::InvalidSelection(format!(
                "segment {segment} out of range for {} segments",
                curve.segment_count()
            ))
            .into());
        }
        if !(0.0..1.0).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }

        let [p0, p1, p2, p3] = curve.segment(segment);
        let split = cubic_3d::de_casteljau_split(&p0, &p1, &p2, &p3, t);

        if distance(&split.co, &p0) < DUPLICATE_TOLERANCE
            || distance(&split.co, &p3) < DUPLICATE_TOLERANCE
        {
            return Ok(false);
        }

        let n = curve.points.len();
        curve.points[segment].handle_right = split.start_handle_right;
        curve.points[(segment + 1) % n].handle_left = split.end_handle_left;
        curve.points.insert(
            segment + 1,
            ControlPoint::new(split.handle_left, split.co, split.handle_right),
        );
        Ok(true)
    }
}
