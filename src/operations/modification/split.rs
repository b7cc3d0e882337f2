use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{BezierCurve, ControlPoint, SplitPoint};
use crate::math::{cubic_3d, mirror};

/// Divides a curve into two independent curves at a split point.
///
/// At `t > 0` the segment is subdivided with De Casteljau's construction and
/// the new boundary point appears in both halves, so the two results carry
/// `n + 2` control points in total. At `t == 0` the curve divides at the
/// existing control point starting the segment; that point is duplicated
/// instead.
pub struct SplitCurve<'a> {
    curve: &'a BezierCurve,
    split: SplitPoint,
}

impl<'a> SplitCurve<'a> {
    /// Creates a new `SplitCurve` operation.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, split: SplitPoint) -> Self {
        Self { curve, split }
    }

    /// Executes the split, returning the `(left, right)` halves.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve is closed, when the segment index or
    /// parameter is out of range, or when the split lands on one of the
    /// curve's endpoints (nothing to divide).
    pub fn execute(&self) -> Result<(BezierCurve, BezierCurve)> {
        if self.curve.closed {
            return Err(
                OperationError::InvalidSelection("cannot split a closed curve".into()).into(),
            );
        }
        let segment = self.split.segment;
        let t = self.split.t;
        if segment >= self.curve.segment_count() {
            return Err(OperationError::InvalidSelection(format!(
                "segment {segment} out of range for {} segments",
                self.curve.segment_count()
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

        if t == 0.0 {
            return self.divide_at_control_point(segment);
        }

        let [p0, p1, p2, p3] = self.curve.segment(segment);
        let split = cubic_3d::de_casteljau_split(&p0, &p1, &p2, &p3, t);

        let mut left_points = self.curve.points[..=segment].to_vec();
        if let Some(last) = left_points.last_mut() {
            last.handle_right = split.start_handle_right;
        }
        left_points.push(ControlPoint::new(
            split.handle_left,
            split.co,
            mirror(&split.co, &split.handle_left),
        ));

        let mut right_points = vec![ControlPoint::new(
            mirror(&split.co, &split.handle_right),
            split.co,
            split.handle_right,
        )];
        right_points.extend_from_slice(&self.curve.points[segment + 1..]);
        right_points[1].handle_left = split.end_handle_left;

        Ok((self.halve(left_points), self.halve(right_points)))
    }

    /// Division at an existing interior control point: both halves keep the
    /// point, the right half gets a mirrored incoming handle.
    fn divide_at_control_point(&self, index: usize) -> Result<(BezierCurve, BezierCurve)> {
        if index == 0 {
            return Err(OperationError::InvalidSelection(
                "cannot split a curve at its start point".into(),
            )
            .into());
        }

        let left_points = self.curve.points[..=index].to_vec();
        let mut right_points = self.curve.points[index..].to_vec();
        right_points[0].handle_left = right_points[0].mirrored_left();

        Ok((self.halve(left_points), self.halve(right_points)))
    }

    fn halve(&self, points: Vec<ControlPoint>) -> BezierCurve {
        BezierCurve::from_control_points(points, self.curve.resolution, false)
    }
}
