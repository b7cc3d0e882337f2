use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{distance, Point3, TOLERANCE};

/// Removes a control point from a curve, in place.
///
/// Endpoint removal simply drops the point. Removing an interior point
/// reverses a previous insertion: the removed point's handle ratio recovers
/// the parameter at which the segment was once subdivided, and the
/// neighbours' handles are stretched back accordingly. For points that were
/// never produced by a subdivision this is a shape-changing approximation,
/// exactly as interactive deletion behaves.
pub struct RemovePoint {
    index: usize,
}

impl RemovePoint {
    /// Creates a new `RemovePoint` operation.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the removal.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range, when removal would
    /// leave fewer than 2 points, or when the removed point's handles are
    /// degenerate (coincident handles, or a handle lying on the position) so
    /// no subdivision parameter can be recovered.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<()> {
        let n = curve.point_count();
        if self.index >= n {
            return Err(OperationError::InvalidSelection(format!(
                "point {} out of range for {n} points",
                self.index
            ))
            .into());
        }
        if n <= 2 {
            return Err(OperationError::InvalidSelection(
                "removal would leave fewer than 2 control points".into(),
            )
            .into());
        }

        if self.index == 0 || self.index == n - 1 {
            curve.points.remove(self.index);
            return Ok(());
        }

        let point = curve.points[self.index];
        let chord = distance(&point.handle_left, &point.handle_right);
        if chord < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "coincident handles on removed point".into(),
            )
            .into());
        }
        let t = distance(&point.handle_left, &point.co) / chord;
        if t < TOLERANCE || (1.0 - t) < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "removed point sits on one of its handles".into(),
            )
            .into());
        }

        let prev = &mut curve.points[self.index - 1];
        prev.handle_right = Point3::from(
            prev.co.coords + (prev.handle_right.coords - prev.co.coords) / t,
        );
        let next = &mut curve.points[self.index + 1];
        next.handle_left = Point3::from(
            next.co.coords + (next.handle_left.coords - next.co.coords) / (1.0 - t),
        );

        curve.points.remove(self.index);
        Ok(())
    }
}
