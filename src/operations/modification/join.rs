use crate::error::{OperationError, Result};
use crate::geometry::BezierCurve;

/// Concatenates two open curves end-to-start into a single curve.
///
/// The seam reuses the first curve's last position: its outgoing handle is
/// taken from the second curve's first point and the second curve's first
/// position is dropped. Callers are expected to have placed the second
/// curve's start at (or near) the first curve's end; no welding is applied.
pub struct Join<'a> {
    first: &'a BezierCurve,
    second: &'a BezierCurve,
}

impl<'a> Join<'a> {
    /// Creates a new `Join` operation.
    #[must_use]
    pub fn new(first: &'a BezierCurve, second: &'a BezierCurve) -> Self {
        Self { first, second }
    }

    /// Executes the join, returning the combined curve. The result keeps
    /// the first curve's resolution.
    ///
    /// # Errors
    ///
    /// Returns an error when either curve is closed or empty.
    pub fn execute(&self) -> Result<BezierCurve> {
        if self.first.closed || self.second.closed {
            return Err(
                OperationError::InvalidSelection("cannot join closed curves".into()).into(),
            );
        }
        if self.first.points.is_empty() || self.second.points.is_empty() {
            return Err(
                OperationError::InvalidSelection("cannot join an empty curve".into()).into(),
            );
        }

        let mut points = self.first.points.clone();
        if let Some(seam) = points.last_mut() {
            seam.handle_right = self.second.points[0].handle_right;
        }
        points.extend_from_slice(&self.second.points[1..]);

        Ok(BezierCurve::from_control_points(
            points,
            self.first.resolution,
            false,
        ))
    }
}
