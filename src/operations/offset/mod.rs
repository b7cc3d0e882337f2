//! Parallel-curve offsetting along rotation-minimizing frames.

mod frame;
mod handle_search;

pub use frame::Frame;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{cubic_3d, TOLERANCE};
use handle_search::{find_best_handle_length, SearchedHandle};

/// Default sampling budget for the offset handle search.
pub const DEFAULT_OFFSET_PRECISION: usize = 100;

/// Offsets an open Bézier curve by a distance along the curve's
/// rotation-minimizing normal, optionally rotated around the curve.
///
/// A frame is propagated through samples at `t = 1/3`, `t = 2/3` and the end
/// of every segment. Control points (with their handles) translate along the
/// normal at their own frame; the interior frames become targets that the
/// offset curve should pass through, and each segment's handle lengths are
/// then tuned to approach them. An exact polynomial offset does not exist in
/// general, so the result is an approximation that improves with
/// `precision`.
pub struct Offset<'a> {
    curve: &'a BezierCurve,
    distance: f64,
    rotation: f64,
    precision: usize,
}

impl<'a> Offset<'a> {
    /// Creates a new `Offset` operation. `rotation` is in radians and spins
    /// the offset direction around the curve; precision defaults to
    /// [`DEFAULT_OFFSET_PRECISION`].
    #[must_use]
    pub fn new(curve: &'a BezierCurve, distance: f64, rotation: f64) -> Self {
        Self {
            curve,
            distance,
            rotation,
            precision: DEFAULT_OFFSET_PRECISION,
        }
    }

    /// Overrides the sampling budget of the handle search. A different
    /// precision can fix wrong curvature in stubborn cases.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Executes the offset, returning the new curve.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve is closed or has fewer than 2
    /// points, when `precision` is below 2, or when a degenerate tangent or
    /// start frame stops the frame propagation.
    pub fn execute(&self) -> Result<BezierCurve> {
        if self.curve.closed {
            return Err(
                OperationError::InvalidSelection("cannot offset a closed curve".into()).into(),
            );
        }
        if self.curve.point_count() < 2 {
            return Err(OperationError::InvalidSelection(
                "offsetting needs at least 2 control points".into(),
            )
            .into());
        }
        if self.precision < 2 {
            return Err(OperationError::InvalidSelection(
                "offset precision must be at least 2".into(),
            )
            .into());
        }

        let frames = self.propagate_frames()?;
        let mut result = self.curve.clone();

        for (index, point) in result.points.iter_mut().enumerate() {
            point.translate(&(frames[index * 3].normal * self.distance));
        }

        for index in 0..result.segment_count() {
            let targets = (
                frames[index * 3 + 1].offset_target(self.distance),
                frames[index * 3 + 2].offset_target(self.distance),
            );

            let segment = result.segment(index);
            match find_best_handle_length(&segment, SearchedHandle::Right, &targets.0, self.precision)
            {
                Some(handle) => result.points[index].handle_right = handle,
                None => log::warn!(
                    "offset handle search exhausted its budget on segment {index} (right handle)"
                ),
            }

            let segment = result.segment(index);
            match find_best_handle_length(&segment, SearchedHandle::Left, &targets.1, self.precision)
            {
                Some(handle) => result.points[index + 1].handle_left = handle,
                None => log::warn!(
                    "offset handle search exhausted its budget on segment {index} (left handle)"
                ),
            }
        }

        Ok(result)
    }

    /// Frames at the start point and at `t = 1/3`, `t = 2/3` and the end of
    /// every segment: `3 * segments + 1` in total.
    fn propagate_frames(&self) -> Result<Vec<Frame>> {
        let mut frames = vec![Frame::initial(&self.curve.points[0], self.rotation)?];

        for index in 0..self.curve.segment_count() {
            let [p0, p1, p2, p3] = self.curve.segment(index);

            for t in [1.0 / 3.0, 2.0 / 3.0] {
                let tangent = cubic_3d::tangent(&p0, &p1, &p2, &p3, t);
                if tangent.norm() < TOLERANCE {
                    return Err(GeometryError::Degenerate(
                        "zero tangent during frame propagation".into(),
                    )
                    .into());
                }
                let position = cubic_3d::evaluate(&p0, &p1, &p2, &p3, t);
                let previous = frames[frames.len() - 1];
                frames.push(previous.next(position, tangent.normalize()));
            }

            let end = &self.curve.points[index + 1];
            let tangent = end.co - end.handle_left;
            if tangent.norm() < TOLERANCE {
                return Err(GeometryError::Degenerate(
                    "zero tangent at segment end during frame propagation".into(),
                )
                .into());
            }
            let previous = frames[frames.len() - 1];
            frames.push(previous.next(end.co, tangent.normalize()));
        }

        Ok(frames)
    }
}
