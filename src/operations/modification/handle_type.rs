use crate::geometry::{BezierCurve, ControlPoint, HandleType};
use crate::math::{Point3, TOLERANCE};

/// Applies a handle continuity policy to every point of a curve.
///
/// `Free` is the identity. The other policies recompute handles from the
/// neighbouring positions; an endpoint only adjusts the side that has a
/// neighbour. Directions that cannot be derived (coincident neighbours)
/// leave the handle untouched.
pub struct SetHandleType<'a> {
    curve: &'a BezierCurve,
    handle_type: HandleType,
}

impl<'a> SetHandleType<'a> {
    /// Creates a new `SetHandleType` operation.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, handle_type: HandleType) -> Self {
        Self { curve, handle_type }
    }

    /// Executes the policy, returning the adjusted curve.
    #[must_use]
    pub fn execute(&self) -> BezierCurve {
        if self.handle_type == HandleType::Free {
            return self.curve.clone();
        }

        let n = self.curve.points.len();
        let mut result = self.curve.clone();
        for index in 0..n {
            let prev = self.neighbour(index, false);
            let next = self.neighbour(index, true);
            let point = &mut result.points[index];
            match self.handle_type {
                HandleType::Free => {}
                HandleType::Vector => apply_vector(point, prev, next),
                HandleType::Aligned => apply_aligned(point),
                HandleType::Auto => apply_auto(point, prev, next),
            }
        }
        result
    }

    fn neighbour(&self, index: usize, forward: bool) -> Option<Point3> {
        let n = self.curve.points.len();
        let at = if forward {
            if index + 1 < n {
                index + 1
            } else if self.curve.closed {
                0
            } else {
                return None;
            }
        } else if index > 0 {
            index - 1
        } else if self.curve.closed {
            n - 1
        } else {
            return None;
        };
        Some(self.curve.points[at].co)
    }
}

/// Points each handle a third of the way toward the neighbour on its side.
fn apply_vector(point: &mut ControlPoint, prev: Option<Point3>, next: Option<Point3>) {
    if let Some(prev) = prev {
        point.handle_left = Point3::from(point.co.coords + (prev.coords - point.co.coords) / 3.0);
    }
    if let Some(next) = next {
        point.handle_right = Point3::from(point.co.coords + (next.coords - point.co.coords) / 3.0);
    }
}

/// Re-aims the right handle opposite the left one, preserving both lengths.
fn apply_aligned(point: &mut ControlPoint) {
    let left = point.handle_left - point.co;
    if left.norm() < TOLERANCE {
        return;
    }
    let direction = -left.normalize();
    let right_length = (point.handle_right - point.co).norm();
    point.handle_right = point.co + direction * right_length;
}

/// Collinear handles along the neighbour chord, lengths a third of the
/// distance to each neighbour.
fn apply_auto(point: &mut ControlPoint, prev: Option<Point3>, next: Option<Point3>) {
    let chord = match (prev, next) {
        (Some(prev), Some(next)) => next - prev,
        (Some(prev), None) => point.co - prev,
        (None, Some(next)) => next - point.co,
        (None, None) => return,
    };
    if chord.norm() < TOLERANCE {
        return;
    }
    let direction = chord.normalize();
    if let Some(prev) = prev {
        point.handle_left = point.co - direction * ((point.co - prev).norm() / 3.0);
    }
    if let Some(next) = next {
        point.handle_right = point.co + direction * ((next - point.co).norm() / 3.0);
    }
}
