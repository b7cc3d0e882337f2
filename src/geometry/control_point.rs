use crate::math::{mirror, Point3, Vector3};

/// A cubic Bézier control point: an on-curve position with two free-form
/// handles.
///
/// The toolkit never infers handle continuity; handles stay exactly where an
/// operation puts them unless a caller applies a [`HandleType`] policy
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Handle controlling the incoming segment.
    pub handle_left: Point3,
    /// The on-curve position.
    pub co: Point3,
    /// Handle controlling the outgoing segment.
    pub handle_right: Point3,
}

impl ControlPoint {
    /// Creates a new control point.
    #[must_use]
    pub fn new(handle_left: Point3, co: Point3, handle_right: Point3) -> Self {
        Self {
            handle_left,
            co,
            handle_right,
        }
    }

    /// Creates a point with both handles collapsed onto the position.
    #[must_use]
    pub fn collapsed(co: Point3) -> Self {
        Self {
            handle_left: co,
            co,
            handle_right: co,
        }
    }

    /// Mirror image of the right handle through the position.
    #[must_use]
    pub fn mirrored_left(&self) -> Point3 {
        mirror(&self.co, &self.handle_right)
    }

    /// Mirror image of the left handle through the position.
    #[must_use]
    pub fn mirrored_right(&self) -> Point3 {
        mirror(&self.co, &self.handle_left)
    }

    /// Translates the position and both handles by `offset`.
    pub fn translate(&mut self, offset: &Vector3) {
        self.handle_left += offset;
        self.co += offset;
        self.handle_right += offset;
    }

    /// Returns the point with left and right handles swapped, as used when
    /// reversing a curve.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            handle_left: self.handle_right,
            co: self.co,
            handle_right: self.handle_left,
        }
    }
}

/// Handle continuity policy a caller may apply to a curve.
///
/// `Free` is the engine's native mode and applying it is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleType {
    /// Handles are independent.
    Free,
    /// Handles are kept collinear through the position.
    Aligned,
    /// Handles point straight at the neighbouring control points.
    Vector,
    /// Collinear handles with lengths derived from the neighbour chord.
    Auto,
}
