use crate::error::{GeometryError, Result};
use crate::geometry::ControlPoint;
use crate::math::{rotate_3d, Point3, Vector3, TOLERANCE};

/// A rotation-minimizing frame at a point on the curve.
///
/// Frames are propagated with the double-reflection method (Wang et al.,
/// "Computation of rotation minimizing frames", ACM TOG 2008), which avoids
/// the sudden flips a Frenet frame exhibits at inflection points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Sample position on the curve.
    pub position: Point3,
    /// Unit tangent at the sample.
    pub tangent: Vector3,
    /// Reference direction carried along the curve.
    pub reference: Vector3,
    /// Offset direction, `tangent × reference`.
    pub normal: Vector3,
}

impl Frame {
    /// Builds the frame at a curve's start point, rotated about the curve
    /// by `rotation` radians.
    ///
    /// The reference direction is seeded from the cross product of the
    /// point's handle positions, so it depends on where the curve sits in
    /// space, not only on its shape.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] when the point's handles are
    /// collapsed or collinear with the origin, leaving no usable seed
    /// direction.
    pub fn initial(point: &ControlPoint, rotation: f64) -> Result<Self> {
        let tangent = point.handle_right - point.co;
        let chord = point.handle_left - point.handle_right;
        let seed = point.handle_right.coords.cross(&point.handle_left.coords);
        if tangent.norm() < TOLERANCE || chord.norm() < TOLERANCE || seed.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let tangent = tangent.normalize();
        let reference = rotate_3d::rotate_about_axis(&seed.normalize(), &chord.normalize(), rotation);
        let normal = tangent.cross(&reference).normalize();
        Ok(Self {
            position: point.co,
            tangent,
            reference,
            normal,
        })
    }

    /// Propagates the frame to the next sample by two reflections: one in
    /// the plane bisecting the step, one aligning the reflected tangent
    /// with the true tangent at the destination.
    ///
    /// Degenerate steps (coincident samples or identical tangents) skip the
    /// corresponding reflection instead of dividing by zero.
    #[must_use]
    pub fn next(&self, position: Point3, tangent: Vector3) -> Self {
        let v1 = position - self.position;
        let c1 = v1.norm_squared();
        let (mut reference, reflected_tangent) = if c1 < TOLERANCE {
            (self.reference, self.tangent)
        } else {
            (
                self.reference - v1 * (2.0 / c1 * v1.dot(&self.reference)),
                self.tangent - v1 * (2.0 / c1 * v1.dot(&self.tangent)),
            )
        };

        let v2 = tangent - reflected_tangent;
        let c2 = v2.norm_squared();
        if c2 >= TOLERANCE {
            reference -= v2 * (2.0 / c2 * v2.dot(&reference));
        }

        Self {
            position,
            tangent,
            reference,
            normal: tangent.cross(&reference),
        }
    }

    /// The point at `distance` along the frame's offset direction.
    #[must_use]
    pub fn offset_target(&self, distance: f64) -> Point3 {
        self.position + self.normal * distance
    }
}
