use crate::math::Vector3;

/// Rotates `v` about the unit `axis` by `angle` radians using the Rodrigues
/// rotation formula.
///
/// `axis` must be normalized; the caller is responsible for that.
#[must_use]
pub fn rotate_about_axis(v: &Vector3, axis: &Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}
