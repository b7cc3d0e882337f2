pub mod cubic_3d;
pub mod rotate_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Mirrors `handle` through `co`, the idle-handle convention `2*co - handle`.
#[must_use]
pub fn mirror(co: &Point3, handle: &Point3) -> Point3 {
    Point3::from(co.coords * 2.0 - handle.coords)
}

/// Rounds `value` to `decimals` decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Compares two points by their rounded distance from the origin.
///
/// This is the loose "common point" test used when matching curve endpoints
/// of a patch loop: `decimals` is the number of decimal places kept before
/// comparing the position-vector norms.
#[must_use]
pub fn norms_match(a: &Point3, b: &Point3, decimals: u32) -> bool {
    round_to(a.coords.norm(), decimals) == round_to(b.coords.norm(), decimals)
}
