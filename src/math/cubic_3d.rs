//! Cubic Bézier segment math: evaluation, tangents, De Casteljau
//! subdivision, handle fitting and quadratic elevation.
//!
//! A segment is the 4-point tuple `(p0, p1, p2, p3)` where `p1` is the
//! outgoing handle of the start point and `p2` the incoming handle of the
//! end point.

use nalgebra::{Matrix4, Matrix4x3, RowVector4};

use crate::error::{GeometryError, Result};
use crate::math::{distance, lerp, Point3, Vector3, TOLERANCE};

/// Evaluates the cubic Bernstein basis at `t`.
///
/// `B(t) = (1-t)³p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³p3`.
/// The caller guarantees `t ∈ [0, 1]`.
#[must_use]
pub fn evaluate(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    let coords = p0.coords * (u * u * u)
        + p1.coords * (3.0 * u * u * t)
        + p2.coords * (3.0 * u * t * t)
        + p3.coords * (t * t * t);
    Point3::from(coords)
}

/// Evaluates the segment at `t` using the coefficient-matrix form.
///
/// Numerically equivalent to [`evaluate`]; kept because some callers build
/// the power basis row anyway.
#[must_use]
pub fn evaluate_matrix(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let coefs = Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        -3.0, 3.0, 0.0, 0.0, //
        3.0, -6.0, 3.0, 0.0, //
        -1.0, 3.0, -3.0, 1.0,
    );
    let control = Matrix4x3::from_rows(&[
        p0.coords.transpose(),
        p1.coords.transpose(),
        p2.coords.transpose(),
        p3.coords.transpose(),
    ]);
    let row = RowVector4::new(1.0, t, t * t, t * t * t) * coefs * control;
    Point3::new(row[0], row[1], row[2])
}

/// First derivative of the segment at `t`.
///
/// `B'(t) = 3(1-t)²(p1-p0) + 6(1-t)t(p2-p1) + 3t²(p3-p2)`.
/// Degenerate input (all four points coincident) yields a zero vector;
/// callers must guard normalization.
#[must_use]
pub fn tangent(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Vector3 {
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}

/// Corner data produced by subdividing a segment at a parameter.
///
/// Re-joining `left_segment` and `right_segment` reconstructs the original
/// curve exactly, up to floating-point error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSplit {
    /// Shortened outgoing handle for the segment's start point.
    pub start_handle_right: Point3,
    /// Incoming handle of the new point.
    pub handle_left: Point3,
    /// Position of the new point, `B(t)`.
    pub co: Point3,
    /// Outgoing handle of the new point.
    pub handle_right: Point3,
    /// Shortened incoming handle for the segment's end point.
    pub end_handle_left: Point3,
}

impl CubicSplit {
    /// The left sub-segment as a 4-point cubic, given the original start point.
    #[must_use]
    pub fn left_segment(&self, p0: &Point3) -> [Point3; 4] {
        [*p0, self.start_handle_right, self.handle_left, self.co]
    }

    /// The right sub-segment as a 4-point cubic, given the original end point.
    #[must_use]
    pub fn right_segment(&self, p3: &Point3) -> [Point3; 4] {
        [self.co, self.handle_right, self.end_handle_left, *p3]
    }
}

/// Subdivides the segment at `t` with De Casteljau's algorithm.
#[must_use]
pub fn de_casteljau_split(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> CubicSplit {
    let p0p1 = lerp(p0, p1, t);
    let p1p2 = lerp(p1, p2, t);
    let p2p3 = lerp(p2, p3, t);

    let handle_left = lerp(&p0p1, &p1p2, t);
    let handle_right = lerp(&p1p2, &p2p3, t);
    let co = lerp(&handle_left, &handle_right, t);

    CubicSplit {
        start_handle_right: p0p1,
        handle_left,
        co,
        handle_right,
        end_handle_left: p2p3,
    }
}

/// Solves for the two interior handles of a cubic whose endpoints are
/// `points[0]` / `points[3]` and which passes through `points[1]` at `t1`
/// and `points[2]` at `t2`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] when the 2x2 system is singular
/// (`t1` and `t2` coincide or touch the ends of the parameter range).
pub fn solve_handles(points: &[Point3; 4], t1: f64, t2: f64) -> Result<(Point3, Point3)> {
    let u1 = 1.0 - t1;
    let u2 = 1.0 - t2;

    let a11 = 3.0 * u1 * u1 * t1;
    let a12 = 3.0 * u1 * t1 * t1;
    let a21 = 3.0 * u2 * u2 * t2;
    let a22 = 3.0 * u2 * t2 * t2;
    let det = a11 * a22 - a12 * a21;

    if det.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("handle fit system is singular".into()).into());
    }

    let b1 = points[1].coords - points[0].coords * u1.powi(3) - points[3].coords * t1.powi(3);
    let b2 = points[2].coords - points[0].coords * u2.powi(3) - points[3].coords * t2.powi(3);

    let h1 = (b1 * a22 - b2 * a12) / det;
    let h2 = (-b1 * a21 + b2 * a11) / det;

    Ok((Point3::from(h1), Point3::from(h2)))
}

/// Parameter estimates for two intermediate samples of a 4-point run,
/// derived from chord-length ratios.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] when the chord length is zero
/// (all points coincident).
pub fn chord_length_ts(points: &[Point3; 4]) -> Result<(f64, f64)> {
    let length: f64 = points.windows(2).map(|w| distance(&w[0], &w[1])).sum();
    if length < TOLERANCE {
        return Err(GeometryError::Degenerate("zero chord length".into()).into());
    }
    let t1 = distance(&points[0], &points[1]) / length;
    let t2 = distance(&points[0], &points[2]) / length;
    Ok((t1, t2))
}

/// The single control handle of a quadratic Bézier through `point` at `t`
/// with endpoints `p0` and `p2`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] for `t` at 0 or 1, where the
/// handle is unconstrained.
pub fn quadratic_handle(point: &Point3, t: f64, p0: &Point3, p2: &Point3) -> Result<Point3> {
    let denom = 2.0 * (1.0 - t) * t;
    if denom.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("quadratic handle at t = 0 or t = 1".into()).into());
    }
    let u = 1.0 - t;
    let coords = (point.coords - p0.coords * (u * u) - p2.coords * (t * t)) / denom;
    Ok(Point3::from(coords))
}

/// Converts a quadratic handle into the two cubic handles via the 2/3 rule:
/// `cubic = end + (2/3)(quad - end)` for each endpoint.
#[must_use]
pub fn elevate_quadratic(p0: &Point3, handle: &Point3, p2: &Point3) -> (Point3, Point3) {
    (lerp(p0, handle, 2.0 / 3.0), lerp(p2, handle, 2.0 / 3.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn arch() -> [Point3; 4] {
        [
            p(0.0, 0.0, 0.0),
            p(1.0, 2.0, 0.0),
            p(3.0, 2.0, 1.0),
            p(4.0, 0.0, 0.0),
        ]
    }

    // ── evaluate tests ──

    #[test]
    fn evaluate_hits_endpoints() {
        let [p0, p1, p2, p3] = arch();
        assert!((evaluate(&p0, &p1, &p2, &p3, 0.0) - p0).norm() < TOL);
        assert!((evaluate(&p0, &p1, &p2, &p3, 1.0) - p3).norm() < TOL);
    }

    #[test]
    fn evaluate_straight_line_midpoint() {
        // Collinear control points: the curve is the straight line itself.
        let b = evaluate(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(2.0, 0.0, 0.0),
            &p(3.0, 0.0, 0.0),
            0.5,
        );
        assert!((b - p(1.5, 0.0, 0.0)).norm() < TOL, "b={b:?}");
    }

    #[test]
    fn matrix_form_matches_bernstein() {
        let [p0, p1, p2, p3] = arch();
        for k in 0..=10 {
            let t = f64::from(k) / 10.0;
            let a = evaluate(&p0, &p1, &p2, &p3, t);
            let b = evaluate_matrix(&p0, &p1, &p2, &p3, t);
            assert!((a - b).norm() < TOL, "t={t} a={a:?} b={b:?}");
        }
    }

    // ── tangent tests ──

    #[test]
    fn tangent_at_ends_follows_handles() {
        let [p0, p1, p2, p3] = arch();
        let start = tangent(&p0, &p1, &p2, &p3, 0.0);
        let end = tangent(&p0, &p1, &p2, &p3, 1.0);
        assert!((start - (p1 - p0) * 3.0).norm() < TOL);
        assert!((end - (p3 - p2) * 3.0).norm() < TOL);
    }

    #[test]
    fn tangent_degenerate_is_zero() {
        let c = p(1.0, 1.0, 1.0);
        let t = tangent(&c, &c, &c, &c, 0.5);
        assert!(t.norm() < TOL);
    }

    // ── de_casteljau_split tests ──

    #[test]
    fn split_point_lies_on_curve() {
        let [p0, p1, p2, p3] = arch();
        for k in 1..10 {
            let t = f64::from(k) / 10.0;
            let split = de_casteljau_split(&p0, &p1, &p2, &p3, t);
            let b = evaluate(&p0, &p1, &p2, &p3, t);
            assert!((split.co - b).norm() < 1e-6, "t={t}");
        }
    }

    #[test]
    fn split_halves_rejoin() {
        let [p0, p1, p2, p3] = arch();
        let t0 = 0.37;
        let split = de_casteljau_split(&p0, &p1, &p2, &p3, t0);
        let [l0, l1, l2, l3] = split.left_segment(&p0);
        let [r0, r1, r2, r3] = split.right_segment(&p3);

        // Left at local t=1, right at local t=0 and the original at t0 agree.
        let original = evaluate(&p0, &p1, &p2, &p3, t0);
        let left_end = evaluate(&l0, &l1, &l2, &l3, 1.0);
        let right_start = evaluate(&r0, &r1, &r2, &r3, 0.0);
        assert!((left_end - original).norm() < 1e-6);
        assert!((right_start - original).norm() < 1e-6);

        // The halves reparameterize the original curve.
        for k in 0..=10 {
            let t = f64::from(k) / 10.0;
            let on_left = evaluate(&l0, &l1, &l2, &l3, t);
            let expect = evaluate(&p0, &p1, &p2, &p3, t * t0);
            assert!((on_left - expect).norm() < 1e-6, "t={t}");
        }
    }

    // ── handle fitting tests ──

    #[test]
    fn solve_handles_round_trip() {
        let [p0, p1, p2, p3] = arch();
        let s1 = evaluate(&p0, &p1, &p2, &p3, 1.0 / 3.0);
        let s2 = evaluate(&p0, &p1, &p2, &p3, 2.0 / 3.0);
        let (h1, h2) = solve_handles(&[p0, s1, s2, p3], 1.0 / 3.0, 2.0 / 3.0).unwrap();
        assert!((h1 - p1).norm() < 1e-6, "h1={h1:?}");
        assert!((h2 - p2).norm() < 1e-6, "h2={h2:?}");
    }

    #[test]
    fn solve_handles_singular_ts() {
        let pts = arch();
        assert!(solve_handles(&pts, 0.5, 0.5).is_err());
        assert!(solve_handles(&pts, 0.0, 1.0).is_err());
    }

    #[test]
    fn chord_length_ts_coincident_points() {
        let c = p(2.0, 2.0, 2.0);
        assert!(chord_length_ts(&[c, c, c, c]).is_err());
    }

    // ── quadratic elevation tests ──

    #[test]
    fn quadratic_handle_recovers_midpoint() {
        let p0 = p(0.0, 0.0, 0.0);
        let p2 = p(2.0, 0.0, 0.0);
        let handle = p(1.0, 2.0, 0.0);
        // Quadratic at t=0.5 through these points.
        let mid = Point3::from(p0.coords * 0.25 + handle.coords * 0.5 + p2.coords * 0.25);
        let h = quadratic_handle(&mid, 0.5, &p0, &p2).unwrap();
        assert!((h - handle).norm() < TOL, "h={h:?}");
    }

    #[test]
    fn quadratic_handle_degenerate_t() {
        let p0 = p(0.0, 0.0, 0.0);
        let p2 = p(2.0, 0.0, 0.0);
        assert!(quadratic_handle(&p0, 0.0, &p0, &p2).is_err());
    }

    #[test]
    fn elevation_preserves_curve() {
        let p0 = p(0.0, 0.0, 0.0);
        let handle = p(1.0, 2.0, 0.0);
        let p2 = p(2.0, 0.0, 0.0);
        let (h1, h2) = elevate_quadratic(&p0, &handle, &p2);
        for k in 0..=10 {
            let t = f64::from(k) / 10.0;
            let u = 1.0 - t;
            let quad =
                Point3::from(p0.coords * (u * u) + handle.coords * (2.0 * u * t) + p2.coords * (t * t));
            let cubic = evaluate(&p0, &h1, &h2, &p2, t);
            assert!((quad - cubic).norm() < TOL, "t={t}");
        }
    }
}
