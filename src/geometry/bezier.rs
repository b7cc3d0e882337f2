use crate::geometry::ControlPoint;
use crate::math::Point3;

/// Default interpolation resolution per segment, matching the common host
/// curve default.
pub const DEFAULT_RESOLUTION: usize = 12;

/// A piecewise cubic Bézier curve: ordered control points with free handles.
///
/// For `n` control points there are `n - 1` cubic segments when open, `n`
/// when closed (the last segment wraps back to the first point). Curves are
/// value types: splitting, offsetting and blending produce new instances,
/// while the explicit point-insertion operations mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    /// Ordered control points.
    pub points: Vec<ControlPoint>,
    /// Interpolation samples per segment used by resampling and split lookup.
    pub resolution: usize,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl BezierCurve {
    /// Creates a curve from control points with the given resolution.
    #[must_use]
    pub fn from_control_points(points: Vec<ControlPoint>, resolution: usize, closed: bool) -> Self {
        Self {
            points,
            resolution,
            closed,
        }
    }

    /// Creates an open curve from `(handle_left, co, handle_right)` tuples
    /// at the default resolution.
    #[must_use]
    pub fn from_tuples(points: &[(Point3, Point3, Point3)]) -> Self {
        let points = points
            .iter()
            .map(|&(handle_left, co, handle_right)| ControlPoint::new(handle_left, co, handle_right))
            .collect();
        Self {
            points,
            resolution: DEFAULT_RESOLUTION,
            closed: false,
        }
    }

    /// Flattens the curve back into `(handle_left, co, handle_right)` tuples.
    #[must_use]
    pub fn to_control_points(&self) -> Vec<(Point3, Point3, Point3)> {
        self.points
            .iter()
            .map(|p| (p.handle_left, p.co, p.handle_right))
            .collect()
    }

    /// Returns the number of control points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of cubic segments in this curve.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Returns segment `index` as the 4-point cubic
    /// `(p0.co, p0.handle_right, p1.handle_left, p1.co)`.
    ///
    /// For closed curves the last segment wraps to the first point.
    #[must_use]
    pub fn segment(&self, index: usize) -> [Point3; 4] {
        let n = self.points.len();
        let p0 = &self.points[index];
        let p1 = &self.points[(index + 1) % n];
        [p0.co, p0.handle_right, p1.handle_left, p1.co]
    }

    /// Returns a new curve with points in reverse order and handles swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let points = self.points.iter().rev().map(ControlPoint::flipped).collect();
        Self {
            points,
            resolution: self.resolution,
            closed: self.closed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn three_point_curve() -> BezierCurve {
        BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            (p(1.0, 1.0, 0.0), p(2.0, 1.0, 0.0), p(3.0, 1.0, 0.0)),
            (p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(5.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn segment_counts() {
        let mut curve = three_point_curve();
        assert_eq!(curve.point_count(), 3);
        assert_eq!(curve.segment_count(), 2);

        curve.closed = true;
        assert_eq!(curve.segment_count(), 3);
    }

    #[test]
    fn closed_segment_wraps() {
        let mut curve = three_point_curve();
        curve.closed = true;
        let [p0, _, _, p3] = curve.segment(2);
        assert_eq!(p0, p(4.0, 0.0, 0.0));
        assert_eq!(p3, p(0.0, 0.0, 0.0));
    }

    #[test]
    fn tuple_round_trip() {
        let curve = three_point_curve();
        let tuples = curve.to_control_points();
        let rebuilt = BezierCurve::from_tuples(&tuples);
        assert_eq!(curve, rebuilt);
    }

    #[test]
    fn reversed_is_involution() {
        let curve = three_point_curve();
        assert_eq!(curve.reversed().reversed(), curve);
    }

    #[test]
    fn reversed_swaps_handles() {
        let curve = three_point_curve();
        let rev = curve.reversed();
        assert_eq!(rev.points[0].co, p(4.0, 0.0, 0.0));
        assert_eq!(rev.points[0].handle_right, p(3.0, 0.0, 0.0));
        assert_eq!(rev.points[2].handle_left, p(1.0, 0.0, 0.0));
    }
}
