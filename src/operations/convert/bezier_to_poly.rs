use crate::error::Result;
use crate::geometry::{BezierCurve, Polyline};
use crate::operations::resample::{Interpolate, ResampleByArcLength};

/// Dense-sampling factor used when flattening with arc-length spacing.
const FLATTEN_PRECISION: usize = 1000;

/// Flattens a Bézier curve into a polyline.
///
/// In `exact` mode the curve's own interpolation grid is kept (`count`
/// samples per segment), so the vertices match what a host application would
/// draw at that resolution. Otherwise the vertices are spaced by arc length,
/// with `count` intervals over the whole curve.
pub struct BezierToPoly<'a> {
    curve: &'a BezierCurve,
    count: usize,
    exact: bool,
    precision: usize,
}

impl<'a> BezierToPoly<'a> {
    /// Creates a new `BezierToPoly` operation.
    #[must_use]
    pub fn new(curve: &'a BezierCurve, count: usize, exact: bool) -> Self {
        Self {
            curve,
            count,
            exact,
            precision: FLATTEN_PRECISION,
        }
    }

    /// Overrides the dense-sampling factor of the arc-length mode.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Executes the flattening.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve has fewer than 2 control points or
    /// `count` is too small for the chosen mode.
    pub fn execute(&self) -> Result<Polyline> {
        let points = if self.exact {
            Interpolate::new(self.curve, self.count).execute()?
        } else {
            ResampleByArcLength::new(self.curve, self.precision, self.count).execute()?
        };
        Ok(Polyline::from_points(points, self.curve.closed))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{distance, Point3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn s_curve() -> BezierCurve {
        BezierCurve::from_tuples(&[
            (p(-1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
            (p(2.0, -1.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 1.0, 0.0)),
            (p(5.0, -1.0, 0.0), p(6.0, 0.0, 0.0), p(7.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn exact_mode_keeps_the_interpolation_grid() {
        let curve = s_curve();
        let line = BezierToPoly::new(&curve, 5, true).execute().unwrap();
        // (count - 1) * segments + 1 vertices, endpoints included.
        assert_eq!(line.point_count(), 9);
        assert_eq!(line.points[0], p(0.0, 0.0, 0.0));
        assert_eq!(line.points[8], p(6.0, 0.0, 0.0));
    }

    #[test]
    fn spaced_mode_distributes_by_arc_length() {
        let curve = s_curve();
        let line = BezierToPoly::new(&curve, 8, false)
            .precision(4)
            .execute()
            .unwrap();
        assert!(line.point_count() == 9 || line.point_count() == 10);

        let spacings: Vec<f64> = line
            .points
            .windows(2)
            .map(|pair| distance(&pair[0], &pair[1]))
            .collect();
        let max = spacings.iter().copied().fold(0.0, f64::max);
        let min = spacings
            .iter()
            .take(spacings.len() - 1)
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert!(max / min < 1.5, "max={max} min={min}");
    }

    #[test]
    fn closedness_is_preserved() {
        let mut curve = s_curve();
        curve.closed = true;
        let line = BezierToPoly::new(&curve, 4, true).execute().unwrap();
        assert!(line.closed);
    }
}
