use crate::error::{OperationError, Result};
use crate::geometry::{BezierCurve, ControlPoint, Polyline};
use crate::math::{cubic_3d, distance, lerp, mirror, Point3};

/// Fits a cubic Bézier curve through the vertices of a polyline.
///
/// Vertices are consumed in runs of four (stride three, so runs share their
/// boundary vertex): each run becomes one cubic segment whose interior
/// handles are solved so the curve passes through the two middle vertices at
/// `t = 1/3` and `t = 2/3`. A three-vertex input (or a two-vertex leftover)
/// is treated as a quadratic through the middle vertex and elevated to a
/// cubic; a single leftover vertex is appended with collapsed handles. Idle
/// end handles are mirrored.
pub struct PolyToBezier<'a> {
    line: &'a Polyline,
    resolution: usize,
}

impl<'a> PolyToBezier<'a> {
    /// Creates a new `PolyToBezier` operation; `resolution` becomes the
    /// result's per-segment interpolation resolution.
    #[must_use]
    pub fn new(line: &'a Polyline, resolution: usize) -> Self {
        Self { line, resolution }
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns an error when the polyline has fewer than 2 vertices or a
    /// vertex run is degenerate (coincident vertices make the handle system
    /// unsolvable).
    pub fn execute(&self) -> Result<BezierCurve> {
        let vertices = &self.line.points;
        match vertices.len() {
            0 | 1 => Err(OperationError::InvalidSelection(
                "fitting needs at least 2 vertices".into(),
            )
            .into()),
            2 => Ok(self.finish(vec![
                ControlPoint::new(
                    vertices[0],
                    vertices[0],
                    lerp(&vertices[0], &vertices[1], 1.0 / 3.0),
                ),
                ControlPoint::new(
                    lerp(&vertices[0], &vertices[1], 2.0 / 3.0),
                    vertices[1],
                    vertices[1],
                ),
            ])),
            3 => {
                let (left, right) = promote_quadratic(&vertices[0], &vertices[1], &vertices[2])?;
                Ok(self.finish(vec![left, right]))
            }
            _ => self.fit_runs(vertices),
        }
    }

    fn fit_runs(&self, vertices: &[Point3]) -> Result<BezierCurve> {
        let mut points: Vec<ControlPoint> = vec![ControlPoint::collapsed(vertices[0])];

        let mut index = 0;
        while index + 3 < vertices.len() {
            let run = [
                vertices[index],
                vertices[index + 1],
                vertices[index + 2],
                vertices[index + 3],
            ];
            let (h1, h2) = cubic_3d::solve_handles(&run, 1.0 / 3.0, 2.0 / 3.0)?;

            // `run[0]` is already the last emitted point; give it the
            // outgoing handle and append the run's end.
            let last = points.len() - 1;
            points[last].handle_right = h1;
            points.push(ControlPoint::new(h2, run[3], run[3]));
            index += 3;
        }

        match vertices.len() - (index + 1) {
            0 => {}
            1 => {
                // A single trailing vertex joins with collapsed handles; the
                // previous point's outgoing handle mirrors its incoming one.
                let last = points.len() - 1;
                points[last].handle_right = points[last].mirrored_right();
                points.push(ControlPoint::collapsed(vertices[index + 1]));
            }
            _ => {
                let anchor = points[points.len() - 1].co;
                let (left, right) =
                    promote_quadratic(&anchor, &vertices[index + 1], &vertices[index + 2])?;
                let last = points.len() - 1;
                points[last].handle_right = left.handle_right;
                points.push(right);
            }
        }

        Ok(self.finish(points))
    }

    /// Mirrors the idle end handles and stamps resolution and closedness.
    fn finish(&self, mut points: Vec<ControlPoint>) -> BezierCurve {
        let first = &mut points[0];
        first.handle_left = mirror(&first.co, &first.handle_right);
        let last = points.len() - 1;
        let last = &mut points[last];
        last.handle_right = mirror(&last.co, &last.handle_left);

        BezierCurve::from_control_points(points, self.resolution, self.line.closed)
    }
}

/// The two control points of a cubic through `p0`, `mid`, `p2`, built from
/// the quadratic whose parameter at `mid` comes from chord lengths.
fn promote_quadratic(p0: &Point3, mid: &Point3, p2: &Point3) -> Result<(ControlPoint, ControlPoint)> {
    let len1 = distance(p0, mid);
    let len2 = distance(mid, p2);
    let t = len1 / (len1 + len2);

    let handle = cubic_3d::quadratic_handle(mid, t, p0, p2)?;
    let (h1, h2) = cubic_3d::elevate_quadratic(p0, &handle, p2);

    Ok((
        ControlPoint::new(*p0, *p0, h1),
        ControlPoint::new(h2, *p2, *p2),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::resample::Interpolate;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn fit(points: Vec<Point3>) -> BezierCurve {
        let line = Polyline::from_points(points, false);
        PolyToBezier::new(&line, 12).execute().unwrap()
    }

    #[test]
    fn two_vertices_make_a_straight_segment() {
        let curve = fit(vec![p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0)]);
        assert_eq!(curve.point_count(), 2);
        assert_eq!(curve.points[0].handle_right, p(1.0, 0.0, 0.0));
        assert_eq!(curve.points[1].handle_left, p(2.0, 0.0, 0.0));
        // Idle handles mirror the interior ones.
        assert_eq!(curve.points[0].handle_left, p(-1.0, 0.0, 0.0));
        assert_eq!(curve.points[1].handle_right, p(4.0, 0.0, 0.0));
    }

    #[test]
    fn three_vertices_pass_through_the_middle() {
        let curve = fit(vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0)]);
        assert_eq!(curve.point_count(), 2);

        // The fitted curve passes through the middle vertex.
        let samples = Interpolate::new(&curve, 101).execute().unwrap();
        let nearest = samples
            .iter()
            .map(|s| distance(s, &p(1.0, 1.0, 0.0)))
            .fold(f64::INFINITY, f64::min);
        assert!(nearest < 1e-3, "nearest={nearest}");
    }

    #[test]
    fn four_vertices_interpolate_at_thirds() {
        let vertices = [
            p(0.0, 0.0, 0.0),
            p(1.0, 1.5, 0.0),
            p(2.0, 1.5, 1.0),
            p(3.0, 0.0, 0.0),
        ];
        let curve = fit(vertices.to_vec());
        assert_eq!(curve.point_count(), 2);

        let [p0, p1, p2, p3] = curve.segment(0);
        let at_third = cubic_3d::evaluate(&p0, &p1, &p2, &p3, 1.0 / 3.0);
        let at_two_thirds = cubic_3d::evaluate(&p0, &p1, &p2, &p3, 2.0 / 3.0);
        assert!((at_third - vertices[1]).norm() < 1e-9);
        assert!((at_two_thirds - vertices[2]).norm() < 1e-9);
    }

    #[test]
    fn seven_vertices_make_two_segments() {
        let vertices: Vec<Point3> = (0..7)
            .map(|i| {
                let x = f64::from(i);
                p(x, (x * 0.9).sin(), 0.0)
            })
            .collect();
        let curve = fit(vertices.clone());
        assert_eq!(curve.point_count(), 3);
        assert_eq!(curve.points[0].co, vertices[0]);
        assert_eq!(curve.points[1].co, vertices[3]);
        assert_eq!(curve.points[2].co, vertices[6]);
    }

    #[test]
    fn leftover_vertex_is_appended() {
        let vertices: Vec<Point3> = (0..5).map(|i| p(f64::from(i), 0.0, 0.0)).collect();
        let curve = fit(vertices.clone());
        assert_eq!(curve.point_count(), 3);
        assert_eq!(curve.points[2].co, vertices[4]);
    }

    #[test]
    fn leftover_pair_promotes_a_quadratic() {
        let vertices = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(2.0, 1.0, 0.0),
            p(3.0, 0.0, 0.0),
            p(4.0, -1.0, 0.0),
            p(5.0, 0.0, 0.0),
        ];
        let curve = fit(vertices.clone());
        assert_eq!(curve.point_count(), 3);
        assert_eq!(curve.points[2].co, vertices[5]);

        // The trailing quadratic passes near its middle vertex.
        let samples = Interpolate::new(&curve, 101).execute().unwrap();
        let nearest = samples
            .iter()
            .map(|s| distance(s, &vertices[4]))
            .fold(f64::INFINITY, f64::min);
        assert!(nearest < 1e-3, "nearest={nearest}");
    }

    #[test]
    fn too_few_vertices_are_rejected() {
        let line = Polyline::from_points(vec![p(0.0, 0.0, 0.0)], false);
        assert!(PolyToBezier::new(&line, 12).execute().is_err());
    }
}
