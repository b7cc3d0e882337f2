use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{cubic_3d, distance, Point3, TOLERANCE};

/// Moves a control point along its own curve to a new parameter, in place.
///
/// For an interior point the two adjacent segments are first merged back
/// into the single virtual segment the point once subdivided (recovering the
/// subdivision parameter from the point's handle ratio), then that segment
/// is re-split at the requested parameter. Endpoints slide within their only
/// segment, trimming the curve.
pub struct SlidePoint {
    index: usize,
    t: f64,
}

impl SlidePoint {
    /// Creates a new `SlidePoint` operation moving point `index` to
    /// parameter `t` of its enclosing (virtual) segment.
    #[must_use]
    pub fn new(index: usize, t: f64) -> Self {
        Self { index, t }
    }

    /// Executes the slide.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range, when `t` is not in
    /// `(0, 1)`, or when an interior point's handles do not encode a valid
    /// subdivision parameter.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<()> {
        let n = curve.point_count();
        if self.index >= n {
            return Err(OperationError::InvalidSelection(format!(
                "point {} out of range for {n} points",
                self.index
            ))
            .into());
        }
        if n < 2 {
            return Err(OperationError::InvalidSelection(
                "sliding needs at least 2 control points".into(),
            )
            .into());
        }
        if self.t <= 0.0 || self.t >= 1.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: self.t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }

        if self.index == 0 {
            return self.slide_start(curve);
        }
        if self.index == n - 1 {
            return self.slide_end(curve);
        }
        self.slide_interior(curve)
    }

    fn slide_start(&self, curve: &mut BezierCurve) -> Result<()> {
        let [p0, p1, p2, p3] = curve.segment(0);
        let split = cubic_3d::de_casteljau_split(&p0, &p1, &p2, &p3, self.t);
        let start = &mut curve.points[0];
        start.handle_left = split.handle_left;
        start.co = split.co;
        start.handle_right = split.handle_right;
        curve.points[1].handle_left = split.end_handle_left;
        Ok(())
    }

    fn slide_end(&self, curve: &mut BezierCurve) -> Result<()> {
        let last = curve.point_count() - 1;
        let [p0, p1, p2, p3] = curve.segment(last - 1);
        let split = cubic_3d::de_casteljau_split(&p0, &p1, &p2, &p3, self.t);
        curve.points[last - 1].handle_right = split.start_handle_right;
        let end = &mut curve.points[last];
        end.handle_left = split.handle_left;
        end.co = split.co;
        end.handle_right = split.handle_right;
        Ok(())
    }

    fn slide_interior(&self, curve: &mut BezierCurve) -> Result<()> {
        let point = curve.points[self.index];
        let chord = distance(&point.handle_left, &point.handle_right);
        if chord < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "coincident handles on sliding point".into(),
            )
            .into());
        }
        let current = distance(&point.handle_left, &point.co) / chord;
        if current < TOLERANCE || (1.0 - current) < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "sliding point sits on one of its handles".into(),
            )
            .into());
        }

        // Reconstruct the virtual segment the point subdivides by stretching
        // the neighbour handles back out.
        let prev = curve.points[self.index - 1];
        let next = curve.points[self.index + 1];
        let virtual_p1 = Point3::from(
            prev.co.coords + (prev.handle_right.coords - prev.co.coords) / current,
        );
        let virtual_p2 = Point3::from(
            next.co.coords + (next.handle_left.coords - next.co.coords) / (1.0 - current),
        );

        let split = cubic_3d::de_casteljau_split(&prev.co, &virtual_p1, &virtual_p2, &next.co, self.t);
        curve.points[self.index - 1].handle_right = split.start_handle_right;
        let point = &mut curve.points[self.index];
        point.handle_left = split.handle_left;
        point.co = split.co;
        point.handle_right = split.handle_right;
        curve.points[self.index + 1].handle_left = split.end_handle_left;
        Ok(())
    }
}
