use crate::error::{OperationError, Result};
use crate::geometry::BezierCurve;
use crate::math::{norms_match, Point3, Vector3};
use crate::operations::resample::ResampleByArcLength;

use super::blend_family;

/// Default dense-sampling factor for the constraint path.
pub(crate) const DEFAULT_RAIL_PRECISION: usize = 10;

/// Default rounding depth for the endpoint matching test.
pub(crate) const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Orients `curve` so it starts at `anchor`, reversing when its far end
/// matches instead. `None` when neither endpoint matches.
///
/// When both endpoints match the loose norm test, `prefer_reverse` decides
/// which interpretation wins; the boundary walk checks the near endpoint
/// first for the curve at the anchor's start and the far endpoint first for
/// the one at its end.
fn oriented_from(
    curve: &BezierCurve,
    anchor: &Point3,
    search_limit: u32,
    prefer_reverse: bool,
) -> Option<BezierCurve> {
    let start = curve.points.first()?.co;
    let end = curve.points.last()?.co;
    let start_matches = norms_match(anchor, &start, search_limit);
    let end_matches = norms_match(anchor, &end, search_limit);

    if end_matches && (prefer_reverse || !start_matches) {
        return Some(curve.reversed());
    }
    if start_matches {
        return Some(curve.clone());
    }
    None
}

/// Interior points of the arc-length resampling of `path`: the path's own
/// endpoints are dropped because the rails already touch them.
fn interior_points(path: &BezierCurve, precision: usize, count: usize) -> Result<Vec<Point3>> {
    let mut points = ResampleByArcLength::new(path, precision, count + 1).execute()?;
    points.remove(0);
    points.pop();
    Ok(points)
}

/// Builds an array of blends between two rails, each pinned by its start
/// point to an arc-length station of a profile path.
///
/// The rails are oriented so both run away from the path: a rail whose far
/// endpoint coincides with the path endpoint is reversed. Blend `i` then
/// starts exactly on interior station `i` of the path; the rest of the blend
/// keeps its interpolated shape.
pub struct BlendOneProfileTwoRails<'a> {
    path: &'a BezierCurve,
    rail_1: &'a BezierCurve,
    rail_2: &'a BezierCurve,
    count: usize,
    precision: usize,
    search_limit: u32,
}

impl<'a> BlendOneProfileTwoRails<'a> {
    /// Creates a new `BlendOneProfileTwoRails` operation. `rail_1` is
    /// expected at the path's start, `rail_2` at its end, in either
    /// direction.
    #[must_use]
    pub fn new(
        path: &'a BezierCurve,
        rail_1: &'a BezierCurve,
        rail_2: &'a BezierCurve,
        count: usize,
    ) -> Self {
        Self {
            path,
            rail_1,
            rail_2,
            count,
            precision: DEFAULT_RAIL_PRECISION,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Overrides the constraint path sampling factor.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Overrides the endpoint matching depth (decimal places of the
    /// position norms).
    #[must_use]
    pub fn search_limit(mut self, search_limit: u32) -> Self {
        self.search_limit = search_limit;
        self
    }

    /// Executes the blend, returning one curve per interior path station.
    ///
    /// # Errors
    ///
    /// Returns an error when a rail does not touch its path endpoint, when
    /// the rails have different point counts, or when the path resampling
    /// fails.
    pub fn execute(&self) -> Result<Vec<BezierCurve>> {
        let path_start = self
            .path
            .points
            .first()
            .ok_or_else(|| OperationError::InvalidSelection("empty path curve".into()))?
            .co;
        let path_end = self.path.points[self.path.point_count() - 1].co;

        let rail_1 =
            oriented_from(self.rail_1, &path_start, self.search_limit, false).ok_or_else(|| {
                OperationError::InvalidSelection(
                    "first rail does not touch the path start; check for gaps".into(),
                )
            })?;
        let rail_2 = oriented_from(self.rail_2, &path_end, self.search_limit, true).ok_or_else(|| {
            OperationError::InvalidSelection(
                "second rail does not touch the path end; check for gaps".into(),
            )
        })?;

        if rail_1.point_count() != rail_2.point_count() {
            return Err(OperationError::MismatchedPointCount {
                left: rail_1.point_count(),
                right: rail_2.point_count(),
            }
            .into());
        }

        let stations = interior_points(self.path, self.precision, self.count)?;
        let mut blends = blend_family(&rail_1, &rail_2, stations.len())?;

        for (blend, station) in blends.iter_mut().zip(&stations) {
            let offset: Vector3 = station - blend.points[0].co;
            blend.points[0].translate(&offset);
        }

        Ok(blends)
    }
}

/// Builds an array of blends between two profile curves, constrained by two
/// rails: each blend starts on a station of the first rail and ends on the
/// matching station of the second.
///
/// The four curves form a closed patch boundary. `profile_1` is oriented to
/// start at `rail_1`'s start, `profile_2` to start at `rail_1`'s end, and
/// `rail_2` to end at `profile_2`'s end; a curve that matches with neither
/// endpoint is reported as a gap in the boundary.
pub struct BlendTwoProfilesTwoRails<'a> {
    rail_1: &'a BezierCurve,
    rail_2: &'a BezierCurve,
    profile_1: &'a BezierCurve,
    profile_2: &'a BezierCurve,
    count: usize,
    precision: usize,
    search_limit: u32,
}

impl<'a> BlendTwoProfilesTwoRails<'a> {
    /// Creates a new `BlendTwoProfilesTwoRails` operation producing `count`
    /// blends.
    #[must_use]
    pub fn new(
        rail_1: &'a BezierCurve,
        rail_2: &'a BezierCurve,
        profile_1: &'a BezierCurve,
        profile_2: &'a BezierCurve,
        count: usize,
    ) -> Self {
        Self {
            rail_1,
            rail_2,
            profile_1,
            profile_2,
            count,
            precision: DEFAULT_RAIL_PRECISION,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Overrides the rail sampling factor.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Overrides the endpoint matching depth.
    #[must_use]
    pub fn search_limit(mut self, search_limit: u32) -> Self {
        self.search_limit = search_limit;
        self
    }

    /// Executes the blend.
    ///
    /// # Errors
    ///
    /// Returns an error when the boundary loop has gaps, when opposite
    /// curves have different point counts, or when a rail resampling fails.
    pub fn execute(&self) -> Result<Vec<BezierCurve>> {
        if self.rail_1.point_count() < 2 || self.rail_2.point_count() < 2 {
            return Err(OperationError::InvalidSelection(
                "rails need at least 2 control points".into(),
            )
            .into());
        }
        let rail_start = self.rail_1.points[0].co;
        let rail_end = self.rail_1.points[self.rail_1.point_count() - 1].co;

        let profile_1 =
            oriented_from(self.profile_1, &rail_start, self.search_limit, false).ok_or_else(|| {
                OperationError::InvalidSelection(
                    "first profile does not touch the first rail's start".into(),
                )
            })?;
        let profile_2 =
            oriented_from(self.profile_2, &rail_end, self.search_limit, true).ok_or_else(|| {
                OperationError::InvalidSelection(
                    "second profile does not touch the first rail's end".into(),
                )
            })?;

        if self.rail_1.point_count() != self.rail_2.point_count() {
            return Err(OperationError::MismatchedPointCount {
                left: self.rail_1.point_count(),
                right: self.rail_2.point_count(),
            }
            .into());
        }
        if profile_1.point_count() != profile_2.point_count() {
            return Err(OperationError::MismatchedPointCount {
                left: profile_1.point_count(),
                right: profile_2.point_count(),
            }
            .into());
        }

        // The far rail must run the same way as the near one: its end meets
        // the second profile's end.
        let profile_2_end = profile_2.points[profile_2.point_count() - 1].co;
        let rail_2_end = self.rail_2.points[self.rail_2.point_count() - 1].co;
        let oriented_rail_2;
        let rail_2 = if norms_match(&profile_2_end, &rail_2_end, self.search_limit) {
            self.rail_2
        } else {
            oriented_rail_2 = self.rail_2.reversed();
            &oriented_rail_2
        };

        let near_stations = interior_points(self.rail_1, self.precision, self.count)?;
        let far_stations = interior_points(rail_2, self.precision, self.count)?;

        let mut blends = blend_family(&profile_1, &profile_2, near_stations.len())?;

        for (index, blend) in blends.iter_mut().enumerate() {
            // Whole-curve translation pins the start...
            let offset: Vector3 = near_stations[index] - blend.points[0].co;
            for point in &mut blend.points {
                point.translate(&offset);
            }

            // ...then the end point alone is dragged onto the far rail.
            if index < far_stations.len() {
                let last = blend.point_count() - 1;
                let offset: Vector3 = far_stations[index] - blend.points[last].co;
                blend.points[last].translate(&offset);
            }
        }

        Ok(blends)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::distance;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Straight curve from `a` to `b` with handles at the third points.
    fn line(a: Point3, b: Point3) -> BezierCurve {
        let third = (b - a) / 3.0;
        BezierCurve::from_tuples(&[
            (a - third, a, a + third),
            (b - third, b, b + third),
        ])
    }

    // A unit-square patch boundary in the xz plane, away from the origin so
    // the norm-based endpoint matching is meaningful.
    fn square() -> (BezierCurve, BezierCurve, BezierCurve, BezierCurve) {
        let a = p(5.0, 0.0, 0.0);
        let b = p(6.0, 0.0, 0.0);
        let c = p(5.0, 0.0, 1.0);
        let d = p(6.0, 0.0, 1.0);
        (line(a, b), line(c, d), line(a, c), line(b, d))
    }

    #[test]
    fn one_profile_blends_start_on_the_path() {
        let (path, _, rail_1, rail_2) = square();
        let blends = BlendOneProfileTwoRails::new(&path, &rail_1, &rail_2, 3)
            .execute()
            .unwrap();
        assert!(!blends.is_empty());

        for blend in &blends {
            let start = blend.points[0].co;
            // Starts lie on the path (the bottom edge).
            assert!(start.z.abs() < 1e-9, "start={start}");
            assert!((5.0..=6.0).contains(&start.x), "start={start}");
            // The free end keeps the interpolated height.
            let end = blend.points[1].co;
            assert!((end.z - 1.0).abs() < 1e-9, "end={end}");
        }
    }

    #[test]
    fn one_profile_accepts_reversed_rails() {
        let (path, _, rail_1, rail_2) = square();
        let rail_1 = rail_1.reversed();
        let blends = BlendOneProfileTwoRails::new(&path, &rail_1, &rail_2, 3)
            .execute()
            .unwrap();
        // Orientation is fixed internally: blends still run bottom to top.
        assert!(blends[0].points[0].co.z.abs() < 1e-9);
        assert!((blends[0].points[1].co.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn one_profile_reports_gaps() {
        let (path, _, rail_1, _) = square();
        let far = line(p(20.0, 0.0, 0.0), p(20.0, 0.0, 1.0));
        assert!(BlendOneProfileTwoRails::new(&path, &rail_1, &far, 3)
            .execute()
            .is_err());
    }

    #[test]
    fn two_profiles_pin_both_ends() {
        let (rail_1, rail_2, profile_1, profile_2) = square();
        let blends = BlendTwoProfilesTwoRails::new(&rail_1, &rail_2, &profile_1, &profile_2, 3)
            .execute()
            .unwrap();
        assert!(!blends.is_empty());

        for blend in &blends {
            let start = blend.points[0].co;
            let end = blend.points[blend.point_count() - 1].co;
            assert!(start.z.abs() < 1e-9, "start={start}");
            assert!((end.z - 1.0).abs() < 1e-9, "end={end}");
            // Both pins sit at the same station along x.
            assert!((start.x - end.x).abs() < 0.2, "start={start} end={end}");
        }
    }

    #[test]
    fn two_profiles_interior_station_spacing() {
        let (rail_1, rail_2, profile_1, profile_2) = square();
        let blends = BlendTwoProfilesTwoRails::new(&rail_1, &rail_2, &profile_1, &profile_2, 4)
            .execute()
            .unwrap();
        // Stations are interior: no blend collapses onto a profile.
        for blend in &blends {
            assert!(distance(&blend.points[0].co, &p(5.0, 0.0, 0.0)) > 0.05);
            assert!(distance(&blend.points[0].co, &p(6.0, 0.0, 0.0)) > 0.05);
        }
    }

    #[test]
    fn two_profiles_mismatched_rails_are_rejected() {
        let (rail_1, _, profile_1, profile_2) = square();
        let mut rail_2 = line(p(5.0, 0.0, 1.0), p(6.0, 0.0, 1.0));
        rail_2.points.push(rail_2.points[1]);
        assert!(
            BlendTwoProfilesTwoRails::new(&rail_1, &rail_2, &profile_1, &profile_2, 3)
                .execute()
                .is_err()
        );
    }
}
