use crate::error::{Result, TessellationError};
use crate::geometry::Spline;
use crate::math::{distance, Point3, Vector3};
use crate::operations::resample::ResampleByArcLength;

use super::{LoftParams, LoftResult};

/// Builds a quad mesh skinning a family of parallel cross-section curves.
///
/// Neighbouring cross-sections are stitched with a doubled vertex loop (the
/// second section's samples reversed), quads are wound toward the view
/// direction, and coincident vertices are welded so adjacent strips share
/// their boundary ring.
pub struct Loft<'a> {
    sections: &'a [Spline],
    params: LoftParams,
}

impl<'a> Loft<'a> {
    /// Creates a new `Loft` over ordered cross-sections.
    #[must_use]
    pub fn new(sections: &'a [Spline], params: LoftParams) -> Self {
        Self { sections, params }
    }

    /// Executes the loft.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than 2 cross-sections are given, when the
    /// sections mix curve kinds, when any section has fewer than 2 points,
    /// or when a Bézier section fails to resample.
    pub fn execute(&self) -> Result<LoftResult> {
        if self.sections.len() < 2 {
            return Err(TessellationError::InvalidParameters(
                "lofting needs at least 2 cross-sections".into(),
            )
            .into());
        }
        let all_bezier = self
            .sections
            .iter()
            .all(|s| matches!(s, Spline::Bezier(_)));
        let all_poly = self.sections.iter().all(|s| matches!(s, Spline::Poly(_)));
        if !all_bezier && !all_poly {
            return Err(TessellationError::InvalidParameters(
                "cross-sections must all be Bézier or all be polylines".into(),
            )
            .into());
        }
        if self.sections.iter().any(|s| s.point_count() < 2) {
            return Err(TessellationError::InvalidParameters(
                "every cross-section needs at least 2 points".into(),
            )
            .into());
        }

        let rings = self.sample_sections()?;

        let mut vertices: Vec<Point3> = Vec::new();
        let mut faces: Vec<[usize; 4]> = Vec::new();

        for pair in rings.windows(2) {
            let base = vertices.len();
            vertices.extend_from_slice(&pair[0]);
            vertices.extend(pair[1].iter().rev());

            let size = pair[0].len() + pair[1].len();
            let mut index = 0;
            while 2 * (index + 1) < size {
                let face = [
                    base + index,
                    base + index + 1,
                    base + (size - 1) - (index + 1),
                    base + (size - 1) - index,
                ];
                index += 1;
                if has_repeats(&face) {
                    continue;
                }
                faces.push(orient_face(face, &vertices, &self.params.view_direction));
            }
        }

        let (vertices, mut faces) = weld(vertices, faces, self.params.merge_distance);

        let mut flip = average_normal(&faces, &vertices).dot(&self.params.view_direction) <= 0.0;
        if self.params.flip_normals {
            flip = !flip;
        }
        if flip {
            for face in &mut faces {
                face.reverse();
            }
        }

        Ok(LoftResult {
            vertices,
            quad_faces: faces,
        })
    }

    fn sample_sections(&self) -> Result<Vec<Vec<Point3>>> {
        let reference = direction_hint(&self.sections[0]);
        self.sections
            .iter()
            .enumerate()
            .map(|(index, section)| {
                // Later sections flow the same way as the first one.
                let oriented;
                let section = if index > 0 && direction_hint(section).dot(&reference) < 0.0 {
                    oriented = section.reversed();
                    &oriented
                } else {
                    section
                };
                match section {
                    Spline::Bezier(curve) => {
                        ResampleByArcLength::new(curve, self.params.precision, self.params.count)
                            .execute()
                    }
                    Spline::Poly(line) => Ok(line.points.clone()),
                }
            })
            .collect()
    }
}

/// A cheap flow direction for orientation matching: first point toward
/// second for Bézier curves, first toward last for polylines.
fn direction_hint(section: &Spline) -> Vector3 {
    match section {
        Spline::Bezier(curve) => curve.points[0].co - curve.points[1].co,
        Spline::Poly(line) => line.points[0] - line.points[line.points.len() - 1],
    }
}

fn has_repeats(face: &[usize; 4]) -> bool {
    for i in 0..4 {
        for j in i + 1..4 {
            if face[i] == face[j] {
                return true;
            }
        }
    }
    false
}

fn face_normal(face: &[usize; 4], vertices: &[Point3]) -> Vector3 {
    let a = vertices[face[0]];
    let b = vertices[face[1]];
    let c = vertices[face[2]];
    (b - a).cross(&(c - a))
}

/// Flips a freshly built quad when it faces away from the view direction.
fn orient_face(mut face: [usize; 4], vertices: &[Point3], view: &Vector3) -> [usize; 4] {
    if face_normal(&face, vertices).dot(view) < 0.0 {
        face.reverse();
    }
    face
}

fn average_normal(faces: &[[usize; 4]], vertices: &[Point3]) -> Vector3 {
    if faces.is_empty() {
        return Vector3::zeros();
    }
    let sum: Vector3 = faces.iter().map(|face| face_normal(face, vertices)).sum();
    #[allow(clippy::cast_precision_loss)]
    let scale = faces.len() as f64;
    sum / scale
}

/// Merges vertices closer than `merge_distance`, remaps faces, drops quads
/// that degenerate in the process and compacts the vertex list.
fn weld(
    vertices: Vec<Point3>,
    faces: Vec<[usize; 4]>,
    merge_distance: f64,
) -> (Vec<Point3>, Vec<[usize; 4]>) {
    let mut remap: Vec<usize> = (0..vertices.len()).collect();
    for j in 0..vertices.len() {
        for i in 0..j {
            if remap[i] == i && distance(&vertices[i], &vertices[j]) <= merge_distance {
                remap[j] = i;
                break;
            }
        }
    }

    let mut used = vec![false; vertices.len()];
    let mut welded_faces = Vec::with_capacity(faces.len());
    for face in faces {
        let face = face.map(|v| remap[v]);
        if has_repeats(&face) {
            continue;
        }
        for v in face {
            used[v] = true;
        }
        welded_faces.push(face);
    }

    let mut compact: Vec<usize> = vec![0; vertices.len()];
    let mut compacted = Vec::new();
    for (index, vertex) in vertices.into_iter().enumerate() {
        if used[index] {
            compact[index] = compacted.len();
            compacted.push(vertex);
        }
    }
    for face in &mut welded_faces {
        *face = face.map(|v| compact[v]);
    }

    (compacted, welded_faces)
}
