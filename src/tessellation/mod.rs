//! Quad-mesh generation from families of parallel cross-section curves.

mod loft;

pub use loft::Loft;

use crate::math::{Point3, Vector3};

/// Parameters controlling loft tessellation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoftParams {
    /// Arc-length resampling intervals per Bézier cross-section.
    pub count: usize,
    /// Dense-sampling factor of the resampler.
    pub precision: usize,
    /// Distance below which neighbouring vertices weld into one.
    pub merge_distance: f64,
    /// Inverts the final face winding.
    pub flip_normals: bool,
    /// Direction faces are oriented toward before any explicit flip.
    pub view_direction: Vector3,
}

impl Default for LoftParams {
    fn default() -> Self {
        Self {
            count: 12,
            precision: 10,
            merge_distance: 1e-4,
            flip_normals: false,
            view_direction: Vector3::z(),
        }
    }
}

/// A welded quad mesh produced by lofting.
#[derive(Debug, Clone, PartialEq)]
pub struct LoftResult {
    /// Mesh vertices.
    pub vertices: Vec<Point3>,
    /// Quads as counter-clockwise vertex index cycles.
    pub quad_faces: Vec<[usize; 4]>,
}

impl LoftResult {
    /// Returns the number of quads.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.quad_faces.len()
    }

    /// Returns the number of welded vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
