//! Cube-sphere mesh generation.
//!
//! Each of the six cube faces is sampled as a `(resolution + 1)²` vertex grid,
//! pushed onto the sphere by normalization, and triangulated with a winding
//! that faces outward on every face. Patches are not welded: vertices on a
//! shared cube edge are duplicated per face and only coincide in position.

use glam::Vec2;
use tracing::debug;

use crate::{CubeFace, FaceCoord, MeshBuffers, MeshError};

/// Smallest accepted grid resolution (cells per face edge).
pub const MIN_RESOLUTION: u32 = 2;
/// Largest accepted grid resolution (cells per face edge).
pub const MAX_RESOLUTION: u32 = 256;

/// Builds cube-sphere meshes of a given resolution and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSphereMesher {
    resolution: u32,
    radius: f32,
}

impl CubeSphereMesher {
    /// Validate the parameters and create a mesher.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] if `resolution` is outside
    /// `[MIN_RESOLUTION, MAX_RESOLUTION]` or `radius` is not a positive,
    /// finite number.
    pub fn new(resolution: u32, radius: f32) -> Result<Self, MeshError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(MeshError::InvalidParameter {
                name: "resolution",
                reason: format!(
                    "{resolution} is outside [{MIN_RESOLUTION}, {MAX_RESOLUTION}]"
                ),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MeshError::InvalidParameter {
                name: "radius",
                reason: format!("{radius} must be positive and finite"),
            });
        }
        Ok(Self { resolution, radius })
    }

    /// Build a fresh mesh.
    ///
    /// # Errors
    ///
    /// See [`CubeSphereMesher::new`].
    pub fn build(resolution: u32, radius: f32) -> Result<MeshBuffers, MeshError> {
        let mesher = Self::new(resolution, radius)?;
        let mut mesh = MeshBuffers::with_capacity(mesher.vertex_count(), mesher.index_count());
        mesher.fill(&mut mesh);
        Ok(mesh)
    }

    /// Grid resolution (cells per face edge).
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Total vertex count: `6 · (resolution + 1)²`.
    pub fn vertex_count(&self) -> usize {
        let stride = self.resolution as usize + 1;
        6 * stride * stride
    }

    /// Total index count: `6 · resolution² · 2 · 3`.
    pub fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r * 6
    }

    /// Clear `mesh` and refill it with this sphere, reusing its allocations.
    ///
    /// Normals are reconstructed from the triangles, so a sphere built this
    /// way carries the same kind of normals as a displaced one.
    pub fn fill(&self, mesh: &mut MeshBuffers) {
        mesh.clear();
        mesh.positions.reserve(self.vertex_count());
        mesh.uvs.reserve(self.vertex_count());
        mesh.indices.reserve(self.index_count());

        for face in CubeFace::ALL {
            self.push_face(face, mesh);
        }
        mesh.recompute_normals();

        debug!(
            resolution = self.resolution,
            radius = self.radius,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Built cube-sphere"
        );
    }

    fn push_face(&self, face: CubeFace, mesh: &mut MeshBuffers) {
        let res = self.resolution;
        let stride = res + 1;
        let base = mesh.positions.len() as u32;

        for y in 0..=res {
            for x in 0..=res {
                let percent = Vec2::new(x as f32, y as f32) / res as f32;
                let fc = FaceCoord::new(face, percent.x, percent.y);
                mesh.positions.push(fc.sphere_direction() * self.radius);
                mesh.uvs.push(percent);
            }
        }

        for y in 0..res {
            for x in 0..res {
                let i = base + y * stride + x;
                let quad = [i, i + 1, i + stride, i + 1, i + stride + 1, i + stride];
                mesh.indices.extend_from_slice(&quad);
            }
        }
    }
}
