//! Host-side mesh buffers shared by the planet surface and its shells.

use glam::{Vec2, Vec3};

/// Parallel vertex arrays plus a triangle index list.
///
/// `positions`, `uvs` and `normals` always have the same length once a build
/// has completed. Every entry of `indices` is `< positions.len()` and each
/// consecutive triplet is one outward-facing, counter-clockwise triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions relative to the body's center.
    pub positions: Vec<Vec3>,
    /// Per-vertex face-local `(u, v)` in \[0, 1\].
    pub uvs: Vec<Vec2>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// Unit-length vertex normals, reconstructed from the triangles.
    pub normals: Vec<Vec3>,
}

impl MeshBuffers {
    /// Empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffers with room for `vertices` vertices and `indices` indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            normals: Vec::with_capacity(vertices),
        }
    }

    /// Drop all contents while keeping the allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.indices.clear();
        self.normals.clear();
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffers hold no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `true` if every index refers to an existing vertex and the index list
    /// is a whole number of triangles.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.positions.len() as u64;
        self.indices.len().is_multiple_of(3) && self.indices.iter().all(|&i| u64::from(i) < n)
    }

    /// Rebuild `normals` from the current positions and triangles.
    ///
    /// Each triangle contributes its unit face normal `(b - a) × (c - a)` to
    /// all three of its vertices; each vertex sum is normalized once after
    /// every triangle has been accumulated. Vertices whose contributions
    /// cancel out (or that no triangle references) get a zero normal.
    pub fn recompute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = self.positions[a];
            let face_normal = (self.positions[b] - pa)
                .cross(self.positions[c] - pa)
                .normalize_or_zero();

            self.normals[a] += face_normal;
            self.normals[b] += face_normal;
            self.normals[c] += face_normal;
        }

        for n in &mut self.normals {
            *n = n.normalize_or_zero();
        }
    }
}
