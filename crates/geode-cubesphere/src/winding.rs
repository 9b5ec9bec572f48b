//! Winding order checks for closed meshes centered on the origin.

use glam::Vec3;

use crate::MeshBuffers;

/// Whether the triangle `(v0, v1, v2)` is counter-clockwise when viewed from
/// outside the body, i.e. its geometric normal points away from the origin.
///
/// Vertices are positions relative to the body's center.
pub fn triangle_winds_outward(v0: Vec3, v1: Vec3, v2: Vec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Number of triangles in `mesh` that face toward the origin.
pub fn count_inward_triangles(mesh: &MeshBuffers) -> usize {
    mesh.indices
        .chunks_exact(3)
        .filter(|tri| {
            let p = |i: u32| mesh.positions[i as usize];
            !triangle_winds_outward(p(tri[0]), p(tri[1]), p(tri[2]))
        })
        .count()
}
