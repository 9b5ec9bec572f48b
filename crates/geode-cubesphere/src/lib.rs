//! Cube-sphere geometry: the six face bases, face-to-sphere mapping, mesh
//! buffers, the cube-sphere mesher, and normal reconstruction.

mod cube_face;
mod error;
mod face_coord;
mod mesh;
mod mesher;
mod winding;

pub use cube_face::CubeFace;
pub use error::MeshError;
pub use face_coord::FaceCoord;
pub use mesh::MeshBuffers;
pub use mesher::{CubeSphereMesher, MAX_RESOLUTION, MIN_RESOLUTION};
pub use winding::{count_inward_triangles, triangle_winds_outward};
