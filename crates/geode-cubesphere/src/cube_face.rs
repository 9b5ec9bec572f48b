//! The six faces of a cube-sphere and their basis vectors.

use glam::Vec3;

/// The six faces of the cube that is inflated into the sphere.
///
/// Each variant corresponds to a face whose outward normal (`local_up`)
/// points along the named axis direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face
    PosX = 0,
    /// −X face
    NegX = 1,
    /// +Y face
    PosY = 2,
    /// −Y face
    NegY = 3,
    /// +Z face
    PosZ = 4,
    /// −Z face
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in the order their patches appear in a mesh.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Outward-pointing unit normal of the face.
    #[must_use]
    pub fn local_up(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Direction of increasing `u` on this face.
    #[must_use]
    pub fn axis_a(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::NEG_Z,
            CubeFace::NegX => Vec3::Z,
            CubeFace::PosY => Vec3::X,
            CubeFace::NegY => Vec3::X,
            CubeFace::PosZ => Vec3::X,
            CubeFace::NegZ => Vec3::NEG_X,
        }
    }

    /// Direction of increasing `v` on this face.
    ///
    /// `axis_a × axis_b == local_up` on every face, which is what keeps the
    /// grid winding outward-facing everywhere.
    #[must_use]
    pub fn axis_b(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::Y,
            CubeFace::NegX => Vec3::Y,
            CubeFace::PosY => Vec3::NEG_Z,
            CubeFace::NegY => Vec3::Z,
            CubeFace::PosZ => Vec3::Y,
            CubeFace::NegZ => Vec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_a_cross_axis_b_equals_local_up() {
        for face in CubeFace::ALL {
            let cross = face.axis_a().cross(face.axis_b());
            let up = face.local_up();
            assert!(
                (cross - up).length() < 1e-6,
                "axis_a x axis_b != local_up for {face:?}: got {cross:?}, expected {up:?}"
            );
        }
    }

    #[test]
    fn test_axes_perpendicular_to_local_up() {
        for face in CubeFace::ALL {
            let up = face.local_up();
            assert!(face.axis_a().dot(up).abs() < 1e-6, "axis_a on {face:?}");
            assert!(face.axis_b().dot(up).abs() < 1e-6, "axis_b on {face:?}");
        }
    }

    #[test]
    fn test_discriminants_follow_canonical_order() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(*face as usize, i);
        }
    }
}
