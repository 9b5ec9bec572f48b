//! 2D local coordinates on a cube face and their projection onto the sphere.

use glam::Vec3;

use crate::CubeFace;

/// A 2D coordinate on a cube face. `u` and `v` are in the range \[0, 1\].
///
/// `(u=0, v=0)` is the corner at `local_up - axis_a - axis_b`;
/// `(u=1, v=1)` is the corner at `local_up + axis_a + axis_b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCoord {
    /// Which cube face this coordinate lies on.
    pub face: CubeFace,
    /// Parameter along `axis_a`, in \[0, 1\].
    pub u: f32,
    /// Parameter along `axis_b`, in \[0, 1\].
    pub v: f32,
}

impl FaceCoord {
    /// Construct a `FaceCoord`, clamping `u` and `v` to \[0, 1\].
    #[must_use]
    pub fn new(face: CubeFace, u: f32, v: f32) -> Self {
        Self {
            face,
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Point on the surface of the `[-1, 1]` cube.
    ///
    /// The face center `(0.5, 0.5)` maps to the face's `local_up`.
    #[inline]
    #[must_use]
    pub fn cube_point(&self) -> Vec3 {
        let s = 2.0 * self.u - 1.0;
        let t = 2.0 * self.v - 1.0;
        self.face.local_up() + s * self.face.axis_a() + t * self.face.axis_b()
    }

    /// Unit-sphere direction obtained by normalizing the cube point.
    #[inline]
    #[must_use]
    pub fn sphere_direction(&self) -> Vec3 {
        self.cube_point().normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_face_coord_clamping() {
        let fc = FaceCoord::new(CubeFace::PosX, -0.5, 1.5);
        assert_eq!(fc.u, 0.0);
        assert_eq!(fc.v, 1.0);
    }

    #[test]
    fn test_face_center_maps_to_local_up() {
        for face in CubeFace::ALL {
            let fc = FaceCoord::new(face, 0.5, 0.5);
            assert!((fc.cube_point() - face.local_up()).length() < EPSILON);
            assert!((fc.sphere_direction() - face.local_up()).length() < EPSILON);
        }
    }

    #[test]
    fn test_sphere_directions_are_unit_length() {
        for face in CubeFace::ALL {
            for i in 0..=8 {
                for j in 0..=8 {
                    let fc = FaceCoord::new(face, i as f32 / 8.0, j as f32 / 8.0);
                    let len = fc.sphere_direction().length();
                    assert!(
                        (len - 1.0).abs() < EPSILON,
                        "Direction not unit for {face:?} at ({i}, {j}): {len}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_shared_edge_is_geometrically_coincident() {
        // +X at u=0 runs along the +Z face's u=1 edge.
        for i in 0..=10 {
            let v = i as f32 / 10.0;
            let a = FaceCoord::new(CubeFace::PosX, 0.0, v).cube_point();
            let b = FaceCoord::new(CubeFace::PosZ, 1.0, v).cube_point();
            assert!(
                (a - b).length() < EPSILON,
                "Edge mismatch at v={v}: {a:?} vs {b:?}"
            );
        }
    }
}
