//! Scalar 3D noise approximated from a 2D source.
//!
//! The 3D value is the mean of six 2D samples taken over every ordered pair
//! of distinct axes. This is not gradient noise in three dimensions: it is
//! symmetric under any permutation of the input coordinates and is only as
//! smooth as the underlying 2D source.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// A deterministic, continuous 2D noise function with output in `[0, 1]`.
pub trait NoiseSource2D {
    /// Sample the source at `(x, y)`.
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Seeded Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    /// Create a source for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource2D for PerlinSource {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        let v = self.perlin.get([f64::from(x), f64::from(y)]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

/// The six-plane 3D noise primitive over a 2D source.
#[derive(Clone, Debug)]
pub struct SixPlaneNoise<S = PerlinSource> {
    source: S,
}

impl SixPlaneNoise<PerlinSource> {
    /// Six-plane noise over seeded Perlin.
    pub fn perlin(seed: u32) -> Self {
        Self::new(PerlinSource::new(seed))
    }
}

impl<S: NoiseSource2D> SixPlaneNoise<S> {
    /// Wrap a 2D source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Evaluate at `p`. Output lies in `[0, 1]` when the source's does.
    #[inline]
    pub fn evaluate(&self, p: Vec3) -> f32 {
        let s = &self.source;
        let xy = s.sample(p.x, p.y);
        let yz = s.sample(p.y, p.z);
        let xz = s.sample(p.x, p.z);
        let yx = s.sample(p.y, p.x);
        let zy = s.sample(p.z, p.y);
        let zx = s.sample(p.z, p.x);
        (xy + yz + xz + yx + zy + zx) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    /// Asymmetric, hand-checkable source.
    struct Linear;

    impl NoiseSource2D for Linear {
        fn sample(&self, x: f32, y: f32) -> f32 {
            x * 0.1 + y * 0.01
        }
    }

    #[test]
    fn test_averages_all_six_ordered_pairs() {
        let noise = SixPlaneNoise::new(Linear);
        let (x, y, z) = (1.0f32, 2.0, 3.0);
        // Each coordinate appears twice in the first slot and twice in the second.
        let expected = ((x + y + z) * 2.0 * 0.1 + (x + y + z) * 2.0 * 0.01) / 6.0;
        let got = noise.evaluate(Vec3::new(x, y, z));
        assert!((got - expected).abs() < EPSILON, "{got} vs {expected}");
    }

    #[test]
    fn test_perlin_output_in_unit_range() {
        let noise = SixPlaneNoise::perlin(7);
        for i in 0..500 {
            let t = i as f32 * 0.137;
            let p = Vec3::new(t.sin() * 9.0, t.cos() * 4.0 + t, t * 0.5 - 3.0);
            let v = noise.evaluate(p);
            assert!((0.0..=1.0).contains(&v), "Noise {v} out of [0, 1] at {p:?}");
        }
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = SixPlaneNoise::perlin(42);
        let b = SixPlaneNoise::perlin(42);
        let p = Vec3::new(0.31, -1.7, 2.25);
        assert_eq!(a.evaluate(p).to_bits(), b.evaluate(p).to_bits());
    }

    #[test]
    fn test_different_seeds_differ_somewhere() {
        let a = SixPlaneNoise::perlin(1);
        let b = SixPlaneNoise::perlin(999);
        let differs = (0..100).any(|i| {
            let p = Vec3::new(i as f32 * 0.29 + 0.1, 0.77, -0.43 * i as f32);
            (a.evaluate(p) - b.evaluate(p)).abs() > EPSILON
        });
        assert!(differs, "Seeds 1 and 999 produced identical noise");
    }

    #[test]
    fn test_symmetric_under_axis_permutation() {
        let noise = SixPlaneNoise::perlin(3);
        let p = Vec3::new(0.4, 1.9, -2.6);
        let base = noise.evaluate(p);
        for q in [
            Vec3::new(p.y, p.x, p.z),
            Vec3::new(p.z, p.y, p.x),
            Vec3::new(p.y, p.z, p.x),
        ] {
            assert!((noise.evaluate(q) - base).abs() < 1e-5);
        }
    }
}
