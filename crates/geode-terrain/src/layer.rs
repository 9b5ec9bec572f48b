//! A single octave-stacked noise layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{NoiseSource2D, SixPlaneNoise, TerrainError};

/// How each octave sample is shaped before accumulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseType {
    /// `2v - 1`: smooth rolling terrain in `[-1, 1]`.
    #[default]
    Standard,
    /// `1 - |2v - 1|`: folded around the midpoint into sharp crests in `[0, 1]`.
    Ridge,
}

/// Configuration of one noise layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayerConfig {
    /// Disabled layers contribute nothing and never become the mask reference.
    pub enabled: bool,
    /// Multiplier applied to the layer value before it is added to the displacement.
    pub strength: f32,
    /// Frequency of the first octave.
    pub roughness: f32,
    /// Number of octaves. Signed so that a negative value in a config file is
    /// reported instead of silently wrapping.
    pub octaves: i32,
    /// Amplitude multiplier between successive octaves, in `[0, 1]`.
    pub persistence: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Added to the sample direction before frequency scaling.
    pub offset: Vec3,
    /// Added to the normalized octave sum.
    pub min_value: f32,
    /// Octave shaping.
    pub noise_type: NoiseType,
    /// Zero this layer wherever layer 0 evaluated to `<= 0`.
    pub use_first_layer_as_mask: bool,
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 1.0,
            roughness: 2.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Vec3::ZERO,
            min_value: 0.0,
            noise_type: NoiseType::Standard,
            use_first_layer_as_mask: false,
        }
    }
}

impl NoiseLayerConfig {
    /// Check the layer's values. `index` is only used in the error.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidParameter`] for negative octaves, persistence
    /// outside `[0, 1]`, or any non-finite scalar.
    pub fn validate(&self, index: usize) -> Result<(), TerrainError> {
        let invalid = |reason: String| TerrainError::InvalidParameter {
            layer: index,
            reason,
        };

        if self.octaves < 0 {
            return Err(invalid(format!("octaves must be >= 0, got {}", self.octaves)));
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(invalid(format!(
                "persistence must be in [0, 1], got {}",
                self.persistence
            )));
        }
        let scalars = [
            ("strength", self.strength),
            ("roughness", self.roughness),
            ("lacunarity", self.lacunarity),
            ("min_value", self.min_value),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }
        if !self.offset.is_finite() {
            return Err(invalid(format!("offset must be finite, got {}", self.offset)));
        }
        Ok(())
    }
}

/// Evaluate `layer` at the unit direction `n`, ignoring `enabled`.
///
/// Returns the amplitude-normalized octave sum plus `min_value`. With zero
/// octaves the sum is empty and the result is exactly `min_value`.
pub fn evaluate_layer<S: NoiseSource2D>(
    noise: &SixPlaneNoise<S>,
    n: Vec3,
    layer: &NoiseLayerConfig,
) -> f32 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut total_amplitude = 0.0;
    let mut frequency = layer.roughness;

    for _ in 0..layer.octaves.max(0) {
        let p = (n + layer.offset) * frequency;
        let v = noise.evaluate(p);
        let v = match layer.noise_type {
            NoiseType::Standard => v * 2.0 - 1.0,
            NoiseType::Ridge => 1.0 - (v * 2.0 - 1.0).abs(),
        };

        sum += v * amplitude;
        total_amplitude += amplitude;
        amplitude *= layer.persistence;
        frequency *= layer.lacunarity;
    }

    let normalized = if total_amplitude == 0.0 {
        0.0
    } else {
        sum / total_amplitude
    };
    normalized + layer.min_value
}
