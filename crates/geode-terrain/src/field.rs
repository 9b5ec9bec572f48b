//! Layered terrain displacement over unit-sphere directions.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    NoiseLayerConfig, NoiseSource2D, NoiseType, PerlinSource, SixPlaneNoise, TerrainError,
    evaluate_layer,
};

/// User-facing terrain settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Constant added to every displacement. Negative values sink the surface.
    pub global_height_offset: f32,
    /// Seed of the underlying 2D noise source.
    pub seed: u32,
    /// Noise layers in evaluation order. Layer 0 is the mask reference.
    pub layers: Vec<NoiseLayerConfig>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            global_height_offset: 0.0,
            seed: 0,
            layers: vec![
                NoiseLayerConfig {
                    strength: 0.08,
                    roughness: 1.2,
                    octaves: 5,
                    ..Default::default()
                },
                NoiseLayerConfig {
                    strength: 0.04,
                    roughness: 2.5,
                    octaves: 4,
                    noise_type: NoiseType::Ridge,
                    min_value: -0.3,
                    use_first_layer_as_mask: true,
                    offset: Vec3::new(11.3, -4.1, 7.9),
                    ..Default::default()
                },
            ],
        }
    }
}

impl TerrainSettings {
    /// Settings with no layers and no offset: an undisplaced sphere.
    pub fn flat() -> Self {
        Self {
            global_height_offset: 0.0,
            seed: 0,
            layers: Vec::new(),
        }
    }

    /// Number of layers with `enabled == true`.
    pub fn enabled_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }
}

/// Validated, immutable displacement function.
///
/// Pure function of the sample direction: no state changes after construction,
/// so it may be shared across threads.
#[derive(Clone, Debug)]
pub struct TerrainField<S = PerlinSource> {
    global_height_offset: f32,
    layers: Vec<NoiseLayerConfig>,
    noise: SixPlaneNoise<S>,
}

impl TerrainField<PerlinSource> {
    /// Build a field over seeded Perlin noise.
    ///
    /// # Errors
    ///
    /// Propagates the first layer validation failure, or
    /// [`TerrainError::InvalidSetting`] for a non-finite height offset.
    pub fn new(settings: &TerrainSettings) -> Result<Self, TerrainError> {
        Self::with_source(settings, PerlinSource::new(settings.seed))
    }
}

impl<S: NoiseSource2D> TerrainField<S> {
    /// Build a field over an arbitrary 2D noise source. `settings.seed` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// See [`TerrainField::new`].
    pub fn with_source(settings: &TerrainSettings, source: S) -> Result<Self, TerrainError> {
        if !settings.global_height_offset.is_finite() {
            return Err(TerrainError::InvalidSetting {
                name: "global_height_offset",
                reason: format!("must be finite, got {}", settings.global_height_offset),
            });
        }
        for (index, layer) in settings.layers.iter().enumerate() {
            layer.validate(index)?;
        }
        debug!(
            layers = settings.layers.len(),
            enabled = settings.enabled_layer_count(),
            offset = settings.global_height_offset,
            "Terrain field ready"
        );
        Ok(Self {
            global_height_offset: settings.global_height_offset,
            layers: settings.layers.clone(),
            noise: SixPlaneNoise::new(source),
        })
    }

    /// Layers in evaluation order.
    pub fn layers(&self) -> &[NoiseLayerConfig] {
        &self.layers
    }

    /// Constant offset added to every displacement.
    pub fn global_height_offset(&self) -> f32 {
        self.global_height_offset
    }

    /// Number of enabled layers.
    pub fn enabled_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }

    /// `true` when the field cannot displace anything.
    pub fn is_flat(&self) -> bool {
        self.enabled_layer_count() == 0 && self.global_height_offset == 0.0
    }

    /// Radial displacement at the unit direction `n`.
    ///
    /// Layer 0's value is the mask reference. When layer 0 is disabled the
    /// reference stays 0, so every masked layer is suppressed.
    pub fn evaluate(&self, n: Vec3) -> f32 {
        let mut displacement = self.global_height_offset;
        let mut first_layer_value = 0.0;

        for (index, layer) in self.layers.iter().enumerate() {
            if !layer.enabled {
                continue;
            }
            let mut value = evaluate_layer(&self.noise, n, layer);
            if index == 0 {
                first_layer_value = value;
            }
            if layer.use_first_layer_as_mask && first_layer_value <= 0.0 {
                value = 0.0;
            }
            displacement += value * layer.strength;
        }

        displacement
    }
}
