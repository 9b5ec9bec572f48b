use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::GenerationError;

/// Number of ramp samples produced when the settings don't say otherwise.
pub const DEFAULT_RAMP_SAMPLES: usize = 256;

/// One elevation band of the ramp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeBand {
    /// Display name; not used by the ramp itself.
    pub name: String,
    /// Linear RGBA color.
    pub color: [f32; 4],
    /// Normalized elevation in `[0, 1]` where the band starts to fade in.
    pub start_height: f32,
    /// Normalized elevation distance over which the band fades in fully.
    pub blend_width: f32,
}

impl Default for BiomeBand {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: [1.0, 1.0, 1.0, 1.0],
            start_height: 0.0,
            blend_width: 0.1,
        }
    }
}

/// Band list plus the ramp resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeSettings {
    /// Bands in any order; they are sorted by `start_height` when the ramp is built.
    pub bands: Vec<BiomeBand>,
    /// Number of ramp samples.
    pub sample_count: usize,
}

impl Default for BiomeSettings {
    fn default() -> Self {
        let band = |name: &str, color: [f32; 4], start_height: f32, blend_width: f32| BiomeBand {
            name: name.to_string(),
            color,
            start_height,
            blend_width,
        };
        Self {
            bands: vec![
                band("shore", [0.76, 0.70, 0.50, 1.0], 0.0, 0.05),
                band("lowlands", [0.22, 0.45, 0.18, 1.0], 0.1, 0.15),
                band("highlands", [0.42, 0.34, 0.24, 1.0], 0.5, 0.15),
                band("peaks", [0.95, 0.95, 0.97, 1.0], 0.85, 0.08),
            ],
            sample_count: DEFAULT_RAMP_SAMPLES,
        }
    }
}

/// A 1D RGBA texture sampled with linear filtering and clamped addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeTexture {
    samples: Vec<[f32; 4]>,
}

impl BiomeTexture {
    /// Texel colors from `h = 0` to `h = 1`.
    pub fn samples(&self) -> &[[f32; 4]] {
        &self.samples
    }

    /// Texture width.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a ramp has at least two texels.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linearly filtered lookup at normalized height `h`, clamped to `[0, 1]`.
    /// NaN samples the first texel.
    pub fn sample(&self, h: f32) -> [f32; 4] {
        let h = if h.is_nan() { 0.0 } else { h.clamp(0.0, 1.0) };
        let last = self.samples.len() - 1;
        let x = h * last as f32;
        let i0 = (x.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        let t = x - i0 as f32;
        blend(
            Vec4::from_array(self.samples[i0]),
            Vec4::from_array(self.samples[i1]),
            t,
        )
        .to_array()
    }

    /// Texels as RGBA8, ready for upload or encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.samples
            .iter()
            .flat_map(|c| c.map(|ch| (ch.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }
}

/// Builds the biome ramp texture.
pub struct BiomeRamp;

impl BiomeRamp {
    /// Build a ramp from the settings' bands and sample count.
    ///
    /// # Errors
    ///
    /// See [`BiomeRamp::build`].
    pub fn from_settings(
        settings: &BiomeSettings,
    ) -> Result<Option<BiomeTexture>, GenerationError> {
        Self::build(&settings.bands, settings.sample_count)
    }

    /// Evaluate the band blend at `sample_count` evenly spaced heights.
    ///
    /// Bands are sorted by `start_height` first. Each texel starts at the
    /// lowest band's color and is lerped toward every band in turn by
    /// `clamp01((h - start_height) / blend_width)`. An empty band list yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidParameter`] when `sample_count < 2`, a band's
    /// `blend_width` is not positive, or its `start_height` is outside `[0, 1]`.
    pub fn build(
        bands: &[BiomeBand],
        sample_count: usize,
    ) -> Result<Option<BiomeTexture>, GenerationError> {
        if bands.is_empty() {
            return Ok(None);
        }
        if sample_count < 2 {
            return Err(GenerationError::InvalidParameter(format!(
                "biome ramp needs at least 2 samples, got {sample_count}"
            )));
        }
        for band in bands {
            if !(band.blend_width.is_finite() && band.blend_width > 0.0) {
                return Err(GenerationError::InvalidParameter(format!(
                    "biome band `{}` blend width must be positive, got {}",
                    band.name, band.blend_width
                )));
            }
            if !(0.0..=1.0).contains(&band.start_height) {
                return Err(GenerationError::InvalidParameter(format!(
                    "biome band `{}` start height must be in [0, 1], got {}",
                    band.name, band.start_height
                )));
            }
        }

        let mut sorted: Vec<&BiomeBand> = bands.iter().collect();
        sorted.sort_by(|a, b| a.start_height.total_cmp(&b.start_height));

        let base = Vec4::from_array(sorted[0].color);
        let samples = (0..sample_count)
            .map(|i| {
                let h = i as f32 / (sample_count - 1) as f32;
                sorted
                    .iter()
                    .fold(base, |color, band| blend_into(color, band, h))
                    .to_array()
            })
            .collect();

        Ok(Some(BiomeTexture { samples }))
    }
}

/// Fade `color` toward `band` by how far `h` is into the band's blend width.
fn blend_into(color: Vec4, band: &BiomeBand, h: f32) -> Vec4 {
    let t = ((h - band.start_height) / band.blend_width).clamp(0.0, 1.0);
    blend(color, Vec4::from_array(band.color), t)
}

/// `a + (b - a) * t`: returns `a` exactly when `a == b`.
#[inline]
fn blend(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a + (b - a) * t
}
