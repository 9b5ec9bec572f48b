//! Biome color ramp: a 1D lookup texture indexed by normalized elevation.

mod ramp;

pub use ramp::{BiomeBand, BiomeRamp, BiomeSettings, BiomeTexture, DEFAULT_RAMP_SAMPLES};
