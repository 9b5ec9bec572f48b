//! Terrain displacement: a 3D noise approximation built from 2D samples,
//! octave-stacked noise layers, and the layered terrain field evaluated over
//! unit-sphere directions.

mod error;
mod field;
mod layer;
mod primitive;

pub use error::TerrainError;
pub use field::{TerrainField, TerrainSettings};
pub use layer::{NoiseLayerConfig, NoiseType, evaluate_layer};
pub use primitive::{NoiseSource2D, PerlinSource, SixPlaneNoise};
