//! Planet generation: displaced cube-sphere surface, elevation statistics,
//! biome color ramp, and the ocean and atmosphere shells derived from them.
//!
//! [`PlanetGenerator::rebuild`] runs the whole pipeline synchronously and
//! either publishes a complete [`PlanetArtifacts`] bundle or returns an error.

mod biome;
mod builder;
mod elevation;
mod error;
mod planet;
mod shell;
mod surface;

pub use biome::{BiomeBand, BiomeRamp, BiomeSettings, BiomeTexture, DEFAULT_RAMP_SAMPLES};
pub use builder::{PlanetMesh, PlanetMeshBuilder};
pub use elevation::ElevationRange;
pub use error::GenerationError;
pub use planet::{MeshPool, MissingLayerPolicy, PlanetArtifacts, PlanetGenerator, PlanetSettings};
pub use shell::{AtmosphereSettings, OceanSettings, ShellDeriver, ShellRadii};
pub use surface::{AtmosphereUniform, OceanUniform, SurfaceUniform};

pub use geode_cubesphere::MeshBuffers;
pub use geode_terrain::{NoiseLayerConfig, NoiseType, TerrainField, TerrainSettings};
