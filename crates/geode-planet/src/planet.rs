//! Planet generation orchestrator.
//!
//! [`PlanetGenerator`] owns the settings, a [`MeshPool`] of reusable buffers,
//! and the artifacts of the last successful build. Every [`PlanetGenerator::rebuild`]
//! recomputes everything from scratch:
//!
//! 1. Validate settings and build the [`TerrainField`].
//! 2. Displace the surface ([`PlanetMeshBuilder`]) and measure its elevation range.
//! 3. Derive the ocean and atmosphere radii and mesh both shells.
//! 4. Bake the biome ramp.
//! 5. Publish the pooled buffers as the new [`PlanetArtifacts`].

use std::time::Instant;

use geode_cubesphere::{CubeSphereMesher, MeshBuffers};
use geode_terrain::{TerrainField, TerrainSettings};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use crate::{
    AtmosphereSettings, AtmosphereUniform, BiomeRamp, BiomeSettings, BiomeTexture, ElevationRange,
    GenerationError, OceanSettings, OceanUniform, PlanetMeshBuilder, ShellDeriver, ShellRadii,
    SurfaceUniform,
};

/// What to do when the terrain has no enabled noise layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingLayerPolicy {
    /// Warn and build a plain sphere at the target radius.
    #[default]
    Undisplaced,
    /// Fail with [`GenerationError::MissingConfiguration`].
    Abort,
}

/// Everything needed to generate a planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetSettings {
    /// Cells per cube face edge, in `[2, 256]`.
    pub resolution: u32,
    /// Target radius in world units.
    pub radius: f32,
    /// Noise layers that displace the unit sphere.
    pub terrain: TerrainSettings,
    /// Elevation bands baked into the biome ramp.
    pub biomes: BiomeSettings,
    /// Sea level, ocean shell resolution and color.
    pub ocean: OceanSettings,
    /// Atmosphere expansion, shell resolution and shading.
    pub atmosphere: AtmosphereSettings,
    /// Behavior when no noise layer is enabled.
    pub missing_layer_policy: MissingLayerPolicy,
    /// Displacement threads. `0` uses one per logical CPU.
    pub workers: usize,
    /// World-space center forwarded to the renderer uniforms.
    pub center: Vec3,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            resolution: 64,
            radius: 1000.0,
            terrain: TerrainSettings::default(),
            biomes: BiomeSettings::default(),
            ocean: OceanSettings::default(),
            atmosphere: AtmosphereSettings::default(),
            missing_layer_policy: MissingLayerPolicy::default(),
            workers: 0,
            center: Vec3::ZERO,
        }
    }
}

impl PlanetSettings {
    /// Check the scalar settings that can be checked before any geometry is
    /// built. Terrain layers and biome bands are validated by their own stages.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Mesh`] for an out-of-range planet or shell
    /// resolution or a bad radius, [`GenerationError::InvalidParameter`] for a
    /// sea level outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), GenerationError> {
        CubeSphereMesher::new(self.resolution, self.radius)?;
        for resolution in [self.ocean.resolution, self.atmosphere.resolution]
            .into_iter()
            .flatten()
        {
            CubeSphereMesher::new(resolution, 1.0)?;
        }
        if !(0.0..=1.0).contains(&self.ocean.sea_level) {
            return Err(GenerationError::InvalidParameter(format!(
                "sea level must be in [0, 1], got {}",
                self.ocean.sea_level
            )));
        }
        Ok(())
    }

    fn ocean_resolution(&self) -> u32 {
        self.ocean.resolution.unwrap_or(self.resolution)
    }

    fn atmosphere_resolution(&self) -> u32 {
        self.atmosphere.resolution.unwrap_or(self.resolution)
    }
}

/// Reusable mesh buffers. Rebuilds clear and refill them in place, then trade
/// them with the published artifacts, so steady-state rebuilds at a fixed
/// resolution don't allocate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshPool {
    /// Surface buffers.
    pub planet: MeshBuffers,
    /// Ocean shell buffers.
    pub ocean: MeshBuffers,
    /// Atmosphere shell buffers.
    pub atmosphere: MeshBuffers,
}

/// Output of a successful build.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetArtifacts {
    /// Displaced surface at the target radius.
    pub planet: MeshBuffers,
    /// Ocean sphere at `shells.ocean_radius`.
    pub ocean: MeshBuffers,
    /// Atmosphere sphere at `shells.atmosphere_radius`.
    pub atmosphere: MeshBuffers,
    /// `None` when no biome bands are configured.
    pub biome_texture: Option<BiomeTexture>,
    /// Elevation range of the unit-radius surface.
    pub unit_range: ElevationRange,
    /// Elevation range at the target radius.
    pub range: ElevationRange,
    /// Ocean and atmosphere radii derived from `range`.
    pub shells: ShellRadii,
    /// Target radius the surface was scaled to.
    pub radius: f32,
    /// World-space center copied from the settings.
    pub center: Vec3,
}

impl PlanetArtifacts {
    fn empty() -> Self {
        Self {
            planet: MeshBuffers::new(),
            ocean: MeshBuffers::new(),
            atmosphere: MeshBuffers::new(),
            biome_texture: None,
            unit_range: ElevationRange::EMPTY,
            range: ElevationRange::EMPTY,
            shells: ShellRadii {
                ocean_radius: 0.0,
                atmosphere_radius: 0.0,
            },
            radius: 0.0,
            center: Vec3::ZERO,
        }
    }

    /// Surface uniform carrying the published elevation range.
    pub fn surface_uniform(&self) -> SurfaceUniform {
        SurfaceUniform::new(self.center, self.radius, self.range)
    }
}

/// Builds planets from [`PlanetSettings`].
pub struct PlanetGenerator {
    settings: PlanetSettings,
    pool: MeshPool,
    artifacts: Option<PlanetArtifacts>,
}

impl PlanetGenerator {
    /// Create a generator with an empty pool. Nothing is built until
    /// [`PlanetGenerator::rebuild`] is called.
    pub fn new(settings: PlanetSettings) -> Self {
        Self::with_pool(settings, MeshPool::default())
    }

    /// Create a generator that reuses an existing pool.
    pub fn with_pool(settings: PlanetSettings, pool: MeshPool) -> Self {
        Self {
            settings,
            pool,
            artifacts: None,
        }
    }

    /// Current settings, which may differ from the published build.
    pub fn settings(&self) -> &PlanetSettings {
        &self.settings
    }

    /// Mutable settings. Changes take effect on the next rebuild.
    pub fn settings_mut(&mut self) -> &mut PlanetSettings {
        &mut self.settings
    }

    /// Replace the settings. Returns `true` if they differ from the current ones.
    pub fn set_settings(&mut self, settings: PlanetSettings) -> bool {
        if settings == self.settings {
            return false;
        }
        self.settings = settings;
        true
    }

    /// Artifacts of the last successful rebuild.
    pub fn artifacts(&self) -> Option<&PlanetArtifacts> {
        self.artifacts.as_ref()
    }

    /// Buffers the next rebuild will fill.
    pub fn pool(&self) -> &MeshPool {
        &self.pool
    }

    /// Ocean uniform for the published build, using the current ocean color.
    pub fn ocean_uniform(&self) -> Option<OceanUniform> {
        self.artifacts.as_ref().map(|a| {
            OceanUniform::from_settings(&self.settings.ocean, a.center, a.shells.ocean_radius)
        })
    }

    /// Atmosphere uniform for the published build, using the current shading
    /// parameters and the given sun direction.
    pub fn atmosphere_uniform(&self, sun_direction: Vec3) -> Option<AtmosphereUniform> {
        self.artifacts.as_ref().map(|a| {
            AtmosphereUniform::from_settings(
                &self.settings.atmosphere,
                a.center,
                a.shells.atmosphere_radius,
                sun_direction,
            )
        })
    }

    /// Run the whole pipeline and publish the result.
    ///
    /// On error the previously published artifacts stay in place; the pool's
    /// buffers may hold partial output but are never exposed as artifacts.
    ///
    /// # Errors
    ///
    /// Any [`GenerationError`] raised by validation or one of the stages.
    pub fn rebuild(&mut self) -> Result<&PlanetArtifacts, GenerationError> {
        let span = info_span!(
            "planet_rebuild",
            resolution = self.settings.resolution,
            radius = self.settings.radius
        );
        let _enter = span.enter();
        let start = Instant::now();

        let settings = &self.settings;
        settings.validate()?;
        let field = Self::terrain_field(settings)?;

        let unit_range = PlanetMeshBuilder::new(settings.resolution, settings.radius)?
            .with_workers(settings.workers)
            .build_into(&mut self.pool.planet, &field)?;
        let range = unit_range.scaled(settings.radius);

        let shells = ShellDeriver::derive(range, &settings.ocean, &settings.atmosphere)?;
        ShellDeriver::build_shell(
            settings.ocean_resolution(),
            shells.ocean_radius,
            &mut self.pool.ocean,
        )?;
        ShellDeriver::build_shell(
            settings.atmosphere_resolution(),
            shells.atmosphere_radius,
            &mut self.pool.atmosphere,
        )?;

        let biome_texture = BiomeRamp::from_settings(&settings.biomes)?;

        let mut artifacts = self.artifacts.take().unwrap_or_else(PlanetArtifacts::empty);
        std::mem::swap(&mut artifacts.planet, &mut self.pool.planet);
        std::mem::swap(&mut artifacts.ocean, &mut self.pool.ocean);
        std::mem::swap(&mut artifacts.atmosphere, &mut self.pool.atmosphere);
        artifacts.biome_texture = biome_texture;
        artifacts.unit_range = unit_range;
        artifacts.range = range;
        artifacts.shells = shells;
        artifacts.radius = settings.radius;
        artifacts.center = settings.center;

        info!(
            vertices = artifacts.planet.vertex_count(),
            triangles = artifacts.planet.triangle_count(),
            min_elevation = range.min,
            max_elevation = range.max,
            ocean_radius = shells.ocean_radius,
            atmosphere_radius = shells.atmosphere_radius,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Planet rebuilt"
        );

        Ok(self.artifacts.insert(artifacts))
    }

    /// Validated terrain field, with the missing-layer policy applied.
    fn terrain_field(settings: &PlanetSettings) -> Result<TerrainField, GenerationError> {
        let field = TerrainField::new(&settings.terrain)?;
        if field.enabled_layer_count() > 0 {
            return Ok(field);
        }

        let reason = if field.layers().is_empty() {
            "no noise layers configured"
        } else {
            "all noise layers are disabled"
        };
        match settings.missing_layer_policy {
            MissingLayerPolicy::Abort => {
                Err(GenerationError::MissingConfiguration(reason.to_string()))
            }
            MissingLayerPolicy::Undisplaced => {
                warn!("{reason}; building an undisplaced sphere");
                Ok(TerrainField::new(&TerrainSettings::flat())?)
            }
        }
    }
}
