//! Ocean and atmosphere shells derived from the surface elevation range.

use geode_cubesphere::{CubeSphereMesher, MeshBuffers};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ElevationRange, GenerationError};

/// Fraction of the highest elevation the ocean may reach at `sea_level = 1`,
/// so the tallest peak always pokes through.
const OCEAN_CEILING: f32 = 0.999;

/// Ocean shell settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanSettings {
    /// Where the ocean sits between the lowest and highest surface point, in `[0, 1]`.
    pub sea_level: f32,
    /// Absolute ocean radius. Values `> 0` replace the derived radius.
    pub manual_radius: f32,
    /// Linear RGBA color handed to the renderer.
    pub color: [f32; 4],
    /// Grid resolution of the shell. `None` reuses the planet's resolution.
    pub resolution: Option<u32>,
}

impl Default for OceanSettings {
    fn default() -> Self {
        Self {
            sea_level: 0.5,
            manual_radius: 0.0,
            color: [0.0, 0.2, 0.6, 1.0],
            resolution: None,
        }
    }
}

/// Atmosphere shell settings, including the shading parameters forwarded to
/// the renderer unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereSettings {
    /// Atmosphere radius as a multiple of the highest surface point.
    pub expansion_factor: f32,
    /// Absolute atmosphere radius. Values `> 0` replace the derived radius.
    pub manual_radius: f32,
    /// Linear RGBA scattering color.
    pub color: [f32; 4],
    /// Scales the optical depth through the shell.
    pub thickness_multiplier: f32,
    /// Scattering density.
    pub density: f32,
    /// Falloff exponent of the scattering.
    pub power: f32,
    /// How much ambient light tints the night side, in `[0, 1]`.
    pub ambient_light_influence: f32,
    /// Exponent of the limb glow.
    pub rim_power: f32,
    /// Grid resolution of the shell. `None` reuses the planet's resolution.
    pub resolution: Option<u32>,
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            expansion_factor: 1.02,
            manual_radius: 0.0,
            color: [0.4, 0.6, 1.0, 1.0],
            thickness_multiplier: 0.3,
            density: 1.0,
            power: 5.0,
            ambient_light_influence: 0.1,
            rim_power: 3.0,
            resolution: None,
        }
    }
}

/// Radii of the two derived shells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellRadii {
    /// Sea surface distance from the planet center.
    pub ocean_radius: f32,
    /// Outer atmosphere distance from the planet center.
    pub atmosphere_radius: f32,
}

/// Derives shell radii from an elevation range and builds the shell meshes.
pub struct ShellDeriver;

impl ShellDeriver {
    /// `lerp(min, max * 0.999, sea_level)`, or the manual radius when it is
    /// positive.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidParameter`] if `sea_level` is outside `[0, 1]`
    /// or the manual radius is not finite.
    pub fn ocean_radius(
        range: ElevationRange,
        ocean: &OceanSettings,
    ) -> Result<f32, GenerationError> {
        if !(0.0..=1.0).contains(&ocean.sea_level) {
            return Err(GenerationError::InvalidParameter(format!(
                "sea level must be in [0, 1], got {}",
                ocean.sea_level
            )));
        }
        if !ocean.manual_radius.is_finite() {
            return Err(GenerationError::InvalidParameter(format!(
                "ocean manual radius must be finite, got {}",
                ocean.manual_radius
            )));
        }
        if ocean.manual_radius > 0.0 {
            return Ok(ocean.manual_radius);
        }
        let ceiling = range.max * OCEAN_CEILING;
        Ok(range.min + (ceiling - range.min) * ocean.sea_level)
    }

    /// `max * expansion_factor`, or the manual radius when it is positive.
    /// Factors below 1 put the atmosphere under the peaks; they are accepted
    /// with a warning.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidParameter`] if the expansion factor is not a
    /// positive finite number or the manual radius is not finite.
    pub fn atmosphere_radius(
        range: ElevationRange,
        atmosphere: &AtmosphereSettings,
    ) -> Result<f32, GenerationError> {
        if !atmosphere.manual_radius.is_finite() {
            return Err(GenerationError::InvalidParameter(format!(
                "atmosphere manual radius must be finite, got {}",
                atmosphere.manual_radius
            )));
        }
        if atmosphere.manual_radius > 0.0 {
            return Ok(atmosphere.manual_radius);
        }
        let factor = atmosphere.expansion_factor;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(GenerationError::InvalidParameter(format!(
                "atmosphere expansion factor must be positive, got {factor}"
            )));
        }
        if factor < 1.0 {
            warn!(
                expansion_factor = factor,
                "Atmosphere expansion factor below 1.0; peaks will pierce the atmosphere"
            );
        }
        Ok(range.max * factor)
    }

    /// Both radii for `range`.
    ///
    /// # Errors
    ///
    /// See [`ShellDeriver::ocean_radius`] and [`ShellDeriver::atmosphere_radius`].
    pub fn derive(
        range: ElevationRange,
        ocean: &OceanSettings,
        atmosphere: &AtmosphereSettings,
    ) -> Result<ShellRadii, GenerationError> {
        Ok(ShellRadii {
            ocean_radius: Self::ocean_radius(range, ocean)?,
            atmosphere_radius: Self::atmosphere_radius(range, atmosphere)?,
        })
    }

    /// Refill `mesh` with an undisplaced cube-sphere of the given size.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Mesh`] if the resolution or radius is out of bounds.
    pub fn build_shell(
        resolution: u32,
        radius: f32,
        mesh: &mut MeshBuffers,
    ) -> Result<(), GenerationError> {
        CubeSphereMesher::new(resolution, radius)?.fill(mesh);
        debug!(
            resolution,
            radius,
            vertices = mesh.vertex_count(),
            "Built shell"
        );
        Ok(())
    }
}
