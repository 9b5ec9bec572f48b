//! GPU-ready uniforms handed to the renderer for the planet and its shells.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{AtmosphereSettings, ElevationRange, OceanSettings};

/// Uniform for the displaced planet surface. The shader normalizes each
/// fragment's distance from `planet_center` into the elevation range to look
/// up the biome ramp.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceUniform {
    /// Planet center in world space. (offset 0)
    pub planet_center: [f32; 3],
    /// Target radius. (offset 12)
    pub planet_radius: f32,
    /// Lowest surface distance. (offset 16)
    pub min_elevation: f32,
    /// Highest surface distance. (offset 20)
    pub max_elevation: f32,
    /// Padding to 16-byte alignment. (offset 24)
    pub _padding: [f32; 2],
}

static_assertions::assert_eq_size!(SurfaceUniform, [u8; 32]);

impl SurfaceUniform {
    /// Pack the planet placement and its world-space elevation range.
    pub fn new(planet_center: Vec3, planet_radius: f32, range: ElevationRange) -> Self {
        Self {
            planet_center: planet_center.to_array(),
            planet_radius,
            min_elevation: range.min,
            max_elevation: range.max,
            _padding: [0.0; 2],
        }
    }
}

/// Uniform for the ocean shell.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OceanUniform {
    /// Planet center in world space. (offset 0)
    pub planet_center: [f32; 3],
    /// Ocean shell radius. (offset 12)
    pub ocean_radius: f32,
    /// Linear RGBA color. (offset 16)
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(OceanUniform, [u8; 32]);

impl OceanUniform {
    /// Create a uniform from ocean settings and the derived radius.
    pub fn from_settings(settings: &OceanSettings, planet_center: Vec3, ocean_radius: f32) -> Self {
        Self {
            planet_center: planet_center.to_array(),
            ocean_radius,
            color: settings.color,
        }
    }
}

/// Uniform for the atmosphere shell's rim shading.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct AtmosphereUniform {
    /// Planet center in world space. (offset 0)
    pub planet_center: [f32; 3],
    /// Atmosphere shell radius. (offset 12)
    pub atmosphere_radius: f32,
    /// Linear RGBA scattering color. (offset 16)
    pub color: [f32; 4],
    /// Normalized direction toward the sun. (offset 32)
    pub sun_direction: [f32; 3],
    /// Overall opacity scale. (offset 44)
    pub density: f32,
    /// Falloff exponent of the glow. (offset 48)
    pub power: f32,
    /// How much the unlit side still glows. (offset 52)
    pub ambient_light_influence: f32,
    /// Exponent of the view-angle rim term. (offset 56)
    pub rim_power: f32,
    /// Scale of the apparent shell thickness. (offset 60)
    pub thickness_multiplier: f32,
}

static_assertions::assert_eq_size!(AtmosphereUniform, [u8; 64]);

impl AtmosphereUniform {
    /// Create a uniform from atmosphere settings, the derived radius, and the
    /// current sun direction. A zero sun direction stays zero.
    pub fn from_settings(
        settings: &AtmosphereSettings,
        planet_center: Vec3,
        atmosphere_radius: f32,
        sun_direction: Vec3,
    ) -> Self {
        Self {
            planet_center: planet_center.to_array(),
            atmosphere_radius,
            color: settings.color,
            sun_direction: sun_direction.normalize_or_zero().to_array(),
            density: settings.density,
            power: settings.power,
            ambient_light_influence: settings.ambient_light_influence,
            rim_power: settings.rim_power,
            thickness_multiplier: settings.thickness_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SurfaceUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<OceanUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<AtmosphereUniform>() % 16, 0);
    }

    #[test]
    fn test_surface_uniform_carries_range() {
        let range = ElevationRange::new(950.0, 1040.0);
        let u = SurfaceUniform::new(Vec3::new(1.0, 2.0, 3.0), 1000.0, range);
        assert_eq!(u.planet_center, [1.0, 2.0, 3.0]);
        assert_eq!(u.min_elevation, 950.0);
        assert_eq!(u.max_elevation, 1040.0);
        let bytes: &[u8] = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_ocean_uniform_uses_settings_color() {
        let u = OceanUniform::from_settings(&OceanSettings::default(), Vec3::ZERO, 998.0);
        assert_eq!(u.color, [0.0, 0.2, 0.6, 1.0]);
        assert_eq!(u.ocean_radius, 998.0);
    }

    #[test]
    fn test_atmosphere_uniform_normalizes_sun() {
        let settings = AtmosphereSettings::default();
        let sun = Vec3::new(0.0, 5.0, 0.0);
        let u = AtmosphereUniform::from_settings(&settings, Vec3::ZERO, 1020.0, sun);
        assert_eq!(u.sun_direction, [0.0, 1.0, 0.0]);
        assert_eq!(u.power, 5.0);
        assert_eq!(u.rim_power, 3.0);
        assert_eq!(u.thickness_multiplier, 0.3);

        let dark = AtmosphereUniform::from_settings(&settings, Vec3::ZERO, 1020.0, Vec3::ZERO);
        assert_eq!(dark.sun_direction, [0.0; 3]);
    }
}
