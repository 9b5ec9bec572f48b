//! End-to-end checks of the planet pipeline across the terrain, mesher, and
//! planet crates.

use geode_cubesphere::{CubeSphereMesher, count_inward_triangles};
use geode_planet::{
    BiomeBand, ElevationRange, GenerationError, MeshBuffers, NoiseLayerConfig, NoiseType,
    PlanetGenerator, PlanetMeshBuilder, PlanetSettings, ShellDeriver, TerrainField,
    TerrainSettings,
};
use glam::Vec3;

const EPSILON: f32 = 1e-4;

fn mountainous() -> TerrainSettings {
    TerrainSettings {
        global_height_offset: -0.01,
        seed: 42,
        layers: vec![
            NoiseLayerConfig {
                strength: 0.15,
                roughness: 1.5,
                octaves: 6,
                ..Default::default()
            },
            NoiseLayerConfig {
                strength: 0.1,
                roughness: 3.0,
                noise_type: NoiseType::Ridge,
                use_first_layer_as_mask: true,
                ..Default::default()
            },
        ],
    }
}

fn position_bits(mesh: &MeshBuffers) -> Vec<u32> {
    mesh.positions
        .iter()
        .chain(&mesh.normals)
        .flat_map(|v| v.to_array().map(f32::to_bits))
        .collect()
}

#[test]
fn test_unit_cube_sphere_counts() {
    for r in [2u32, 5, 16] {
        let mesh = CubeSphereMesher::build(r, 1.0).unwrap();
        let stride = (r + 1) as usize;
        assert_eq!(mesh.vertex_count(), 6 * stride * stride);
        assert_eq!(mesh.triangle_count(), 12 * (r * r) as usize);
        assert!(mesh.indices_in_bounds());
        for p in &mesh.positions {
            assert!(
                (p.length() - 1.0).abs() < 1e-5,
                "Vertex {p:?} off the unit sphere"
            );
        }
    }
}

#[test]
fn test_displaced_vertices_stay_within_reported_range() {
    let field = TerrainField::new(&mountainous()).unwrap();
    let radius = 6371.0;
    let planet = PlanetMeshBuilder::new(32, radius)
        .unwrap()
        .with_workers(4)
        .build(&field)
        .unwrap();

    assert!(planet.unit_range.span() > 0.0, "Terrain produced no relief");
    for p in &planet.mesh.positions {
        let unit = p.length() / radius;
        assert!(
            planet.unit_range.contains(unit, EPSILON),
            "Elevation {unit} outside {:?}",
            planet.unit_range
        );
    }
    assert_eq!(count_inward_triangles(&planet.mesh), 0);
}

#[test]
fn test_shell_radii_follow_the_surface() {
    let mut generator = PlanetGenerator::new(PlanetSettings {
        resolution: 16,
        radius: 1000.0,
        terrain: mountainous(),
        ..Default::default()
    });
    let artifacts = generator.rebuild().unwrap();
    let range = artifacts.range;

    let expected_ocean = range.min + (range.max * 0.999 - range.min) * 0.5;
    assert!(
        (artifacts.shells.ocean_radius - expected_ocean).abs() < 1e-2
    );
    assert!(
        (artifacts.shells.atmosphere_radius - range.max * 1.02).abs() < 1e-2
    );
}

#[test]
fn test_documented_shell_scenarios() {
    let ocean = ShellDeriver::ocean_radius(
        ElevationRange::new(0.9, 1.1),
        &geode_planet::OceanSettings::default(),
    )
    .unwrap();
    assert!((ocean - 0.99945).abs() < 1e-5);

    let atmosphere = ShellDeriver::atmosphere_radius(
        ElevationRange::new(990.0, 1000.0),
        &geode_planet::AtmosphereSettings::default(),
    )
    .unwrap();
    assert!((atmosphere - 1020.0).abs() < 1e-3);
}

#[test]
fn test_rebuild_is_deterministic() {
    let settings = PlanetSettings {
        resolution: 12,
        radius: 250.0,
        terrain: mountainous(),
        workers: 3,
        ..Default::default()
    };
    let mut a = PlanetGenerator::new(settings.clone());
    let mut b = PlanetGenerator::new(PlanetSettings {
        workers: 1,
        ..settings
    });
    let a = a.rebuild().unwrap();
    let b = b.rebuild().unwrap();
    assert_eq!(position_bits(&a.planet), position_bits(&b.planet));
    assert_eq!(a.planet.indices, b.planet.indices);
    assert_eq!(a.shells, b.shells);
    assert_eq!(a.biome_texture, b.biome_texture);
}

#[test]
fn test_seed_changes_the_surface() {
    let build = |seed| {
        let mut settings = mountainous();
        settings.seed = seed;
        let field = TerrainField::new(&settings).unwrap();
        PlanetMeshBuilder::new(8, 1.0).unwrap().build(&field).unwrap()
    };
    assert_ne!(position_bits(&build(1).mesh), position_bits(&build(2).mesh));
}

#[test]
fn test_single_band_ramp_is_constant() {
    let mut settings = PlanetSettings {
        resolution: 4,
        ..Default::default()
    };
    settings.biomes.bands = vec![BiomeBand {
        name: "grass".into(),
        color: [0.1, 0.5, 0.2, 1.0],
        start_height: 0.0,
        blend_width: 0.2,
    }];
    let mut generator = PlanetGenerator::new(settings);
    let texture = generator
        .rebuild()
        .unwrap()
        .biome_texture
        .clone()
        .expect("one band yields a texture");
    assert!(texture.samples().iter().all(|&c| c == [0.1, 0.5, 0.2, 1.0]));
}

#[test]
fn test_empty_ramp_and_invalid_bands() {
    let mut settings = PlanetSettings {
        resolution: 4,
        ..Default::default()
    };
    settings.biomes.bands.clear();
    let mut generator = PlanetGenerator::new(settings);
    assert!(generator.rebuild().unwrap().biome_texture.is_none());

    generator.settings_mut().biomes.bands = vec![BiomeBand {
        blend_width: -1.0,
        ..Default::default()
    }];
    assert!(matches!(
        generator.rebuild(),
        Err(GenerationError::InvalidParameter(_))
    ));
}

#[test]
fn test_negative_octaves_fail_the_build() {
    let mut settings = PlanetSettings {
        resolution: 4,
        ..Default::default()
    };
    settings.terrain.layers[0].octaves = -3;
    let mut generator = PlanetGenerator::new(settings);
    let err = generator.rebuild().unwrap_err();
    assert!(matches!(err, GenerationError::Terrain(_)));
    assert!(err.is_invalid_parameter());
    assert!(generator.artifacts().is_none());
}

#[test]
fn test_uniforms_describe_the_published_planet() {
    let mut generator = PlanetGenerator::new(PlanetSettings {
        resolution: 6,
        center: Vec3::new(10.0, 0.0, -5.0),
        ..Default::default()
    });
    generator.rebuild().unwrap();
    let artifacts = generator.artifacts().unwrap();
    let surface = artifacts.surface_uniform();
    assert_eq!(surface.planet_center, [10.0, 0.0, -5.0]);
    assert_eq!(surface.min_elevation, artifacts.range.min);

    let atmosphere = generator
        .atmosphere_uniform(Vec3::new(1.0, 1.0, 0.0))
        .unwrap();
    let sun = Vec3::from_array(atmosphere.sun_direction);
    assert!((sun.length() - 1.0).abs() < 1e-5);
    assert_eq!(bytemuck::bytes_of(&atmosphere).len(), 64);
}
