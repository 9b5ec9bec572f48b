//! Driver behind the `geode` binary: resolve the config, build the planet,
//! and write the requested exports.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use geode_config::{CliArgs, Config, ConfigError, default_config_dir};
use geode_planet::{BiomeTexture, ElevationRange, GenerationError, PlanetGenerator, ShellRadii};
use tracing::{info, warn};

/// Errors that end a `geode` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory and none was given.
    #[error("could not determine a config directory; pass --config")]
    NoConfigDir,

    /// Loading or saving `planet.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The settings were rejected or a pipeline stage failed.
    #[error("planet generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// An export file or its directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The biome ramp could not be encoded as PNG.
    #[error("failed to encode {}: {source}", path.display())]
    Png {
        path: PathBuf,
        #[source]
        source: Box<png::EncodingError>,
    },
}

/// What a run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSummary {
    /// Surface vertex count.
    pub vertices: usize,
    /// Surface triangle count.
    pub triangles: usize,
    /// Surface elevation range at the target radius.
    pub range: ElevationRange,
    /// Derived ocean and atmosphere radii.
    pub shells: ShellRadii,
    /// Path of the written biome PNG, if any.
    pub biome_png: Option<PathBuf>,
}

/// `--config` if given, else the OS default.
pub fn resolve_config_dir(args: &CliArgs) -> Result<PathBuf, AppError> {
    match &args.config {
        Some(dir) => Ok(dir.clone()),
        None => default_config_dir().ok_or(AppError::NoConfigDir),
    }
}

/// Build the planet described by `config` and write its exports.
pub fn generate(config: &Config) -> Result<BuildSummary, AppError> {
    let mut generator = PlanetGenerator::new(config.planet.clone());
    let artifacts = generator.rebuild()?;

    let biome_png = match (&config.export.biome_png, &artifacts.biome_texture) {
        (Some(path), Some(texture)) => {
            write_biome_png(texture, path)?;
            info!("Wrote biome ramp to {}", path.display());
            Some(path.clone())
        }
        (Some(path), None) => {
            warn!("No biome bands configured; skipping {}", path.display());
            None
        }
        (None, _) => None,
    };

    Ok(BuildSummary {
        vertices: artifacts.planet.vertex_count(),
        triangles: artifacts.planet.triangle_count(),
        range: artifacts.range,
        shells: artifacts.shells,
        biome_png,
    })
}

/// Encode the ramp as a `len x 1` RGBA8 PNG.
pub fn write_biome_png(texture: &BiomeTexture, path: &Path) -> Result<(), AppError> {
    let io_err = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };
    let png_err = |source| AppError::Png {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;

    let width = u32::try_from(texture.len()).unwrap_or(u32::MAX);
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, 1);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(png_err)?;
    writer
        .write_image_data(&texture.to_rgba8())
        .map_err(png_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.planet.resolution = 6;
        config.planet.radius = 50.0;
        config
    }

    #[test]
    fn test_generate_reports_counts() {
        let summary = generate(&small_config()).unwrap();
        assert_eq!(summary.vertices, 6 * 7 * 7);
        assert_eq!(summary.triangles, 12 * 36);
        assert!(summary.shells.atmosphere_radius > summary.range.max);
        assert!(summary.biome_png.is_none());
    }

    #[test]
    fn test_generate_writes_biome_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("ramp.png");
        let mut config = small_config();
        config.export.biome_png = Some(path.clone());

        let summary = generate(&config).unwrap();
        assert_eq!(summary.biome_png.as_deref(), Some(path.as_path()));

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 256);
        assert_eq!(reader.info().height, 1);
        assert_eq!(reader.info().color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_generate_skips_png_without_bands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let mut config = small_config();
        config.planet.biomes.bands.clear();
        config.export.biome_png = Some(path.clone());

        let summary = generate(&config).unwrap();
        assert!(summary.biome_png.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_generation_error_is_reported() {
        let mut config = small_config();
        config.planet.resolution = 1;
        assert!(matches!(generate(&config), Err(AppError::Generation(_))));
    }

    #[test]
    fn test_app_error_stays_small() {
        assert!(std::mem::size_of::<AppError>() <= 64);
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let args = CliArgs {
            config: Some(PathBuf::from("/tmp/geode-test")),
            ..Default::default()
        };
        assert_eq!(
            resolve_config_dir(&args).unwrap(),
            PathBuf::from("/tmp/geode-test")
        );
    }
}
