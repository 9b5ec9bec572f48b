//! Command-line argument parsing for the `geode` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Procedural planet generator.
///
/// CLI values override settings loaded from `planet.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geode", about = "Procedural planet generator")]
pub struct CliArgs {
    /// Cells per cube face edge (2-256).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Planet radius in world units.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Sea level between the lowest and highest surface point (0-1).
    #[arg(long)]
    pub sea_level: Option<f32>,

    /// Terrain noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Displacement threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the biome ramp to this PNG file.
    #[arg(long)]
    pub biome_png: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(resolution) = args.resolution {
            self.planet.resolution = resolution;
        }
        if let Some(radius) = args.radius {
            self.planet.radius = radius;
        }
        if let Some(sea_level) = args.sea_level {
            self.planet.ocean.sea_level = sea_level;
        }
        if let Some(seed) = args.seed {
            self.planet.terrain.seed = seed;
        }
        if let Some(workers) = args.workers {
            self.planet.workers = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.biome_png {
            self.export.biome_png = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            resolution: Some(128),
            seed: Some(7),
            biome_png: Some(PathBuf::from("out/ramp.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.resolution, 128);
        assert_eq!(config.planet.terrain.seed, 7);
        assert_eq!(config.export.biome_png, Some(PathBuf::from("out/ramp.png")));
        // Non-overridden fields retain defaults
        assert_eq!(config.planet.radius, 1000.0);
        assert_eq!(config.planet.ocean.sea_level, 0.5);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "geode",
            "--radius",
            "6371",
            "--sea-level",
            "0.3",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.radius, Some(6371.0));
        assert_eq!(args.sea_level, Some(0.3));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.resolution, None);
    }
}
