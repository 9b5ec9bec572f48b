//! The `geode` command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use geode_app::{generate, resolve_config_dir};
use geode_config::{CliArgs, Config};
use geode_log::init_logging;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match resolve_config_dir(&args) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!("Using config directory {}", config_dir.display());

    match generate(&config) {
        Ok(summary) => {
            info!(
                vertices = summary.vertices,
                triangles = summary.triangles,
                min_elevation = summary.range.min,
                max_elevation = summary.range.max,
                ocean_radius = summary.shells.ocean_radius,
                atmosphere_radius = summary.shells.atmosphere_radius,
                "Generation complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
