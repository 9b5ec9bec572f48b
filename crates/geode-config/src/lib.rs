//! Configuration for the planet generator.
//!
//! Settings persist to disk as a RON file (`planet.ron`). Missing fields fall
//! back to defaults, unknown fields are ignored, and command-line arguments
//! can override the most common values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, ExportConfig, default_config_dir};
pub use error::ConfigError;
