//! Configuration for the relief generator.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Missing fields fall back to their defaults, so older
//! config files keep loading as new settings are added.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, OutputConfig, TerrainConfig};
pub use error::ConfigError;

/// Default config directory: `<platform config dir>/relief`.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when the platform reports no config
/// directory.
pub fn default_config_dir() -> Result<std::path::PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("relief"))
        .ok_or(ConfigError::NoConfigDir)
}
