//! `relief`: generate a heightfield and export debug images.
//!
//! Run with: `cargo run -p relief-cli -- --algorithm diamond_square --heightmap out/height.png`

mod output;

use std::process::ExitCode;

use clap::Parser;
use relief_config::{CliArgs, Config, ConfigError};
use relief_terrain::{
    Algorithm, Terrain, TerrainError, TerrainGenerator, render_heightmap_debug,
    render_normal_map_debug,
};
use tracing::{error, info, warn};

use crate::output::{OutputError, write_png};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match relief_config::default_config_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config, args.cycle) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, cycle: bool) -> Result<(), AppError> {
    let terrain_config = &config.terrain;
    let params = terrain_config.params.clone();
    let (width, depth) = (terrain_config.width, terrain_config.depth);

    let mut generator = match terrain_config.seed {
        Some(seed) => {
            TerrainGenerator::new(width, depth, terrain_config.algorithm, params, seed)?
        }
        None => TerrainGenerator::from_time(width, depth, terrain_config.algorithm, params)?,
    };
    info!(
        "Generating {}x{} terrain, seed {}",
        width,
        depth,
        generator.seed()
    );

    if !cycle {
        let terrain = generator.generate()?;
        report(terrain);
        return export(config, terrain);
    }

    for algorithm in Algorithm::ALL {
        if let Err(e) = generator.select(algorithm) {
            warn!("Skipping {algorithm}: {e}");
            continue;
        }
        match generator.generate() {
            Ok(terrain) => report(terrain),
            Err(e) => error!("{algorithm} failed: {e}"),
        }
    }

    match generator.terrain() {
        Some(terrain) => export(config, terrain),
        None => Ok(()),
    }
}

fn report(terrain: &Terrain) {
    info!(
        "{}: heights {:.3}..{:.3} (span {:.3})",
        terrain.algorithm,
        terrain.range.min,
        terrain.range.max,
        terrain.range.span()
    );
}

fn export(config: &Config, terrain: &Terrain) -> Result<(), AppError> {
    if let Some(path) = &config.output.heightmap {
        write_png(path, &render_heightmap_debug(terrain))?;
        info!("Wrote heightmap to {}", path.display());
    }
    if let Some(path) = &config.output.normal_map {
        write_png(path, &render_normal_map_debug(terrain))?;
        info!("Wrote normal map to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path, algorithm: Algorithm) -> Config {
        let mut config = Config::default();
        config.terrain.width = 32;
        config.terrain.depth = 32;
        config.terrain.algorithm = algorithm;
        config.terrain.seed = Some(11);
        config.output.heightmap = Some(dir.join("out").join("height.png"));
        config.output.normal_map = Some(dir.join("out").join("normals.png"));
        config
    }

    fn png_dimensions(path: &std::path::Path) -> (u32, u32) {
        let decoder = png::Decoder::new(std::fs::File::open(path).unwrap());
        let reader = decoder.read_info().unwrap();
        (reader.info().width, reader.info().height)
    }

    #[test]
    fn test_single_pass_exports_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Algorithm::DiamondSquare);
        run(&config, false).unwrap();
        assert_eq!(png_dimensions(&dir.path().join("out/height.png")), (33, 33));
        assert_eq!(png_dimensions(&dir.path().join("out/normals.png")), (33, 33));
    }

    #[test]
    fn test_cycle_exports_after_multi_fractal_fails_last() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Algorithm::MidpointDisplacement);
        run(&config, true).unwrap();
        assert!(dir.path().join("out/height.png").exists());
        assert_eq!(png_dimensions(&dir.path().join("out/normals.png")), (33, 33));
    }

    #[test]
    fn test_cycle_skips_subdivision_on_rectangular_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), Algorithm::PerlinNoise);
        config.terrain.width = 40;
        config.terrain.depth = 24;
        run(&config, true).unwrap();
        assert_eq!(png_dimensions(&dir.path().join("out/height.png")), (41, 25));
    }

    #[test]
    fn test_single_multi_fractal_pass_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Algorithm::MultiFractal);
        assert!(matches!(
            run(&config, false),
            Err(AppError::Terrain(TerrainError::UnsupportedAlgorithm(
                Algorithm::MultiFractal
            )))
        ));
        assert!(!dir.path().join("out/height.png").exists());
    }
}
