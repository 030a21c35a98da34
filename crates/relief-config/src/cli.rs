//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use relief_terrain::{Algorithm, RandomSource};

use crate::Config;

/// Relief command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural heightfield generator")]
pub struct CliArgs {
    /// Subdivisions along X.
    #[arg(long)]
    pub width: Option<usize>,

    /// Subdivisions along Z.
    #[arg(long)]
    pub depth: Option<usize>,

    /// Algorithm name (e.g. diamond_square) or menu number 1-5.
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Random seed; omit to seed from the current time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Global multiplier applied to every height.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Displacement source for the subdivision algorithms (uniform, lattice_noise).
    #[arg(long, value_parser = parse_random_source)]
    pub random_source: Option<RandomSource>,

    /// Write a colour-ramped heightmap PNG here.
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Write an RGB normal map PNG here.
    #[arg(long)]
    pub normal_map: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run every algorithm in menu order instead of only the configured one.
    #[arg(long)]
    pub cycle: bool,
}

fn parse_random_source(s: &str) -> Result<RandomSource, String> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "uniform" => Ok(RandomSource::Uniform),
        "lattice_noise" | "perlin" => Ok(RandomSource::LatticeNoise),
        other => Err(format!(
            "unknown random source `{other}` (expected uniform or lattice_noise)"
        )),
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let terrain = &mut self.terrain;
        if let Some(w) = args.width {
            terrain.width = w;
        }
        if let Some(d) = args.depth {
            terrain.depth = d;
        }
        if let Some(algorithm) = args.algorithm {
            terrain.algorithm = algorithm;
        }
        if let Some(seed) = args.seed {
            terrain.seed = Some(seed);
        }
        if let Some(scale) = args.height_scale {
            terrain.params.height_scale = scale;
        }
        if let Some(source) = args.random_source {
            terrain.params.random_source = source;
        }
        if let Some(ref path) = args.heightmap {
            self.output.heightmap = Some(path.clone());
        }
        if let Some(ref path) = args.normal_map {
            self.output.normal_map = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
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
            width: Some(256),
            depth: Some(256),
            algorithm: Some(Algorithm::DiamondSquare),
            random_source: Some(RandomSource::LatticeNoise),
            heightmap: Some(PathBuf::from("height.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.width, 256);
        assert_eq!(config.terrain.algorithm, Algorithm::DiamondSquare);
        assert_eq!(config.terrain.params.random_source, RandomSource::LatticeNoise);
        assert_eq!(config.output.heightmap, Some(PathBuf::from("height.png")));
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.seed, None);
        assert_eq!(config.terrain.params.height_scale, 50.0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = CliArgs::try_parse_from([
            "relief",
            "--algorithm",
            "perlin-noise",
            "--seed",
            "42",
            "--random-source",
            "lattice_noise",
            "--height-scale",
            "10",
            "--cycle",
        ])
        .unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::PerlinNoise));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.random_source, Some(RandomSource::LatticeNoise));
        assert_eq!(args.height_scale, Some(10.0));
        assert!(args.cycle);
    }

    #[test]
    fn test_algorithm_menu_number() {
        let args = CliArgs::try_parse_from(["relief", "--algorithm", "2"]).unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::DiamondSquare));
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert!(CliArgs::try_parse_from(["relief", "--algorithm", "voronoi"]).is_err());
        assert!(CliArgs::try_parse_from(["relief", "--random-source", "gaussian"]).is_err());
    }
}
