//! Algorithm selection and dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diamond_square;
use crate::error::{ParseAlgorithmError, TerrainError};
use crate::fractal;
use crate::grid::HeightGrid;
use crate::lattice::LatticeNoise;
use crate::midpoint;
use crate::params::{GenerationParams, RandomSource};
use crate::random::{LatticeDisplacement, TerrainRng, UniformDisplacement};

/// Which generation function fills the height grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Square/diamond averaging sweeps with decaying displacement.
    #[default]
    MidpointDisplacement,
    /// Explicit square and diamond steps over a toroidal buffer.
    DiamondSquare,
    /// One lattice-noise sample per cell.
    PerlinNoise,
    /// Multi-octave sum of lattice noise.
    FractionalBrownianMotion,
    /// Reserved; always fails with [`TerrainError::UnsupportedAlgorithm`].
    MultiFractal,
}

impl Algorithm {
    /// Every selector, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::MidpointDisplacement,
        Algorithm::DiamondSquare,
        Algorithm::PerlinNoise,
        Algorithm::FractionalBrownianMotion,
        Algorithm::MultiFractal,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::MidpointDisplacement => "midpoint_displacement",
            Algorithm::DiamondSquare => "diamond_square",
            Algorithm::PerlinNoise => "perlin_noise",
            Algorithm::FractionalBrownianMotion => "fractional_brownian_motion",
            Algorithm::MultiFractal => "multi_fractal",
        }
    }

    /// Whether the algorithm needs a square grid with a power-of-two
    /// subdivision count.
    pub fn requires_power_of_two(self) -> bool {
        matches!(
            self,
            Algorithm::MidpointDisplacement | Algorithm::DiamondSquare
        )
    }

    /// Whether the algorithm reads the lattice noise generator under `params`.
    pub fn uses_lattice_noise(self, params: &GenerationParams) -> bool {
        match self {
            Algorithm::PerlinNoise | Algorithm::FractionalBrownianMotion => true,
            Algorithm::MidpointDisplacement | Algorithm::DiamondSquare => {
                params.random_source == RandomSource::LatticeNoise
            }
            Algorithm::MultiFractal => false,
        }
    }

    /// Check that a `width x depth` grid satisfies this algorithm's shape.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::DegenerateParameter`] for grids under 2x2
    /// vertices, and [`TerrainError::InvalidDimension`] for non-square or
    /// non-power-of-two grids when [`Algorithm::requires_power_of_two`] holds.
    pub fn check_dimensions(self, width: usize, depth: usize) -> Result<(), TerrainError> {
        if width == 0 || depth == 0 {
            return Err(TerrainError::too_small(width, depth));
        }
        if self.requires_power_of_two() {
            if width != depth {
                return Err(TerrainError::InvalidDimension {
                    width,
                    depth,
                    reason: "subdivision algorithms need a square grid",
                });
            }
            if !width.is_power_of_two() {
                return Err(TerrainError::InvalidDimension {
                    width,
                    depth,
                    reason: "subdivision algorithms need a power-of-two size",
                });
            }
        }
        Ok(())
    }

    /// Run this algorithm over `grid`, overwriting every cell.
    ///
    /// `noise` is read (never reshuffled here) when the algorithm or the
    /// configured random source needs coherent noise.
    ///
    /// # Errors
    ///
    /// Propagates dimension errors from the subdivision algorithms and returns
    /// [`TerrainError::UnsupportedAlgorithm`] for [`Algorithm::MultiFractal`].
    pub fn fill(
        self,
        grid: &mut HeightGrid,
        params: &GenerationParams,
        rng: &mut TerrainRng,
        noise: &LatticeNoise,
    ) -> Result<(), TerrainError> {
        let lattice_frequency = params.displacement.lattice_cycles / grid.columns() as f32;
        match self {
            Algorithm::MidpointDisplacement => match params.random_source {
                RandomSource::Uniform => midpoint::fill(
                    grid,
                    &params.displacement,
                    &mut UniformDisplacement::new(rng),
                ),
                RandomSource::LatticeNoise => midpoint::fill(
                    grid,
                    &params.displacement,
                    &mut LatticeDisplacement::new(noise, lattice_frequency),
                ),
            },
            Algorithm::DiamondSquare => match params.random_source {
                RandomSource::Uniform => diamond_square::fill(
                    grid,
                    &params.displacement,
                    &mut UniformDisplacement::new(rng),
                ),
                RandomSource::LatticeNoise => diamond_square::fill(
                    grid,
                    &params.displacement,
                    &mut LatticeDisplacement::new(noise, lattice_frequency),
                ),
            },
            Algorithm::PerlinNoise => {
                fractal::fill_perlin(grid, &params.perlin, noise);
                Ok(())
            }
            Algorithm::FractionalBrownianMotion => {
                fractal::fill_fbm(grid, &params.fbm, noise);
                Ok(())
            }
            Algorithm::MultiFractal => Err(TerrainError::UnsupportedAlgorithm(self)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts the snake_case name, with `-` allowed in place of `_`, or the
    /// 1-based menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Ok(n) = normalized.parse::<usize>()
            && (1..=Self::ALL.len()).contains(&n)
        {
            return Ok(Self::ALL[n - 1]);
        }
        Self::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}
