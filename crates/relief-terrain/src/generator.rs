//! The generation orchestrator.
//!
//! [`TerrainGenerator`] owns the selected algorithm, the parameters, the seeded
//! random state and the lattice noise generator. Each call to
//! [`TerrainGenerator::generate`] is one blocking pass: allocate a fresh grid,
//! run the algorithm, derive normals from the raw heights, apply the global
//! height scale, and record the resulting height range.

use tracing::{debug, info, warn};

use crate::algorithm::Algorithm;
use crate::error::TerrainError;
use crate::grid::HeightGrid;
use crate::lattice::LatticeNoise;
use crate::normals::NormalGrid;
use crate::params::GenerationParams;
use crate::random::TerrainRng;

/// Lowest and highest height of a finished pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    /// Minimum height after scaling.
    pub min: f32,
    /// Maximum height after scaling.
    pub max: f32,
}

impl HeightRange {
    /// Scan `grid` for its extremes.
    pub fn of(grid: &HeightGrid) -> Self {
        grid.as_slice().iter().fold(
            Self {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
            },
            |range, &h| Self {
                min: range.min.min(h),
                max: range.max.max(h),
            },
        )
    }

    /// `max - min`.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Map `height` into `[0, 1]` relative to this range. A flat range maps
    /// everything to 0.5.
    pub fn normalize(&self, height: f32) -> f32 {
        let span = self.span();
        if span > 0.0 {
            ((height - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

/// The output of one generation pass.
#[derive(Clone, Debug)]
pub struct Terrain {
    /// Scaled heights.
    pub heights: HeightGrid,
    /// Unit normals, one per height.
    pub normals: NormalGrid,
    /// Extremes of `heights`.
    pub range: HeightRange,
    /// Algorithm that produced this terrain.
    pub algorithm: Algorithm,
    /// Seed of the random state the pass drew from.
    pub seed: u64,
}

/// Runs generation passes for a fixed grid size.
pub struct TerrainGenerator {
    width: usize,
    depth: usize,
    algorithm: Algorithm,
    params: GenerationParams,
    rng: TerrainRng,
    noise: LatticeNoise,
    terrain: Option<Terrain>,
}

impl TerrainGenerator {
    /// Create a generator for a `width x depth` grid with an explicit seed.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if the grid shape does not
    /// suit `algorithm`, or a parameter error from
    /// [`GenerationParams::validate`].
    pub fn new(
        width: usize,
        depth: usize,
        algorithm: Algorithm,
        params: GenerationParams,
        seed: u64,
    ) -> Result<Self, TerrainError> {
        Self::with_rng(width, depth, algorithm, params, TerrainRng::from_seed(seed))
    }

    /// Create a generator seeded from the current time.
    ///
    /// # Errors
    ///
    /// Same as [`TerrainGenerator::new`].
    pub fn from_time(
        width: usize,
        depth: usize,
        algorithm: Algorithm,
        params: GenerationParams,
    ) -> Result<Self, TerrainError> {
        Self::with_rng(width, depth, algorithm, params, TerrainRng::from_time())
    }

    /// Create a generator around an existing random state.
    ///
    /// The lattice noise generator starts from a table shuffled by `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`TerrainGenerator::new`].
    pub fn with_rng(
        width: usize,
        depth: usize,
        algorithm: Algorithm,
        params: GenerationParams,
        mut rng: TerrainRng,
    ) -> Result<Self, TerrainError> {
        algorithm.check_dimensions(width, depth)?;
        params.validate()?;
        let noise = LatticeNoise::shuffled(rng.rng_mut());
        debug!(width, depth, %algorithm, seed = rng.seed(), "terrain generator created");
        Ok(Self {
            width,
            depth,
            algorithm,
            params,
            rng,
            noise,
            terrain: None,
        })
    }

    /// Switch algorithms for subsequent passes.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if the grid shape does not
    /// suit `algorithm`; the current selection is kept.
    pub fn select(&mut self, algorithm: Algorithm) -> Result<(), TerrainError> {
        if let Err(err) = algorithm.check_dimensions(self.width, self.depth) {
            warn!(%algorithm, %err, "algorithm rejected for grid");
            return Err(err);
        }
        self.algorithm = algorithm;
        Ok(())
    }

    /// Replace the generation parameters.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the current parameters are kept.
    pub fn set_params(&mut self, params: GenerationParams) -> Result<(), TerrainError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Run one full generation pass and return its output.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::UnsupportedAlgorithm`] for
    /// [`Algorithm::MultiFractal`], and [`TerrainError::NumericDrift`] if the
    /// heights or normals overflow to non-finite values. The previous terrain
    /// is kept on error.
    pub fn generate(&mut self) -> Result<&Terrain, TerrainError> {
        let algorithm = self.algorithm;
        if algorithm == Algorithm::MultiFractal {
            return Err(TerrainError::UnsupportedAlgorithm(algorithm));
        }

        debug!(
            %algorithm,
            width = self.width,
            depth = self.depth,
            seed = self.rng.seed(),
            "generation pass started"
        );

        let mut heights = HeightGrid::new(self.width, self.depth)?;

        if self.params.reshuffle_noise && algorithm.uses_lattice_noise(&self.params) {
            self.noise.reshuffle_permutations(self.rng.rng_mut());
        }

        algorithm.fill(&mut heights, &self.params, &mut self.rng, &self.noise)?;
        ensure_finite("heights", heights.as_slice().iter().copied())?;

        let normals = NormalGrid::from_heights(&heights);
        ensure_finite("normals", normals.as_slice().iter().flat_map(|n| n.to_array()))?;

        heights.scale(self.params.height_scale);
        ensure_finite("scaled heights", heights.as_slice().iter().copied())?;
        let range = HeightRange::of(&heights);

        info!(
            %algorithm,
            min = range.min,
            max = range.max,
            "terrain generated"
        );

        let terrain = Terrain {
            heights,
            normals,
            range,
            algorithm,
            seed: self.rng.seed(),
        };
        Ok(self.terrain.insert(terrain))
    }

    /// Output of the last successful pass.
    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    /// The selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The current parameters.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// `(width, depth)` subdivision counts.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Seed of the random state.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The lattice noise generator.
    pub fn noise(&self) -> &LatticeNoise {
        &self.noise
    }

    /// Mutable access to the lattice noise generator, e.g. to install a
    /// known permutation table.
    pub fn noise_mut(&mut self) -> &mut LatticeNoise {
        &mut self.noise
    }
}

/// First non-finite value in `values`, reported as drift in `name`.
fn ensure_finite(
    name: &'static str,
    mut values: impl Iterator<Item = f32>,
) -> Result<(), TerrainError> {
    match values.find(|v| !v.is_finite()) {
        Some(value) => {
            warn!(name, value, "generation pass overflowed");
            Err(TerrainError::NumericDrift { name, value })
        }
        None => Ok(()),
    }
}
