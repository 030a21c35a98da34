//! Generation parameters and their validation.
//!
//! All values are plain configuration. Defaults reproduce the classic tuning:
//! a unit starting range decaying by 0.7 per midpoint pass, halving per
//! diamond-square step, 5 noise cycles across the grid for Perlin sampling, and
//! 16 fBm octaves at gain 0.65 and lacunarity 2.0.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Where the subdivision algorithms draw their displacement samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomSource {
    /// Independent uniform samples in `[-1, 1]` from the seeded RNG.
    #[default]
    Uniform,
    /// Coherent samples from the lattice noise generator at each cell.
    LatticeNoise,
}

/// Tunables shared by midpoint displacement and diamond-square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplacementParams {
    /// Scale applied to the first (corner) samples. Default: 1.0.
    pub initial_range: f32,
    /// Multiplier applied to the random range after each midpoint sweep. Default: 0.7.
    pub midpoint_decay: f32,
    /// Multiplier applied to the random scale after each diamond-square step. Default: 0.5.
    pub diamond_square_decay: f32,
    /// Lattice cycles across the grid when [`RandomSource::LatticeNoise`] is
    /// selected; cell `(x, y)` samples noise at `(x, y) * cycles / (W + 1)`.
    /// Default: 5.0.
    pub lattice_cycles: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            initial_range: 1.0,
            midpoint_decay: 0.7,
            diamond_square_decay: 0.5,
            lattice_cycles: 5.0,
        }
    }
}

/// Tunables for direct Perlin sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerlinParams {
    /// The constant `k` in `frequency = k / (W + 1)`. Default: 5.0.
    pub cycles: f32,
}

impl Default for PerlinParams {
    fn default() -> Self {
        Self { cycles: 5.0 }
    }
}

/// Tunables for fractional Brownian motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmParams {
    /// Number of noise layers summed per cell. Default: 16.
    pub octaves: u32,
    /// Amplitude multiplier (persistence) between octaves. The first octave
    /// also starts at this amplitude. Default: 0.65.
    pub gain: f32,
    /// Frequency multiplier between octaves. Default: 2.0.
    pub lacunarity: f32,
    /// Cycles of the first octave across the grid, giving a starting frequency
    /// of `base_cycles / (W + 1)`. Default: 1.0.
    pub base_cycles: f32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 16,
            gain: 0.65,
            lacunarity: 2.0,
            base_cycles: 1.0,
        }
    }
}

/// The complete parameter bundle for one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Global multiplier applied to every height after the algorithm runs. Default: 50.0.
    pub height_scale: f32,
    /// Displacement sample source for the subdivision algorithms.
    pub random_source: RandomSource,
    /// Reshuffle the permutation table once at the start of every pass that
    /// consumes lattice noise. Default: true.
    pub reshuffle_noise: bool,
    /// Midpoint displacement / diamond-square tunables.
    pub displacement: DisplacementParams,
    /// Perlin tunables.
    pub perlin: PerlinParams,
    /// fBm tunables.
    pub fbm: FbmParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            height_scale: 50.0,
            random_source: RandomSource::default(),
            reshuffle_noise: true,
            displacement: DisplacementParams::default(),
            perlin: PerlinParams::default(),
            fbm: FbmParams::default(),
        }
    }
}

impl GenerationParams {
    /// Check every tunable before it reaches an algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NumericDrift`] for NaN or infinite values and
    /// [`TerrainError::DegenerateParameter`] for zero octave counts, zero
    /// frequencies, or negative ranges.
    pub fn validate(&self) -> Result<(), TerrainError> {
        ensure_finite("height_scale", self.height_scale)?;

        let d = &self.displacement;
        ensure_non_negative("displacement.initial_range", d.initial_range)?;
        ensure_non_negative("displacement.midpoint_decay", d.midpoint_decay)?;
        ensure_non_negative("displacement.diamond_square_decay", d.diamond_square_decay)?;
        ensure_non_zero("displacement.lattice_cycles", d.lattice_cycles)?;

        ensure_non_zero("perlin.cycles", self.perlin.cycles)?;

        let f = &self.fbm;
        if f.octaves == 0 {
            return Err(TerrainError::DegenerateParameter {
                name: "fbm.octaves",
                reason: "at least one octave is required".to_string(),
            });
        }
        ensure_finite("fbm.gain", f.gain)?;
        ensure_non_zero("fbm.lacunarity", f.lacunarity)?;
        ensure_non_zero("fbm.base_cycles", f.base_cycles)?;
        Ok(())
    }
}

fn ensure_finite(name: &'static str, value: f32) -> Result<(), TerrainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TerrainError::NumericDrift { name, value })
    }
}

fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), TerrainError> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(TerrainError::DegenerateParameter {
            name,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

fn ensure_non_zero(name: &'static str, value: f32) -> Result<(), TerrainError> {
    ensure_finite(name, value)?;
    if value == 0.0 {
        return Err(TerrainError::DegenerateParameter {
            name,
            reason: "must not be zero".to_string(),
        });
    }
    Ok(())
}
