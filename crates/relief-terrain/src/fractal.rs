//! Noise-composition fills: direct Perlin sampling and fractional Brownian
//! motion (fBm).
//!
//! Both are single passes over the grid. Perlin samples the lattice noise once
//! per cell at `frequency = cycles / (W + 1)`. fBm sums `octaves` layers per
//! cell, multiplying frequency by `lacunarity` and amplitude by `gain` after
//! each layer, with the first layer already weighted by `gain`.

use crate::grid::HeightGrid;
use crate::lattice::LatticeNoise;
use crate::params::{FbmParams, PerlinParams};

/// Fill every cell with one lattice-noise sample.
pub fn fill_perlin(grid: &mut HeightGrid, params: &PerlinParams, noise: &LatticeNoise) {
    let frequency = params.cycles / grid.columns() as f32;
    for z in 0..grid.rows() {
        for x in 0..grid.columns() {
            let value = noise.generate_noise(x as f32 * frequency, z as f32 * frequency);
            grid.set(x, z, value);
        }
    }
}

/// Fill every cell with a multi-octave fBm sum.
pub fn fill_fbm(grid: &mut HeightGrid, params: &FbmParams, noise: &LatticeNoise) {
    let base_frequency = params.base_cycles / grid.columns() as f32;
    for z in 0..grid.rows() {
        for x in 0..grid.columns() {
            let value = fbm_sample(noise, params, base_frequency, x as f32, z as f32);
            grid.set(x, z, value);
        }
    }
}

/// Sum `params.octaves` noise layers at `(x, y)`.
pub fn fbm_sample(
    noise: &LatticeNoise,
    params: &FbmParams,
    base_frequency: f32,
    x: f32,
    y: f32,
) -> f32 {
    let mut total = 0.0;
    let mut frequency = base_frequency;
    let mut amplitude = params.gain;

    for _ in 0..params.octaves {
        total += noise.generate_noise(x * frequency, y * frequency) * amplitude;
        frequency *= params.lacunarity;
        amplitude *= params.gain;
    }

    total
}
