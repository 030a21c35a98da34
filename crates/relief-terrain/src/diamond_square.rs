//! Diamond-square refinement over a toroidally wrapped buffer.
//!
//! Refinement runs in a `W x H` [`WrappedGrid`], so every neighbor lookup wraps
//! around the opposite edge. The public `(W + 1) x (H + 1)` grid is filled by
//! reading the wrapped buffer at every vertex, which makes the last row and
//! column duplicates of the first: the terrain tiles seamlessly.

use tracing::trace;

use crate::error::TerrainError;
use crate::grid::{HeightGrid, WrappedGrid};
use crate::params::DisplacementParams;
use crate::random::DisplacementSource;

/// Fill `grid` by diamond-square refinement.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidDimension`] unless the grid is square with a
/// power-of-two subdivision count.
pub fn fill(
    grid: &mut HeightGrid,
    params: &DisplacementParams,
    source: &mut impl DisplacementSource,
) -> Result<(), TerrainError> {
    if !grid.is_square_power_of_two() {
        return Err(TerrainError::InvalidDimension {
            width: grid.width(),
            depth: grid.depth(),
            reason: "diamond-square needs a square power-of-two grid",
        });
    }

    let width = grid.width();
    let depth = grid.depth();
    let grid_size = width.min(depth);
    let mut map = WrappedGrid::new(width, depth)?;

    // All four corners alias the same wrapped cell; the last write wins.
    for y in (0..=depth).step_by(grid_size) {
        for x in (0..=width).step_by(grid_size) {
            map.set_sample(
                x as isize,
                y as isize,
                source.sample(x, y) * params.initial_range,
            );
        }
    }

    let mut step = grid_size;
    let mut scale = params.initial_range;
    while step > 1 {
        refine(&mut map, width, depth, step, scale, source);
        trace!(step, scale, "diamond-square step complete");
        step /= 2;
        scale *= params.diamond_square_decay;
    }

    for y in 0..=depth {
        for x in 0..=width {
            grid.set(x, y, map.sample(x as isize, y as isize));
        }
    }

    Ok(())
}

/// One square pass followed by one diamond pass at `step`.
fn refine(
    map: &mut WrappedGrid,
    width: usize,
    depth: usize,
    step: usize,
    scale: f32,
    source: &mut impl DisplacementSource,
) {
    let half = step / 2;

    for y in (half..depth + 1 + half).step_by(step) {
        for x in (half..width + 1 + half).step_by(step) {
            let value = source.sample(x, y) * scale;
            square(map, x as isize, y as isize, half as isize, value);
        }
    }

    for y in (0..=depth).step_by(step) {
        for x in (0..=width).step_by(step) {
            let value = source.sample(x + half, y) * scale;
            diamond(map, (x + half) as isize, y as isize, half as isize, value);

            let value = source.sample(x, y + half) * scale;
            diamond(map, x as isize, (y + half) as isize, half as isize, value);
        }
    }
}

/// Center of a square: average of the four diagonal corners plus `value`.
fn square(map: &mut WrappedGrid, x: isize, y: isize, half: isize, value: f32) {
    let top_left = map.sample(x - half, y - half);
    let top_right = map.sample(x + half, y - half);
    let bottom_left = map.sample(x - half, y + half);
    let bottom_right = map.sample(x + half, y + half);
    map.set_sample(
        x,
        y,
        (top_left + top_right + bottom_left + bottom_right) / 4.0 + value,
    );
}

/// Center of a diamond: average of the four orthogonal neighbors plus `value`.
fn diamond(map: &mut WrappedGrid, x: isize, y: isize, half: isize, value: f32) {
    let left = map.sample(x - half, y);
    let right = map.sample(x + half, y);
    let top = map.sample(x, y - half);
    let bottom = map.sample(x, y + half);
    map.set_sample(x, y, (left + right + top + bottom) / 4.0 + value);
}
