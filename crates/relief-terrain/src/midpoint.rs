//! Midpoint displacement over a square, power-of-two-plus-one lattice.
//!
//! Each sweep walks the grid in steps of `offset`, toggling a parity flag per
//! row and column. Cells where both flags are even were written by a coarser
//! sweep and are skipped; the rest are centers (both odd, average of the four
//! diagonal corners), horizontal sides (odd column, left/right average) or
//! vertical sides (odd row, top/bottom average). Every written cell gets one
//! displacement sample scaled by the current range, which decays after each
//! sweep while `offset` halves down to zero.

use tracing::trace;

use crate::error::TerrainError;
use crate::grid::HeightGrid;
use crate::params::DisplacementParams;
use crate::random::DisplacementSource;

/// Fill `grid` by midpoint displacement.
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
            reason: "midpoint displacement needs a square power-of-two grid",
        });
    }

    let grid_size = grid.width().min(grid.depth());
    let columns = grid.columns();
    let rows = grid.rows();
    let mut range = params.initial_range;
    let mut offset = grid_size / 2;

    for y in (0..rows).step_by(grid_size) {
        for x in (0..columns).step_by(grid_size) {
            grid.set(x, y, source.sample(x, y) * range);
        }
    }

    while offset > 0 {
        let mut odd_y = false;
        for y in (0..rows).step_by(offset) {
            let mut odd_x = false;
            for x in (0..columns).step_by(offset) {
                if odd_x || odd_y {
                    let average = if odd_x && odd_y {
                        (grid.get(x - offset, y - offset)
                            + grid.get(x + offset, y - offset)
                            + grid.get(x - offset, y + offset)
                            + grid.get(x + offset, y + offset))
                            / 4.0
                    } else if odd_x {
                        (grid.get(x - offset, y) + grid.get(x + offset, y)) / 2.0
                    } else {
                        (grid.get(x, y - offset) + grid.get(x, y + offset)) / 2.0
                    };
                    grid.set(x, y, average + source.sample(x, y) * range);
                }
                odd_x = !odd_x;
            }
            odd_y = !odd_y;
        }

        trace!(offset, range, "midpoint sweep complete");
        range *= params.midpoint_decay;
        offset /= 2;
    }

    Ok(())
}
