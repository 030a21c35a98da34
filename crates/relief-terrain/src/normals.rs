//! Per-vertex normals by central finite differences.
//!
//! For vertex `(x, z)`: `nX = h(x + 1, z) - h(x - 1, z)` and
//! `nZ = h(x, z + 1) - h(x, z - 1)`. On a boundary the missing neighbor is
//! clamped to the vertex itself and the one-sided difference is doubled. The
//! normal is `normalize(nX, NORMAL_Y_WEIGHT, nZ)`.

use glam::Vec3;

use crate::grid::HeightGrid;

/// Vertical weight of the unnormalized normal; larger values flatten the
/// apparent slope.
pub const NORMAL_Y_WEIGHT: f32 = 2.0;

/// A grid of unit normals parallel to a [`HeightGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct NormalGrid {
    columns: usize,
    rows: usize,
    normals: Vec<Vec3>,
}

impl NormalGrid {
    /// Derive normals from `heights`.
    pub fn from_heights(heights: &HeightGrid) -> Self {
        let width = heights.width();
        let depth = heights.depth();
        let mut normals = Vec::with_capacity(heights.len());

        for z in 0..=depth {
            for x in 0..=width {
                let mut nx =
                    heights.get((x + 1).min(width), z) - heights.get(x.saturating_sub(1), z);
                if x == 0 || x == width {
                    nx *= 2.0;
                }

                let mut nz =
                    heights.get(x, (z + 1).min(depth)) - heights.get(x, z.saturating_sub(1));
                if z == 0 || z == depth {
                    nz *= 2.0;
                }

                normals.push(Vec3::new(nx, NORMAL_Y_WEIGHT, nz).normalize());
            }
        }

        Self {
            columns: heights.columns(),
            rows: heights.rows(),
            normals,
        }
    }

    /// Normal at vertex `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, z)` lies outside the grid.
    pub fn get(&self, x: usize, z: usize) -> Vec3 {
        assert!(
            x < self.columns && z < self.rows,
            "normal ({x}, {z}) outside {}x{} grid",
            self.columns,
            self.rows
        );
        self.normals[z * self.columns + x]
    }

    /// Number of vertex columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of vertex rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major view of all normals, same layout as [`HeightGrid::as_slice`].
    pub fn as_slice(&self) -> &[Vec3] {
        &self.normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_flat_grid_points_straight_up() {
        let mut grid = HeightGrid::new(8, 8).unwrap();
        grid.fill(3.5);
        let normals = NormalGrid::from_heights(&grid);
        assert_eq!(normals.as_slice().len(), 81);
        for n in normals.as_slice() {
            assert!((*n - Vec3::Y).length() < EPSILON, "expected (0, 1, 0), got {n}");
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut grid = HeightGrid::new(4, 4).unwrap();
        for z in 0..5 {
            for x in 0..5 {
                grid.set(x, z, ((x * 7 + z * 3) % 5) as f32 * 0.8);
            }
        }
        let normals = NormalGrid::from_heights(&grid);
        for n in normals.as_slice() {
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {n} is not unit length");
        }
    }

    #[test]
    fn test_interior_uses_central_difference() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        grid.set(0, 1, 1.0);
        grid.set(2, 1, 3.0);
        grid.set(1, 0, 0.5);
        grid.set(1, 2, 1.5);
        let n = NormalGrid::from_heights(&grid).get(1, 1);
        let expected = Vec3::new(2.0, 2.0, 1.0).normalize();
        assert!((n - expected).length() < EPSILON, "expected {expected}, got {n}");
    }

    #[test]
    fn test_boundary_difference_is_doubled() {
        // Linear ramp h = x: interior difference 2, boundary one-sided 1 doubled to 2.
        let mut grid = HeightGrid::new(4, 4).unwrap();
        for z in 0..5 {
            for x in 0..5 {
                grid.set(x, z, x as f32);
            }
        }
        let normals = NormalGrid::from_heights(&grid);
        let expected = Vec3::new(2.0, 2.0, 0.0).normalize();
        for z in 0..5 {
            for x in 0..5 {
                let n = normals.get(x, z);
                assert!(
                    (n - expected).length() < EPSILON,
                    "ramp normal at ({x}, {z}) should be {expected}, got {n}"
                );
            }
        }
    }
}
