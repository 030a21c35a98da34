//! Height grid storage and addressing.
//!
//! [`HeightGrid`] is the public `(W + 1) x (H + 1)` vertex lattice every
//! algorithm writes into. [`WrappedGrid`] is the `W x H` toroidal scratch
//! buffer used by diamond-square, where coordinates wrap with a bitmask.

use crate::error::TerrainError;

/// A rectangular lattice of `(width + 1) * (depth + 1)` heights.
///
/// `width` and `depth` count subdivisions (cells), not vertices. Storage is
/// row-major with `x` varying fastest: `index = z * (width + 1) + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    width: usize,
    depth: usize,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Create a zero-filled grid with `width x depth` subdivisions.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::DegenerateParameter`] if either dimension is
    /// zero, which would leave fewer than 2x2 vertices.
    pub fn new(width: usize, depth: usize) -> Result<Self, TerrainError> {
        if width == 0 || depth == 0 {
            return Err(TerrainError::too_small(width, depth));
        }
        Ok(Self {
            width,
            depth,
            heights: vec![0.0; (width + 1) * (depth + 1)],
        })
    }

    /// Horizontal subdivision count `W`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Vertical subdivision count `H`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of vertex columns, `W + 1`.
    pub fn columns(&self) -> usize {
        self.width + 1
    }

    /// Number of vertex rows, `H + 1`.
    pub fn rows(&self) -> usize {
        self.depth + 1
    }

    /// Total number of stored heights.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always `false`; a grid holds at least 2x2 vertices.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        assert!(
            x <= self.width && z <= self.depth,
            "cell ({x}, {z}) outside {}x{} grid",
            self.columns(),
            self.rows()
        );
        z * self.columns() + x
    }

    /// Height at vertex `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `x > width` or `z > depth`.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.heights[self.index(x, z)]
    }

    /// Set the height at vertex `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `x > width` or `z > depth`.
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, height: f32) {
        let idx = self.index(x, z);
        self.heights[idx] = height;
    }

    /// Overwrite every height with `value`.
    pub fn fill(&mut self, value: f32) {
        self.heights.fill(value);
    }

    /// Multiply every height by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for h in &mut self.heights {
            *h *= factor;
        }
    }

    /// Row-major view of all heights.
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Iterate `(x, z, height)` over every vertex, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let columns = self.columns();
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i % columns, i / columns, h))
    }

    /// Whether the grid is square with a power-of-two subdivision count, the
    /// shape the subdivision algorithms need.
    pub fn is_square_power_of_two(&self) -> bool {
        self.width == self.depth && self.width.is_power_of_two()
    }
}

/// A `width x height` buffer addressed with toroidal wraparound.
///
/// `index(x, y) = (x & (width - 1)) + (y & (height - 1)) * width`, so any
/// integer coordinate, including negative ones, aliases onto the buffer.
#[derive(Clone, Debug)]
pub struct WrappedGrid {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl WrappedGrid {
    /// Allocate a zero-filled wrapped buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] unless both sides are powers
    /// of two; the bitmask wrap would alias the wrong cells otherwise.
    pub fn new(width: usize, height: usize) -> Result<Self, TerrainError> {
        if !width.is_power_of_two() || !height.is_power_of_two() {
            return Err(TerrainError::InvalidDimension {
                width,
                depth: height,
                reason: "wrapped addressing needs power-of-two sides",
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![0.0; width * height],
        })
    }

    /// Flat index of `(x, y)` after wrapping both axes.
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        let wx = (x & (self.width as isize - 1)) as usize;
        let wy = (y & (self.height as isize - 1)) as usize;
        wx + wy * self.width
    }

    /// Read the wrapped cell at `(x, y)`.
    #[inline]
    pub fn sample(&self, x: isize, y: isize) -> f32 {
        self.cells[self.index(x, y)]
    }

    /// Write the wrapped cell at `(x, y)`.
    #[inline]
    pub fn set_sample(&mut self, x: isize, y: isize, value: f32) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Number of stored cells, `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; both sides are at least one.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
