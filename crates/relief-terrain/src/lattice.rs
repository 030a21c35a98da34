//! Classic 2D gradient (Perlin) noise over an integer lattice.
//!
//! Corner gradients are picked from eight unit vectors at 45° increments by
//! hashing the corner coordinates through a 256-entry permutation table.
//! Corner contributions are blended with the quintic fade curve
//! `6t^5 - 15t^4 + 10t^3`.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;

/// Number of entries in the permutation table.
pub const PERMUTATION_SIZE: usize = 256;

/// Number of gradient directions.
pub const GRADIENT_COUNT: usize = 8;

/// A permutation of `[0, 255]` used to hash lattice coordinates.
///
/// Only [`PermutationTable::shuffle`] mutates the table and it only swaps
/// entries, so the table stays a permutation for its whole life.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable([u8; PERMUTATION_SIZE]);

impl PermutationTable {
    /// The unshuffled table `[0, 1, ..., 255]`.
    pub fn identity() -> Self {
        let mut table = [0u8; PERMUTATION_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self(table)
    }

    /// Fisher–Yates style in-place shuffle: for each `i` in `0..256`, draw
    /// `j` uniformly from `[0, 255]` and swap entries `i` and `j`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..PERMUTATION_SIZE {
            let j = rng.random_range(0..PERMUTATION_SIZE);
            self.0.swap(i, j);
        }
    }

    /// Masked lookup: `table[i & 255]`.
    #[inline]
    pub fn get(&self, i: i32) -> i32 {
        i32::from(self.0[(i & 255) as usize])
    }

    /// The raw table.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// `true` if every value in `[0, 255]` appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; PERMUTATION_SIZE];
        for &v in &self.0 {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        true
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::identity()
    }
}

/// Gradient-noise generator holding an immutable gradient table and a
/// reshufflable permutation table.
#[derive(Clone, Debug)]
pub struct LatticeNoise {
    gradients: [Vec2; GRADIENT_COUNT],
    permutations: PermutationTable,
}

impl LatticeNoise {
    /// Create a generator with the identity permutation table.
    ///
    /// Output is fully reproducible until the table is reshuffled.
    pub fn new() -> Self {
        let mut gradients = [Vec2::ZERO; GRADIENT_COUNT];
        for (i, g) in gradients.iter_mut().enumerate() {
            *g = Vec2::from_angle(FRAC_PI_4 * i as f32);
        }
        Self {
            gradients,
            permutations: PermutationTable::identity(),
        }
    }

    /// Create a generator whose table has already been shuffled once.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut noise = Self::new();
        noise.reshuffle_permutations(rng);
        noise
    }

    /// Reshuffle the permutation table in place, changing the noise character.
    pub fn reshuffle_permutations<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.permutations.shuffle(rng);
    }

    /// The current permutation table.
    pub fn permutations(&self) -> &PermutationTable {
        &self.permutations
    }

    /// The eight unit gradient vectors.
    pub fn gradients(&self) -> &[Vec2; GRADIENT_COUNT] {
        &self.gradients
    }

    #[inline]
    fn gradient_index(&self, cx: i32, cy: i32) -> usize {
        let p = &self.permutations;
        (p.get(cx.wrapping_add(p.get(cy))) & 7) as usize
    }

    /// Sample the noise field at `(x, y)`.
    ///
    /// Deterministic for a given permutation table, continuous in both axes,
    /// roughly in `[-1, 1]`, and exactly zero at integer lattice points.
    pub fn generate_noise(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let g00 = self.gradients[self.gradient_index(x0, y0)];
        let g10 = self.gradients[self.gradient_index(x1, y0)];
        let g01 = self.gradients[self.gradient_index(x0, y1)];
        let g11 = self.gradients[self.gradient_index(x1, y1)];

        let n00 = g00.dot(Vec2::new(fx, fy));
        let n10 = g10.dot(Vec2::new(fx - 1.0, fy));
        let n01 = g01.dot(Vec2::new(fx, fy - 1.0));
        let n11 = g11.dot(Vec2::new(fx - 1.0, fy - 1.0));

        let u = fade(fx);
        let v = fade(fy);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        lerp(nx0, nx1, v)
    }
}

impl Default for LatticeNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
