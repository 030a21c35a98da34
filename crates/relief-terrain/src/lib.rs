//! Procedural heightfield synthesis: subdivision and lattice-noise
//! algorithms, normals, and a generation orchestrator.

mod algorithm;
mod error;
mod generator;
mod grid;
mod lattice;
mod normals;
mod params;
mod random;

pub mod debug_viz;
pub mod diamond_square;
pub mod fractal;
pub mod midpoint;

pub use algorithm::Algorithm;
pub use debug_viz::{DebugImage, render_heightmap_debug, render_normal_map_debug};
pub use error::{ParseAlgorithmError, TerrainError};
pub use generator::{HeightRange, Terrain, TerrainGenerator};
pub use grid::{HeightGrid, WrappedGrid};
pub use lattice::{GRADIENT_COUNT, LatticeNoise, PERMUTATION_SIZE, PermutationTable, fade};
pub use normals::{NORMAL_Y_WEIGHT, NormalGrid};
pub use params::{DisplacementParams, FbmParams, GenerationParams, PerlinParams, RandomSource};
pub use random::{DisplacementSource, LatticeDisplacement, TerrainRng, UniformDisplacement};
