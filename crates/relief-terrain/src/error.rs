//! Terrain generation error types.

use crate::algorithm::Algorithm;

/// Errors raised while configuring or running a generation pass.
///
/// A failed call never replaces the last generated terrain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Grid dimensions violate the shape required by the selected algorithm.
    #[error("invalid grid dimensions {width}x{depth}: {reason}")]
    InvalidDimension {
        /// Horizontal subdivision count.
        width: usize,
        /// Vertical subdivision count.
        depth: usize,
        /// Which precondition failed.
        reason: &'static str,
    },

    /// A tunable is zero, negative, or otherwise unusable.
    #[error("degenerate parameter `{name}`: {reason}")]
    DegenerateParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A tunable is NaN or infinite, or finite tunables overflowed while a
    /// pass accumulated heights or normals.
    #[error("`{name}` must be finite, got {value}")]
    NumericDrift {
        /// Name of the offending parameter or output.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The algorithm exists as a selector but has no implementation.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Algorithm),
}

impl TerrainError {
    pub(crate) fn too_small(width: usize, depth: usize) -> Self {
        Self::DegenerateParameter {
            name: "dimensions",
            reason: format!("grid {width}x{depth} needs at least 2x2 vertices"),
        }
    }
}

/// Error returned when a textual algorithm name does not match any selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm `{0}` (expected a snake_case name or a menu number 1-5)")]
pub struct ParseAlgorithmError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = TerrainError::InvalidDimension {
            width: 6,
            depth: 6,
            reason: "width must be a power of two",
        };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 6x6: width must be a power of two"
        );

        let err = TerrainError::NumericDrift {
            name: "height_scale",
            value: f32::NAN,
        };
        assert!(err.to_string().contains("height_scale"));

        let err = TerrainError::too_small(0, 4);
        assert_eq!(
            err.to_string(),
            "degenerate parameter `dimensions`: grid 0x4 needs at least 2x2 vertices"
        );

        let err = TerrainError::UnsupportedAlgorithm(Algorithm::MultiFractal);
        assert_eq!(err.to_string(), "unsupported algorithm: multi_fractal");
    }
}
