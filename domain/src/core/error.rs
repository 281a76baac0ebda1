//! Domain error types

use crate::grid::Position;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("position {0} is outside the grid")]
    OutOfRange(Position),

    #[error("grid dimensions {width}x{height} are out of range (5..=500 on both axes)")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("maze generation did not produce a solvable grid after {attempts} attempts")]
    GenerationFailed { attempts: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let error = DomainError::OutOfRange(Position::new(-1, 3));
        assert_eq!(error.to_string(), "position (-1, 3) is outside the grid");
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let error = DomainError::InvalidDimensions {
            width: 3,
            height: 600,
        };
        assert!(error.to_string().contains("3x600"));
    }
}
