//! Construction-time errors
//!
//! Illegal moves, empty histories and full boards are ordinary game events
//! and are reported through return values. The errors here cover invalid
//! engine configuration, where nothing downstream can recover.

use thiserror::Error;

use crate::board::MAX_BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    ZeroBoardSize,

    #[error("board size {0} exceeds the maximum of {MAX_BOARD_SIZE}")]
    BoardTooLarge(usize),

    #[error("unsupported target length {0}, expected 4, 5 or 6")]
    UnsupportedTargetLength(u8),

    #[error("target length {target} does not fit on a {size}x{size} board")]
    TargetExceedsBoard { target: u8, size: usize },

    #[error("defense weight must be a finite non-negative number, got {0}")]
    InvalidDefenseWeight(f64),
}

/// Validate a board side length
pub fn check_board_size(size: usize) -> Result<usize, ConfigError> {
    match size {
        0 => Err(ConfigError::ZeroBoardSize),
        s if s > MAX_BOARD_SIZE => Err(ConfigError::BoardTooLarge(s)),
        s => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_bounds() {
        assert_eq!(check_board_size(0), Err(ConfigError::ZeroBoardSize));
        assert_eq!(check_board_size(1), Ok(1));
        assert_eq!(check_board_size(MAX_BOARD_SIZE), Ok(MAX_BOARD_SIZE));
        assert_eq!(
            check_board_size(MAX_BOARD_SIZE + 1),
            Err(ConfigError::BoardTooLarge(MAX_BOARD_SIZE + 1))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::UnsupportedTargetLength(7).to_string(),
            "unsupported target length 7, expected 4, 5 or 6"
        );
        assert_eq!(
            ConfigError::TargetExceedsBoard { target: 5, size: 3 }.to_string(),
            "target length 5 does not fit on a 3x3 board"
        );
    }

    #[test]
    fn test_defense_weight_error_compares() {
        let err = ConfigError::InvalidDefenseWeight(-1.5);
        assert_eq!(err, ConfigError::InvalidDefenseWeight(-1.5));
        assert_ne!(err, ConfigError::InvalidDefenseWeight(2.0));
        assert_eq!(
            err.to_string(),
            "defense weight must be a finite non-negative number, got -1.5"
        );
    }
}
