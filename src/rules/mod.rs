//! Game rules
//!
//! This module implements the two rule families played on a [`Grid`]:
//! - N-in-a-row (Connect-4, Gomoku, Connect-6): placement, win, draw, undo
//! - Go: suicide rule, captures by liberty counting, area scoring, undo
//!
//! [`Grid`]: crate::board::Grid

pub mod go;
pub mod line;
pub mod win;

use crate::error::ConfigError;

// Re-exports for convenient access
pub use go::{group_at, liberties, territory, GoEngine, GoMoveError, GoScore, Region};
pub use line::{LineRuleEngine, MoveRecord, PlaceOutcome};
pub use win::{check_win_at, count_direction, find_winning_line, neighbors_on_axis};

/// Number of same-colored stones in a row that wins a match (4, 5 or 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetLength(u8);

impl TargetLength {
    pub const CONNECT_FOUR: TargetLength = TargetLength(4);
    pub const GOMOKU: TargetLength = TargetLength(5);
    pub const CONNECT_SIX: TargetLength = TargetLength(6);

    pub fn new(len: u8) -> Result<Self, ConfigError> {
        match len {
            4..=6 => Ok(Self(len)),
            other => Err(ConfigError::UnsupportedTargetLength(other)),
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Neighbors (excluding the placed stone) needed on one axis to win
    #[inline]
    pub fn neighbors_needed(self) -> usize {
        self.0 as usize - 1
    }
}

impl Default for TargetLength {
    fn default() -> Self {
        Self::GOMOKU
    }
}

impl std::fmt::Display for TargetLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-in-a-row", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_length_bounds() {
        assert!(TargetLength::new(3).is_err());
        assert!(TargetLength::new(7).is_err());
        for len in 4..=6 {
            assert_eq!(TargetLength::new(len).unwrap().get(), len);
        }
        assert_eq!(TargetLength::default(), TargetLength::GOMOKU);
        assert_eq!(TargetLength::CONNECT_SIX.neighbors_needed(), 5);
    }
}
