//! Evaluation module for N-in-a-row positions
//!
//! This module provides pattern recognition and scoring for empty cells.
//! The evaluation considers:
//! - Line patterns (live/dead twos, threes, fours, completed runs)
//! - Open and blocked line ends, including the board edge
//! - Defensive weighting when combining both colors
//! - A minimum-potential guard for Connect-6

pub mod heuristic;
pub mod patterns;

pub use heuristic::{
    random_adjacent_move, random_empty_move, scan_line, LineScan, PatternEvaluator, ScoreMap,
    DEFAULT_DEFENSE_WEIGHT,
};
pub use patterns::{PatternRule, PatternScore, PatternTable, BASE_PER_STONE, WIN_SCORE};
