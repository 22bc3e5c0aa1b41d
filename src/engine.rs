//! Heuristic AI player integrating the evaluator with opening randomization
//!
//! The player is used both as an opponent and as a hint oracle. Move choice
//! follows this priority:
//!
//! 1. **Opening**: for the player's first move, play next to the last stone
//! 2. **Immediate win**: complete the target length if possible
//! 3. **Heuristic**: attack score + weighted defense score, random tie-break
//! 4. **Fallback**: any empty cell
//!
//! # Example
//!
//! ```
//! use arena::{Grid, HeuristicPlayer, Pos, Stone, TargetLength};
//!
//! let mut grid = Grid::new(15).unwrap();
//! grid.set(Pos::new(7, 7), Stone::Black);
//!
//! let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 42);
//! let reply = player.get_move(&grid, Some(Pos::new(7, 7)), Stone::White);
//! assert!(reply.best_move.is_some());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::board::{Grid, Pos, Stone};
use crate::eval::{random_adjacent_move, PatternEvaluator, WIN_SCORE};
use crate::rules::TargetLength;

/// Number of the player's own moves played with the opening heuristic
const OPENING_MOVES: u32 = 1;

/// Which rule produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Random cell adjacent to the last move
    Opening,
    /// Completes a winning run
    ImmediateWin,
    /// Best combined attack/defense score
    Heuristic,
    /// Random empty cell after the heuristic found nothing
    Fallback,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Chosen cell, `None` only on a full board
    pub best_move: Option<Pos>,
    /// Combined score of the chosen cell (zero for random moves)
    pub score: f64,
    pub kind: MoveKind,
}

impl MoveResult {
    #[inline]
    fn opening(pos: Option<Pos>) -> Self {
        Self {
            best_move: pos,
            score: 0.0,
            kind: MoveKind::Opening,
        }
    }

    #[inline]
    fn fallback(pos: Option<Pos>) -> Self {
        Self {
            best_move: pos,
            score: 0.0,
            kind: MoveKind::Fallback,
        }
    }
}

/// Heuristic opponent for Connect-4, Gomoku and Connect-6.
///
/// Holds its own random source; seed it for reproducible games.
pub struct HeuristicPlayer {
    evaluator: PatternEvaluator,
    rng: ChaCha8Rng,
    /// Moves requested through `get_move` since the last reset
    ai_move_count: u32,
}

impl HeuristicPlayer {
    /// Player with an entropy-seeded random source
    #[must_use]
    pub fn new(target: TargetLength) -> Self {
        Self::with_evaluator(PatternEvaluator::new(target), ChaCha8Rng::from_entropy())
    }

    /// Player with a deterministic random source
    #[must_use]
    pub fn seeded(target: TargetLength, seed: u64) -> Self {
        Self::with_evaluator(PatternEvaluator::new(target), ChaCha8Rng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_evaluator(evaluator: PatternEvaluator, rng: ChaCha8Rng) -> Self {
        Self {
            evaluator,
            rng,
            ai_move_count: 0,
        }
    }

    #[inline]
    pub fn evaluator(&self) -> &PatternEvaluator {
        &self.evaluator
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.ai_move_count
    }

    /// Forget previous moves so the next one uses the opening heuristic again
    pub fn reset(&mut self) {
        self.ai_move_count = 0;
    }

    /// Choose a move for `color`. `last_move` is the opponent's latest stone,
    /// used only to place the opening move.
    pub fn get_move(&mut self, grid: &Grid, last_move: Option<Pos>, color: Stone) -> MoveResult {
        self.ai_move_count += 1;

        if self.ai_move_count <= OPENING_MOVES {
            if let Some(last) = last_move {
                let pos = random_adjacent_move(grid, Some(last), &mut self.rng);
                let result = MoveResult::opening(pos);
                debug!(?color, pos = ?result.best_move, "opening move");
                return result;
            }
        }

        self.search(grid, color)
    }

    /// Suggest a move for `color` without the opening heuristic or move counting
    pub fn hint(&mut self, grid: &Grid, color: Stone) -> MoveResult {
        self.search(grid, color)
    }

    fn search(&mut self, grid: &Grid, color: Stone) -> MoveResult {
        let attack = self.evaluator.evaluate_board(grid, color);

        let wins: Vec<Pos> = grid
            .empty_cells()
            .filter(|&pos| attack.get(pos) >= WIN_SCORE)
            .collect();
        if let Some(&pos) = wins.choose(&mut self.rng) {
            debug!(?color, %pos, candidates = wins.len(), "immediate win");
            return MoveResult {
                best_move: Some(pos),
                score: f64::from(attack.get(pos)),
                kind: MoveKind::ImmediateWin,
            };
        }

        let defense = self.evaluator.evaluate_board(grid, color.opponent());
        match self
            .evaluator
            .select_best_move(grid, &attack, &defense, &mut self.rng)
        {
            Some((pos, score)) => {
                debug!(?color, %pos, score, "heuristic move");
                MoveResult {
                    best_move: Some(pos),
                    score,
                    kind: MoveKind::Heuristic,
                }
            }
            None => MoveResult::fallback(random_adjacent_move(grid, None, &mut self.rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid_with(stones: &[(u8, u8, Stone)]) -> Grid {
        let mut grid = Grid::new(15).unwrap();
        for &(r, c, s) in stones {
            grid.set(Pos::new(r, c), s);
        }
        grid
    }

    #[test]
    fn test_first_move_is_adjacent_opening() {
        let grid = grid_with(&[(7, 7, Stone::Black)]);
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 1);
        let result = player.get_move(&grid, Some(Pos::new(7, 7)), Stone::White);
        assert_eq!(result.kind, MoveKind::Opening);
        let pos = result.best_move.unwrap();
        assert!(pos.row.abs_diff(7) <= 1 && pos.col.abs_diff(7) <= 1);
        assert!(grid.is_empty(pos));
        assert_eq!(player.move_count(), 1);
    }

    #[test]
    fn test_second_move_uses_heuristic() {
        let grid = grid_with(&[(7, 7, Stone::Black), (7, 8, Stone::White), (6, 6, Stone::Black)]);
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 2);
        player.get_move(&grid, Some(Pos::new(7, 7)), Stone::White);
        let result = player.get_move(&grid, Some(Pos::new(6, 6)), Stone::White);
        assert_eq!(result.kind, MoveKind::Heuristic);
        assert!(result.score > 0.0);
    }

    #[test]
    fn test_no_last_move_skips_opening() {
        let grid = Grid::new(15).unwrap();
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 3);
        let result = player.get_move(&grid, None, Stone::Black);
        assert_eq!(result.kind, MoveKind::Heuristic);
    }

    #[test]
    fn test_takes_immediate_win_over_block() {
        // Both sides have an open four; White to move wins instead of blocking
        let grid = grid_with(&[
            (2, 2, Stone::White),
            (2, 3, Stone::White),
            (2, 4, Stone::White),
            (2, 5, Stone::White),
            (8, 2, Stone::Black),
            (8, 3, Stone::Black),
            (8, 4, Stone::Black),
            (8, 5, Stone::Black),
        ]);
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 4);
        let result = player.hint(&grid, Stone::White);
        assert_eq!(result.kind, MoveKind::ImmediateWin);
        let pos = result.best_move.unwrap();
        assert!(pos == Pos::new(2, 1) || pos == Pos::new(2, 6));
    }

    #[test]
    fn test_immediate_win_picks_either_end() {
        let grid = grid_with(&[
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 7, Stone::White),
            (7, 8, Stone::White),
        ]);
        let picks: HashSet<Pos> = (0..40)
            .filter_map(|seed| {
                let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, seed);
                player.hint(&grid, Stone::White).best_move
            })
            .collect();
        let expected: HashSet<Pos> = [Pos::new(7, 4), Pos::new(7, 9)].into_iter().collect();
        assert_eq!(picks, expected);
    }

    #[test]
    fn test_hint_blocks_four() {
        let grid = grid_with(&[
            (0, 0, Stone::Black),
            (1, 0, Stone::Black),
            (2, 0, Stone::Black),
            (3, 0, Stone::Black),
            (5, 5, Stone::White),
        ]);
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 5);
        let result = player.hint(&grid, Stone::White);
        assert_eq!(result.best_move, Some(Pos::new(4, 0)));
        assert_eq!(player.move_count(), 0, "hints do not count as moves");
    }

    #[test]
    fn test_connect_four_blocks_live_three() {
        let grid = grid_with(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 7, Stone::Black),
            (0, 14, Stone::White),
        ]);
        let mut player = HeuristicPlayer::seeded(TargetLength::CONNECT_FOUR, 6);
        let pos = player.hint(&grid, Stone::White).best_move.unwrap();
        assert!(pos == Pos::new(7, 4) || pos == Pos::new(7, 8));
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut grid = Grid::new(4).unwrap();
        for pos in grid.positions().collect::<Vec<_>>() {
            let stone = if (pos.row + pos.col / 2) % 2 == 0 { Stone::Black } else { Stone::White };
            grid.set(pos, stone);
        }
        let mut player = HeuristicPlayer::seeded(TargetLength::CONNECT_FOUR, 7);
        assert_eq!(player.get_move(&grid, Some(Pos::new(0, 0)), Stone::Black).best_move, None);
        assert_eq!(player.get_move(&grid, Some(Pos::new(0, 0)), Stone::Black).best_move, None);
    }

    #[test]
    fn test_same_seed_same_game() {
        let grid = grid_with(&[(7, 7, Stone::Black)]);
        let mut a = HeuristicPlayer::seeded(TargetLength::CONNECT_SIX, 99);
        let mut b = HeuristicPlayer::seeded(TargetLength::CONNECT_SIX, 99);
        for _ in 0..3 {
            assert_eq!(
                a.get_move(&grid, Some(Pos::new(7, 7)), Stone::White),
                b.get_move(&grid, Some(Pos::new(7, 7)), Stone::White)
            );
        }
    }

    #[test]
    fn test_reset_restores_opening() {
        let grid = grid_with(&[(7, 7, Stone::Black)]);
        let mut player = HeuristicPlayer::seeded(TargetLength::GOMOKU, 8);
        player.get_move(&grid, Some(Pos::new(7, 7)), Stone::White);
        player.reset();
        let result = player.get_move(&grid, Some(Pos::new(7, 7)), Stone::White);
        assert_eq!(result.kind, MoveKind::Opening);
    }
}
