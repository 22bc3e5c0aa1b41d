//! Rule engine for N-in-a-row variants
//!
//! Owns the grid, the move history and the move counter for one match.
//! Illegal placements are silently rejected: the grid is untouched and
//! `place` returns `false`.

use tracing::debug;

use super::win::{check_win_at, find_winning_line};
use super::TargetLength;
use crate::board::{Grid, Pos, Stone};
use crate::error::{check_board_size, ConfigError};

/// Record of an applied move, used for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
}

/// Result of a placement followed by the end-of-game checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Out of bounds, occupied, or not a stone color
    Rejected,
    /// Stone placed, game continues
    Placed,
    /// Stone placed and completed a winning run
    Win,
    /// Stone placed and filled the last empty cell without winning
    Draw,
}

/// Authoritative state for one Connect-4 / Gomoku / Connect-6 match
#[derive(Debug, Clone)]
pub struct LineRuleEngine {
    grid: Grid,
    target: TargetLength,
    history: Vec<MoveRecord>,
    move_count: usize,
}

impl LineRuleEngine {
    /// Create an engine for a `board_size` x `board_size` board.
    ///
    /// The target length is fixed for the lifetime of the engine.
    pub fn new(board_size: usize, target: TargetLength) -> Result<Self, ConfigError> {
        let board_size = check_board_size(board_size)?;
        if board_size < target.get() as usize {
            return Err(ConfigError::TargetExceedsBoard {
                target: target.get(),
                size: board_size,
            });
        }
        let grid = Grid::new(board_size)?;
        Ok(Self {
            history: Vec::with_capacity(grid.cell_count()),
            grid,
            target,
            move_count: 0,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn target(&self) -> TargetLength {
        self.target
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Place a stone. Succeeds iff `pos` is in bounds and empty.
    pub fn place(&mut self, pos: Pos, color: Stone) -> bool {
        if !color.is_stone() || !self.grid.is_empty(pos) {
            debug!(%pos, ?color, "rejected placement");
            return false;
        }
        self.grid.set(pos, color);
        self.history.push(MoveRecord { pos, stone: color });
        self.move_count += 1;
        true
    }

    /// Take back the most recent move. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.grid.clear(record.pos);
        self.move_count -= 1;
        true
    }

    /// Check whether the stone just placed at `pos` wins for `color`
    #[inline]
    pub fn check_win(&self, pos: Pos, color: Stone) -> bool {
        check_win_at(&self.grid, pos, color, self.target)
    }

    /// The run through `pos` that won the game, for highlighting
    pub fn winning_line(&self, pos: Pos, color: Stone) -> Option<Vec<Pos>> {
        find_winning_line(&self.grid, pos, color, self.target)
    }

    /// True once every cell has been played
    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count == self.grid.cell_count()
    }

    /// Place, then check for a win before checking for a draw
    pub fn place_and_check(&mut self, pos: Pos, color: Stone) -> PlaceOutcome {
        if !self.place(pos, color) {
            return PlaceOutcome::Rejected;
        }
        if self.check_win(pos, color) {
            PlaceOutcome::Win
        } else if self.is_full() {
            PlaceOutcome::Draw
        } else {
            PlaceOutcome::Placed
        }
    }

    /// Start a new match on the same board size and target
    pub fn reset(&mut self) {
        self.grid.clear_all();
        self.history.clear();
        self.move_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gomoku() -> LineRuleEngine {
        LineRuleEngine::new(15, TargetLength::GOMOKU).unwrap()
    }

    #[test]
    fn test_place_and_reject_occupied() {
        let mut engine = gomoku();
        assert!(engine.place(Pos::new(7, 7), Stone::Black));
        let before = engine.grid().clone();
        assert!(!engine.place(Pos::new(7, 7), Stone::White));
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_reject_out_of_bounds() {
        let mut engine = gomoku();
        assert!(!engine.place(Pos::new(15, 0), Stone::Black));
        assert!(!engine.place(Pos::new(0, 200), Stone::Black));
        assert!(engine.grid().is_board_empty());
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_reject_empty_color() {
        let mut engine = gomoku();
        assert!(!engine.place(Pos::new(1, 1), Stone::Empty));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_undo() {
        let mut engine = gomoku();
        assert!(!engine.undo());
        engine.place(Pos::new(3, 3), Stone::Black);
        engine.place(Pos::new(3, 4), Stone::White);
        assert!(engine.undo());
        assert_eq!(
            engine.last_move(),
            Some(MoveRecord {
                pos: Pos::new(3, 3),
                stone: Stone::Black
            })
        );
        assert!(engine.grid().is_empty(Pos::new(3, 4)));
        assert_eq!(engine.move_count(), 1);
        assert!(engine.undo());
        assert!(engine.grid().is_board_empty());
        assert!(!engine.undo());
    }

    #[test]
    fn test_check_win_target_length() {
        let mut five = gomoku();
        let mut six = LineRuleEngine::new(15, TargetLength::CONNECT_SIX).unwrap();
        for c in 3..=7 {
            five.place(Pos::new(7, c), Stone::Black);
            six.place(Pos::new(7, c), Stone::Black);
        }
        assert!(five.check_win(Pos::new(7, 7), Stone::Black));
        assert!(!six.check_win(Pos::new(7, 7), Stone::Black));
    }

    #[test]
    fn test_is_full_on_small_board() {
        let mut engine = LineRuleEngine::new(4, TargetLength::CONNECT_FOUR).unwrap();
        // Fill a 4x4 board without any 4-run: rows alternate XXOO / OOXX
        let pattern = [
            [Stone::Black, Stone::Black, Stone::White, Stone::White],
            [Stone::White, Stone::White, Stone::Black, Stone::Black],
            [Stone::Black, Stone::Black, Stone::White, Stone::White],
            [Stone::White, Stone::White, Stone::Black, Stone::Black],
        ];
        let mut last = PlaceOutcome::Rejected;
        for (r, row) in pattern.iter().enumerate() {
            for (c, &stone) in row.iter().enumerate() {
                assert!(!engine.is_full());
                last = engine.place_and_check(Pos::new(r as u8, c as u8), stone);
            }
        }
        assert!(engine.is_full());
        assert_eq!(last, PlaceOutcome::Draw);
    }

    #[test]
    fn test_place_and_check_win() {
        let mut engine = LineRuleEngine::new(15, TargetLength::CONNECT_FOUR).unwrap();
        for r in 0..3 {
            assert_eq!(engine.place_and_check(Pos::new(r, 0), Stone::White), PlaceOutcome::Placed);
        }
        assert_eq!(engine.place_and_check(Pos::new(3, 0), Stone::White), PlaceOutcome::Win);
        assert_eq!(engine.place_and_check(Pos::new(3, 0), Stone::Black), PlaceOutcome::Rejected);
        assert_eq!(engine.winning_line(Pos::new(3, 0), Stone::White).map(|l| l.len()), Some(4));
    }

    #[test]
    fn test_reset() {
        let mut engine = gomoku();
        engine.place(Pos::new(0, 0), Stone::Black);
        engine.reset();
        assert!(engine.grid().is_board_empty());
        assert_eq!(engine.move_count(), 0);
        assert!(engine.last_move().is_none());
        assert_eq!(engine.target(), TargetLength::GOMOKU);
    }

    #[test]
    fn test_target_must_fit_board() {
        assert!(matches!(
            LineRuleEngine::new(4, TargetLength::GOMOKU),
            Err(ConfigError::TargetExceedsBoard { target: 5, size: 4 })
        ));
        assert!(matches!(
            LineRuleEngine::new(0, TargetLength::GOMOKU),
            Err(ConfigError::ZeroBoardSize)
        ));
        assert!(matches!(
            LineRuleEngine::new(65, TargetLength::CONNECT_SIX),
            Err(ConfigError::BoardTooLarge(65))
        ));
    }

    fn stone_strategy() -> impl Strategy<Value = Stone> {
        prop_oneof![Just(Stone::Black), Just(Stone::White)]
    }

    proptest! {
        #[test]
        fn prop_place_then_undo_restores_grid(
            moves in prop::collection::vec((0u8..9, 0u8..9, stone_strategy()), 0..40),
            extra in (0u8..9, 0u8..9, stone_strategy()),
        ) {
            let mut engine = LineRuleEngine::new(9, TargetLength::GOMOKU).unwrap();
            for (r, c, s) in moves {
                engine.place(Pos::new(r, c), s);
            }
            let before = engine.grid().clone();
            let count = engine.move_count();
            if engine.place(Pos::new(extra.0, extra.1), extra.2) {
                prop_assert!(engine.undo());
            }
            prop_assert_eq!(engine.grid(), &before);
            prop_assert_eq!(engine.move_count(), count);
        }

        #[test]
        fn prop_occupied_or_outside_leaves_grid_unchanged(
            moves in prop::collection::vec((0u8..9, 0u8..9, stone_strategy()), 1..40),
            pick in any::<prop::sample::Index>(),
            outside in 9u8..=255,
            color in stone_strategy(),
        ) {
            let mut engine = LineRuleEngine::new(9, TargetLength::GOMOKU).unwrap();
            for (r, c, s) in moves {
                engine.place(Pos::new(r, c), s);
            }
            let before = engine.grid().clone();
            let occupied = engine.history()[pick.index(engine.history().len())].pos;
            prop_assert!(!engine.place(occupied, color));
            prop_assert!(!engine.place(Pos::new(outside, 0), color));
            prop_assert!(!engine.place(Pos::new(0, outside), color));
            prop_assert_eq!(engine.grid(), &before);
        }

        #[test]
        fn prop_check_win_invariant_under_rotation_and_swap(
            moves in prop::collection::vec((0u8..9, 0u8..9, stone_strategy()), 1..50),
            target in 4u8..=6,
        ) {
            let target = TargetLength::new(target).unwrap();
            let mut engine = LineRuleEngine::new(9, target).unwrap();
            for (r, c, s) in moves {
                engine.place(Pos::new(r, c), s);
            }
            let last = engine.last_move().unwrap();
            let grid = engine.grid();
            let expected = check_win_at(grid, last.pos, last.stone, target);

            let rotated = grid.rotated_180();
            let rpos = Pos::new(8 - last.pos.row, 8 - last.pos.col);
            prop_assert_eq!(check_win_at(&rotated, rpos, last.stone, target), expected);

            let swapped = grid.color_swapped();
            prop_assert_eq!(
                check_win_at(&swapped, last.pos, last.stone.opponent(), target),
                expected
            );
        }
    }
}
