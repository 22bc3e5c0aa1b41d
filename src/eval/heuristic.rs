//! Heuristic move evaluation for N-in-a-row boards
//!
//! For one color, every empty cell is scored by imagining a stone there and
//! scanning the four axes through it. Per axis the run length and the number
//! of open ends are classified with a [`PatternTable`]; the four axis scores
//! are summed. Running this once for the mover (attack) and once for the
//! opponent (defense) and combining the two maps picks the move.

use rand::seq::SliceRandom;
use rand::Rng;

use super::patterns::PatternTable;
use crate::board::{Grid, Pos, Stone, DIRECTIONS, NEIGHBORS_8};
use crate::error::ConfigError;
use crate::rules::TargetLength;

/// Opponent scores are scaled by this before being added to the mover's.
/// Missing a single block loses a five-in-a-row game.
pub const DEFAULT_DEFENSE_WEIGHT: f64 = 1.2;

/// Shape of one line through a candidate cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Consecutive stones including the candidate
    pub run: usize,
    /// Ends of the run that stop on an empty in-bounds cell (0-2)
    pub open_ends: u8,
    /// Run plus the free cells (empty or own) beyond both ends
    pub potential: usize,
}

/// Per-cell scores for one color on one board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMap {
    size: usize,
    scores: Vec<u32>,
}

impl ScoreMap {
    fn new(size: usize) -> Self {
        Self {
            size,
            scores: vec![0; size * size],
        }
    }

    /// Score at `pos`; occupied and out-of-bounds cells read as zero
    #[inline]
    pub fn get(&self, pos: Pos) -> u32 {
        if (pos.row as usize) < self.size && (pos.col as usize) < self.size {
            self.scores[pos.to_index(self.size)]
        } else {
            0
        }
    }

    #[inline]
    fn add(&mut self, pos: Pos, score: u32) {
        let idx = pos.to_index(self.size);
        self.scores[idx] = self.scores[idx].saturating_add(score);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(move |(idx, &s)| (Pos::from_index(idx, self.size), s))
    }
}

/// Scan one axis through `pos` as if `color` had a stone there
pub fn scan_line(grid: &Grid, pos: Pos, dr: i32, dc: i32, color: Stone) -> LineScan {
    let mut run = 1;
    let mut open_ends = 0;
    let mut free = 0;

    for sign in [1, -1] {
        let (dr, dc) = (dr * sign, dc * sign);
        let mut step = 1;
        while let Some(p) = pos.offset(dr, dc, step, grid.size()) {
            if grid.at(p) != color {
                break;
            }
            run += 1;
            step += 1;
        }

        // `step` now points at the first cell past the run
        if let Some(end) = pos.offset(dr, dc, step, grid.size()) {
            if grid.at(end) == Stone::Empty {
                open_ends += 1;
            }
        }
        while let Some(p) = pos.offset(dr, dc, step, grid.size()) {
            if grid.at(p) == color.opponent() {
                break;
            }
            free += 1;
            step += 1;
        }
    }

    LineScan {
        run,
        open_ends,
        potential: run + free,
    }
}

/// Parameterized heuristic evaluator for any supported target length
#[derive(Debug, Clone)]
pub struct PatternEvaluator {
    target: TargetLength,
    table: PatternTable,
    defense_weight: f64,
}

impl PatternEvaluator {
    /// Evaluator using the standard table for `target`
    pub fn new(target: TargetLength) -> Self {
        Self {
            target,
            table: PatternTable::for_target(target),
            defense_weight: DEFAULT_DEFENSE_WEIGHT,
        }
    }

    /// Evaluator with a custom threshold table and defense weight
    pub fn with_config(
        target: TargetLength,
        table: PatternTable,
        defense_weight: f64,
    ) -> Result<Self, ConfigError> {
        if !defense_weight.is_finite() || defense_weight < 0.0 {
            return Err(ConfigError::InvalidDefenseWeight(defense_weight));
        }
        Ok(Self {
            target,
            table,
            defense_weight,
        })
    }

    #[inline]
    pub fn target(&self) -> TargetLength {
        self.target
    }

    #[inline]
    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    #[inline]
    pub fn defense_weight(&self) -> f64 {
        self.defense_weight
    }

    /// Score contributed by one axis at an empty cell
    pub fn score_direction(
        &self,
        grid: &Grid,
        pos: Pos,
        (dr, dc): (i32, i32),
        color: Stone,
    ) -> u32 {
        let line = scan_line(grid, pos, dr, dc, color);
        self.table.classify(line.run, line.open_ends, line.potential)
    }

    /// Score every empty cell for `color`. Occupied cells stay at zero.
    #[must_use]
    pub fn evaluate_board(&self, grid: &Grid, color: Stone) -> ScoreMap {
        let mut map = ScoreMap::new(grid.size());
        if !color.is_stone() {
            return map;
        }
        for pos in grid.empty_cells() {
            let total: u32 = DIRECTIONS
                .iter()
                .map(|&dir| self.score_direction(grid, pos, dir, color))
                .sum();
            map.add(pos, total);
        }
        map
    }

    /// Combine attack and defense maps and pick the best empty cell.
    ///
    /// Ties are broken uniformly at random. Returns `None` on a full board.
    pub fn select_best_move<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        self_map: &ScoreMap,
        opponent_map: &ScoreMap,
        rng: &mut R,
    ) -> Option<(Pos, f64)> {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_moves: Vec<Pos> = Vec::new();

        for pos in grid.empty_cells() {
            let attack = f64::from(self_map.get(pos));
            let total = attack + f64::from(opponent_map.get(pos)) * self.defense_weight;
            if total > best_score {
                best_score = total;
                best_moves.clear();
                best_moves.push(pos);
            } else if total == best_score {
                best_moves.push(pos);
            }
        }

        best_moves.choose(rng).map(|&pos| (pos, best_score))
    }

    /// Evaluate both colors and select the move for `color`
    pub fn best_move<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        color: Stone,
        rng: &mut R,
    ) -> Option<(Pos, f64)> {
        let attack = self.evaluate_board(grid, color);
        let defense = self.evaluate_board(grid, color.opponent());
        self.select_best_move(grid, &attack, &defense, rng)
    }
}

/// Random empty cell next to the last move, for varied openings.
///
/// Falls back to any empty cell when there is no last move or all eight
/// neighbors are taken. Returns `None` on a full board.
pub fn random_adjacent_move<R: Rng + ?Sized>(
    grid: &Grid,
    last: Option<Pos>,
    rng: &mut R,
) -> Option<Pos> {
    if let Some(last) = last {
        let candidates: Vec<Pos> = NEIGHBORS_8
            .iter()
            .filter_map(|&(dr, dc)| last.offset(dr, dc, 1, grid.size()))
            .filter(|&p| grid.at(p) == Stone::Empty)
            .collect();
        if let Some(&pos) = candidates.choose(rng) {
            return Some(pos);
        }
    }
    random_empty_move(grid, rng)
}

/// Uniform pick among all empty cells
pub fn random_empty_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Pos> {
    let empty: Vec<Pos> = grid.empty_cells().collect();
    empty.choose(rng).copied()
}
