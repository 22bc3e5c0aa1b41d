//! Go (Weiqi) rules: liberties, captures, suicide and area scoring
//!
//! Placement order:
//! 1. Tentatively place the stone
//! 2. Remove every adjacent opponent group left without liberties
//! 3. Only if nothing was captured, reject the move when the placed
//!    stone's own group has no liberties (suicide)
//!
//! Captures are evaluated strictly before the suicide check, so filling an
//! opponent's last liberty is always legal.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;
use tracing::debug;

use crate::board::{Grid, Pos, Stone};
use crate::error::ConfigError;

/// Why a stone could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GoMoveError {
    #[error("position is off the board")]
    OutOfBounds,
    #[error("position already occupied")]
    Occupied,
    #[error("move would leave its own group without liberties")]
    Suicide,
    #[error("only black or white stones can be placed")]
    NotAStone,
    #[error("the match has already ended")]
    GameOver,
}

/// Area score: territory plus prisoners for each color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoScore {
    pub black: u32,
    pub white: u32,
}

impl GoScore {
    /// Winner after adding `komi` to White, `None` on a tie
    pub fn winner(&self, komi: f32) -> Option<Stone> {
        let black = self.black as f32;
        let white = self.white as f32 + komi;
        if black > white {
            Some(Stone::Black)
        } else if white > black {
            Some(Stone::White)
        } else {
            None
        }
    }
}

/// A maximal connected region of empty cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub cells: Vec<Pos>,
    /// The single color bordering the region, `None` if neutral
    pub owner: Option<Stone>,
}

/// Board state saved before a placement, restored by undo
#[derive(Debug, Clone)]
struct GoSnapshot {
    grid: Grid,
    prisoners: [u32; 2],
}

/// Rules engine for one Go match
#[derive(Debug, Clone)]
pub struct GoEngine {
    grid: Grid,
    /// Opponent stones captured by Black and by White
    prisoners: [u32; 2],
    snapshots: Vec<GoSnapshot>,
}

impl GoEngine {
    pub fn new(board_size: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::new(board_size)?,
            prisoners: [0; 2],
            snapshots: Vec::new(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Stones of the opposite color captured by `stone`
    #[inline]
    pub fn prisoners(&self, stone: Stone) -> u32 {
        stone.color_index().map_or(0, |i| self.prisoners[i])
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Place a stone for `color`.
    ///
    /// On success returns the captured positions (possibly empty). On failure
    /// the grid and prisoner counts are unchanged.
    pub fn place_stone(&mut self, pos: Pos, color: Stone) -> Result<Vec<Pos>, GoMoveError> {
        self.snapshots.push(GoSnapshot {
            grid: self.grid.clone(),
            prisoners: self.prisoners,
        });
        let result = self.try_place(pos, color);
        if result.is_err() {
            // Only state-changing placements stay undoable
            self.snapshots.pop();
        }
        result
    }

    fn try_place(&mut self, pos: Pos, color: Stone) -> Result<Vec<Pos>, GoMoveError> {
        let Some(color_idx) = color.color_index() else {
            return Err(GoMoveError::NotAStone);
        };
        match self.grid.get(pos) {
            None => return Err(GoMoveError::OutOfBounds),
            Some(Stone::Empty) => {}
            Some(_) => return Err(GoMoveError::Occupied),
        }

        self.grid.set(pos, color);
        let opponent = color.opponent();

        let mut captured: Vec<Pos> = Vec::new();
        let neighbors: Vec<Pos> = self.grid.neighbors(pos).collect();
        for n in neighbors {
            if self.grid.at(n) != opponent || captured.contains(&n) {
                continue;
            }
            let group = group_at(&self.grid, n);
            if liberties(&self.grid, &group).is_empty() {
                captured.extend(group);
            }
        }

        if captured.is_empty() {
            let own = group_at(&self.grid, pos);
            if liberties(&self.grid, &own).is_empty() {
                self.grid.clear(pos);
                debug!(%pos, ?color, "suicide rejected");
                return Err(GoMoveError::Suicide);
            }
        }

        for &cap in &captured {
            self.grid.clear(cap);
        }
        self.prisoners[color_idx] += captured.len() as u32;
        if !captured.is_empty() {
            debug!(%pos, ?color, count = captured.len(), "captured stones");
        }
        Ok(captured)
    }

    /// Restore the state from before the last successful placement
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.snapshots.pop() else {
            return false;
        };
        self.grid.copy_from(&snapshot.grid);
        self.prisoners = snapshot.prisoners;
        true
    }

    /// Connected same-colored stones containing `pos`
    pub fn group_at(&self, pos: Pos) -> Vec<Pos> {
        group_at(&self.grid, pos)
    }

    /// Distinct empty cells adjacent to `group`
    pub fn liberties(&self, group: &[Pos]) -> HashSet<Pos> {
        liberties(&self.grid, group)
    }

    /// Every empty region with its owner
    pub fn territory(&self) -> Vec<Region> {
        territory(&self.grid)
    }

    /// Territory owned by each color plus its prisoners.
    ///
    /// Can be queried at any point of the match; it does not mutate anything.
    pub fn calculate_score(&self) -> GoScore {
        let mut score = GoScore {
            black: self.prisoners[0],
            white: self.prisoners[1],
        };
        for region in self.territory() {
            match region.owner {
                Some(Stone::Black) => score.black += region.cells.len() as u32,
                Some(Stone::White) => score.white += region.cells.len() as u32,
                _ => {}
            }
        }
        score
    }

    /// Start a new match on the same board
    pub fn reset(&mut self) {
        self.grid.clear_all();
        self.prisoners = [0; 2];
        self.snapshots.clear();
    }
}

/// Breadth-first search for the group containing `pos`.
///
/// Returns an empty group if `pos` is off the board or empty.
pub fn group_at(grid: &Grid, pos: Pos) -> Vec<Pos> {
    let color = match grid.get(pos) {
        Some(stone) if stone.is_stone() => stone,
        _ => return Vec::new(),
    };

    let mut group = vec![pos];
    let mut visited = HashSet::from([pos]);
    let mut queue = VecDeque::from([pos]);

    while let Some(current) = queue.pop_front() {
        for n in grid.neighbors(current) {
            if grid.at(n) == color && visited.insert(n) {
                group.push(n);
                queue.push_back(n);
            }
        }
    }
    group
}

/// Distinct empty cells orthogonally adjacent to any stone of `group`
pub fn liberties(grid: &Grid, group: &[Pos]) -> HashSet<Pos> {
    let mut libs = HashSet::new();
    for &stone in group {
        for n in grid.neighbors(stone) {
            if grid.at(n) == Stone::Empty {
                libs.insert(n);
            }
        }
    }
    libs
}

/// Flood-fill every maximal empty region and find who borders it
pub fn territory(grid: &Grid) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut visited = vec![false; grid.cell_count()];
    let size = grid.size();

    for start in grid.empty_cells() {
        if visited[start.to_index(size)] {
            continue;
        }
        visited[start.to_index(size)] = true;

        let mut cells = Vec::new();
        let mut touched: Option<Stone> = None;
        let mut mixed = false;
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            cells.push(current);
            for n in grid.neighbors(current) {
                match grid.at(n) {
                    Stone::Empty => {
                        let idx = n.to_index(size);
                        if !visited[idx] {
                            visited[idx] = true;
                            queue.push_back(n);
                        }
                    }
                    stone => match touched {
                        None => touched = Some(stone),
                        Some(seen) if seen != stone => mixed = true,
                        Some(_) => {}
                    },
                }
            }
        }

        let owner = if mixed { None } else { touched };
        regions.push(Region { cells, owner });
    }
    regions
}
