//! Square grid of cell states

use std::fmt;

use super::{Pos, Stone, NEIGHBORS_4};
use crate::error::{check_board_size, ConfigError};

/// Fixed-size square board. Every cell is Empty, Black or White.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Stone>,
}

impl Grid {
    /// Create an empty `size` x `size` grid
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let size = check_board_size(size)?;
        Ok(Self {
            size,
            cells: vec![Stone::Empty; size * size],
        })
    }

    /// Build a grid from rows of the signed encoding (0, +1, -1).
    ///
    /// Returns `None` if the rows are not square or contain another value.
    pub fn from_signed(rows: &[Vec<i8>]) -> Option<Self> {
        let size = rows.len();
        let mut grid = Self::new(size).ok()?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return None;
            }
            for (c, &value) in row.iter().enumerate() {
                grid.cells[r * size + c] = Stone::from_i8(value)?;
            }
        }
        Some(grid)
    }

    /// Signed view of the grid, one row per inner vector
    pub fn to_signed(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|s| s.to_i8()).collect())
            .collect()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Get stone at position. Out-of-bounds reads as `None`.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Stone> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.to_index(self.size)])
        } else {
            None
        }
    }

    /// Stone at an in-bounds position
    #[inline]
    pub(crate) fn at(&self, pos: Pos) -> Stone {
        debug_assert!(self.in_bounds(pos));
        self.cells[pos.to_index(self.size)]
    }

    /// Check if position is in bounds and empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Stone::Empty)
    }

    /// Write a cell without any rule processing.
    /// Rule engines wrap this; out-of-bounds writes are ignored and return false.
    #[inline]
    pub fn set(&mut self, pos: Pos, stone: Stone) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = pos.to_index(self.size);
        self.cells[idx] = stone;
        true
    }

    /// Remove a stone
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.set(pos, Stone::Empty);
    }

    /// Empty every cell
    pub fn clear_all(&mut self) {
        self.cells.fill(Stone::Empty);
    }

    /// Overwrite this grid cell-by-cell from `other` of the same size
    pub fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.size, other.size);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Iterate over every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |idx| Pos::from_index(idx, self.size))
    }

    /// Iterate over empty positions in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.at(p) == Stone::Empty)
    }

    /// Orthogonal in-bounds neighbors
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        NEIGHBORS_4
            .iter()
            .filter_map(move |&(dr, dc)| pos.offset(dr, dc, 1, self.size))
    }

    /// Check if no stones have been placed
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&s| s == Stone::Empty)
    }

    /// The grid with colors swapped
    pub fn color_swapped(&self) -> Grid {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(|s| s.opponent()).collect(),
        }
    }

    /// The grid rotated by 180 degrees
    pub fn rotated_180(&self) -> Grid {
        let mut cells = self.cells.clone();
        cells.reverse();
        Grid {
            size: self.size,
            cells,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|s| match s {
                    Stone::Empty => '.',
                    Stone::Black => 'X',
                    Stone::White => 'O',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
