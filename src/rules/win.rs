//! Win detection for N-in-a-row variants
//!
//! A win is checked only from the stone that was just placed: along each of
//! the four axes, consecutive same-colored neighbors are counted in both
//! directions. The placed stone itself is not part of the count, so the game
//! is won when any axis holds `target - 1` neighbors.

use crate::board::{Grid, Pos, Stone, DIRECTIONS};

use super::TargetLength;

/// Count consecutive `color` stones starting one step from `pos` along `(dr, dc)`.
#[inline]
pub fn count_direction(grid: &Grid, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let size = grid.size();
    let mut count = 0;
    let mut step = 1;
    while let Some(p) = pos.offset(dr, dc, step, size) {
        if grid.at(p) != color {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// Neighbors of the same color on both sides of `pos` along one axis
#[inline]
pub fn neighbors_on_axis(grid: &Grid, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    count_direction(grid, pos, dr, dc, color) + count_direction(grid, pos, -dr, -dc, color)
}

/// Check whether the stone just placed at `pos` completes a winning run.
///
/// No allocation; only the four axes through `pos` are inspected.
#[inline]
pub fn check_win_at(grid: &Grid, pos: Pos, color: Stone, target: TargetLength) -> bool {
    if !color.is_stone() || !grid.in_bounds(pos) {
        return false;
    }
    let needed = target.neighbors_needed();
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| neighbors_on_axis(grid, pos, dr, dc, color) >= needed)
}

/// Find the full run through `pos` that wins the game, if any.
///
/// Returns the stones ordered from the negative end of the axis to the positive end.
pub fn find_winning_line(
    grid: &Grid,
    pos: Pos,
    color: Stone,
    target: TargetLength,
) -> Option<Vec<Pos>> {
    if !color.is_stone() || grid.get(pos) != Some(color) {
        return None;
    }
    let size = grid.size();

    for &(dr, dc) in &DIRECTIONS {
        let back = count_direction(grid, pos, -dr, -dc, color) as i32;
        let forward = count_direction(grid, pos, dr, dc, color) as i32;
        if ((back + forward) as usize) < target.neighbors_needed() {
            continue;
        }
        let line = (-back..=forward)
            .filter_map(|step| pos.offset(dr, dc, step, size))
            .collect();
        return Some(line);
    }
    None
}
