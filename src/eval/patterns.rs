//! Pattern scores for the heuristic evaluator
//!
//! One table per target length. A line through an empty cell is classified
//! by its run length (the cell itself counts as one stone) and how many of
//! its two ends are open. The first matching rule wins; anything unmatched
//! scores `run * BASE_PER_STONE`.

use crate::rules::TargetLength;

/// Completing the target length
pub const WIN_SCORE: u32 = 100_000;

/// Base score per stone for unclassified runs
pub const BASE_PER_STONE: u32 = 10;

/// Score categories, named for five-in-a-row
pub struct PatternScore;

impl PatternScore {
    /// _OOOO_ for Gomoku: unstoppable
    pub const LIVE_FOUR: u32 = 10_000;
    /// XOOOO_ : must be answered
    pub const DEAD_FOUR: u32 = 1_000;
    /// _OOO_ : becomes a live four if ignored
    pub const LIVE_THREE: u32 = 1_000;
    /// XOOO_
    pub const DEAD_THREE: u32 = 100;
    /// _OO_
    pub const LIVE_TWO: u32 = 50;
}

/// One row of a threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub run: usize,
    pub open_ends: u8,
    pub score: u32,
}

impl PatternRule {
    const fn new(run: usize, open_ends: u8, score: u32) -> Self {
        Self { run, open_ends, score }
    }
}

/// Threshold table for one target length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    /// Runs at least this long score [`WIN_SCORE`] regardless of ends
    pub win_run: usize,
    /// Checked in order after the win rule
    pub rules: Vec<PatternRule>,
    /// When set, a non-winning rule only applies if the run plus the free
    /// space on both sides reaches this many cells
    pub min_potential: Option<usize>,
}

impl PatternTable {
    /// Five-in-a-row table
    pub fn gomoku() -> Self {
        Self {
            win_run: 5,
            rules: vec![
                PatternRule::new(4, 2, PatternScore::LIVE_FOUR),
                PatternRule::new(4, 1, PatternScore::DEAD_FOUR),
                PatternRule::new(3, 2, PatternScore::LIVE_THREE),
                PatternRule::new(3, 1, PatternScore::DEAD_THREE),
                PatternRule::new(2, 2, PatternScore::LIVE_TWO),
            ],
            min_potential: None,
        }
    }

    /// Four-in-a-row: a live three is already the winning threat
    pub fn connect_four() -> Self {
        Self {
            win_run: 4,
            rules: vec![
                PatternRule::new(3, 2, PatternScore::LIVE_FOUR),
                PatternRule::new(3, 1, PatternScore::DEAD_FOUR),
                PatternRule::new(2, 2, PatternScore::LIVE_THREE),
                PatternRule::new(2, 1, PatternScore::DEAD_THREE),
            ],
            min_potential: None,
        }
    }

    /// Six-in-a-row: everything shifted up by one, plus the potential guard
    pub fn connect_six() -> Self {
        Self {
            win_run: 6,
            rules: vec![
                PatternRule::new(5, 2, PatternScore::LIVE_FOUR),
                PatternRule::new(5, 1, PatternScore::DEAD_FOUR),
                PatternRule::new(4, 2, PatternScore::LIVE_THREE),
                PatternRule::new(4, 1, PatternScore::DEAD_THREE),
                PatternRule::new(3, 2, PatternScore::LIVE_TWO),
            ],
            min_potential: Some(7),
        }
    }

    pub fn for_target(target: TargetLength) -> Self {
        match target.get() {
            4 => Self::connect_four(),
            6 => Self::connect_six(),
            _ => Self::gomoku(),
        }
    }

    /// Score one line through a candidate cell.
    ///
    /// `potential` is the run length plus the free cells beyond both ends.
    pub fn classify(&self, run: usize, open_ends: u8, potential: usize) -> u32 {
        if run >= self.win_run {
            return WIN_SCORE;
        }
        let viable = self.min_potential.map_or(true, |min| potential >= min);
        if viable {
            if let Some(rule) = self
                .rules
                .iter()
                .find(|r| r.run == run && r.open_ends == open_ends)
            {
                return rule.score;
            }
        }
        run as u32 * BASE_PER_STONE
    }
}
