//! Rule engines and a heuristic AI for N-in-a-row games and Go
//!
//! Supported games:
//! - Connect-4, Gomoku and Connect-6 on a square board (any size up to 64)
//! - Go with captures, suicide prevention, undo and area scoring
//!
//! # Architecture
//!
//! - [`board`]: Grid representation shared by every game
//! - [`rules`]: N-in-a-row placement and win detection, Go captures and scoring
//! - [`eval`]: Line pattern recognition and per-cell scoring
//! - [`engine`]: Heuristic player built on the evaluator
//! - [`game`]: Turn order, human-vs-AI matches, Go passes and self-play
//!
//! # Quick Start
//!
//! ```
//! use arena::{LineRuleEngine, PlaceOutcome, Pos, Stone, TargetLength};
//!
//! let mut game = LineRuleEngine::new(7, TargetLength::CONNECT_FOUR).unwrap();
//! for col in 0..3 {
//!     assert_eq!(game.place_and_check(Pos::new(6, col), Stone::Black), PlaceOutcome::Placed);
//! }
//! assert_eq!(game.place_and_check(Pos::new(6, 3), Stone::Black), PlaceOutcome::Win);
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;

pub use board::{Grid, Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use engine::{HeuristicPlayer, MoveKind, MoveResult};
pub use error::ConfigError;
pub use eval::{PatternEvaluator, PatternTable, ScoreMap};
pub use game::{
    self_play, GameMode, GoMatch, GoResult, LineMatch, MatchOutcome, MatchStatus, SelfPlayConfig,
    SelfPlayError,
};
pub use rules::{
    GoEngine, GoMoveError, GoScore, LineRuleEngine, MoveRecord, PlaceOutcome, TargetLength,
};
