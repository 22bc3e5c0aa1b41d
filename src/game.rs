//! Match orchestration above the rule engines
//!
//! Turn order, human-vs-AI replies, multi-move undo, Go passes and
//! self-play live here. The rule engines themselves stay stateless about
//! whose turn it is.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{Pos, Stone};
use crate::engine::{HeuristicPlayer, MoveResult};
use crate::error::ConfigError;
use crate::rules::{GoEngine, GoMoveError, GoScore, LineRuleEngine, PlaceOutcome, TargetLength};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs Player (hotseat)
    PlayerVsPlayer,
    /// Player vs AI
    PlayerVsAi { ai_color: Stone },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PlayerVsAi {
            ai_color: Stone::White,
        }
    }
}

/// State of an N-in-a-row match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Ongoing,
    Won(Stone),
    Draw,
}

/// One Connect-4 / Gomoku / Connect-6 match with optional AI opponent
pub struct LineMatch {
    engine: LineRuleEngine,
    mode: GameMode,
    ai: HeuristicPlayer,
    current_turn: Stone,
    status: MatchStatus,
}

impl LineMatch {
    pub fn new(
        board_size: usize,
        target: TargetLength,
        mode: GameMode,
    ) -> Result<Self, ConfigError> {
        Self::with_player(board_size, mode, HeuristicPlayer::new(target))
    }

    /// Match using a caller-provided AI, e.g. a seeded one.
    /// The player's evaluator decides the target length.
    pub fn with_player(
        board_size: usize,
        mode: GameMode,
        ai: HeuristicPlayer,
    ) -> Result<Self, ConfigError> {
        let engine = LineRuleEngine::new(board_size, ai.evaluator().target())?;
        Ok(Self {
            engine,
            mode,
            ai,
            current_turn: Stone::Black,
            status: MatchStatus::Ongoing,
        })
    }

    #[inline]
    pub fn engine(&self) -> &LineRuleEngine {
        &self.engine
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PlayerVsPlayer => true,
            GameMode::PlayerVsAi { ai_color } => self.current_turn != ai_color,
        }
    }

    /// Play the side to move at `pos`. In AI mode the AI answers immediately.
    ///
    /// Returns false if the match is over, it is not a human's turn, or the
    /// cell is not playable.
    pub fn play(&mut self, pos: Pos) -> bool {
        if self.status != MatchStatus::Ongoing || !self.is_human_turn() {
            return false;
        }
        if !self.apply(pos) {
            return false;
        }
        if let GameMode::PlayerVsAi { .. } = self.mode {
            if self.status == MatchStatus::Ongoing {
                self.ai_turn();
            }
        }
        true
    }

    /// Let the AI move if it is its turn (e.g. when the AI plays Black)
    pub fn ai_turn(&mut self) -> Option<MoveResult> {
        let GameMode::PlayerVsAi { ai_color } = self.mode else {
            return None;
        };
        if self.status != MatchStatus::Ongoing || self.current_turn != ai_color {
            return None;
        }
        let last = self.engine.last_move().map(|m| m.pos);
        let result = self.ai.get_move(self.engine.grid(), last, ai_color);
        match result.best_move {
            Some(pos) if self.apply(pos) => Some(result),
            Some(pos) => {
                warn!(%pos, "AI chose an unplayable cell");
                None
            }
            None => None,
        }
    }

    /// Suggested move for the side to move
    pub fn hint(&mut self) -> Option<Pos> {
        if self.status != MatchStatus::Ongoing {
            return None;
        }
        self.ai.hint(self.engine.grid(), self.current_turn).best_move
    }

    /// Take back the last move, or the last human move and the AI reply.
    pub fn undo(&mut self) -> bool {
        let steps = match self.mode {
            GameMode::PlayerVsPlayer => 1,
            GameMode::PlayerVsAi { .. } => self.engine.history().len().min(2),
        };
        if steps == 0 {
            return false;
        }
        for _ in 0..steps {
            self.engine.undo();
        }
        self.current_turn = match self.engine.last_move() {
            Some(last) => last.stone.opponent(),
            None => Stone::Black,
        };
        self.status = MatchStatus::Ongoing;
        true
    }

    /// Start over with an empty board
    pub fn reset(&mut self) {
        self.engine.reset();
        self.ai.reset();
        self.current_turn = Stone::Black;
        self.status = MatchStatus::Ongoing;
    }

    fn apply(&mut self, pos: Pos) -> bool {
        let color = self.current_turn;
        match self.engine.place_and_check(pos, color) {
            PlaceOutcome::Rejected => return false,
            PlaceOutcome::Placed => {}
            PlaceOutcome::Win => {
                info!(?color, moves = self.engine.move_count(), "match won");
                self.status = MatchStatus::Won(color);
            }
            PlaceOutcome::Draw => {
                info!(moves = self.engine.move_count(), "match drawn");
                self.status = MatchStatus::Draw;
            }
        }
        self.current_turn = color.opponent();
        true
    }
}

/// Final result of a Go match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoResult {
    pub score: GoScore,
    pub komi: f32,
    /// `None` on a tie
    pub winner: Option<Stone>,
}

/// One Go match: turn order, passes and the end-of-game score
pub struct GoMatch {
    engine: GoEngine,
    komi: f32,
    current_turn: Stone,
    consecutive_passes: u8,
    /// Turn and pass counter from before each placement, one per engine snapshot
    turn_log: Vec<(Stone, u8)>,
    result: Option<GoResult>,
}

impl GoMatch {
    pub fn new(board_size: usize, komi: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: GoEngine::new(board_size)?,
            komi,
            current_turn: Stone::Black,
            consecutive_passes: 0,
            turn_log: Vec::new(),
            result: None,
        })
    }

    #[inline]
    pub fn engine(&self) -> &GoEngine {
        &self.engine
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[inline]
    pub fn result(&self) -> Option<GoResult> {
        self.result
    }

    /// Place a stone for the side to move; resets the pass counter
    pub fn play(&mut self, pos: Pos) -> Result<Vec<Pos>, GoMoveError> {
        if self.is_over() {
            return Err(GoMoveError::GameOver);
        }
        let captured = self.engine.place_stone(pos, self.current_turn)?;
        self.turn_log.push((self.current_turn, self.consecutive_passes));
        self.consecutive_passes = 0;
        self.current_turn = self.current_turn.opponent();
        Ok(captured)
    }

    /// Pass the turn. Two passes in a row end the match.
    pub fn pass(&mut self) -> Option<GoResult> {
        if self.is_over() {
            return self.result;
        }
        debug!(color = ?self.current_turn, "pass");
        self.consecutive_passes += 1;
        self.current_turn = self.current_turn.opponent();
        if self.consecutive_passes >= 2 {
            let score = self.engine.calculate_score();
            let result = GoResult {
                score,
                komi: self.komi,
                winner: score.winner(self.komi),
            };
            info!(black = score.black, white = score.white, komi = self.komi, "both passed");
            self.result = Some(result);
        }
        self.result
    }

    /// Take back the last placement and any passes after it.
    ///
    /// The side to move and the pass counter return to what they were
    /// before that placement.
    pub fn undo(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        let Some((turn, passes)) = self.turn_log.pop() else {
            return false;
        };
        if !self.engine.undo() {
            return false;
        }
        self.current_turn = turn;
        self.consecutive_passes = passes;
        true
    }

    /// Current score without ending the match
    pub fn score(&self) -> GoScore {
        self.engine.calculate_score()
    }
}

/// Configuration for a heuristic-vs-heuristic game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub board_size: usize,
    pub target: TargetLength,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            board_size: crate::board::DEFAULT_BOARD_SIZE,
            target: TargetLength::GOMOKU,
        }
    }
}

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{color:?} engine chose unplayable cell {pos}")]
    IllegalMove { color: Stone, pos: Pos },
    #[error("{0:?} engine found no move on a board with empty cells")]
    NoMove(Stone),
}

/// Outcome of one finished self-play game
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// `None` for a draw
    pub winner: Option<Stone>,
    pub moves: usize,
    pub engine: LineRuleEngine,
}

/// Play two heuristic players against each other until win or draw.
///
/// Black moves first. Each player gets its own seed drawn from `rng`.
pub fn self_play<R: Rng + ?Sized>(
    config: SelfPlayConfig,
    rng: &mut R,
) -> Result<MatchOutcome, SelfPlayError> {
    let mut engine = LineRuleEngine::new(config.board_size, config.target)?;
    let mut black = HeuristicPlayer::seeded(config.target, rng.gen());
    let mut white = HeuristicPlayer::seeded(config.target, rng.gen());
    let mut color = Stone::Black;

    loop {
        let player = if color == Stone::Black { &mut black } else { &mut white };
        let last = engine.last_move().map(|m| m.pos);
        let Some(pos) = player.get_move(engine.grid(), last, color).best_move else {
            return Err(SelfPlayError::NoMove(color));
        };

        match engine.place_and_check(pos, color) {
            PlaceOutcome::Rejected => {
                warn!(?color, %pos, "engine returned an illegal move");
                return Err(SelfPlayError::IllegalMove { color, pos });
            }
            PlaceOutcome::Placed => color = color.opponent(),
            PlaceOutcome::Win => {
                debug!(?color, moves = engine.move_count(), "self-play game won");
                return Ok(MatchOutcome {
                    winner: Some(color),
                    moves: engine.move_count(),
                    engine,
                });
            }
            PlaceOutcome::Draw => {
                debug!(moves = engine.move_count(), "self-play game drawn");
                return Ok(MatchOutcome {
                    winner: None,
                    moves: engine.move_count(),
                    engine,
                });
            }
        }
    }
}
