use tracing::{debug, info};

use crate::board::Board;
use crate::rules;
use crate::types::{Disk, GameView, MoveReport, PlayerMode, Position};

/// Immutable game snapshot. `current_turn == None` means the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub current_turn: Option<Disk>,
    pub dark_mode: PlayerMode,
    pub light_mode: PlayerMode,
}

/// Turn state reached after a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The opponent moves next.
    Turn(Disk),
    /// `passed` has no legal move, so `turn` moves again.
    Pass { passed: Disk, turn: Disk },
    /// Neither side can move.
    GameOver,
}

impl Transition {
    /// The value to store as the next state's current turn.
    pub fn current_turn(self) -> Option<Disk> {
        match self {
            Transition::Turn(side) => Some(side),
            Transition::Pass { turn, .. } => Some(turn),
            Transition::GameOver => None,
        }
    }

    /// The side that had to pass, if any.
    pub fn passed(self) -> Option<Disk> {
        match self {
            Transition::Pass { passed, .. } => Some(passed),
            _ => None,
        }
    }
}

/// Reasons a placement request is refused. The state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: Disk, actual: Disk },

    #[error("illegal move at {0}")]
    Illegal(Position),
}

/// Outcome of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub flipped: Vec<Position>,
    pub state: GameState,
    pub transition: Transition,
}

/// Decides who moves after `side` has just moved on `board`.
pub fn advance(board: &Board, side: Disk) -> Transition {
    let next = side.flipped();
    if rules::has_legal_move(board, next) {
        return Transition::Turn(next);
    }

    if rules::has_legal_move(board, side) {
        info!(passed = %next, turn = %side, "pass");
        Transition::Pass {
            passed: next,
            turn: side,
        }
    } else {
        info!(
            dark = board.count(Disk::Dark),
            light = board.count(Disk::Light),
            "game over"
        );
        Transition::GameOver
    }
}

impl GameState {
    pub fn new(
        board: Board,
        current_turn: Option<Disk>,
        dark_mode: PlayerMode,
        light_mode: PlayerMode,
    ) -> Self {
        Self {
            board,
            current_turn,
            dark_mode,
            light_mode,
        }
    }

    /// Initial board, dark to move, both sides manual.
    pub fn initial() -> Self {
        Self::new(
            Board::initial(),
            Some(Disk::Dark),
            PlayerMode::Manual,
            PlayerMode::Manual,
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.current_turn.is_none()
    }

    pub fn with_board(self, board: Board) -> Self {
        Self { board, ..self }
    }

    pub fn with_turn(self, current_turn: Option<Disk>) -> Self {
        Self {
            current_turn,
            ..self
        }
    }

    pub fn player_mode(&self, side: Disk) -> PlayerMode {
        match side {
            Disk::Dark => self.dark_mode,
            Disk::Light => self.light_mode,
        }
    }

    pub fn with_player_mode(self, mode: PlayerMode, side: Disk) -> Self {
        match side {
            Disk::Dark => Self {
                dark_mode: mode,
                ..self
            },
            Disk::Light => Self {
                light_mode: mode,
                ..self
            },
        }
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        match self.current_turn {
            Some(side) => rules::legal_moves(&self.board, side),
            None => Vec::new(),
        }
    }

    pub fn winner(&self) -> Option<Disk> {
        rules::winner(&self.board)
    }

    /// Plays `side` at `pos` and advances the turn.
    pub fn play(&self, side: Disk, pos: Position) -> Result<Placement, MoveError> {
        let expected = self.current_turn.ok_or(MoveError::GameOver)?;
        if expected != side {
            return Err(MoveError::NotYourTurn {
                expected,
                actual: side,
            });
        }

        let (board, flipped) = rules::place(&self.board, side, pos);
        if flipped.is_empty() {
            debug!(%side, %pos, "rejected illegal move");
            return Err(MoveError::Illegal(pos));
        }

        let transition = advance(&board, side);
        debug!(%side, %pos, flips = flipped.len(), ?transition, "placed disk");
        Ok(Placement {
            flipped,
            state: self.with_board(board).with_turn(transition.current_turn()),
            transition,
        })
    }

    /// Same as [`GameState::play`], reported as `(accepted, flipped, state)`.
    pub fn submit(&self, side: Disk, pos: Position) -> MoveReport {
        match self.play(side, pos) {
            Ok(placement) => MoveReport {
                accepted: true,
                flipped: placement.flipped,
                state: placement.state,
            },
            Err(_) => MoveReport {
                accepted: false,
                flipped: Vec::new(),
                state: *self,
            },
        }
    }

    pub fn to_view(&self) -> GameView {
        GameView {
            board: self.board.to_array().to_vec(),
            current_turn: self.current_turn,
            dark_mode: self.dark_mode,
            light_mode: self.light_mode,
            dark_count: self.board.count(Disk::Dark) as u8,
            light_count: self.board.count(Disk::Light) as u8,
            is_game_over: self.is_game_over(),
            winner: if self.is_game_over() {
                self.winner()
            } else {
                None
            },
            legal_moves: self.legal_moves(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
