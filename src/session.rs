use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use web_time::{Duration, Instant};

use crate::ai::thinking::{ComputerTurn, DEFAULT_THINKING_DELAY, TurnPoll};
use crate::ai::{MoveSelector, RandomMoveSelector};
use crate::game::{GameState, MoveError, Transition};
use crate::repository::{GameRepository, RepositoryError};
use crate::rules;
use crate::types::{Disk, PlayerMode, Position};

/// Things a front end should react to, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Placed {
        side: Disk,
        position: Position,
        flipped: Vec<Position>,
    },
    /// `side` had no legal move and lost its turn.
    Passed { side: Disk },
    GameOver { winner: Option<Disk> },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("{0} is controlled by the computer")]
    ComputerControlled(Disk),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Drives one game: player modes, computer turns and the event feed.
pub struct GameSession {
    state: GameState,
    selector: Box<dyn MoveSelector>,
    thinking_delay: Duration,
    pending: Option<ComputerTurn>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New game with a random computer player.
    pub fn new() -> Self {
        Self::with_selector(Box::new(RandomMoveSelector::new()))
    }

    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: GameState::initial(),
            selector,
            thinking_delay: DEFAULT_THINKING_DELAY,
            pending: None,
            events: Vec::new(),
        }
    }

    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Resets to the initial state with both sides manual.
    pub fn new_game(&mut self) {
        self.cancel_computer_turns();
        self.state = GameState::initial();
        self.events.clear();
        info!("new game");
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.state.legal_moves()
    }

    /// Plays `pos` for the side to move, which must be manually controlled.
    pub fn place(&mut self, pos: Position) -> Result<Vec<Position>, SessionError> {
        let side = self.state.current_turn.ok_or(MoveError::GameOver)?;
        if self.state.player_mode(side) == PlayerMode::Computer {
            return Err(SessionError::ComputerControlled(side));
        }
        Ok(self.apply(side, pos)?)
    }

    /// Switches `side` between manual and computer control, cancelling any
    /// computer turn already running for it.
    pub fn toggle_player_mode(&mut self, side: Disk) -> PlayerMode {
        let mode = self.state.player_mode(side).toggled();
        self.state = self.state.with_player_mode(mode, side);
        if self.pending.as_ref().is_some_and(|turn| turn.side() == side) {
            self.cancel_computer_turns();
        }
        debug!(%side, ?mode, "player mode changed");
        mode
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a computer turn if the side to move is computer-controlled and
    /// none is running yet. Returns whether a turn is now pending.
    pub fn start_computer_turn(&mut self, now: Instant) -> bool {
        if self.pending.is_some() {
            return true;
        }
        let Some(side) = self.state.current_turn else {
            return false;
        };
        if self.state.player_mode(side) != PlayerMode::Computer {
            return false;
        }

        self.pending = ComputerTurn::with_delay(
            self.selector.as_mut(),
            &self.state.board,
            side,
            now,
            self.thinking_delay,
        );
        self.pending.is_some()
    }

    /// Applies the pending computer move once its delay has elapsed.
    ///
    /// Returns the flipped positions when a move was played and `None` while
    /// thinking or with no turn pending. A move the rules reject clears the
    /// pending turn, leaves the game untouched and is returned as an error.
    pub fn poll_computer_turn(
        &mut self,
        now: Instant,
    ) -> Result<Option<Vec<Position>>, SessionError> {
        let Some(poll) = self.pending.as_ref().map(|turn| turn.poll(now)) else {
            return Ok(None);
        };
        match poll {
            TurnPoll::Thinking { .. } => Ok(None),
            TurnPoll::Cancelled => {
                self.pending = None;
                Ok(None)
            }
            TurnPoll::Ready(pos) => {
                let Some(turn) = self.pending.take() else {
                    return Ok(None);
                };
                let side = turn.side();
                match self.apply(side, pos) {
                    Ok(flipped) => Ok(Some(flipped)),
                    Err(err) => {
                        warn!(%side, %pos, error = %err, "computer move rejected");
                        Err(err.into())
                    }
                }
            }
        }
    }

    pub fn cancel_computer_turns(&mut self) {
        if let Some(turn) = self.pending.take() {
            turn.cancel();
            debug!(side = %turn.side(), "computer turn cancelled");
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn save(&self, repository: &dyn GameRepository) -> Result<(), SessionError> {
        repository.save(&self.state)?;
        Ok(())
    }

    /// Replaces the current game with the saved one.
    ///
    /// A save whose side to move is blocked is settled right away, the same
    /// way a blocked turn is settled after a move.
    pub fn load(&mut self, repository: &dyn GameRepository) -> Result<(), SessionError> {
        let state = repository.load()?;
        self.restore(state);
        Ok(())
    }

    /// Replaces the current game with `state`, settling a blocked turn.
    pub fn restore(&mut self, state: GameState) {
        self.cancel_computer_turns();
        self.events.clear();
        self.state = state;
        self.settle();
    }

    fn apply(&mut self, side: Disk, pos: Position) -> Result<Vec<Position>, MoveError> {
        let placement = self.state.play(side, pos)?;
        self.state = placement.state;
        self.events.push(GameEvent::Placed {
            side,
            position: pos,
            flipped: placement.flipped.clone(),
        });
        self.record(placement.transition);
        Ok(placement.flipped)
    }

    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Turn(_) => {}
            Transition::Pass { passed, .. } => self.events.push(GameEvent::Passed { side: passed }),
            Transition::GameOver => self.events.push(GameEvent::GameOver {
                winner: self.state.winner(),
            }),
        }
    }

    fn settle(&mut self) {
        let Some(side) = self.state.current_turn else {
            return;
        };
        if rules::has_legal_move(&self.state.board, side) {
            return;
        }
        // As if the opponent had just moved: `side` passes back to it when
        // the opponent can play, otherwise the game is over.
        let transition = crate::game::advance(&self.state.board, side.flipped());
        self.state = self.state.with_turn(transition.current_turn());
        self.record(transition);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
