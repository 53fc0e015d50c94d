//! Delayed, cancellable computer turns.
//!
//! The move is chosen as soon as the turn starts but is only released once
//! the thinking delay has elapsed. Callers drive the turn by polling with the
//! current time, which keeps this usable from a browser event loop.

use tracing::debug;
use web_time::{Duration, Instant};

use crate::ai::MoveSelector;
use crate::animation::CancellationToken;
use crate::board::Board;
use crate::types::{Disk, Position};

pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPoll {
    Thinking { remaining: Duration },
    Ready(Position),
    /// The turn was cancelled; its move must not be applied.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ComputerTurn {
    side: Disk,
    selected: Position,
    started_at: Instant,
    delay: Duration,
    token: CancellationToken,
}

impl ComputerTurn {
    /// Selects a move for `side` and starts the thinking delay.
    /// Returns `None` when `side` has no legal move.
    pub fn start(
        selector: &mut dyn MoveSelector,
        board: &Board,
        side: Disk,
        now: Instant,
    ) -> Option<Self> {
        Self::with_delay(selector, board, side, now, DEFAULT_THINKING_DELAY)
    }

    pub fn with_delay(
        selector: &mut dyn MoveSelector,
        board: &Board,
        side: Disk,
        now: Instant,
        delay: Duration,
    ) -> Option<Self> {
        let selected = selector.select_move(board, side)?;
        debug!(%side, %selected, ?delay, "computer turn started");
        Some(Self {
            side,
            selected,
            started_at: now,
            delay,
            token: CancellationToken::new(),
        })
    }

    pub fn side(&self) -> Disk {
        self.side
    }

    /// Handle that cancels this turn from elsewhere.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn poll(&self, now: Instant) -> TurnPoll {
        if self.token.is_cancelled() {
            return TurnPoll::Cancelled;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.delay {
            TurnPoll::Ready(self.selected)
        } else {
            TurnPoll::Thinking {
                remaining: self.delay - elapsed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FirstLegalMoveSelector;

    #[test]
    fn move_is_released_after_delay() {
        let start = Instant::now();
        let turn = ComputerTurn::start(
            &mut FirstLegalMoveSelector,
            &Board::initial(),
            Disk::Dark,
            start,
        )
        .unwrap();

        assert_eq!(
            turn.poll(start + Duration::from_millis(500)),
            TurnPoll::Thinking {
                remaining: Duration::from_millis(1500)
            }
        );
        assert_eq!(
            turn.poll(start + DEFAULT_THINKING_DELAY),
            TurnPoll::Ready(Position::new(3, 2))
        );
        assert_eq!(turn.side(), Disk::Dark);
    }

    #[test]
    fn cancelled_turn_never_releases_its_move() {
        let start = Instant::now();
        let turn = ComputerTurn::with_delay(
            &mut FirstLegalMoveSelector,
            &Board::initial(),
            Disk::Light,
            start,
            Duration::from_millis(10),
        )
        .unwrap();
        let token = turn.token();

        token.cancel();

        assert_eq!(turn.poll(start + Duration::from_secs(5)), TurnPoll::Cancelled);
    }

    #[test]
    fn no_turn_without_legal_moves() {
        let turn = ComputerTurn::start(
            &mut FirstLegalMoveSelector,
            &Board::empty(),
            Disk::Dark,
            Instant::now(),
        );

        assert!(turn.is_none());
    }

    #[test]
    fn zero_delay_is_ready_immediately() {
        let start = Instant::now();
        let turn = ComputerTurn::with_delay(
            &mut FirstLegalMoveSelector,
            &Board::initial(),
            Disk::Dark,
            start,
            Duration::ZERO,
        )
        .unwrap();

        assert!(matches!(turn.poll(start), TurnPoll::Ready(_)));
    }
}
