//! Cancellable, step-by-step application of disks to a presented board.
//!
//! The engine never animates anything itself. A front end passes a `step`
//! callback that presents one cell at a time; whatever happens to the
//! presentation, the board ends up holding `disk` at every requested cell.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::board::Board;
use crate::types::{Disk, Position};

/// Shared flag that cancels an in-flight sequence or computer turn.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every cell was presented by `step`.
    Finished,
    /// Presentation stopped early; the remaining cells were applied at once.
    Cancelled,
}

/// Applies `disk` to each of `positions` in order.
///
/// Before each cell the token is checked; then the cell is set and `step` is
/// called with the updated board. `step` returns `false` if its presentation
/// was interrupted. On cancellation or interruption every remaining cell is
/// set without calling `step` again.
pub fn animate_disks<F>(
    board: &mut Board,
    disk: Disk,
    positions: &[Position],
    token: &CancellationToken,
    mut step: F,
) -> Completion
where
    F: FnMut(&Board, Position) -> bool,
{
    for (done, pos) in positions.iter().enumerate() {
        if token.is_cancelled() {
            debug!(remaining = positions.len() - done, "animation cancelled");
            apply_all(board, disk, &positions[done..]);
            return Completion::Cancelled;
        }

        board.set_disk(Some(disk), *pos);
        if !step(board, *pos) {
            debug!(remaining = positions.len() - done - 1, "animation interrupted");
            apply_all(board, disk, &positions[done + 1..]);
            return Completion::Cancelled;
        }
    }

    Completion::Finished
}

fn apply_all(board: &mut Board, disk: Disk, positions: &[Position]) {
    for pos in positions {
        board.set_disk(Some(disk), *pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    fn placed_and_flipped() -> (Board, Vec<Position>, Board) {
        let before = Board::initial();
        let mv = Position::new(2, 3);
        let (after, flipped) = rules::place(&before, Disk::Dark, mv);
        let mut cells = vec![mv];
        cells.extend(flipped);
        (before, cells, after)
    }

    #[test]
    fn finished_sequence_presents_every_cell() {
        let (mut board, cells, expected) = placed_and_flipped();
        let mut presented = Vec::new();

        let completion = animate_disks(
            &mut board,
            Disk::Dark,
            &cells,
            &CancellationToken::new(),
            |_, pos| {
                presented.push(pos);
                true
            },
        );

        assert_eq!(completion, Completion::Finished);
        assert_eq!(presented, cells);
        assert_eq!(board, expected);
    }

    #[test]
    fn cancelled_token_applies_remaining_cells_instantly() {
        let (mut board, cells, expected) = placed_and_flipped();
        let token = CancellationToken::new();
        let mut presented = 0;

        let completion = animate_disks(&mut board, Disk::Dark, &cells, &token, |_, _| {
            presented += 1;
            token.cancel();
            true
        });

        assert_eq!(completion, Completion::Cancelled);
        assert_eq!(presented, 1);
        assert_eq!(board, expected);
    }

    #[test]
    fn interrupted_step_applies_remaining_cells_instantly() {
        let mut board = Board::empty();
        let cells: Vec<Position> = (0..5).map(|x| Position::new(x, 0)).collect();

        let completion = animate_disks(
            &mut board,
            Disk::Light,
            &cells,
            &CancellationToken::new(),
            |_, pos| pos.x < 1,
        );

        assert_eq!(completion, Completion::Cancelled);
        assert_eq!(board.count(Disk::Light), 5);
    }

    #[test]
    fn pre_cancelled_sequence_never_calls_step() {
        let mut board = Board::empty();
        let token = CancellationToken::new();
        token.cancel();

        let completion = animate_disks(
            &mut board,
            Disk::Dark,
            &[Position::new(0, 0), Position::new(7, 7)],
            &token,
            |_, _| panic!("step must not run"),
        );

        assert_eq!(completion, Completion::Cancelled);
        assert_eq!(board.count(Disk::Dark), 2);
    }

    #[test]
    fn empty_sequence_finishes() {
        let mut board = Board::initial();

        let completion = animate_disks(
            &mut board,
            Disk::Dark,
            &[],
            &CancellationToken::new(),
            |_, _| true,
        );

        assert_eq!(completion, Completion::Finished);
        assert_eq!(board, Board::initial());
    }
}
