//! Move selection for computer-controlled sides.

pub mod thinking;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::board::Board;
use crate::rules;
use crate::types::{Disk, Position};

/// Chooses the next move for `side`. Returns `None` when `side` has no legal move.
pub trait MoveSelector {
    fn select_move(&mut self, board: &Board, side: Disk) -> Option<Position>;
}

/// Always plays the first legal move in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, side: Disk) -> Option<Position> {
        rules::legal_moves(board, side).first().copied()
    }
}

/// Picks uniformly at random among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: StdRng,
}

impl RandomMoveSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic selector for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&mut self, board: &Board, side: Disk) -> Option<Position> {
        rules::legal_moves(board, side)
            .choose(&mut self.rng)
            .copied()
    }
}
