//! Stateless Reversi rules.
//!
//! Every function takes the board and side explicitly, so the rules can be
//! queried from any number of call sites at once.

use crate::board::{ALL_POSITIONS, Board};
use crate::types::{Disk, Position};

/// Ray directions as `(dx, dy)`, in the order flips are reported.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Returns true when `side` may place a disk at `pos`.
pub fn can_place(board: &Board, side: Disk, pos: Position) -> bool {
    if !pos.is_valid() || board.disk(pos).is_some() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dx, dy)| !sandwiched(board, side, pos, dx, dy).is_empty())
}

/// Returns the opponent disks captured by placing `side` at `pos`.
///
/// Positions are grouped by direction (see [`DIRECTIONS`]) and ordered
/// outward from `pos` within each direction. Rays never overlap, so the
/// result has no duplicates. Empty when the move is illegal.
pub fn flip_set(board: &Board, side: Disk, pos: Position) -> Vec<Position> {
    if !pos.is_valid() || board.disk(pos).is_some() {
        return Vec::new();
    }
    DIRECTIONS
        .iter()
        .flat_map(|&(dx, dy)| sandwiched(board, side, pos, dx, dy))
        .collect()
}

/// Places `side` at `pos` and flips captured disks.
///
/// Returns the new board and the flipped positions. When the move is
/// illegal the board comes back unchanged with an empty flip list.
pub fn place(board: &Board, side: Disk, pos: Position) -> (Board, Vec<Position>) {
    let flips = flip_set(board, side, pos);
    if flips.is_empty() {
        return (*board, flips);
    }

    let mut next = *board;
    next.set_disk(Some(side), pos);
    for flipped in &flips {
        next.set_disk(Some(side), *flipped);
    }
    (next, flips)
}

/// Returns every legal move for `side` in row-major order.
pub fn legal_moves(board: &Board, side: Disk) -> Vec<Position> {
    ALL_POSITIONS
        .iter()
        .copied()
        .filter(|pos| can_place(board, side, *pos))
        .collect()
}

/// Returns true when `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Disk) -> bool {
    ALL_POSITIONS
        .iter()
        .any(|pos| can_place(board, side, *pos))
}

pub fn disk_count(board: &Board, side: Disk) -> usize {
    board.count(side)
}

/// Side with strictly more disks, `None` on a tie.
pub fn winner(board: &Board) -> Option<Disk> {
    let dark = disk_count(board, Disk::Dark);
    let light = disk_count(board, Disk::Light);
    match dark.cmp(&light) {
        std::cmp::Ordering::Greater => Some(Disk::Dark),
        std::cmp::Ordering::Less => Some(Disk::Light),
        std::cmp::Ordering::Equal => None,
    }
}

/// Opponent run captured along one ray, or empty if the ray is not closed
/// by a `side` disk.
fn sandwiched(board: &Board, side: Disk, pos: Position, dx: i32, dy: i32) -> Vec<Position> {
    let opponent = side.flipped();
    let mut line = Vec::new();
    let mut current = pos.moved(dx, dy);

    while current.is_valid() {
        match board.disk(current) {
            Some(disk) if disk == opponent => line.push(current),
            Some(_) => return line,
            None => break,
        }
        current = current.moved(dx, dy);
    }

    line.clear();
    line
}
