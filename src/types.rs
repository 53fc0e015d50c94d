use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: i32 = 8;
pub const BOARD_HEIGHT: i32 = 8;
pub const NUM_SQUARES: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// A board coordinate, 0-indexed from the top-left corner.
///
/// Positions are plain values and may point off the board; use
/// [`Position::is_valid`] before treating one as a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a row-major square index (`y * 8 + x`).
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_WIDTH as usize) as i32,
            y: (index / BOARD_WIDTH as usize) as i32,
        }
    }

    /// Row-major square index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some((self.y * BOARD_WIDTH + self.x) as usize)
        } else {
            None
        }
    }

    pub fn is_valid(self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }

    pub fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub const DARK_SYMBOL: char = 'x';
pub const LIGHT_SYMBOL: char = 'o';
pub const EMPTY_SYMBOL: char = '-';

/// Disk colour. Dark moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disk {
    Dark,
    Light,
}

impl Disk {
    pub const SIDES: [Disk; 2] = [Disk::Dark, Disk::Light];

    pub fn flipped(self) -> Self {
        match self {
            Disk::Dark => Disk::Light,
            Disk::Light => Disk::Dark,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Disk::Dark => DARK_SYMBOL,
            Disk::Light => LIGHT_SYMBOL,
        }
    }

    /// Symbol for a cell or turn marker, where `None` is `-`.
    pub fn symbol_of(disk: Option<Disk>) -> char {
        disk.map_or(EMPTY_SYMBOL, Disk::symbol)
    }

    /// Parses the `x` / `o` / `-` symbol table.
    pub fn from_symbol(symbol: char) -> Result<Option<Disk>, SymbolError> {
        match symbol {
            DARK_SYMBOL => Ok(Some(Disk::Dark)),
            LIGHT_SYMBOL => Ok(Some(Disk::Light)),
            EMPTY_SYMBOL => Ok(None),
            other => Err(SymbolError(other)),
        }
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disk::Dark => f.write_str("dark"),
            Disk::Light => f.write_str("light"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown disk symbol {0:?}")]
pub struct SymbolError(pub char);

/// Who supplies moves for a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    #[default]
    Manual,
    Computer,
}

impl PlayerMode {
    pub fn toggled(self) -> Self {
        match self {
            PlayerMode::Manual => PlayerMode::Computer,
            PlayerMode::Computer => PlayerMode::Manual,
        }
    }

    pub fn digit(self) -> char {
        match self {
            PlayerMode::Manual => '0',
            PlayerMode::Computer => '1',
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(PlayerMode::Manual),
            '1' => Some(PlayerMode::Computer),
            _ => None,
        }
    }
}

/// Snapshot handed to a front end for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Row-major cells: 0=empty, 1=dark, 2=light.
    pub board: Vec<u8>,
    pub current_turn: Option<Disk>,
    pub dark_mode: PlayerMode,
    pub light_mode: PlayerMode,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    pub winner: Option<Disk>,
    pub legal_moves: Vec<Position>,
}

/// Result of a placement request in the `(accepted, flipped, next state)` shape.
///
/// Contract:
/// - Rejected move: `accepted == false`, `flipped` is empty and `state` is the
///   unchanged input state.
/// - Accepted move: `flipped` lists every captured disk in direction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub accepted: bool,
    pub flipped: Vec<Position>,
    pub state: crate::game::GameState,
}
