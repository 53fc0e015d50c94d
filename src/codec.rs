//! Text save format.
//!
//! ```text
//! x01        <- turn symbol, dark mode digit, light mode digit
//! --------   <- eight rows of eight cells, y = 0..8
//! ...
//! ```
//!
//! Turn symbol: `x` dark, `o` light, `-` game over.
//! Mode digit: `0` manual, `1` computer.

use crate::board::Board;
use crate::game::GameState;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, Disk, PlayerMode, Position};

const HEADER_LEN: usize = 3;
const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// Save data that does not match the text format. The whole input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected at least 9 lines, got {lines}")]
    Truncated { lines: usize },

    #[error("invalid turn symbol {0:?}")]
    InvalidTurn(char),

    #[error("header must be at least 3 characters")]
    HeaderTooShort,

    #[error("invalid {side} player mode {found:?}")]
    InvalidMode { side: Disk, found: char },

    #[error("expected 8 board rows, got {0}")]
    RowCount(usize),

    #[error("board row {row} has length {len}, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("invalid cell {found:?} at ({col}, {row})")]
    InvalidCell { row: usize, col: usize, found: char },

    #[error("save is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Encodes `state` as header line plus eight board rows, each `\n`-terminated.
pub fn encode(state: &GameState) -> String {
    let mut out = String::with_capacity((HEADER_LEN + 1) + ROWS * (COLS + 1));

    out.push(Disk::symbol_of(state.current_turn));
    out.push(state.dark_mode.digit());
    out.push(state.light_mode.digit());
    out.push('\n');

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            out.push(Disk::symbol_of(state.board.disk(Position::new(x, y))));
        }
        out.push('\n');
    }

    out
}

/// Decodes a save produced by [`encode`].
///
/// Empty lines are ignored and a trailing `\r` is stripped from each line.
pub fn decode(input: &str) -> Result<GameState, FormatError> {
    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < ROWS + 1 {
        return Err(FormatError::Truncated { lines: lines.len() });
    }

    let (header, rows) = lines.split_at(1);
    let (current_turn, dark_mode, light_mode) = decode_header(header[0])?;

    if rows.len() != ROWS {
        return Err(FormatError::RowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (y, row) in rows.iter().enumerate() {
        let cells: Vec<char> = row.chars().collect();
        if cells.len() != COLS {
            return Err(FormatError::RowLength {
                row: y,
                len: cells.len(),
            });
        }
        for (x, symbol) in cells.into_iter().enumerate() {
            let disk = Disk::from_symbol(symbol).map_err(|_| FormatError::InvalidCell {
                row: y,
                col: x,
                found: symbol,
            })?;
            board.set_disk(disk, Position::new(x as i32, y as i32));
        }
    }

    Ok(GameState::new(board, current_turn, dark_mode, light_mode))
}

/// Decodes raw save bytes. Input that is not UTF-8 is a format error.
pub fn decode_bytes(input: &[u8]) -> Result<GameState, FormatError> {
    decode(std::str::from_utf8(input)?)
}

fn decode_header(header: &str) -> Result<(Option<Disk>, PlayerMode, PlayerMode), FormatError> {
    let chars: Vec<char> = header.chars().collect();

    let turn_symbol = chars[0];
    let current_turn =
        Disk::from_symbol(turn_symbol).map_err(|_| FormatError::InvalidTurn(turn_symbol))?;

    if chars.len() < HEADER_LEN {
        return Err(FormatError::HeaderTooShort);
    }

    let mode = |side: Disk, found: char| {
        PlayerMode::from_digit(found).ok_or(FormatError::InvalidMode { side, found })
    };
    let dark_mode = mode(Disk::Dark, chars[1])?;
    let light_mode = mode(Disk::Light, chars[2])?;

    Ok((current_turn, dark_mode, light_mode))
}
