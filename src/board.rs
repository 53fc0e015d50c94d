use std::fmt;

use once_cell::sync::Lazy;

use crate::types::{Disk, NUM_SQUARES, Position};

/// Every cell in row-major order (y ascending, then x ascending).
pub static ALL_POSITIONS: Lazy<Vec<Position>> =
    Lazy::new(|| (0..NUM_SQUARES).map(Position::from_index).collect());

/// 8x8 Reversi board. Each cell is empty or holds one disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Disk>; NUM_SQUARES],
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// Creates the initial board:
    /// (3,3)=light, (4,3)=dark, (3,4)=dark, (4,4)=light.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set_disk(Some(Disk::Light), Position::new(3, 3));
        board.set_disk(Some(Disk::Dark), Position::new(4, 3));
        board.set_disk(Some(Disk::Dark), Position::new(3, 4));
        board.set_disk(Some(Disk::Light), Position::new(4, 4));
        board
    }

    /// Returns the disk at `pos`. Off-board reads are empty.
    pub fn disk(&self, pos: Position) -> Option<Disk> {
        pos.index().and_then(|index| self.cells[index])
    }

    /// Sets or clears the cell at `pos`. Off-board writes are ignored.
    pub fn set_disk(&mut self, disk: Option<Disk>, pos: Position) {
        if let Some(index) = pos.index() {
            self.cells[index] = disk;
        }
    }

    pub fn disk_at_index(&self, index: usize) -> Option<Disk> {
        self.cells.get(index).copied().flatten()
    }

    /// Returns the number of cells holding `side`.
    pub fn count(&self, side: Disk) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(side)).count()
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Iterates `(position, cell)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<Disk>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (Position::from_index(index), *cell))
    }

    /// Builds a board from eight rows of `x` / `o` / `-` symbols.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; 8]) -> Self {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let disk = Disk::from_symbol(symbol).expect("test rows use x, o or -");
                board.set_disk(disk, Position::new(x as i32, y as i32));
            }
        }
        board
    }

    /// Converts the board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (out, cell) in board.iter_mut().zip(self.cells.iter()) {
            *out = match cell {
                None => 0,
                Some(Disk::Dark) => 1,
                Some(Disk::Light) => 2,
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(crate::types::BOARD_WIDTH as usize) {
            for cell in row {
                write!(f, "{}", Disk::symbol_of(*cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_disks() {
        let board = Board::empty();

        assert!(ALL_POSITIONS.iter().all(|pos| board.disk(*pos).is_none()));
        assert_eq!(board.count(Disk::Dark), 0);
        assert_eq!(board.count(Disk::Light), 0);
        assert_eq!(board.empty_count(), 64);
    }

    #[test]
    fn initial_board_has_center_pattern() {
        let board = Board::initial();

        assert_eq!(board.disk(Position::new(3, 3)), Some(Disk::Light));
        assert_eq!(board.disk(Position::new(4, 3)), Some(Disk::Dark));
        assert_eq!(board.disk(Position::new(3, 4)), Some(Disk::Dark));
        assert_eq!(board.disk(Position::new(4, 4)), Some(Disk::Light));
        assert_eq!(board.count(Disk::Dark), 2);
        assert_eq!(board.count(Disk::Light), 2);
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn set_disk_overwrites_and_clears() {
        let mut board = Board::empty();
        let corner = Position::new(7, 0);

        board.set_disk(Some(Disk::Dark), corner);
        assert_eq!(board.disk(corner), Some(Disk::Dark));

        board.set_disk(Some(Disk::Light), corner);
        assert_eq!(board.disk(corner), Some(Disk::Light));
        assert_eq!(board.disk_at_index(7), Some(Disk::Light));

        board.set_disk(None, corner);
        assert_eq!(board.disk(corner), None);
    }

    #[test]
    fn off_board_access_is_a_no_op() {
        let mut board = Board::initial();
        let before = board;

        board.set_disk(Some(Disk::Dark), Position::new(8, 0));
        board.set_disk(Some(Disk::Dark), Position::new(-1, 3));

        assert_eq!(board, before);
        assert_eq!(board.disk(Position::new(0, 8)), None);
        assert_eq!(board.disk_at_index(64), None);
    }

    #[test]
    fn all_positions_are_row_major() {
        assert_eq!(ALL_POSITIONS.len(), 64);
        assert_eq!(ALL_POSITIONS[0], Position::new(0, 0));
        assert_eq!(ALL_POSITIONS[1], Position::new(1, 0));
        assert_eq!(ALL_POSITIONS[8], Position::new(0, 1));
        assert!(ALL_POSITIONS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn display_uses_symbol_table() {
        let text = Board::initial().to_string();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3], "---ox---");
        assert_eq!(rows[4], "---xo---");
        assert_eq!(rows[0], "--------");
    }

    #[test]
    fn from_rows_matches_display() {
        let rows = [
            "x------o",
            "--------",
            "--------",
            "---ox---",
            "---xo---",
            "--------",
            "--------",
            "o------x",
        ];
        let board = Board::from_rows(rows);

        assert_eq!(board.disk(Position::new(0, 0)), Some(Disk::Dark));
        assert_eq!(board.disk(Position::new(7, 0)), Some(Disk::Light));
        assert_eq!(board.to_string(), rows.map(|row| format!("{row}\n")).concat());
    }

    #[test]
    fn to_array_encodes_cells() {
        let cells = Board::initial().to_array();

        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[35], 1);
        assert_eq!(cells[36], 2);
        assert_eq!(cells.iter().filter(|c| **c == 0).count(), 60);
    }
}
