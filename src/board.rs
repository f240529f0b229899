//! Game board representation and collision detection

use crate::piece::Piece;
use ratatui::style::Color;

/// Board dimensions
pub const BOARD_WIDTH: usize = 8;
pub const BOARD_HEIGHT: usize = 14;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y)
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set a cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    /// Check whether `piece`, moved by (dx, dy) and turned `rotation_delta`
    /// steps, would sit entirely inside the board on empty cells
    pub fn is_valid(&self, piece: &Piece, dx: i32, dy: i32, rotation_delta: usize) -> bool {
        piece
            .cells_with(dx, dy, rotation_delta)
            .iter()
            .all(|&(x, y)| self.get(x, y).is_some_and(|cell| cell.is_empty()))
    }

    /// Write the piece's color into every cell it occupies
    ///
    /// Cells outside the board are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            self.set(x, y, Cell::Filled(color));
        }
    }

    /// Indices of completely filled rows, top to bottom
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove the given rows and drop everything above them
    ///
    /// Surviving rows keep their relative order; one empty row is added at
    /// the top per removed row.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        // Fill the top with empty rows
        for row in 0..write_row {
            self.cells[row] = [Cell::Empty; BOARD_WIDTH];
        }
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Number of filled cells
    #[cfg(test)]
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell; BOARD_WIDTH])> {
        self.cells.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;
    use proptest::prelude::*;

    fn fill_row(board: &mut Board, row: usize, color: Color) {
        for col in 0..BOARD_WIDTH {
            board.set(col as i32, row as i32, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(Color::Red)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(0, BOARD_HEIGHT as i32, Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_is_valid_walls_and_floor() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::O);
        piece.x = 0;
        assert!(board.is_valid(&piece, 0, 0, 0));
        assert!(!board.is_valid(&piece, -1, 0, 0));
        piece.x = BOARD_WIDTH as i32 - 2;
        assert!(!board.is_valid(&piece, 1, 0, 0));
        piece.y = BOARD_HEIGHT as i32 - 2;
        assert!(board.is_valid(&piece, 0, 0, 0));
        assert!(!board.is_valid(&piece, 0, 1, 0));
    }

    #[test]
    fn test_is_valid_uses_rotation_delta() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        // Horizontal I on the bottom row fits, vertical I does not
        piece.y = BOARD_HEIGHT as i32 - 2;
        assert!(board.is_valid(&piece, 0, 0, 0));
        assert!(!board.is_valid(&piece, 0, 0, 1));
    }

    #[test]
    fn test_is_valid_detects_overlap() {
        let mut board = Board::new();
        let piece = Piece::new(TetrominoType::T);
        let (x, y) = piece.cells()[2];
        board.set(x, y, Cell::Filled(Color::Red));
        assert!(!board.is_valid(&piece, 0, 0, 0));
    }

    #[test]
    fn test_lock_skips_out_of_bounds_cells() {
        let mut board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        piece.set_rotation(1);
        // Vertical I hanging two rows past the floor
        piece.y = BOARD_HEIGHT as i32 - 2;
        board.lock(&piece);
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_find_and_clear_rows_two_and_five() {
        let mut board = Board::new();
        fill_row(&mut board, 2, Color::Cyan);
        fill_row(&mut board, 5, Color::Green);
        // Partial rows mark the rest of the stack
        board.set(0, 1, Cell::Filled(Color::Red));
        board.set(1, 3, Cell::Filled(Color::Blue));
        board.set(2, 6, Cell::Filled(Color::Yellow));
        board.set(3, BOARD_HEIGHT as i32 - 1, Cell::Filled(Color::Magenta));

        let rows = board.find_full_rows();
        assert_eq!(rows, vec![2, 5]);

        board.clear_rows(&rows);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert!(board.find_full_rows().is_empty());
        // Two empty rows prepended
        for y in 0..2 {
            assert!((0..BOARD_WIDTH as i32).all(|x| board.get(x, y) == Some(Cell::Empty)));
        }
        // Row 1 moved down past both clears, row 3 past one, rows below 5 stay
        assert_eq!(board.get(0, 3), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.get(1, 4), Some(Cell::Filled(Color::Blue)));
        assert_eq!(board.get(2, 6), Some(Cell::Filled(Color::Yellow)));
        assert_eq!(
            board.get(3, BOARD_HEIGHT as i32 - 1),
            Some(Cell::Filled(Color::Magenta))
        );
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_clear_rows_matches_compaction() {
        let mut board = Board::new();
        for row in [4, 9, 10, 13] {
            fill_row(&mut board, row, Color::Cyan);
        }
        for row in 0..BOARD_HEIGHT {
            board.set((row % BOARD_WIDTH) as i32, row as i32, Cell::Filled(Color::Red));
        }
        let rows = board.find_full_rows();
        assert_eq!(rows, vec![4, 9, 10, 13]);

        let mut expected: Vec<[Cell; BOARD_WIDTH]> = vec![[Cell::Empty; BOARD_WIDTH]; rows.len()];
        expected.extend(
            board
                .rows()
                .filter(|(i, _)| !rows.contains(i))
                .map(|(_, row)| *row),
        );

        board.clear_rows(&rows);
        let actual: Vec<[Cell; BOARD_WIDTH]> = board.rows().map(|(_, row)| *row).collect();
        assert_eq!(actual, expected);
    }

    proptest! {
        #[test]
        fn prop_is_valid_iff_in_bounds_and_free(
            filled in proptest::collection::vec(any::<bool>(), BOARD_WIDTH * BOARD_HEIGHT),
            kind in 0usize..7,
            rotation in 0usize..4,
            x in -4i32..(BOARD_WIDTH as i32 + 2),
            y in -4i32..(BOARD_HEIGHT as i32 + 2),
            dx in -3i32..=3,
            dy in -3i32..=3,
            rotation_delta in 0usize..4,
        ) {
            let mut board = Board::new();
            for (i, &f) in filled.iter().enumerate() {
                if f {
                    board.set((i % BOARD_WIDTH) as i32, (i / BOARD_WIDTH) as i32, Cell::Filled(Color::Red));
                }
            }
            let mut piece = Piece::new(TetrominoType::all()[kind]);
            piece.set_rotation(rotation);
            piece.x = x;
            piece.y = y;

            let expected = piece.cells_with(dx, dy, rotation_delta).iter().all(|&(cx, cy)| {
                cx >= 0
                    && cx < BOARD_WIDTH as i32
                    && cy >= 0
                    && cy < BOARD_HEIGHT as i32
                    && !filled[cy as usize * BOARD_WIDTH + cx as usize]
            });
            prop_assert_eq!(board.is_valid(&piece, dx, dy, rotation_delta), expected);
        }
    }
}
