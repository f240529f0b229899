//! Active and preview piece state

use crate::board::{Board, BOARD_WIDTH};
use crate::tetromino::TetrominoType;
use ratatui::style::Color;

/// Horizontal spawn column of a piece origin
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
/// Vertical spawn row of a piece origin
pub const SPAWN_Y: i32 = 0;

/// A falling (or queued) piece
///
/// Movement mutators never validate; callers check placement with
/// [`Board::is_valid`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Index into the kind's rotation states
    pub rotation: usize,
    /// Board column of the local origin
    pub x: i32,
    /// Board row of the local origin (row 0 is the top)
    pub y: i32,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> Color {
        self.piece_type.color()
    }

    pub fn rotation_count(&self) -> usize {
        self.piece_type.rotation_count()
    }

    /// Absolute (x, y) cells under a hypothetical translation and rotation change
    pub fn cells_with(&self, dx: i32, dy: i32, rotation_delta: usize) -> [(i32, i32); 4] {
        let rotation = (self.rotation + rotation_delta) % self.rotation_count();
        self.piece_type
            .shape(rotation)
            .map(|(ox, oy)| (self.x + ox + dx, self.y + oy + dy))
    }

    /// Absolute (x, y) cells the piece currently occupies
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_with(0, 0, 0)
    }

    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Set the rotation index, wrapped into the kind's range
    pub fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % self.rotation_count();
    }
}

/// Row the piece would come to rest on if hard-dropped now
///
/// Pure: works on a copy and leaves `piece` untouched.
pub fn ghost_y(piece: &Piece, board: &Board) -> i32 {
    let mut drop = 0;
    while board.is_valid(piece, 0, drop + 1, 0) {
        drop += 1;
    }
    piece.y + drop
}

/// The landing position of `piece`, as a piece value for rendering
pub fn ghost(piece: &Piece, board: &Board) -> Piece {
    Piece {
        y: ghost_y(piece, board),
        ..*piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT};

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.x, BOARD_WIDTH as i32 / 2 - 2);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_cells_follow_position() {
        let mut piece = Piece::new(TetrominoType::O);
        piece.shift(1, 3);
        let cells = piece.cells();
        assert!(cells.contains(&(SPAWN_X + 1, 3)));
        assert!(cells.contains(&(SPAWN_X + 2, 4)));
    }

    #[test]
    fn test_cells_with_rotation_delta_wraps() {
        let piece = Piece::new(TetrominoType::I);
        // Two steps on a 2-state piece lands back on state 0
        assert_eq!(piece.cells_with(0, 0, 2), piece.cells());
        assert_ne!(piece.cells_with(0, 0, 1), piece.cells());
    }

    #[test]
    fn test_set_rotation_wraps() {
        let mut piece = Piece::new(TetrominoType::S);
        piece.set_rotation(3);
        assert_eq!(piece.rotation, 1);
    }

    #[test]
    fn test_ghost_on_empty_board() {
        let board = Board::new();
        let piece = Piece::new(TetrominoType::O);
        // O occupies rows y and y+1
        assert_eq!(ghost_y(&piece, &board), BOARD_HEIGHT as i32 - 2);
    }

    #[test]
    fn test_ghost_stops_on_stack() {
        let mut board = Board::new();
        let piece = Piece::new(TetrominoType::O);
        board.set(SPAWN_X, 10, Cell::Filled(Color::Red));
        assert_eq!(ghost_y(&piece, &board), 8);
        // Helper never moves the piece
        assert_eq!(piece.y, 0);
        assert_eq!(ghost(&piece, &board).y, 8);
    }
}
