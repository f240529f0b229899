//! Wall kick data and rotation resolution
//!
//! One kick table per kind family, keyed by kind alone. Only forward
//! rotation (rotation index + 1) exists; the same table is tried in the same
//! order whichever transition is happening.

use crate::board::Board;
use crate::piece::Piece;
use crate::tetromino::TetrominoType;

/// Kicks for J, L, S, T, Z as (dx, dy), y grows downward
const JLSTZ_KICKS: &[(i32, i32)] = &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];

/// Kicks for the I piece
const I_KICKS: &[(i32, i32)] = &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)];

/// O never needs to move when rotating
const O_KICKS: &[(i32, i32)] = &[(0, 0)];

/// Get the ordered kick offsets to try for a piece kind
pub fn wall_kicks(piece_type: TetrominoType) -> &'static [(i32, i32)] {
    match piece_type {
        TetrominoType::I => I_KICKS,
        TetrominoType::O => O_KICKS,
        TetrominoType::J
        | TetrominoType::L
        | TetrominoType::S
        | TetrominoType::T
        | TetrominoType::Z => JLSTZ_KICKS,
    }
}

/// Advance the piece one rotation state, applying the first kick that fits
///
/// Returns true when the rotation took effect. On failure the piece is left
/// exactly as it was.
pub fn rotate(piece: &mut Piece, board: &Board) -> bool {
    let start_rotation = piece.rotation;
    piece.set_rotation(start_rotation + 1);

    for &(dx, dy) in wall_kicks(piece.piece_type) {
        if board.is_valid(piece, dx, dy, 0) {
            piece.shift(dx, dy);
            return true;
        }
    }

    piece.rotation = start_rotation;
    false
}
