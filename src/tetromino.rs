//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their rotation states. Offsets are (x, y) with
//! x increasing rightward and y increasing downward, relative to the piece origin.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    J, // Dark blue
    L, // Orange
    O, // Yellow - square
    S, // Green
    T, // Purple
    Z, // Red
}

/// One rotation state: the 4 occupied cells
pub type ShapeState = [(i32, i32); 4];

const I_STATES: &[ShapeState] = &[
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_STATES: &[ShapeState] = &[
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: &[ShapeState] = &[
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_STATES: &[ShapeState] = &[[(0, 0), (1, 0), (0, 1), (1, 1)]];

// S:  .SS    S.
//     SS.    SS
//            .S
const S_STATES: &[ShapeState] = &[
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const T_STATES: &[ShapeState] = &[
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

// Z:  ZZ.    .Z
//     .ZZ    ZZ
//            Z.
const Z_STATES: &[ShapeState] = &[
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Rgb(0, 255, 255),
            TetrominoType::J => Color::Rgb(0, 0, 139),
            TetrominoType::L => Color::Rgb(255, 165, 0),
            TetrominoType::O => Color::Rgb(255, 255, 0),
            TetrominoType::S => Color::Rgb(0, 255, 0),
            TetrominoType::T => Color::Rgb(128, 0, 128),
            TetrominoType::Z => Color::Rgb(255, 0, 0),
        }
    }

    /// Get all tetromino types
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// All rotation states in rotation order
    pub fn states(&self) -> &'static [ShapeState] {
        match self {
            TetrominoType::I => I_STATES,
            TetrominoType::J => J_STATES,
            TetrominoType::L => L_STATES,
            TetrominoType::O => O_STATES,
            TetrominoType::S => S_STATES,
            TetrominoType::T => T_STATES,
            TetrominoType::Z => Z_STATES,
        }
    }

    /// Number of distinct rotation states (4, 2 for I/S/Z, 1 for O)
    pub fn rotation_count(&self) -> usize {
        self.states().len()
    }

    /// Get the shape offsets at a rotation index (wrapped into range)
    pub fn shape(&self, rotation: usize) -> ShapeState {
        let states = self.states();
        states[rotation % states.len()]
    }
}
