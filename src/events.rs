//! Side-effect intents emitted by the game
//!
//! The game never plays sounds or draws particles itself. It queues these
//! events and the frame driver hands them to the audio and effects layers,
//! which may drop them freely.

use ratatui::style::Color;

/// Particles spawned for each cell of a cleared row
pub const PARTICLES_PER_CELL: usize = 5;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Move,
    Rotate,
    Drop,
    Clear,
    GameOver,
}

/// Request for one particle at the center of a board cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    /// Board column of the cell center (col + 0.5)
    pub x: f32,
    /// Board row of the cell center (row + 0.5)
    pub y: f32,
    pub color: Color,
}

/// Events produced by game actions and gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(Sfx),
    Particle(ParticleSpawn),
}

#[cfg(test)]
impl GameEvent {
    pub fn sound(&self) -> Option<Sfx> {
        match self {
            GameEvent::Sound(sfx) => Some(*sfx),
            GameEvent::Particle(_) => None,
        }
    }

    pub fn particle(&self) -> Option<&ParticleSpawn> {
        match self {
            GameEvent::Particle(spawn) => Some(spawn),
            GameEvent::Sound(_) => None,
        }
    }
}
