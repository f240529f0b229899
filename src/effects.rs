//! Line-clear particle effects
//!
//! Consumes particle spawn requests from the game and animates them once per
//! frame. Motion constants are tuned in pixels for a 35 pixel block and
//! converted to board cells, the unit the renderer works in.

use crate::events::ParticleSpawn;
use rand::Rng;
use ratatui::style::Color;

/// Pixel size of one board cell the motion constants were tuned for
const BLOCK_PX: f32 = 35.0;
/// Downward acceleration per frame, in pixels
const GRAVITY_PX: f32 = 0.1;
/// Shrink per frame, in pixels
const SHRINK_PX: f32 = 0.05;

/// A single particle; position in board cells
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub color: Color,
    /// Radius in pixels
    pub size: f32,
    velocity_x: f32,
    velocity_y: f32,
    pub alpha: f32,
    decay_rate: f32,
}

impl Particle {
    /// Spawn with a random size, velocity and fade rate
    pub fn spawn(request: &ParticleSpawn, rng: &mut impl Rng) -> Self {
        Self {
            x: request.x,
            y: request.y,
            color: request.color,
            size: rng.gen_range(2..=5) as f32,
            velocity_x: rng.gen_range(-2.0..=2.0),
            velocity_y: rng.gen_range(-4.0..=-1.0),
            alpha: 255.0,
            decay_rate: rng.gen_range(5..=15) as f32,
        }
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.x += self.velocity_x / BLOCK_PX;
        self.y += self.velocity_y / BLOCK_PX;
        self.velocity_y += GRAVITY_PX;
        self.alpha = (self.alpha - self.decay_rate).max(0.0);
        self.size = (self.size - SHRINK_PX).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.size > 0.0
    }
}

/// All live particles
#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, request: &ParticleSpawn) {
        let mut rng = rand::thread_rng();
        self.particles.push(Particle::spawn(request, &mut rng));
    }

    /// Advance every particle one frame and drop the dead ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Drop every particle (used on reset)
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
