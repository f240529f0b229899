//! Scoring, line count and level progression

/// Gravity interval at level 1, in milliseconds
pub const BASE_GRAVITY_MS: u64 = 1000;
/// Gravity speed-up per level, in milliseconds
pub const GRAVITY_STEP_MS: u64 = 70;
/// Gravity never gets faster than this
pub const MIN_GRAVITY_MS: u64 = 50;
/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded for clearing `lines` rows with a single lock
pub fn calculate_score(lines: usize, level: u32) -> u64 {
    let base = match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    };
    base * level as u64
}

/// Gravity interval in milliseconds for a level
pub fn gravity_interval(level: u32) -> u64 {
    let speedup = (level.saturating_sub(1) as u64).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(speedup).max(MIN_GRAVITY_MS)
}

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Current gravity interval in milliseconds
    pub gravity_ms: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            gravity_ms: BASE_GRAVITY_MS,
        }
    }

    /// Award a line clear and update level and gravity
    /// Returns true when the level went up
    pub fn add_clear(&mut self, lines: usize) -> bool {
        self.points += calculate_score(lines, self.level);
        self.lines += lines as u32;

        let new_level = 1 + self.lines / LINES_PER_LEVEL;
        if new_level > self.level {
            self.level = new_level;
            self.gravity_ms = gravity_interval(self.level);
            return true;
        }
        false
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }
}
