//! High score list and its persistence
//!
//! The list is a plain JSON array of at most 5 scores, best first, stored in
//! the platform data directory (e.g. ~/.local/share/quadfall/high_scores.json).

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

const SCORE_FILE: &str = "high_scores.json";

/// Top scores, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Build from an arbitrary list, normalizing order and length
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.retain(|&s| s > 0);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { entries: scores }
    }

    /// Add a score; zero scores are ignored
    /// Returns the 1-indexed rank achieved, or None if it didn't make the list
    pub fn insert(&mut self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    pub fn best(&self) -> Option<u64> {
        self.entries.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the high score list lives between sessions
pub trait ScoreStore {
    /// Read the stored list; unreadable storage reads as empty
    fn load(&self) -> Vec<u64>;
    /// Replace the stored list
    fn save(&self, scores: &[u64]) -> Result<(), String>;
}

/// JSON file store at a fixed location
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: Option<PathBuf>,
}

impl JsonScoreStore {
    /// Store in the platform data directory
    pub fn new() -> Self {
        let path = ProjectDirs::from("com", "quadfall", "quadfall")
            .map(|dirs| dirs.data_dir().join(SCORE_FILE));
        Self { path }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Vec<u64> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!("No high scores at {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<u64>>(&contents) {
            Ok(scores) => {
                tracing::info!("Loaded {} high scores", scores.len());
                scores
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable high scores at {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, scores: &[u64]) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Err("Could not determine data directory".to_string());
        };

        // Create directory if needed
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create data dir: {}", e))?;
        }

        let contents =
            serde_json::to_string(scores).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write high scores: {}", e))?;

        tracing::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}

/// In-memory store; clones share the same list
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: std::rc::Rc<std::cell::RefCell<Vec<u64>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: Vec<u64>) -> Self {
        Self {
            scores: std::rc::Rc::new(std::cell::RefCell::new(scores)),
        }
    }

    /// Snapshot of what has been saved so far
    pub fn scores(&self) -> Vec<u64> {
        self.scores.borrow().clone()
    }
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn load(&self) -> Vec<u64> {
        self.scores()
    }

    fn save(&self, scores: &[u64]) -> Result<(), String> {
        *self.scores.borrow_mut() = scores.to_vec();
        Ok(())
    }
}
