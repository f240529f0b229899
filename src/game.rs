//! Core game state and logic

use crate::board::{Board, Cell, BOARD_WIDTH};
use crate::events::{GameEvent, ParticleSpawn, Sfx, PARTICLES_PER_CELL};
use crate::highscores::{HighScores, ScoreStore};
use crate::piece::{self, Piece};
use crate::randomizer::Randomizer;
use crate::rotation;
use crate::score::Score;

/// Game phase; exactly one holds at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
    ShowingHighScores,
}

/// Logical input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Pause,
    Resume,
    Reset,
    ToggleHighScores,
    Quit,
}

/// The main game struct
pub struct Game {
    /// The game board
    board: Board,
    /// Current falling piece
    current: Piece,
    /// Piece shown in the preview, promoted when `current` locks
    next: Piece,
    /// Piece randomizer
    randomizer: Randomizer,
    /// Score tracking
    score: Score,
    /// Current game phase
    state: GameState,
    /// Milliseconds accumulated since the last gravity step
    fall_timer_ms: u64,
    /// Top scores, kept in sync with the store
    high_scores: HighScores,
    store: Box<dyn ScoreStore>,
    /// Intents not yet taken by the driver
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new game backed by a score store
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self::with_randomizer(store, Randomizer::new())
    }

    /// Create a new game with a fixed piece sequence
    pub fn with_seed(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::with_randomizer(store, Randomizer::with_seed(seed))
    }

    fn with_randomizer(store: Box<dyn ScoreStore>, mut randomizer: Randomizer) -> Self {
        let current = randomizer.spawn();
        let next = randomizer.spawn();
        let high_scores = HighScores::from_scores(store.load());

        Self {
            board: Board::new(),
            current,
            next,
            randomizer,
            score: Score::new(),
            state: GameState::Running,
            fall_timer_ms: 0,
            high_scores,
            store,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Where the current piece would land if hard-dropped now
    pub fn ghost(&self) -> Piece {
        piece::ghost(&self.current, &self.board)
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, sfx: Sfx) {
        self.events.push(GameEvent::Sound(sfx));
    }

    /// Process an action
    ///
    /// Actions that make no sense in the current phase are ignored.
    pub fn handle_input(&mut self, action: Action) {
        match (self.state, action) {
            (_, Action::Reset) => self.reset(),
            (GameState::Running, Action::MoveLeft) => self.shift_horizontal(-1),
            (GameState::Running, Action::MoveRight) => self.shift_horizontal(1),
            (GameState::Running, Action::SoftDrop) => self.soft_drop(),
            (GameState::Running, Action::Rotate) => self.rotate(),
            (GameState::Running, Action::HardDrop) => self.hard_drop(),
            (GameState::Running, Action::Pause) => {
                self.state = GameState::Paused;
            }
            (GameState::Paused, Action::Resume) => {
                self.state = GameState::Running;
            }
            (GameState::GameOver, Action::ToggleHighScores) => {
                self.state = GameState::ShowingHighScores;
            }
            (GameState::ShowingHighScores, Action::ToggleHighScores) => {
                self.state = GameState::GameOver;
            }
            _ => {}
        }
    }

    /// Advance gravity by `elapsed_ms` (call every frame)
    ///
    /// Takes at most one gravity step per call. The timer restarts from zero
    /// after a step, so time beyond the interval is not carried over.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.state != GameState::Running {
            return;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.score.gravity_ms {
            return;
        }

        if self.board.is_valid(&self.current, 0, 1, 0) {
            self.current.shift(0, 1);
        } else {
            self.lock_current();
        }
        self.fall_timer_ms = 0;
    }

    fn shift_horizontal(&mut self, dx: i32) {
        if self.board.is_valid(&self.current, dx, 0, 0) {
            self.current.shift(dx, 0);
            self.emit(Sfx::Move);
        }
    }

    fn soft_drop(&mut self) {
        if self.board.is_valid(&self.current, 0, 1, 0) {
            self.current.shift(0, 1);
        }
    }

    fn rotate(&mut self) {
        if rotation::rotate(&mut self.current, &self.board) {
            self.emit(Sfx::Rotate);
        }
    }

    fn hard_drop(&mut self) {
        let mut distance = 0;
        while self.board.is_valid(&self.current, 0, 1, 0) {
            self.current.shift(0, 1);
            distance += 1;
        }
        self.score.add_hard_drop(distance);
        self.lock_current();
        self.emit(Sfx::Drop);
    }

    /// Lock the current piece, resolve lines and bring in the next piece
    pub fn lock_current(&mut self) {
        self.board.lock(&self.current);
        self.emit(Sfx::Drop);
        self.resolve_lines();

        self.current = self.next;
        self.next = self.randomizer.spawn();
        tracing::debug!(
            "Locked piece, now {:?} with {:?} next",
            self.current.piece_type,
            self.next.piece_type
        );

        // Top out: the new piece has no room at spawn
        if !self.board.is_valid(&self.current, 0, 0, 0) {
            self.state = GameState::GameOver;
            self.emit(Sfx::GameOver);
            tracing::info!(
                "Game over: score={} level={} lines={}",
                self.score.points,
                self.score.level,
                self.score.lines
            );
        }
    }

    /// Score full rows, spawn their particles, then remove them
    fn resolve_lines(&mut self) {
        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            return;
        }

        self.emit(Sfx::Clear);
        if self.score.add_clear(rows.len()) {
            tracing::info!(
                "Level up to {} (gravity {}ms)",
                self.score.level,
                self.score.gravity_ms
            );
        }
        tracing::debug!("Cleared rows {:?}", rows);

        for &row in &rows {
            for col in 0..BOARD_WIDTH {
                if let Some(Cell::Filled(color)) = self.board.get(col as i32, row as i32) {
                    let spawn = ParticleSpawn {
                        x: col as f32 + 0.5,
                        y: row as f32 + 0.5,
                        color,
                    };
                    self.events
                        .extend(std::iter::repeat_n(GameEvent::Particle(spawn), PARTICLES_PER_CELL));
                }
            }
        }

        self.board.clear_rows(&rows);
    }

    /// Record the score and start a fresh game
    pub fn reset(&mut self) {
        let final_score = self.score.points;
        if final_score > 0 {
            if let Some(rank) = self.high_scores.insert(final_score) {
                tracing::info!("New high score {} at rank {}", final_score, rank);
            }
            if let Err(e) = self.store.save(self.high_scores.entries()) {
                tracing::warn!("Could not save high scores: {}", e);
            }
        }

        self.board = Board::new();
        self.current = self.randomizer.spawn();
        self.next = self.randomizer.spawn();
        self.score = Score::new();
        self.state = GameState::Running;
        self.fall_timer_ms = 0;
    }
}
