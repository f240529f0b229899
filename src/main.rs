//! QUADFALL - falling blocks on an 8 by 14 well

mod audio;
mod board;
mod effects;
mod events;
mod game;
mod highscores;
mod input;
mod piece;
mod randomizer;
mod rotation;
mod score;
mod settings;
mod tetromino;
mod ui;

use audio::AudioManager;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use effects::ParticleSystem;
use events::GameEvent;
use game::{Action, Game};
use highscores::JsonScoreStore;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Get the quadfall temp directory, creating it if needed
fn quadfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("quadfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = quadfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quadfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "QUADFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Game works without audio
    let mut audio = AudioManager::new(settings.audio.enabled, settings.sfx_gain());

    // QUADFALL_SCORES overrides the score file, QUADFALL_SEED fixes the piece sequence
    let store = match std::env::var_os("QUADFALL_SCORES") {
        Some(path) => JsonScoreStore::at(path),
        None => JsonScoreStore::new(),
    };
    let seed = std::env::var("QUADFALL_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    let mut game = match seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Game::with_seed(Box::new(store), seed)
        }
        None => Game::new(Box::new(store)),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings, &mut audio);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        let score = game.score();
        println!("\nThanks for playing QUADFALL!");
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
        if let Some(best) = game.high_scores().best() {
            println!("Best: {}", best);
        }
    }

    tracing::info!("QUADFALL shutting down");
    result
}

/// Wall-clock source for gravity
///
/// Hands out whole milliseconds and keeps the sub-millisecond remainder for
/// the next frame.
struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    fn new(start: Instant) -> Self {
        Self { last_tick: start }
    }

    /// Time since the last accounted tick
    fn since_last(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_tick)
    }

    /// Whole milliseconds elapsed up to `now`, consumed from the clock
    fn advance(&mut self, now: Instant) -> u64 {
        let elapsed_ms = self.since_last(now).as_millis() as u64;
        self.last_tick += Duration::from_millis(elapsed_ms);
        elapsed_ms
    }
}

/// Frame driver: draw, read input, advance gravity, dispatch intents
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
    audio: &mut AudioManager,
) -> io::Result<()> {
    let frame_duration = settings.frame_duration();
    let mut particles = ParticleSystem::new();
    let mut clock = FrameClock::new(Instant::now());

    loop {
        terminal.draw(|frame| ui::render_game(frame, game, settings, &particles))?;

        // Wait for input no longer than what is left of this frame,
        // then take everything else already queued
        let mut timeout = frame_duration.saturating_sub(clock.since_last(Instant::now()));
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match input::map_key(key, game.state()) {
                Some(Action::Quit) => {
                    tracing::info!("Quit requested");
                    return Ok(());
                }
                Some(action) => {
                    game.handle_input(action);
                    if action == Action::Reset {
                        particles.clear();
                    }
                }
                None => {}
            }
        }

        game.tick(clock.advance(Instant::now()));

        for event in game.take_events() {
            match event {
                GameEvent::Sound(sfx) => audio.play_sfx(sfx),
                GameEvent::Particle(spawn) => {
                    if settings.visual.show_particles {
                        particles.spawn(&spawn);
                    }
                }
            }
        }

        particles.update();
    }
}
