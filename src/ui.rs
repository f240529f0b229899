//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::effects::{Particle, ParticleSystem};
use crate::game::{Game, GameState};
use crate::highscores::HighScores;
use crate::input::CONTROLS;
use crate::settings::Settings;
use crate::tetromino::TetrominoType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// stats(20) + board(18) + next(12) = 50
const GAME_WIDTH: u16 = 50;
/// board rows + 2 for borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// Render the game screen with whatever overlay the phase calls for
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings, particles: &ParticleSystem) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // stats | board | next
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Length(12),
        ])
        .split(game_area);

    render_stats(frame, main_layout[0], game);
    render_board(frame, main_layout[1], game, settings, particles);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(main_layout[2]);

    render_next(frame, right_layout[0], game.next().piece_type, block_char);

    match game.state() {
        GameState::Paused => render_overlay(frame, area, "PAUSED", &["Press P to resume"]),
        GameState::GameOver => {
            let score = format!("Score: {}", game.score().points);
            render_overlay(
                frame,
                area,
                "GAME OVER",
                &[score.as_str(), "R to restart", "H for high scores"],
            );
        }
        GameState::ShowingHighScores => render_high_scores(frame, area, game.high_scores()),
        GameState::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, piece_type: TetrominoType, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_mini_piece(frame, inner, piece_type, block_char);
}

/// Render a small piece preview in its spawn orientation
fn render_mini_piece(frame: &mut Frame, area: Rect, piece_type: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = piece_type.color();
    let shape = piece_type.shape(0);

    // Normalize to the bounding box
    let min_x = shape.iter().map(|(x, _)| *x).min().unwrap_or(0);
    let min_y = shape.iter().map(|(_, y)| *y).min().unwrap_or(0);
    let max_y = shape.iter().map(|(_, y)| *y).max().unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for y in min_y..=max_y {
        let spans = (0..4)
            .map(|dx| {
                if shape.contains(&(min_x + dx, y)) {
                    Span::styled(block_char, Style::default().fg(color))
                } else {
                    Span::raw(EMPTY)
                }
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// The particle drawn over a board cell, if any
fn particle_at<'a>(particles: &'a [Particle], col: usize, row: usize) -> Option<&'a Particle> {
    particles
        .iter()
        .rev()
        .find(|p| p.x.floor() as i32 == col as i32 && p.y.floor() as i32 == row as i32)
}

/// Render the game board
fn render_board(
    frame: &mut Frame,
    area: Rect,
    game: &Game,
    settings: &Settings,
    particles: &ParticleSystem,
) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let show_ghost = settings.visual.show_ghost && game.state() == GameState::Running;
    let show_particles = settings.visual.show_particles;

    let block = Block::default()
        .title(" QUADFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = game.current();
    let current_cells = current.cells();
    let ghost_cells = game.ghost().cells();

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for (row, cells) in game.board().rows() {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);

        for (col, cell) in cells.iter().enumerate() {
            let pos = (col as i32, row as i32);
            let particle = if show_particles {
                particle_at(particles.particles(), col, row)
            } else {
                None
            };

            let (text, style) = if current_cells.contains(&pos) {
                (block_char, Style::default().fg(current.color()))
            } else if let Some(p) = particle {
                let style = Style::default().fg(p.color);
                // Fading particles go dim for the back half of their life
                let style = if p.alpha < 128.0 { style.dim() } else { style };
                let glyph = if p.size >= 3.0 { "••" } else { "··" };
                (glyph, style)
            } else if show_ghost && ghost_cells.contains(&pos) {
                (ghost_char, Style::default().fg(current.color()).dim())
            } else {
                match cell {
                    Cell::Filled(color) => (block_char, Style::default().fg(*color)),
                    Cell::Empty => (EMPTY, Style::default()),
                }
            };

            spans.push(Span::styled(text, style));
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel with the controls hint
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let mut lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(vec![
            Span::styled("LEVEL ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", score.level), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("LINES ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", score.lines), Style::default().fg(Color::Green)),
        ]),
        Line::raw(""),
    ];

    for (key, label) in CONTROLS {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<6}", key), Style::default().fg(Color::Magenta)),
            Span::styled(*label, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, body: &[&str]) {
    let popup_width = 26u16;
    let popup_height = 4 + body.len() as u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
    ];
    text.extend(
        body.iter()
            .map(|line| Line::styled(line.to_string(), Style::default().fg(Color::Gray))),
    );

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Lines of the high score table
fn high_score_lines(high_scores: &HighScores) -> Vec<String> {
    if high_scores.is_empty() {
        return vec!["No high scores yet!".to_string()];
    }
    high_scores
        .entries()
        .iter()
        .enumerate()
        .map(|(i, score)| format!("{}. {:>8}", i + 1, score))
        .collect()
}

/// Render the ranked high score list
fn render_high_scores(frame: &mut Frame, area: Rect, high_scores: &HighScores) {
    let mut body = high_score_lines(high_scores);
    body.push(String::new());
    body.push("H to go back".to_string());
    let body: Vec<&str> = body.iter().map(String::as_str).collect();
    render_overlay(frame, area, "HIGH SCORES", &body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn draw(game: &Game) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let settings = Settings::default();
        let particles = ParticleSystem::new();
        terminal
            .draw(|frame| render_game(frame, game, &settings, &particles))
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_high_score_lines() {
        assert_eq!(high_score_lines(&HighScores::default()), vec!["No high scores yet!"]);
        let scores = HighScores::from_scores(vec![40, 300]);
        assert_eq!(high_score_lines(&scores), vec!["1.      300", "2.       40"]);
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(center_rect(area, 20, 20), area);
        assert_eq!(center_rect(Rect::new(0, 0, 40, 20), 10, 4), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_running_screen_shows_stats() {
        let game = Game::with_seed(Box::new(MemoryStore::new()), 1);
        let text = draw(&game);
        assert!(text.contains("SCORE"));
        assert!(text.contains("NEXT"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_locked_cells_are_drawn() {
        let mut game = Game::with_seed(Box::new(MemoryStore::new()), 1);
        // Current piece and next preview, two glyphs per cell
        assert_eq!(draw(&game).matches('█').count(), 16);

        game.handle_input(crate::game::Action::HardDrop);
        assert_eq!(game.board().rows().flat_map(|(_, r)| r.iter()).filter(|c| c.is_filled()).count(), 4);
        assert_eq!(draw(&game).matches('█').count(), 24);
    }

    #[test]
    fn test_overlays_follow_phase() {
        let mut game = Game::with_seed(Box::new(MemoryStore::new()), 1);
        game.handle_input(crate::game::Action::Pause);
        assert!(draw(&game).contains("PAUSED"));

        game.handle_input(crate::game::Action::Resume);
        game.handle_input(crate::game::Action::ToggleHighScores);
        // Ignored while running
        assert!(!draw(&game).contains("HIGH SCORES"));
    }
}
