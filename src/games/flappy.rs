use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;

const GAME_WIDTH: f32 = 400.0;
const GAME_HEIGHT: f32 = 600.0;
const BIRD_X: f32 = 50.0;
const BIRD_SIZE: f32 = 30.0;
const GRAVITY: f32 = 0.5;
const FLAP_VELOCITY: f32 = -10.0;
const PIPE_WIDTH: f32 = 60.0;
const PIPE_GAP: f32 = 150.0;
const PIPE_SPEED: f32 = 3.0;
const PIPE_SPACING: f32 = 200.0;
const GAP_MARGIN: f32 = 50.0;

#[derive(Clone, Debug)]
struct Pipe {
    x: f32,
    /// Top of the gap; the gap extends PIPE_GAP below it.
    gap_y: f32,
    passed: bool,
}

pub struct Flappy {
    bird_y: f32,
    velocity: f32,
    pipes: Vec<Pipe>,
    score: u32,
    high_score: u32,
    game_over: bool,
    started: bool,
    paused: bool,
    tick: u64,
}

impl Flappy {
    pub fn new(high_score: u32) -> Self {
        Self {
            bird_y: GAME_HEIGHT / 2.0,
            velocity: 0.0,
            pipes: Vec::new(),
            score: 0,
            high_score,
            game_over: false,
            started: false,
            paused: false,
            tick: 0,
        }
    }

    /// One physics tick: the bird falls, then pipes, score and collisions settle.
    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.bird_y += self.velocity;
        self.velocity += GRAVITY;

        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
        }
        self.pipes.retain(|pipe| pipe.x > -PIPE_WIDTH);

        let needs_pipe = match self.pipes.last() {
            Some(last) => last.x < GAME_WIDTH - PIPE_SPACING,
            None => true,
        };
        if needs_pipe {
            self.pipes.push(Pipe {
                x: GAME_WIDTH,
                gap_y: rng.gen_range(GAP_MARGIN..GAME_HEIGHT - PIPE_GAP - GAP_MARGIN),
                passed: false,
            });
        }

        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.x + PIPE_WIDTH < BIRD_X {
                pipe.passed = true;
                self.score += 1;
            }
        }

        if self.hit_something() {
            self.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        }
    }

    fn hit_something(&self) -> bool {
        let top = self.bird_y;
        let bottom = self.bird_y + BIRD_SIZE;
        if top <= 0.0 || bottom >= GAME_HEIGHT {
            return true;
        }

        let left = BIRD_X;
        let right = BIRD_X + BIRD_SIZE;
        self.pipes.iter().any(|pipe| {
            right > pipe.x
                && left < pipe.x + PIPE_WIDTH
                && (top < pipe.gap_y || bottom > pipe.gap_y + PIPE_GAP)
        })
    }

    fn flap(&mut self) {
        self.velocity = FLAP_VELOCITY;
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default()); width]; height];
        let sx = width as f32 / GAME_WIDTH;
        let sy = height as f32 / GAME_HEIGHT;

        let edge = Style::default().fg(Color::Rgb(80, 85, 100));
        for x in 0..width {
            put(&mut grid, x, 0, '▔', edge);
            put(&mut grid, x, height.saturating_sub(1), '▁', edge);
        }

        let pipe_style = Style::default().fg(Color::Rgb(70, 190, 90));
        for pipe in &self.pipes {
            let cx0 = (pipe.x.max(0.0) * sx) as usize;
            let cx1 = (((pipe.x + PIPE_WIDTH) * sx) as usize).min(width);
            let gap_top = (pipe.gap_y * sy) as usize;
            let gap_bottom = ((pipe.gap_y + PIPE_GAP) * sy) as usize;
            for cx in cx0..cx1 {
                for cy in 0..gap_top.min(height) {
                    put(&mut grid, cx, cy, '█', pipe_style);
                }
                for cy in gap_bottom..height {
                    put(&mut grid, cx, cy, '█', pipe_style);
                }
            }
        }

        // Wings beat every few ticks.
        let body = if self.tick / 4 % 2 == 0 { '█' } else { '▓' };
        let bird_style = Style::default()
            .fg(Color::Rgb(255, 215, 70))
            .add_modifier(Modifier::BOLD);
        let bx0 = (BIRD_X * sx) as usize;
        let bx1 = ((BIRD_X + BIRD_SIZE) * sx).ceil() as usize;
        let by0 = (self.bird_y.max(0.0) * sy) as usize;
        let by1 = (((self.bird_y + BIRD_SIZE) * sy).ceil() as usize).min(height);
        for cy in by0..by1.max(by0 + 1).min(height) {
            for cx in bx0..bx1.max(bx0 + 1).min(width) {
                put(&mut grid, cx, cy, body, bird_style);
            }
        }

        grid.into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(ch, style)| Span::styled(ch.to_string(), style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

fn put(grid: &mut [Vec<(char, Style)>], x: usize, y: usize, ch: char, style: Style) {
    if y < grid.len() && x < grid[y].len() {
        grid[y][x] = (ch, style);
    }
}

impl Game for Flappy {
    fn update(&mut self) {
        if self.game_over || self.paused || !self.started {
            return;
        }
        self.tick += 1;
        self.step(&mut rand::thread_rng());
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.game_over && self.started {
                    self.paused = !self.paused;
                }
            }
            _ => {
                if self.game_over {
                    match key.code {
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            self.reset();
                            self.started = true;
                        }
                        _ => {}
                    }
                    return;
                }
                if !self.started {
                    match key.code {
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                            self.started = true;
                        }
                        _ => {}
                    }
                    return;
                }
                if self.paused {
                    return;
                }
                match key.code {
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                        self.flap();
                    }
                    _ => {}
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 🐤 Flappy Bird ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(255, 215, 70))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(120, 110, 50)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.score),
                Style::default()
                    .fg(Color::Rgb(255, 215, 70))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.high_score),
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let field = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(field), chunks[1]);

        let footer = if self.game_over {
            Line::from(vec![
                Span::styled(
                    " GAME OVER ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(180, 40, 40))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "  Enter/Space restart · R reset · Esc home",
                    Style::default().fg(Color::Gray),
                ),
            ])
        } else if !self.started {
            Line::from(Span::styled(
                " Press SPACE to start · Space/↑ flap",
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ))
        } else if self.paused {
            Line::from(vec![
                Span::styled(
                    " PAUSED ",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Rgb(255, 220, 80))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  P resumes", Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(Span::styled(
                " Space/↑ flap · P pause · R reset",
                Style::default().fg(Color::Rgb(90, 90, 110)),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn reset(&mut self) {
        *self = Flappy::new(self.high_score);
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn started(high_score: u32) -> Flappy {
        let mut game = Flappy::new(high_score);
        game.started = true;
        game
    }

    #[test]
    fn gravity_accelerates_the_fall() {
        let mut game = started(0);
        game.step(&mut thread_rng());
        assert_eq!(game.bird_y, GAME_HEIGHT / 2.0);
        assert_eq!(game.velocity, GRAVITY);
        game.step(&mut thread_rng());
        assert_eq!(game.bird_y, GAME_HEIGHT / 2.0 + GRAVITY);
        assert_eq!(game.velocity, GRAVITY * 2.0);
    }

    #[test]
    fn flap_snaps_velocity_upward() {
        let mut game = started(0);
        game.velocity = 4.0;
        game.flap();
        assert_eq!(game.velocity, FLAP_VELOCITY);
    }

    #[test]
    fn first_pipe_spawns_at_the_right_edge() {
        let mut game = started(0);
        game.step(&mut thread_rng());
        assert_eq!(game.pipes.len(), 1);
        assert_eq!(game.pipes[0].x, GAME_WIDTH);
        let gap_y = game.pipes[0].gap_y;
        assert!(gap_y >= GAP_MARGIN);
        assert!(gap_y <= GAME_HEIGHT - PIPE_GAP - GAP_MARGIN);
    }

    #[test]
    fn pipes_scroll_and_respawn_on_spacing() {
        let mut game = started(0);
        // First spawn sits at x = 400; a second appears once it passes 200.
        let mut steps = 0;
        while game.pipes.len() < 2 && steps < 200 {
            game.velocity = 0.0;
            game.bird_y = GAME_HEIGHT / 2.0;
            game.step(&mut thread_rng());
            steps += 1;
        }
        assert_eq!(game.pipes.len(), 2);
        assert!(game.pipes[0].x < GAME_WIDTH - PIPE_SPACING);
    }

    #[test]
    fn passing_a_pipe_scores_once() {
        let mut game = started(0);
        game.pipes.push(Pipe {
            x: -8.0,
            gap_y: 200.0,
            passed: false,
        });
        game.bird_y = 300.0;
        game.velocity = 0.0;
        game.step(&mut thread_rng());
        assert_eq!(game.score, 1);
        assert!(!game.game_over);

        game.velocity = 0.0;
        game.bird_y = 300.0;
        game.step(&mut thread_rng());
        assert_eq!(game.score, 1);
    }

    #[test]
    fn ceiling_ends_the_run() {
        let mut game = started(0);
        game.bird_y = 2.0;
        game.velocity = -5.0;
        game.step(&mut thread_rng());
        assert!(game.game_over);
    }

    #[test]
    fn floor_ends_the_run() {
        let mut game = started(0);
        game.bird_y = GAME_HEIGHT - BIRD_SIZE - 1.0;
        game.velocity = 5.0;
        game.step(&mut thread_rng());
        assert!(game.game_over);
    }

    #[test]
    fn the_gap_is_safe_to_fly_through() {
        let mut game = started(0);
        game.pipes.push(Pipe {
            x: 53.0,
            gap_y: 200.0,
            passed: false,
        });
        game.bird_y = 250.0;
        game.velocity = 0.0;
        game.step(&mut thread_rng());
        assert!(!game.game_over);
    }

    #[test]
    fn hitting_a_pipe_ends_the_run() {
        let mut game = started(0);
        game.pipes.push(Pipe {
            x: 53.0,
            gap_y: 200.0,
            passed: false,
        });
        // Above the gap while overlapping the pipe column.
        game.bird_y = 100.0;
        game.velocity = 0.0;
        game.step(&mut thread_rng());
        assert!(game.game_over);
    }

    #[test]
    fn restart_clears_the_sky_and_keeps_best() {
        let mut game = started(0);
        game.score = 9;
        game.bird_y = 2.0;
        game.velocity = -5.0;
        game.step(&mut thread_rng());
        assert!(game.game_over);
        assert_eq!(game.high_score, 9);

        game.handle_input(KeyEvent::from(KeyCode::Enter));
        assert!(!game.game_over);
        assert!(game.started);
        assert!(game.pipes.is_empty());
        assert_eq!(game.score, 0);
        assert_eq!(game.bird_y, GAME_HEIGHT / 2.0);
        assert_eq!(game.high_score, 9);
    }

    #[test]
    fn paused_game_holds_still() {
        let mut game = started(0);
        game.paused = true;
        for _ in 0..30 {
            game.update();
        }
        assert_eq!(game.bird_y, GAME_HEIGHT / 2.0);
        assert!(game.pipes.is_empty());
    }
}
