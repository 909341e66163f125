use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::event::TICK_MS;
use crate::games::Game;

const GRID_SIZE: i32 = 20;
const STEP_MS: u64 = 150;
const FOOD_POINTS: u32 = 10;
const START_CELL: Cell = Cell { x: 10, y: 10 };
const START_FOOD: Cell = Cell { x: 15, y: 15 };

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Maps a gameplay key to the turn it requests, if any.
fn turn_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

pub struct Snake {
    /// Head first, tail last. Never empty.
    body: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    score: u32,
    high_score: u32,
    game_over: bool,
    started: bool,
    paused: bool,
    step_ms: u64,
}

impl Snake {
    pub fn new(high_score: u32) -> Self {
        let mut body = VecDeque::new();
        body.push_back(START_CELL);
        Self {
            body,
            food: START_FOOD,
            direction: Direction::Right,
            score: 0,
            high_score,
            game_over: false,
            started: false,
            paused: false,
            step_ms: 0,
        }
    }

    /// One grid step: move the head, settle food and collisions.
    fn step<R: Rng>(&mut self, rng: &mut R) {
        let Some(&head) = self.body.front() else {
            return;
        };
        let (dx, dy) = self.direction.delta();
        let new_head = Cell {
            x: head.x + dx,
            y: head.y + dy,
        };

        let hit_wall = new_head.x < 0
            || new_head.x >= GRID_SIZE
            || new_head.y < 0
            || new_head.y >= GRID_SIZE;
        if hit_wall || self.body.contains(&new_head) {
            self.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            return;
        }

        self.body.push_front(new_head);
        if new_head == self.food {
            self.score += FOOD_POINTS;
            self.spawn_food(rng);
        } else {
            self.body.pop_back();
        }
    }

    /// Turns take effect immediately; a reversal into the neck is ignored.
    fn apply_turn(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.direction = dir;
        }
    }

    fn spawn_food<R: Rng>(&mut self, rng: &mut R) {
        loop {
            let cell = Cell {
                x: rng.gen_range(0..GRID_SIZE),
                y: rng.gen_range(0..GRID_SIZE),
            };
            if !self.body.contains(&cell) {
                self.food = cell;
                return;
            }
        }
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let grid = GRID_SIZE as usize;
        let left_pad = width.saturating_sub(grid * 2) / 2;
        let top_pad = height.saturating_sub(grid) / 2;

        let mut lines: Vec<Line> = Vec::with_capacity(top_pad + grid);
        for _ in 0..top_pad {
            lines.push(Line::from(""));
        }
        for y in 0..GRID_SIZE {
            let mut spans: Vec<Span> = Vec::with_capacity(grid + 1);
            spans.push(Span::raw(" ".repeat(left_pad)));
            for x in 0..GRID_SIZE {
                let cell = Cell { x, y };
                let span = if self.body.front() == Some(&cell) {
                    Span::styled(
                        "██",
                        Style::default()
                            .fg(Color::Rgb(150, 255, 150))
                            .add_modifier(Modifier::BOLD),
                    )
                } else if self.body.contains(&cell) {
                    Span::styled("██", Style::default().fg(Color::Rgb(60, 190, 70)))
                } else if cell == self.food {
                    Span::styled(
                        "◆ ",
                        Style::default()
                            .fg(Color::Rgb(255, 95, 95))
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::Rgb(35, 40, 50)))
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Game for Snake {
    fn update(&mut self) {
        if self.game_over || self.paused || !self.started {
            return;
        }
        self.step_ms += TICK_MS;
        if self.step_ms < STEP_MS {
            return;
        }
        self.step_ms = 0;
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
                if let Some(dir) = turn_for(key.code) {
                    self.apply_turn(dir);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 🐍 Snake ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(120, 230, 120))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 120, 60)));
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
                    .fg(Color::Rgb(150, 255, 150))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.high_score),
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ),
            Span::styled("  Length: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.body.len()),
                Style::default().fg(Color::Rgb(120, 190, 255)),
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
                " Press SPACE to start · arrows/WASD steer",
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
                " arrows/WASD steer · P pause · R reset",
                Style::default().fg(Color::Rgb(90, 90, 110)),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn reset(&mut self) {
        *self = Snake::new(self.high_score);
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

    fn started(high_score: u32) -> Snake {
        let mut game = Snake::new(high_score);
        game.started = true;
        game
    }

    #[test]
    fn five_steps_right_from_start() {
        let mut game = started(0);
        for _ in 0..5 {
            game.step(&mut thread_rng());
        }
        assert_eq!(game.body.front(), Some(&Cell { x: 15, y: 10 }));
        assert_eq!(game.body.len(), 1);
        assert_eq!(game.score, 0);
        assert!(!game.game_over);
    }

    #[test]
    fn step_fires_on_the_150ms_boundary() {
        let mut game = started(0);
        // 9 ticks = 144 ms, below the step interval
        for _ in 0..9 {
            game.update();
        }
        assert_eq!(game.body.front(), Some(&START_CELL));
        game.update();
        assert_eq!(game.body.front(), Some(&Cell { x: 11, y: 10 }));
    }

    #[test]
    fn reversal_is_ignored_others_apply() {
        let mut game = started(0);
        game.apply_turn(Direction::Left);
        assert_eq!(game.direction, Direction::Right);
        game.apply_turn(Direction::Up);
        assert_eq!(game.direction, Direction::Up);
        game.apply_turn(Direction::Down);
        assert_eq!(game.direction, Direction::Up);
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut game = started(0);
        game.food = Cell { x: 11, y: 10 };
        game.step(&mut thread_rng());
        assert_eq!(game.body.len(), 2);
        assert_eq!(game.score, FOOD_POINTS);
        assert!(!game.body.contains(&game.food));
    }

    #[test]
    fn length_is_stable_without_food() {
        let mut game = started(0);
        game.step(&mut thread_rng());
        game.step(&mut thread_rng());
        assert_eq!(game.body.len(), 1);
    }

    #[test]
    fn wall_collision_ends_the_run() {
        let mut game = started(0);
        game.body = VecDeque::from([Cell { x: 19, y: 10 }]);
        game.step(&mut thread_rng());
        assert!(game.game_over);
        assert_eq!(game.body.len(), 1);
    }

    #[test]
    fn biting_the_tail_ends_the_run() {
        let mut game = started(0);
        game.body = VecDeque::from([
            Cell { x: 5, y: 5 },
            Cell { x: 6, y: 5 },
            Cell { x: 6, y: 6 },
            Cell { x: 5, y: 6 },
        ]);
        game.direction = Direction::Down;
        game.step(&mut thread_rng());
        assert!(game.game_over);
    }

    #[test]
    fn food_never_lands_on_the_body() {
        let mut game = started(0);
        game.body = VecDeque::from([
            Cell { x: 3, y: 3 },
            Cell { x: 4, y: 3 },
            Cell { x: 5, y: 3 },
            Cell { x: 5, y: 4 },
            Cell { x: 5, y: 5 },
        ]);
        let mut rng = thread_rng();
        for _ in 0..100 {
            game.spawn_food(&mut rng);
            assert!(!game.body.contains(&game.food));
            let f = game.food;
            assert!(f.x >= 0 && f.x < GRID_SIZE && f.y >= 0 && f.y < GRID_SIZE);
        }
    }

    #[test]
    fn paused_game_ignores_ticks() {
        let mut game = started(0);
        game.paused = true;
        for _ in 0..30 {
            game.update();
        }
        assert_eq!(game.body.front(), Some(&START_CELL));
        assert!(game.paused);
    }

    #[test]
    fn pause_toggle_round_trips() {
        let mut game = started(0);
        game.handle_input(KeyEvent::from(KeyCode::Char('p')));
        assert!(game.paused);
        game.handle_input(KeyEvent::from(KeyCode::Char('p')));
        assert!(!game.paused);
    }

    #[test]
    fn pause_has_no_effect_before_start_or_after_game_over() {
        let mut game = Snake::new(0);
        game.handle_input(KeyEvent::from(KeyCode::Char('p')));
        assert!(!game.paused);
        game.started = true;
        game.game_over = true;
        game.handle_input(KeyEvent::from(KeyCode::Char('p')));
        assert!(!game.paused);
    }

    #[test]
    fn restart_from_game_over_enters_a_fresh_run() {
        let mut game = started(0);
        game.score = 40;
        game.body = VecDeque::from([Cell { x: 0, y: 0 }]);
        game.direction = Direction::Left;
        game.step(&mut thread_rng());
        assert!(game.game_over);
        assert_eq!(game.high_score, 40);

        game.handle_input(KeyEvent::from(KeyCode::Enter));
        assert!(!game.game_over);
        assert!(game.started);
        assert_eq!(game.score, 0);
        assert_eq!(game.body.front(), Some(&START_CELL));
        assert_eq!(game.high_score, 40);
    }

    #[test]
    fn reset_returns_to_idle_and_keeps_best() {
        let mut game = started(7);
        game.score = 30;
        game.handle_input(KeyEvent::from(KeyCode::Char('r')));
        assert!(!game.started);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 7);
    }

    #[test]
    fn turns_are_blocked_while_paused() {
        let mut game = started(0);
        game.paused = true;
        game.handle_input(KeyEvent::from(KeyCode::Up));
        assert_eq!(game.direction, Direction::Right);
    }
}
