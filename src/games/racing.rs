use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;

const GAME_WIDTH: f32 = 400.0;
const GAME_HEIGHT: f32 = 600.0;
const LANE_COUNT: usize = 3;
const LANE_WIDTH: f32 = GAME_WIDTH / LANE_COUNT as f32;
const CAR_WIDTH: f32 = 40.0;
const CAR_HEIGHT: f32 = 60.0;
const PLAYER_Y: f32 = 500.0;
const START_LANE: usize = 1;
const OBSTACLE_SPEED: f32 = 4.0;
const SPAWN_RATE: f64 = 0.02;
const SPAWN_CLEARANCE: f32 = 100.0;
const SPEED_GAIN: f32 = 0.001;
const MAX_SPEED: f32 = 3.0;

const CAR_COLORS: [Color; 5] = [
    Color::Rgb(225, 85, 85),
    Color::Rgb(235, 155, 65),
    Color::Rgb(185, 95, 225),
    Color::Rgb(95, 210, 95),
    Color::Rgb(235, 220, 90),
];

#[derive(Clone, Debug)]
struct ObstacleCar {
    lane: usize,
    y: f32,
    color: Color,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RacingInput {
    SteerLeft,
    SteerRight,
}

fn input_for(code: KeyCode) -> Option<RacingInput> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(RacingInput::SteerLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(RacingInput::SteerRight),
        _ => None,
    }
}

pub struct Racing {
    player_lane: usize,
    obstacles: Vec<ObstacleCar>,
    score: u32,
    high_score: u32,
    speed: f32,
    distance: f32,
    game_over: bool,
    started: bool,
    paused: bool,
}

impl Racing {
    pub fn new(high_score: u32) -> Self {
        Self {
            player_lane: START_LANE,
            obstacles: Vec::new(),
            score: 0,
            high_score,
            speed: 1.0,
            distance: 0.0,
            game_over: false,
            started: false,
            paused: false,
        }
    }

    /// One road tick: traffic advances, then spawns and meters settle.
    fn step<R: Rng>(&mut self, rng: &mut R) {
        for car in &mut self.obstacles {
            car.y += OBSTACLE_SPEED * self.speed;
        }
        self.obstacles.retain(|car| car.y < GAME_HEIGHT + CAR_HEIGHT);

        if rng.gen_bool(SPAWN_RATE * self.speed as f64) {
            let lane = rng.gen_range(0..LANE_COUNT);
            let lane_is_clear = !self
                .obstacles
                .iter()
                .any(|car| car.lane == lane && car.y < SPAWN_CLEARANCE);
            if lane_is_clear {
                self.obstacles.push(ObstacleCar {
                    lane,
                    y: -CAR_HEIGHT,
                    color: CAR_COLORS[rng.gen_range(0..CAR_COLORS.len())],
                });
            }
        }

        self.distance += self.speed;
        self.score += self.speed as u32;
        self.speed = (self.speed + SPEED_GAIN).min(MAX_SPEED);

        self.settle_collision();
    }

    /// Lanes share an x band, so overlap reduces to lane equality plus a
    /// vertical interval check.
    fn hit_traffic(&self) -> bool {
        self.obstacles.iter().any(|car| {
            car.lane == self.player_lane
                && car.y < PLAYER_Y + CAR_HEIGHT
                && car.y + CAR_HEIGHT > PLAYER_Y
        })
    }

    /// Crash transition; road ticks and lane changes both settle through it.
    fn settle_collision(&mut self) {
        if self.hit_traffic() {
            self.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        }
    }

    fn apply_input(&mut self, input: RacingInput) {
        match input {
            RacingInput::SteerLeft => {
                if self.player_lane > 0 {
                    self.player_lane -= 1;
                }
            }
            RacingInput::SteerRight => {
                if self.player_lane < LANE_COUNT - 1 {
                    self.player_lane += 1;
                }
            }
        }
        // A lane change can create the overlap itself.
        self.settle_collision();
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default()); width]; height];
        let sx = width as f32 / GAME_WIDTH;
        let sy = height as f32 / GAME_HEIGHT;

        let barrier = Style::default().fg(Color::Rgb(200, 170, 60));
        let divider = Style::default().fg(Color::Rgb(90, 95, 110));
        let scroll = (self.distance / 10.0) as usize;
        for cy in 0..height {
            put(&mut grid, 0, cy, '║', barrier);
            put(&mut grid, width.saturating_sub(1), cy, '║', barrier);
            // Dashed lane dividers crawl with the road.
            if (cy + scroll) % 4 < 2 {
                for lane in 1..LANE_COUNT {
                    let cx = (LANE_WIDTH * lane as f32 * sx) as usize;
                    put(&mut grid, cx, cy, '┆', divider);
                }
            }
        }

        for car in &self.obstacles {
            draw_car(&mut grid, car.lane, car.y, sx, sy, Style::default().fg(car.color));
        }
        draw_car(
            &mut grid,
            self.player_lane,
            PLAYER_Y,
            sx,
            sy,
            Style::default()
                .fg(Color::Rgb(90, 220, 220))
                .add_modifier(Modifier::BOLD),
        );

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

fn draw_car(
    grid: &mut [Vec<(char, Style)>],
    lane: usize,
    y: f32,
    sx: f32,
    sy: f32,
    style: Style,
) {
    let height = grid.len();
    let x = lane as f32 * LANE_WIDTH + (LANE_WIDTH - CAR_WIDTH) / 2.0;
    let cx0 = (x * sx) as usize;
    let cx1 = ((x + CAR_WIDTH) * sx).ceil() as usize;
    let cy0 = (y.max(0.0) * sy) as usize;
    let cy1 = ((y + CAR_HEIGHT).max(0.0) * sy).ceil() as usize;
    if y + CAR_HEIGHT < 0.0 {
        return;
    }
    let last = cy1.max(cy0 + 1).min(height);
    for cy in cy0..last {
        let ch = if cy == cy0 {
            '▄'
        } else if cy + 1 == last {
            '▀'
        } else {
            '█'
        };
        for cx in cx0..cx1.max(cx0 + 1) {
            put(grid, cx, cy, ch, style);
        }
    }
}

fn put(grid: &mut [Vec<(char, Style)>], x: usize, y: usize, ch: char, style: Style) {
    if y < grid.len() && x < grid[y].len() {
        grid[y][x] = (ch, style);
    }
}

impl Game for Racing {
    fn update(&mut self) {
        if self.game_over || self.paused || !self.started {
            return;
        }
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
                if let Some(input) = input_for(key.code) {
                    self.apply_input(input);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 🏎 Car Racing ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(225, 85, 85))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(120, 50, 50)));
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
                    .fg(Color::Rgb(225, 85, 85))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.high_score),
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ),
            Span::styled("  Distance: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}m", (self.distance / 10.0) as u32),
                Style::default().fg(Color::Rgb(120, 190, 255)),
            ),
            Span::styled("  Speed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}x", self.speed),
                Style::default().fg(Color::Rgb(120, 255, 170)),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let field = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(field), chunks[1]);

        let footer = if self.game_over {
            Line::from(vec![
                Span::styled(
                    " CRASHED ",
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
                " Press SPACE to start · ←/→ change lanes",
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
                " ←/→ change lanes · P pause · R reset",
                Style::default().fg(Color::Rgb(90, 90, 110)),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn reset(&mut self) {
        *self = Racing::new(self.high_score);
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
