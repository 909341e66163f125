use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::event::TICK_MS;
use crate::games::Game;

const GRID_WIDTH: i32 = 10;
const GRID_HEIGHT: i32 = 20;
const POINTS_PER_LINE: u32 = 100;
const LINES_PER_LEVEL: u32 = 10;
const INITIAL_FALL_MS: u64 = 800;
const FALL_MS_PER_LEVEL: u64 = 50;
const MIN_FALL_MS: u64 = 100;

/// Cell offsets of one rotation, relative to the piece origin.
type Shape = [(i32, i32); 4];

const I_ROTATIONS: [Shape; 1] = [[(0, 0), (1, 0), (2, 0), (3, 0)]];
const O_ROTATIONS: [Shape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];
const T_ROTATIONS: [Shape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];
const S_ROTATIONS: [Shape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];
const Z_ROTATIONS: [Shape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];
const J_ROTATIONS: [Shape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];
const L_ROTATIONS: [Shape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    fn random<R: Rng>(rng: &mut R) -> PieceKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    fn rotations(self) -> &'static [Shape] {
        match self {
            PieceKind::I => &I_ROTATIONS,
            PieceKind::O => &O_ROTATIONS,
            PieceKind::T => &T_ROTATIONS,
            PieceKind::S => &S_ROTATIONS,
            PieceKind::Z => &Z_ROTATIONS,
            PieceKind::J => &J_ROTATIONS,
            PieceKind::L => &L_ROTATIONS,
        }
    }

    fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Rgb(90, 220, 220),
            PieceKind::O => Color::Rgb(235, 220, 90),
            PieceKind::T => Color::Rgb(185, 95, 225),
            PieceKind::S => Color::Rgb(95, 210, 95),
            PieceKind::Z => Color::Rgb(225, 85, 85),
            PieceKind::J => Color::Rgb(90, 130, 235),
            PieceKind::L => Color::Rgb(235, 155, 65),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Piece {
    kind: PieceKind,
    rotation: usize,
    x: i32,
    y: i32,
}

impl Piece {
    fn spawn(kind: PieceKind) -> Self {
        Piece {
            kind,
            rotation: 0,
            x: GRID_WIDTH / 2 - 1,
            y: 0,
        }
    }

    fn cells(&self) -> [(i32, i32); 4] {
        let rotations = self.kind.rotations();
        let shape = rotations[self.rotation % rotations.len()];
        shape.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    fn rotated(&self) -> Piece {
        let mut piece = *self;
        piece.rotation = (piece.rotation + 1) % piece.kind.rotations().len();
        piece
    }

    fn shifted(&self, dx: i32, dy: i32) -> Piece {
        let mut piece = *self;
        piece.x += dx;
        piece.y += dy;
        piece
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TetrisInput {
    Left,
    Right,
    SoftDrop,
    Rotate,
    HardDrop,
}

fn input_for(code: KeyCode) -> Option<TetrisInput> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(TetrisInput::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(TetrisInput::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(TetrisInput::SoftDrop),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(TetrisInput::Rotate)
        }
        KeyCode::Enter => Some(TetrisInput::HardDrop),
        _ => None,
    }
}

pub struct Tetris {
    /// Row 0 is the top of the well.
    grid: Vec<Vec<Option<PieceKind>>>,
    current: Piece,
    next: PieceKind,
    score: u32,
    high_score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u64,
    fall_ms: u64,
    game_over: bool,
    started: bool,
    paused: bool,
}

impl Tetris {
    pub fn new(high_score: u32) -> Self {
        let mut rng = rand::thread_rng();
        let first = PieceKind::random(&mut rng);
        let next = PieceKind::random(&mut rng);
        Self::with_pieces(first, next, high_score)
    }

    fn with_pieces(first: PieceKind, next: PieceKind, high_score: u32) -> Self {
        Self {
            grid: vec![vec![None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            current: Piece::spawn(first),
            next,
            score: 0,
            high_score,
            lines: 0,
            level: 1,
            fall_interval_ms: INITIAL_FALL_MS,
            fall_ms: 0,
            game_over: false,
            started: false,
            paused: false,
        }
    }

    /// A piece fits if every cell is inside the well walls and floor and not
    /// on a settled cell. Cells above the top edge are allowed.
    fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= GRID_WIDTH || y >= GRID_HEIGHT {
                return false;
            }
            y < 0 || self.grid[y as usize][x as usize].is_none()
        })
    }

    /// Descend one row; on contact lock the piece, clear rows and spawn the
    /// next piece. A blocked spawn ends the run.
    fn step_down<R: Rng>(&mut self, rng: &mut R) {
        let moved = self.current.shifted(0, 1);
        if self.fits(&moved) {
            self.current = moved;
            return;
        }

        self.lock_current();
        let cleared = self.clear_full_rows();
        if cleared > 0 {
            // Line points scale with the level the rows were cleared at.
            self.score += cleared * POINTS_PER_LINE * self.level;
            self.lines += cleared;
            self.level = self.lines / LINES_PER_LEVEL + 1;
            self.fall_interval_ms = INITIAL_FALL_MS
                .saturating_sub((self.level as u64 - 1) * FALL_MS_PER_LEVEL)
                .max(MIN_FALL_MS);
        }

        let spawned = Piece::spawn(self.next);
        if self.fits(&spawned) {
            self.current = spawned;
            self.next = PieceKind::random(rng);
        } else {
            self.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        }
    }

    fn lock_current(&mut self) {
        let kind = self.current.kind;
        for (x, y) in self.current.cells() {
            if y >= 0 {
                self.grid[y as usize][x as usize] = Some(kind);
            }
        }
    }

    /// Drops every full row and backfills empty rows at the top, keeping the
    /// order of the surviving rows.
    fn clear_full_rows(&mut self) -> u32 {
        let before = self.grid.len();
        self.grid.retain(|row| row.iter().any(|cell| cell.is_none()));
        let cleared = before - self.grid.len();
        for _ in 0..cleared {
            self.grid.insert(0, vec![None; GRID_WIDTH as usize]);
        }
        cleared as u32
    }

    fn apply_input<R: Rng>(&mut self, input: TetrisInput, rng: &mut R) {
        match input {
            TetrisInput::Left => {
                let moved = self.current.shifted(-1, 0);
                if self.fits(&moved) {
                    self.current = moved;
                }
            }
            TetrisInput::Right => {
                let moved = self.current.shifted(1, 0);
                if self.fits(&moved) {
                    self.current = moved;
                }
            }
            TetrisInput::SoftDrop => self.step_down(rng),
            TetrisInput::Rotate => {
                // No wall kicks: a rotation that does not fit is dropped.
                let rotated = self.current.rotated();
                if self.fits(&rotated) {
                    self.current = rotated;
                }
            }
            TetrisInput::HardDrop => {
                let mut dropped = self.current;
                loop {
                    let lower = dropped.shifted(0, 1);
                    if !self.fits(&lower) {
                        break;
                    }
                    dropped = lower;
                }
                self.current = dropped;
                self.step_down(rng);
            }
        }
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let mut grid: Vec<Vec<(char, Style)>> =
            vec![vec![(' ', Style::default()); width]; height];

        let well_w = GRID_WIDTH as usize * 2 + 2;
        let well_h = GRID_HEIGHT as usize + 2;
        let x0 = width.saturating_sub(well_w + 15) / 2;
        let y0 = height.saturating_sub(well_h) / 2;

        let wall = Style::default().fg(Color::Rgb(100, 100, 130));
        put(&mut grid, x0, y0, '┌', wall);
        put(&mut grid, x0 + well_w - 1, y0, '┐', wall);
        put(&mut grid, x0, y0 + well_h - 1, '└', wall);
        put(&mut grid, x0 + well_w - 1, y0 + well_h - 1, '┘', wall);
        for cx in 1..well_w - 1 {
            put(&mut grid, x0 + cx, y0, '─', wall);
            put(&mut grid, x0 + cx, y0 + well_h - 1, '─', wall);
        }
        for cy in 1..well_h - 1 {
            put(&mut grid, x0, y0 + cy, '│', wall);
            put(&mut grid, x0 + well_w - 1, y0 + cy, '│', wall);
        }

        let dim = Style::default().fg(Color::Rgb(35, 40, 50));
        for y in 0..GRID_HEIGHT as usize {
            for x in 0..GRID_WIDTH as usize {
                let (cx, cy) = (x0 + 1 + x * 2, y0 + 1 + y);
                match self.grid[y][x] {
                    Some(kind) => {
                        let style = Style::default().fg(kind.color());
                        put(&mut grid, cx, cy, '█', style);
                        put(&mut grid, cx + 1, cy, '█', style);
                    }
                    None => put(&mut grid, cx, cy, '·', dim),
                }
            }
        }

        if !self.game_over {
            let style = Style::default()
                .fg(self.current.kind.color())
                .add_modifier(Modifier::BOLD);
            for (x, y) in self.current.cells() {
                if y >= 0 {
                    let (cx, cy) = (x0 + 1 + x as usize * 2, y0 + 1 + y as usize);
                    put(&mut grid, cx, cy, '█', style);
                    put(&mut grid, cx + 1, cy, '█', style);
                }
            }
        }

        let sx = x0 + well_w + 3;
        let label = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        put_str(&mut grid, sx, y0 + 1, "NEXT", label);
        let preview = Style::default().fg(self.next.color());
        for (dx, dy) in self.next.rotations()[0] {
            let (cx, cy) = (sx + dx as usize * 2, y0 + 3 + dy as usize);
            put(&mut grid, cx, cy, '█', preview);
            put(&mut grid, cx + 1, cy, '█', preview);
        }
        put_str(&mut grid, sx, y0 + 7, &format!("LINES {}", self.lines), label);
        put_str(&mut grid, sx, y0 + 9, &format!("LEVEL {}", self.level), label);

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

fn put_str(grid: &mut [Vec<(char, Style)>], x: usize, y: usize, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        put(grid, x + i, y, ch, style);
    }
}

impl Game for Tetris {
    fn update(&mut self) {
        if self.game_over || self.paused || !self.started {
            return;
        }
        self.fall_ms += TICK_MS;
        if self.fall_ms < self.fall_interval_ms {
            return;
        }
        self.fall_ms = 0;
        self.step_down(&mut rand::thread_rng());
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
                    self.apply_input(input, &mut rand::thread_rng());
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 🧩 Tetris ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(185, 95, 225))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(95, 60, 120)));
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
                    .fg(Color::Rgb(185, 95, 225))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.high_score),
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ),
            Span::styled("  Lines: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.lines),
                Style::default().fg(Color::Rgb(120, 190, 255)),
            ),
            Span::styled("  Level: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", self.level),
                Style::default().fg(Color::Rgb(120, 255, 170)),
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
                " Press SPACE to start · ←/→ move · ↑ rotate · ↓ drop",
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
                " ←/→ move · ↑/Space rotate · ↓ soft drop · Enter hard drop · P pause",
                Style::default().fg(Color::Rgb(90, 90, 110)),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn reset(&mut self) {
        *self = Tetris::new(self.high_score);
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

    fn started(first: PieceKind, next: PieceKind) -> Tetris {
        let mut game = Tetris::with_pieces(first, next, 0);
        game.started = true;
        game
    }

    fn fill_row(game: &mut Tetris, y: usize, from: usize, to: usize, kind: PieceKind) {
        for x in from..to {
            game.grid[y][x] = Some(kind);
        }
    }

    #[test]
    fn every_rotation_has_four_cells_in_a_4x4_box() {
        for kind in PieceKind::ALL {
            for shape in kind.rotations() {
                assert_eq!(shape.len(), 4);
                for &(dx, dy) in shape {
                    assert!((0..4).contains(&dx), "{kind:?} dx {dx}");
                    assert!((0..4).contains(&dy), "{kind:?} dy {dy}");
                }
            }
        }
    }

    #[test]
    fn gravity_fires_on_the_fall_interval() {
        let mut game = started(PieceKind::I, PieceKind::O);
        // 49 ticks = 784 ms, below the 800 ms starting interval
        for _ in 0..49 {
            game.update();
        }
        assert_eq!(game.current.y, 0);
        game.update();
        assert_eq!(game.current.y, 1);
    }

    #[test]
    fn soft_drop_descends_one_row() {
        let mut game = started(PieceKind::T, PieceKind::O);
        game.apply_input(TetrisInput::SoftDrop, &mut thread_rng());
        assert_eq!(game.current.y, 1);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn side_moves_stop_at_the_walls() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.current = Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 0,
            y: 5,
        };
        game.apply_input(TetrisInput::Left, &mut thread_rng());
        assert_eq!(game.current.x, 0);

        game.current.x = 6;
        game.apply_input(TetrisInput::Right, &mut thread_rng());
        assert_eq!(game.current.x, 6);
    }

    #[test]
    fn blocked_side_move_does_not_lock() {
        let mut game = started(PieceKind::O, PieceKind::T);
        game.current = Piece {
            kind: PieceKind::O,
            rotation: 0,
            x: 0,
            y: 5,
        };
        game.apply_input(TetrisInput::Left, &mut thread_rng());
        assert!(game.grid.iter().flatten().all(|cell| cell.is_none()));
        assert_eq!(game.current.y, 5);
    }

    #[test]
    fn rotation_against_the_wall_is_rejected() {
        let mut game = started(PieceKind::T, PieceKind::O);
        // Vertical T hugging the right wall; the next rotation needs 3 columns.
        game.current = Piece {
            kind: PieceKind::T,
            rotation: 1,
            x: 8,
            y: 5,
        };
        game.apply_input(TetrisInput::Rotate, &mut thread_rng());
        assert_eq!(game.current.rotation, 1);
        assert_eq!(game.current.x, 8);

        game.current.x = 4;
        game.apply_input(TetrisInput::Rotate, &mut thread_rng());
        assert_eq!(game.current.rotation, 2);
    }

    #[test]
    fn clearing_rows_keeps_survivor_order() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.grid[17][0] = Some(PieceKind::T);
        fill_row(&mut game, 18, 0, 10, PieceKind::O);
        fill_row(&mut game, 19, 0, 10, PieceKind::O);

        let cleared = game.clear_full_rows();
        assert_eq!(cleared, 2);
        assert_eq!(game.grid.len(), GRID_HEIGHT as usize);
        assert_eq!(game.grid[19][0], Some(PieceKind::T));
        assert!(game.grid[0].iter().all(|cell| cell.is_none()));
        assert!(game.grid[1].iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn locking_into_a_full_row_scores_it() {
        let mut game = started(PieceKind::I, PieceKind::O);
        fill_row(&mut game, 19, 4, 10, PieceKind::L);
        game.current = Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 0,
            y: 19,
        };
        game.step_down(&mut thread_rng());

        assert_eq!(game.score, 100);
        assert_eq!(game.lines, 1);
        assert_eq!(game.level, 1);
        assert!(game.grid[19].iter().all(|cell| cell.is_none()));
        assert_eq!(game.current.kind, PieceKind::O);
        assert_eq!((game.current.x, game.current.y), (4, 0));
    }

    #[test]
    fn clearing_two_rows_at_once_scores_both() {
        let mut game = started(PieceKind::O, PieceKind::T);
        fill_row(&mut game, 18, 0, 4, PieceKind::L);
        fill_row(&mut game, 18, 6, 10, PieceKind::L);
        fill_row(&mut game, 19, 0, 4, PieceKind::L);
        fill_row(&mut game, 19, 6, 10, PieceKind::L);
        // The O plugs the two-column hole in both rows when it locks.
        game.current = Piece {
            kind: PieceKind::O,
            rotation: 0,
            x: 4,
            y: 18,
        };
        game.step_down(&mut thread_rng());

        assert_eq!(game.score, 200);
        assert_eq!(game.lines, 2);
        assert_eq!(game.level, 1);
        assert!(game.grid.iter().flatten().all(|cell| cell.is_none()));
    }

    #[test]
    fn level_up_uses_the_old_level_for_points() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.lines = 9;
        fill_row(&mut game, 19, 4, 10, PieceKind::L);
        game.current = Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 0,
            y: 19,
        };
        game.step_down(&mut thread_rng());

        assert_eq!(game.score, 100);
        assert_eq!(game.lines, 10);
        assert_eq!(game.level, 2);
        assert_eq!(game.fall_interval_ms, 750);
    }

    #[test]
    fn fall_interval_never_drops_below_the_floor() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.lines = 199;
        fill_row(&mut game, 19, 4, 10, PieceKind::L);
        game.current = Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 0,
            y: 19,
        };
        game.step_down(&mut thread_rng());

        assert_eq!(game.level, 21);
        assert_eq!(game.fall_interval_ms, MIN_FALL_MS);
    }

    #[test]
    fn hard_drop_locks_immediately() {
        let mut game = started(PieceKind::O, PieceKind::T);
        game.apply_input(TetrisInput::HardDrop, &mut thread_rng());

        assert_eq!(game.grid[18][4], Some(PieceKind::O));
        assert_eq!(game.grid[18][5], Some(PieceKind::O));
        assert_eq!(game.grid[19][4], Some(PieceKind::O));
        assert_eq!(game.grid[19][5], Some(PieceKind::O));
        assert_eq!(game.current.kind, PieceKind::T);
    }

    #[test]
    fn blocked_spawn_ends_the_run() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.grid[1][4] = Some(PieceKind::T);
        game.current = Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 0,
            y: 19,
        };
        game.step_down(&mut thread_rng());

        assert!(game.game_over);
        assert_eq!(game.grid[19][0], Some(PieceKind::I));
    }

    #[test]
    fn lock_discards_cells_above_the_top() {
        let mut game = started(PieceKind::T, PieceKind::O);
        game.grid[1][4] = Some(PieceKind::L);
        game.grid[1][5] = Some(PieceKind::L);
        game.grid[1][6] = Some(PieceKind::L);
        // T at y = -1 rests on the filled row; only its y >= 0 cells settle.
        game.current = Piece {
            kind: PieceKind::T,
            rotation: 0,
            x: 4,
            y: -1,
        };
        game.step_down(&mut thread_rng());

        assert_eq!(game.grid[0][4], Some(PieceKind::T));
        assert_eq!(game.grid[0][5], Some(PieceKind::T));
        assert_eq!(game.grid[0][6], Some(PieceKind::T));
    }

    #[test]
    fn restart_from_game_over_starts_a_fresh_run() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.score = 300;
        game.game_over = true;
        game.high_score = 300;

        game.handle_input(KeyEvent::from(KeyCode::Enter));
        assert!(!game.game_over);
        assert!(game.started);
        assert_eq!(game.score, 0);
        assert_eq!(game.lines, 0);
        assert_eq!(game.level, 1);
        assert_eq!(game.high_score, 300);
        assert!(game.grid.iter().flatten().all(|cell| cell.is_none()));
    }

    #[test]
    fn inputs_are_blocked_while_paused() {
        let mut game = started(PieceKind::I, PieceKind::O);
        game.paused = true;
        let x = game.current.x;
        game.handle_input(KeyEvent::from(KeyCode::Left));
        assert_eq!(game.current.x, x);
    }
}
