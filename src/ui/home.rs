use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::scores::{ScoreStore, GAME_NAMES, NUM_GAMES};

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════════════════════╗
 ║   █████╗ ██████╗  ██████╗ █████╗ ██████╗ ███████╗   ██╗  ██╗██╗   ██╗██████╗  ║
 ║  ██╔══██╗██╔══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝   ██║  ██║██║   ██║██╔══██╗ ║
 ║  ███████║██████╔╝██║     ███████║██║  ██║█████╗     ███████║██║   ██║██████╔╝ ║
 ║  ██╔══██║██╔══██╗██║     ██╔══██║██║  ██║██╔══╝     ██╔══██║██║   ██║██╔══██╗ ║
 ║  ██║  ██║██║  ██║╚██████╗██║  ██║██████╔╝███████╗   ██║  ██║╚██████╔╝██████╔╝ ║
 ║  ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝   ╚═╝  ╚═╝ ╚═════╝ ╚═════╝  ║
 ╚═══════════════════════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; NUM_GAMES] = [
    GameTile {
        key: "1",
        icon: "🐍",
        name: "Snake",
        desc: "Classic snake game\nwith modern twists",
        color: Color::Rgb(120, 230, 120),
        border_color: Color::Rgb(50, 120, 50),
    },
    GameTile {
        key: "2",
        icon: "🧩",
        name: "Tetris",
        desc: "Stack blocks and\nclear lines",
        color: Color::Rgb(185, 95, 225),
        border_color: Color::Rgb(95, 60, 120),
    },
    GameTile {
        key: "3",
        icon: "🐤",
        name: "Flappy Bird",
        desc: "Navigate through\nobstacles",
        color: Color::Rgb(255, 215, 70),
        border_color: Color::Rgb(130, 110, 40),
    },
    GameTile {
        key: "4",
        icon: "🏎",
        name: "Car Racing",
        desc: "High-speed racing\nadventure",
        color: Color::Rgb(225, 85, 85),
        border_color: Color::Rgb(120, 50, 50),
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, best: u32, selected: bool) {
    let border_color = if selected {
        Color::Rgb(255, 220, 80)
    } else {
        tile.border_color
    };
    let border_type = if selected {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected {
        Color::Rgb(255, 255, 255)
    } else {
        tile.color
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}] ", tile.key),
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(
            tile.name,
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(
            desc_line,
            Style::default().fg(if selected {
                Color::Rgb(180, 180, 200)
            } else {
                Color::Rgb(120, 120, 140)
            }),
        )));
    }

    if best > 0 {
        lines.push(Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::Rgb(120, 120, 140))),
            Span::styled(
                format!("{}", best),
                Style::default()
                    .fg(Color::Rgb(255, 215, 0))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No score yet",
            Style::default().fg(Color::Rgb(70, 70, 90)),
        )));
    }

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn key_line(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    match game_idx {
        0 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🐍 Snake",
                Style::default()
                    .fg(Color::Rgb(120, 230, 120))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Eat the food, dodge the walls and yourself!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            key_line("    ↑ ↓ ← → / WASD   ", "Steer"),
            key_line("    Space            ", "Start"),
            key_line("    R                ", "Restart"),
            key_line("    P                ", "Pause"),
        ],
        1 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🧩 Tetris",
                Style::default()
                    .fg(Color::Rgb(185, 95, 225))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Clear lines before the well fills up!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            key_line("    ← / →            ", "Move piece"),
            key_line("    ↑ / Space        ", "Rotate"),
            key_line("    ↓                ", "Soft drop"),
            key_line("    Enter            ", "Hard drop"),
            key_line("    R                ", "Restart"),
            key_line("    P                ", "Pause"),
        ],
        2 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🐤 Flappy Bird",
                Style::default()
                    .fg(Color::Rgb(255, 215, 70))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Thread the gaps, one flap at a time!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            key_line("    Space / ↑        ", "Flap"),
            key_line("    R                ", "Restart"),
            key_line("    P                ", "Pause"),
        ],
        3 => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  🏎 Car Racing",
                Style::default()
                    .fg(Color::Rgb(225, 85, 85))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Weave through traffic as the road speeds up!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
            Line::from(""),
            key_line("    ← / →            ", "Change lane"),
            key_line("    R                ", "Restart"),
            key_line("    P                ", "Pause"),
        ],
        _ => vec![],
    }
}

pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    selected_game: usize,
    show_best_scores: bool,
    scores: &ScoreStore,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(9),  // Game tiles
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ⚡ Classic arcade games, reimagined for the terminal ⚡  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games · ←/→ Select · Enter to Play ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let tile_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(games_inner);

    for i in 0..NUM_GAMES {
        render_game_tile(
            frame,
            tile_cols[i],
            &GAME_TILES[i],
            scores.best(i),
            selected_game == i,
        );
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🔧 Navigation",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )),
        key_line("    Tab / Shift+Tab  ", "Switch tabs"),
        key_line("    1-4              ", "Launch game"),
        key_line("    ← / →            ", "Select game"),
        key_line("    Enter            ", "Play selected"),
        key_line("    Esc              ", "Return to Home"),
        key_line("    q / Ctrl+C       ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  🎮 Common",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )),
        key_line("    Space            ", "Start game"),
        key_line("    Enter / Space    ", "Restart after game over"),
        key_line("    R                ", "Reset game"),
        key_line("    P                ", "Pause / Unpause"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(200, 120, 255))
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let game_ctrl = Paragraph::new(game_controls(selected_game)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} Control ", GAME_TILES[selected_game].name))
            .title_style(
                Style::default()
                    .fg(GAME_TILES[selected_game].color)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled("v0.1.0", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled(
            "H",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Best Scores", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);

    if show_best_scores {
        render_best_scores_overlay(frame, area, scores);
    }
}

fn render_best_scores_overlay(frame: &mut Frame, area: Rect, scores: &ScoreStore) {
    let overlay_w = 44u16.min(area.width.saturating_sub(4));
    let overlay_h = 12u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 Best Scores ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (game_idx, tile) in GAME_TILES.iter().enumerate() {
        let best = scores.best(game_idx);
        let mut spans = vec![
            Span::styled(format!("  {} ", tile.icon), Style::default()),
            Span::styled(
                format!("{:<12}", GAME_NAMES[game_idx]),
                Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
            ),
        ];
        if best > 0 {
            spans.push(Span::styled(
                format!("{}", best),
                Style::default()
                    .fg(Color::Rgb(255, 215, 0))
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                "No score yet",
                Style::default().fg(Color::Rgb(60, 60, 80)),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled(
            "H",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
