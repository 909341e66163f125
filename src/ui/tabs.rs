use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

/// Signature color a tab lights up with while active, matching its game.
fn accent(tab: Tab) -> Color {
    match tab {
        Tab::Home => Color::Rgb(80, 200, 255),
        Tab::Snake => Color::Rgb(120, 230, 120),
        Tab::Tetris => Color::Rgb(185, 95, 225),
        Tab::Flappy => Color::Rgb(255, 215, 70),
        Tab::Racing => Color::Rgb(225, 85, 85),
    }
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(accent(*t)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .title(" 🕹 Arcade Hub ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.current_tab.index())
        // The titles carry their own colors; keep the selection patch plain.
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
