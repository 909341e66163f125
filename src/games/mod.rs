use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub mod flappy;
pub mod racing;
pub mod snake;
pub mod tetris;

/// Surface every game exposes to the shell: ticked by the event loop while
/// its tab is active, fed raw key events, rendered into the content area.
pub trait Game {
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}
