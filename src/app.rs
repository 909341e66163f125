use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::flappy::Flappy;
use crate::games::racing::Racing;
use crate::games::snake::Snake;
use crate::games::tetris::Tetris;
use crate::games::Game;
use crate::scores::ScoreStore;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Snake,
    Tetris,
    Flappy,
    Racing,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Snake, Tab::Tetris, Tab::Flappy, Tab::Racing]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Snake => " Snake ",
            Tab::Tetris => " Tetris ",
            Tab::Flappy => " Flappy Bird ",
            Tab::Racing => " Car Racing ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Snake => 1,
            Tab::Tetris => 2,
            Tab::Flappy => 3,
            Tab::Racing => 4,
        }
    }
}

fn tab_for(game: usize) -> Tab {
    match game {
        0 => Tab::Snake,
        1 => Tab::Tetris,
        2 => Tab::Flappy,
        3 => Tab::Racing,
        _ => Tab::Home,
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-3 for home screen game selection
    pub snake: Snake,
    pub tetris: Tetris,
    pub flappy: Flappy,
    pub racing: Racing,
    pub scores: ScoreStore,
    pub show_best_scores: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_store(ScoreStore::load())
    }

    fn with_store(scores: ScoreStore) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            snake: Snake::new(scores.best(0)),
            tetris: Tetris::new(scores.best(1)),
            flappy: Flappy::new(scores.best(2)),
            racing: Racing::new(scores.best(3)),
            scores,
            show_best_scores: false,
        }
    }

    pub fn on_tick(&mut self) {
        match self.current_tab {
            Tab::Home => {}
            Tab::Snake => self.snake.update(),
            Tab::Tetris => self.tetris.update(),
            Tab::Flappy => self.flappy.update(),
            Tab::Racing => self.racing.update(),
        }
        self.record_finished_games();
    }

    /// Push each game's final score into the store exactly once per run.
    fn record_finished_games(&mut self) {
        let games: [(usize, bool, u32); 4] = [
            (0, self.snake.is_game_over(), self.snake.get_score()),
            (1, self.tetris.is_game_over(), self.tetris.get_score()),
            (2, self.flappy.is_game_over(), self.flappy.get_score()),
            (3, self.racing.is_game_over(), self.racing.get_score()),
        ];
        for (idx, game_over, score) in games {
            if game_over && !self.scores.was_submitted(idx) {
                self.scores.record(idx, score);
                self.scores.mark_submitted(idx);
            }
            if !game_over && self.scores.was_submitted(idx) {
                self.scores.clear_submitted(idx);
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.switch_tab(Tab::Home);
                    return;
                }
            }
            _ => {}
        }

        // Home screen shortcuts and tile navigation
        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => {
                    self.switch_tab(Tab::Snake);
                    return;
                }
                KeyCode::Char('2') => {
                    self.switch_tab(Tab::Tetris);
                    return;
                }
                KeyCode::Char('3') => {
                    self.switch_tab(Tab::Flappy);
                    return;
                }
                KeyCode::Char('4') => {
                    self.switch_tab(Tab::Racing);
                    return;
                }
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    self.show_best_scores = !self.show_best_scores;
                    return;
                }
                KeyCode::Right => {
                    self.selected_game = (self.selected_game + 1) % 4;
                    return;
                }
                KeyCode::Left => {
                    self.selected_game = (self.selected_game + 3) % 4;
                    return;
                }
                KeyCode::Enter => {
                    self.switch_tab(tab_for(self.selected_game));
                    return;
                }
                _ => {}
            }
        }

        // Forward to the active game
        match self.current_tab {
            Tab::Home => {}
            Tab::Snake => self.snake.handle_input(key),
            Tab::Tetris => self.tetris.handle_input(key),
            Tab::Flappy => self.flappy.handle_input(key),
            Tab::Racing => self.racing.handle_input(key),
        }
    }

    /// Leaving a game tab dismisses that game: any final score is recorded
    /// first, then its state is torn down to the idle screen.
    fn switch_tab(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        self.record_finished_games();
        match self.current_tab {
            Tab::Home => {}
            Tab::Snake => self.snake.reset(),
            Tab::Tetris => self.tetris.reset(),
            Tab::Flappy => self.flappy.reset(),
            Tab::Racing => self.racing.reset(),
        }
        self.current_tab = tab;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_tab(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_tab(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
