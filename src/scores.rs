use std::fs;
use std::path::PathBuf;

pub const NUM_GAMES: usize = 4;

/// Display names in tab order.
pub const GAME_NAMES: [&str; NUM_GAMES] = ["Snake", "Tetris", "Flappy Bird", "Car Racing"];

/// Keys in the scores file, one `key=value` line per game.
const GAME_KEYS: [&str; NUM_GAMES] = ["snake.best", "tetris.best", "flappy.best", "racing.best"];

const SCORES_FILE: &str = "arcade-hub.scores";

pub struct ScoreStore {
    best: [u32; NUM_GAMES],
    /// Latched per game once its final score is recorded, cleared on restart.
    submitted: [bool; NUM_GAMES],
    path: PathBuf,
}

impl ScoreStore {
    pub fn load() -> Self {
        Self::with_path(Self::store_path())
    }

    pub(crate) fn with_path(path: PathBuf) -> Self {
        let mut store = Self {
            best: [0; NUM_GAMES],
            submitted: [false; NUM_GAMES],
            path,
        };
        store.read_file();
        store
    }

    fn store_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SCORES_FILE);
            }
        }
        PathBuf::from(SCORES_FILE)
    }

    /// Unknown keys and unparseable values are skipped; their games keep 0.
    fn read_file(&mut self) {
        let Ok(data) = fs::read_to_string(&self.path) else {
            return;
        };
        for line in data.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Some(idx) = GAME_KEYS.iter().position(|k| *k == key.trim()) else {
                continue;
            };
            if let Ok(best) = value.trim().parse::<u32>() {
                self.best[idx] = best;
            }
        }
    }

    // Persistence is best effort; a failed write is silently dropped.
    fn write_file(&self) {
        let mut data = String::new();
        for (key, best) in GAME_KEYS.iter().zip(self.best) {
            data.push_str(&format!("{key}={best}\n"));
        }
        let _ = fs::write(&self.path, data);
    }

    pub fn best(&self, game: usize) -> u32 {
        if game >= NUM_GAMES {
            return 0;
        }
        self.best[game]
    }

    /// Records a finished run. Returns true when it set a new best, the only
    /// case that rewrites the file.
    pub fn record(&mut self, game: usize, score: u32) -> bool {
        if game >= NUM_GAMES || score <= self.best[game] {
            return false;
        }
        self.best[game] = score;
        self.write_file();
        true
    }

    /// Check if a game's final score was already recorded this run.
    pub fn was_submitted(&self, game: usize) -> bool {
        game < NUM_GAMES && self.submitted[game]
    }

    pub fn mark_submitted(&mut self, game: usize) {
        if game < NUM_GAMES {
            self.submitted[game] = true;
        }
    }

    /// Clear the latch (called when the game leaves its game-over state).
    pub fn clear_submitted(&mut self, game: usize) {
        if game < NUM_GAMES {
            self.submitted[game] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "arcade-hub-test-{}-{}",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn missing_file_means_no_bests() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let store = ScoreStore::with_path(path);
        for game in 0..NUM_GAMES {
            assert_eq!(store.best(game), 0);
        }
    }

    #[test]
    fn garbage_lines_fall_back_to_zero() {
        let path = temp_path("garbage");
        fs::write(
            &path,
            "snake.best=abc\ntetris.best=-5\nflappy.best=12\nnot a line\nunknown.key=9\n",
        )
        .unwrap();
        let store = ScoreStore::with_path(path.clone());
        assert_eq!(store.best(0), 0);
        assert_eq!(store.best(1), 0);
        assert_eq!(store.best(2), 12);
        assert_eq!(store.best(3), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn record_persists_only_improvements() {
        let path = temp_path("record");
        let _ = fs::remove_file(&path);
        let mut store = ScoreStore::with_path(path.clone());
        assert!(store.record(0, 30));
        assert!(!store.record(0, 20));
        assert!(!store.record(0, 30));
        assert!(store.record(0, 50));

        let reloaded = ScoreStore::with_path(path.clone());
        assert_eq!(reloaded.best(0), 50);
        assert_eq!(reloaded.best(1), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn each_game_keeps_its_own_best() {
        let path = temp_path("per-game");
        let _ = fs::remove_file(&path);
        let mut store = ScoreStore::with_path(path.clone());
        store.record(0, 10);
        store.record(1, 400);
        store.record(3, 77);

        let reloaded = ScoreStore::with_path(path.clone());
        assert_eq!(reloaded.best(0), 10);
        assert_eq!(reloaded.best(1), 400);
        assert_eq!(reloaded.best(2), 0);
        assert_eq!(reloaded.best(3), 77);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn submission_latch_round_trips() {
        let path = temp_path("latch");
        let _ = fs::remove_file(&path);
        let mut store = ScoreStore::with_path(path);
        assert!(!store.was_submitted(2));
        store.mark_submitted(2);
        assert!(store.was_submitted(2));
        assert!(!store.was_submitted(1));
        store.clear_submitted(2);
        assert!(!store.was_submitted(2));
    }

    #[test]
    fn out_of_range_games_are_ignored() {
        let path = temp_path("range");
        let _ = fs::remove_file(&path);
        let mut store = ScoreStore::with_path(path);
        assert_eq!(store.best(9), 0);
        assert!(!store.record(9, 100));
        store.mark_submitted(9);
        assert!(!store.was_submitted(9));
    }
}
