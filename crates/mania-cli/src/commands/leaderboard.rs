//! Leaderboard command: print a stored board.

use std::path::Path;

use anyhow::Result;
use mania_core::{Difficulty, LeaderboardStore, format_leaderboard};

pub fn run(songs_dir: &Path, song_id: &str, difficulty: Difficulty, json: bool) -> Result<()> {
    let store = LeaderboardStore::new(songs_dir);
    let board = store.load(song_id, difficulty);

    if json {
        println!("{}", serde_json::to_string_pretty(board.entries())?);
    } else {
        println!("{} {}", song_id, format_leaderboard(board.entries(), difficulty));
    }
    Ok(())
}
