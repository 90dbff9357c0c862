//! Helpers shared by several commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mania_core::{Difficulty, KeyConfig, SongEntry, SongLibrary};
use tracing::warn;

/// Load key bindings, falling back to the built-in layout when the file is absent.
pub fn load_key_config(path: &Path) -> Result<KeyConfig> {
    if !path.exists() {
        warn!("{} not found, using default keys", path.display());
        return Ok(KeyConfig::default());
    }
    KeyConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn scan_library(songs_dir: &Path) -> Result<SongLibrary> {
    SongLibrary::scan(songs_dir)
        .with_context(|| format!("Failed to scan songs directory {}", songs_dir.display()))
}

/// Find a song that can be played at `difficulty`.
pub fn require_chart<'a>(
    library: &'a SongLibrary,
    song_id: &str,
    difficulty: Difficulty,
) -> Result<&'a SongEntry> {
    let Some(song) = library.find(song_id) else {
        bail!("Song '{}' not found in {}", song_id, library.root().display());
    };
    if !song.has_difficulty(difficulty) {
        let available: Vec<&str> = song.difficulties.iter().map(|d| d.file_stem()).collect();
        bail!(
            "Song '{}' has no {} chart (available: {})",
            song_id,
            difficulty,
            available.join(", ")
        );
    }
    Ok(song)
}
