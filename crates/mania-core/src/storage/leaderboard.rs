//! Per-song leaderboard files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::chart::Difficulty;
use crate::config::leaderboard::DIR_NAME;
use crate::error::{Error, Result};
use crate::play::ResultSummary;
use crate::score::{Leaderboard, LeaderboardEntry, RankedResult};

use super::{read_json, write_bytes_atomic};

/// Leaderboards stored under `<songs_dir>/<song_id>/leaderboard/<difficulty>.json`.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    songs_dir: PathBuf,
}

impl LeaderboardStore {
    pub fn new<P: AsRef<Path>>(songs_dir: P) -> Self {
        Self {
            songs_dir: songs_dir.as_ref().to_path_buf(),
        }
    }

    pub fn songs_dir(&self) -> &Path {
        &self.songs_dir
    }

    pub fn path(&self, song_id: &str, difficulty: Difficulty) -> PathBuf {
        self.songs_dir
            .join(song_id)
            .join(DIR_NAME)
            .join(format!("{}.json", difficulty.file_stem()))
    }

    /// Stored board for display. Absent or corrupt data reads as empty.
    pub fn load(&self, song_id: &str, difficulty: Difficulty) -> Leaderboard {
        let path = self.path(song_id, difficulty);
        match read_json::<Vec<LeaderboardEntry>>(&path) {
            Ok(Some(entries)) => Leaderboard::from_entries(entries),
            Ok(None) => Leaderboard::default(),
            Err(e) => {
                warn!("Treating corrupt leaderboard {} as empty: {}", path.display(), e);
                Leaderboard::default()
            }
        }
    }

    /// Record a finished session and persist the new top list.
    ///
    /// A failed write is returned to the caller and the previous file is
    /// left as it was.
    pub fn submit(
        &self,
        song_id: &str,
        difficulty: Difficulty,
        result: &ResultSummary,
    ) -> Result<RankedResult> {
        self.submit_entry(
            song_id,
            difficulty,
            LeaderboardEntry::now(result),
            result.accuracy,
        )
    }

    /// Same as [`submit`](Self::submit) with a caller-built entry.
    pub fn submit_entry(
        &self,
        song_id: &str,
        difficulty: Difficulty,
        entry: LeaderboardEntry,
        accuracy: f64,
    ) -> Result<RankedResult> {
        let song_dir = self.songs_dir.join(song_id);
        if !song_dir.is_dir() {
            return Err(Error::MissingLeaderboardStorage(song_dir));
        }

        let path = self.path(song_id, difficulty);
        let mut board = self.load(song_id, difficulty);
        let ranked = board.submit(entry, accuracy);

        let bytes = serde_json::to_vec_pretty(board.entries())?;
        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            write_bytes_atomic(path, &bytes)
        };
        write(&path).map_err(|source| Error::LeaderboardWrite {
            path: path.clone(),
            source,
        })?;

        info!(
            "Leaderboard {} [{}]: {} ranked #{} of {} ({} kept)",
            song_id,
            difficulty,
            ranked.entry.name,
            ranked.rank,
            ranked.total,
            board.len()
        );
        Ok(ranked)
    }
}
