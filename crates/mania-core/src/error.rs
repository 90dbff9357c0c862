use std::path::PathBuf;

use thiserror::Error;

use crate::chart::Difficulty;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed beatmap{}: {reason}", format_index(.index))]
    MalformedBeatmap {
        index: Option<usize>,
        reason: String,
    },

    #[error("Audio not found for song at {0:?}")]
    MissingAudio(PathBuf),

    #[error("Beatmap not found: {song_id} [{difficulty}]")]
    MissingBeatmap {
        song_id: String,
        difficulty: Difficulty,
    },

    #[error("Leaderboard storage not available at {0:?}")]
    MissingLeaderboardStorage(PathBuf),

    #[error("Song not found: {0}")]
    SongNotFound(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Invalid hit windows: {0}")]
    InvalidHitWindows(String),

    #[error("Lane {lane} out of range (lane count {lane_count})")]
    InvalidLane { lane: usize, lane_count: usize },

    #[error("Failed to write leaderboard {path:?}: {source}")]
    LeaderboardWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn format_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (item #{})", i),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn malformed(index: Option<usize>, reason: impl Into<String>) -> Self {
        Error::MalformedBeatmap {
            index,
            reason: reason.into(),
        }
    }
}
