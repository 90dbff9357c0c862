use serde::{Deserialize, Serialize};

use crate::chart::Difficulty;

use super::{ScoreTracker, TierCounts};

/// Final numbers of a completed session, handed to the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub song_id: String,
    pub difficulty: Difficulty,
    pub player_name: String,
    pub score: u64,
    /// Hits over total notes, 0..=1.
    pub accuracy: f64,
    pub max_combo: u32,
    pub counts: TierCounts,
}

impl ResultSummary {
    pub fn from_tracker(
        song_id: impl Into<String>,
        difficulty: Difficulty,
        player_name: impl Into<String>,
        tracker: &ScoreTracker,
    ) -> Self {
        Self {
            song_id: song_id.into(),
            difficulty,
            player_name: player_name.into(),
            score: tracker.score(),
            accuracy: tracker.accuracy(),
            max_combo: tracker.max_combo(),
            counts: tracker.counts(),
        }
    }
}
